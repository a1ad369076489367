use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use html_toc_config::{Config, ConfigError, ConfigSourceKind, ListTag, LoadOptions, Pattern};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

fn pattern_strings<'a, I>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Pattern>,
{
    patterns
        .into_iter()
        .map(|p| p.original().to_string())
        .collect()
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.project.root, working_dir.join("."));
    assert!(config.project.exclude.is_empty());
    assert_eq!(
        pattern_strings(config.scan.include.iter()),
        vec!["**/*.html".to_string(), "**/*.htm".to_string()]
    );
    assert_eq!(
        pattern_strings(config.scan.exclude.iter()),
        vec!["**/node_modules/**".to_string(), "**/vendor/**".to_string()]
    );
    assert_eq!(config.toc.min_level, 2);
    assert_eq!(config.toc.max_level, 6);
    assert_eq!(config.toc.exclude_labels, vec!["Index".to_string()]);
    assert_eq!(config.toc.container_id, "toc");
    assert_eq!(config.toc.list_tag, ListTag::Unordered);

    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_and_merges_fields() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".html-toc.toml"),
        r#"
        [project]
        name = "root"
        exclude = ["**/build/**"]

        [toc]
        min_level = 1
        container_id = "contents"
        "#,
    );

    let workspace = git_root.join("workspace");
    fs::create_dir(&workspace).expect("create workspace");

    write_file(
        workspace.join(".html-toc.toml"),
        r#"
        [project]
        name = "workspace"

        [toc]
        max_level = 3
        exclude_labels = ["Index", "Changelog"]
        "#,
    );

    let override_path = workspace.join("override.toml");
    write_file(
        &override_path,
        r#"
        [toc]
        list_tag = "ol"

        [scan]
        include_patterns = ["site/**/*.html"]
        "#,
    );

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&workspace)
            .with_override_path(&override_path),
    )
    .expect("load config with precedence");

    assert_eq!(config.project.name.as_deref(), Some("workspace"));
    assert_eq!(config.project.root, canonical(&workspace));
    assert_eq!(
        pattern_strings(config.project.exclude.iter()),
        vec!["**/build/**".to_string()]
    );
    assert_eq!(
        pattern_strings(config.scan.include.iter()),
        vec!["site/**/*.html".to_string()]
    );
    assert_eq!(config.toc.min_level, 1);
    assert_eq!(config.toc.max_level, 3);
    assert_eq!(config.toc.container_id, "contents");
    assert_eq!(config.toc.list_tag, ListTag::Ordered);
    assert_eq!(
        config.toc.exclude_labels,
        vec!["Index".to_string(), "Changelog".to_string()]
    );

    let kinds: Vec<_> = config
        .sources
        .layers
        .iter()
        .map(|layer| layer.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local,
            ConfigSourceKind::Override
        ]
    );
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("missing.toml"),
    )
    .expect_err("override must exist");

    assert!(matches!(err, ConfigError::OverrideNotFound { .. }));
}

#[test]
fn out_of_range_level_surfaces_validation_error() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(
        working_dir.join(".html-toc.toml"),
        r#"
        [toc]
        min_level = 0
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("expected validation failure");

    match err {
        ConfigError::Validation(errors) => {
            let joined = errors.to_string();
            assert!(
                joined.contains("toc.min_level: must be between 1 and 6 (received 0)"),
                "unexpected error output: {joined}"
            );
            assert!(
                joined.contains("local config at"),
                "validation errors carry their source layer: {joined}"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_glob_pattern_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(
        working_dir.join(".html-toc.toml"),
        r#"
        [project]
        exclude = ["[["]
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("expected validation failure");

    match err {
        ConfigError::Validation(errors) => {
            let joined = errors.to_string();
            assert!(
                joined.contains("invalid glob pattern '[['"),
                "unexpected error output: {joined}"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_sections_fail_to_parse() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());
    write_file(
        working_dir.join(".html-toc.toml"),
        r#"
        [lint]
        rules = ["broken-links"]
        "#,
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("expected parse failure");

    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}
