//! Configuration primitives and loader for the html-toc toolkit.
//!
//! The loader resolves configuration using a fixed precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Parsed settings are normalised into typed structures so downstream crates
//! can operate without touching raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".html-toc.toml";
pub const IGNORE_FILE_NAME: &str = ".html-toc-ignore";

const DEFAULT_MIN_LEVEL: u8 = 2;
const DEFAULT_MAX_LEVEL: u8 = 6;
const DEFAULT_CONTAINER_ID: &str = "toc";
const DEFAULT_EXCLUDED_LABEL: &str = "Index";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub project: ProjectSettings,
    pub scan: ScanSettings,
    pub toc: TocSettings,
    pub sources: ConfigSources,
}

/// Project-level settings that declare repository scope boundaries.
#[derive(Clone, Debug)]
pub struct ProjectSettings {
    pub name: Option<String>,
    pub root: PathBuf,
    pub exclude: PatternList,
}

/// Settings that decide which files the scanner picks up.
#[derive(Clone, Debug)]
pub struct ScanSettings {
    pub include: PatternList,
    pub exclude: PatternList,
}

/// Settings consumed by the TOC builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocSettings {
    /// Shallowest heading level that produces an entry.
    pub min_level: u8,
    /// Deepest heading level that produces an entry.
    pub max_level: u8,
    /// Heading labels that never produce an entry (exact match).
    pub exclude_labels: Vec<String>,
    /// `id` of the element that receives the rendered list.
    pub container_id: String,
    pub list_tag: ListTag,
}

impl TocSettings {
    /// True when `level` falls inside the configured window.
    pub fn accepts_level(&self, level: u8) -> bool {
        level >= self.min_level && level <= self.max_level
    }

    pub fn is_excluded_label(&self, label: &str) -> bool {
        self.exclude_labels.iter().any(|excluded| excluded == label)
    }
}

impl Default for TocSettings {
    fn default() -> Self {
        TocSettings {
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
            exclude_labels: vec![DEFAULT_EXCLUDED_LABEL.to_owned()],
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            list_tag: ListTag::Unordered,
        }
    }
}

/// List element used for every nesting level of the rendered TOC.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ListTag {
    #[default]
    Unordered,
    Ordered,
}

impl ListTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ListTag::Unordered => "ul",
            ListTag::Ordered => "ol",
        }
    }
}

impl fmt::Display for ListTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListTag {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ul" => Ok(ListTag::Unordered),
            "ol" => Ok(ListTag::Ordered),
            _ => Err(()),
        }
    }
}

/// Pattern plus compiled matcher helper.
#[derive(Clone, Debug)]
pub struct Pattern {
    original: String,
    matcher: GlobMatcher,
}

impl Pattern {
    fn new(source: ConfigSource, value: String) -> Result<Self, ConfigValidationError> {
        match Glob::new(&value) {
            Ok(glob) => Ok(Pattern {
                original: value,
                matcher: glob.compile_matcher(),
            }),
            Err(err) => Err(ConfigValidationError::new(
                Some(source),
                format!("invalid glob pattern '{value}': {err}"),
            )),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    fn new(patterns: Vec<Pattern>) -> Self {
        PatternList { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// True when any pattern matches `path`.
    pub fn matches(&self, path: &Path) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            project: resolved.project,
            scan: resolved.scan,
            toc: resolved.toc,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Parses a single TOML document on top of the built-in defaults, without
    /// touching the filesystem. Relative paths resolve against `base_dir`.
    pub fn from_toml_str(contents: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.into();
        let default_source = ConfigSource::default(base_dir.clone());
        let inline_source = ConfigSource {
            kind: ConfigSourceKind::Override,
            path: None,
            base_dir: base_dir.clone(),
        };

        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));
        let layer = parse_layer(contents, inline_source.clone()).map_err(|source| {
            ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            }
        })?;
        merged.merge(layer);

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            project: resolved.project,
            scan: resolved.scan,
            toc: resolved.toc,
            sources: ConfigSources {
                working_directory: base_dir,
                layers: vec![default_source, inline_source],
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    parse_layer(&contents, source).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<PartialConfig, toml::de::Error> {
    let raw: RawConfig = toml::from_str(contents)?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    let project = ProjectPartial {
        root: Some(Located::new(PathBuf::from("."), source.clone())),
        exclude: Some(Located::new(Vec::new(), source.clone())),
        ..ProjectPartial::default()
    };

    let scan = ScanPartial {
        include_patterns: Some(Located::new(
            vec!["**/*.html".into(), "**/*.htm".into()],
            source.clone(),
        )),
        exclude_patterns: Some(Located::new(
            vec!["**/node_modules/**".into(), "**/vendor/**".into()],
            source.clone(),
        )),
    };

    let toc = TocPartial {
        min_level: Some(Located::new(DEFAULT_MIN_LEVEL, source.clone())),
        max_level: Some(Located::new(DEFAULT_MAX_LEVEL, source.clone())),
        exclude_labels: Some(Located::new(
            vec![DEFAULT_EXCLUDED_LABEL.into()],
            source.clone(),
        )),
        container_id: Some(Located::new(DEFAULT_CONTAINER_ID.into(), source.clone())),
        list_tag: Some(Located::new("ul".into(), source)),
    };

    PartialConfig {
        project: Some(project),
        scan: Some(scan),
        toc: Some(toc),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    project: Option<ProjectPartial>,
    scan: Option<ScanPartial>,
    toc: Option<TocPartial>,
}

impl PartialConfig {
    fn merge(&mut self, mut other: PartialConfig) {
        if let Some(other_project) = other.project.take() {
            match &mut self.project {
                Some(project) => project.merge(other_project),
                None => self.project = Some(other_project),
            }
        }

        if let Some(other_scan) = other.scan.take() {
            match &mut self.scan {
                Some(scan) => scan.merge(other_scan),
                None => self.scan = Some(other_scan),
            }
        }

        if let Some(other_toc) = other.toc.take() {
            match &mut self.toc {
                Some(toc) => toc.merge(other_toc),
                None => self.toc = Some(other_toc),
            }
        }
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let project_partial = self.project.unwrap_or_default();
        let project_root_loc = project_partial.root.unwrap_or_else(|| {
            Located::new(
                PathBuf::from("."),
                ConfigSource::default(PathBuf::from(".")),
            )
        });

        let project_root = resolve_path(&project_root_loc);
        let project_exclude = compile_patterns(
            project_partial.exclude.unwrap_or_default(),
            "project.exclude",
            &mut errors,
        );

        let scan_partial = self.scan.unwrap_or_default();
        let scan_include = compile_patterns(
            scan_partial.include_patterns.unwrap_or_default(),
            "scan.include_patterns",
            &mut errors,
        );
        let scan_exclude = compile_patterns(
            scan_partial.exclude_patterns.unwrap_or_default(),
            "scan.exclude_patterns",
            &mut errors,
        );

        let toc = finalize_toc(self.toc.unwrap_or_default(), &mut errors);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            project: ProjectSettings {
                name: project_partial.name.map(|name| name.value),
                root: project_root,
                exclude: PatternList::new(project_exclude),
            },
            scan: ScanSettings {
                include: PatternList::new(scan_include),
                exclude: PatternList::new(scan_exclude),
            },
            toc,
        })
    }
}

fn finalize_toc(partial: TocPartial, errors: &mut Vec<ConfigValidationError>) -> TocSettings {
    let defaults = TocSettings::default();

    let min_level = partial
        .min_level
        .map(|located| check_level(located, "toc.min_level", errors))
        .unwrap_or(defaults.min_level);
    let max_level = partial
        .max_level
        .map(|located| check_level(located, "toc.max_level", errors))
        .unwrap_or(defaults.max_level);

    if min_level > max_level {
        errors.push(
            ConfigValidationError::new(
                None,
                format!("min_level ({min_level}) must not exceed max_level ({max_level})"),
            )
            .with_context("toc"),
        );
    }

    let exclude_labels = partial
        .exclude_labels
        .map(|located| located.value)
        .unwrap_or(defaults.exclude_labels);

    let container_id = match partial.container_id {
        Some(located) => {
            if located.value.trim().is_empty() {
                errors.push(
                    ConfigValidationError::new(
                        Some(located.source.clone()),
                        "container_id cannot be empty".into(),
                    )
                    .with_context("toc.container_id"),
                );
            }
            located.value
        }
        None => defaults.container_id,
    };

    let list_tag = match partial.list_tag {
        Some(located) => match located.value.parse::<ListTag>() {
            Ok(tag) => tag,
            Err(_) => {
                errors.push(
                    ConfigValidationError::new(
                        Some(located.source.clone()),
                        format!(
                            "unknown list tag '{}' (expected 'ul' or 'ol')",
                            located.value
                        ),
                    )
                    .with_context("toc.list_tag"),
                );
                defaults.list_tag
            }
        },
        None => defaults.list_tag,
    };

    TocSettings {
        min_level,
        max_level,
        exclude_labels,
        container_id,
        list_tag,
    }
}

fn check_level(
    located: Located<u8>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> u8 {
    let value = located.value;
    if value == 0 || value > 6 {
        errors.push(
            ConfigValidationError::new(
                Some(located.source),
                format!("must be between 1 and 6 (received {value})"),
            )
            .with_context(context),
        );
    }
    value
}

#[derive(Clone, Debug, Default)]
struct ProjectPartial {
    name: Option<Located<String>>,
    root: Option<Located<PathBuf>>,
    exclude: Option<Located<Vec<String>>>,
}

impl ProjectPartial {
    fn merge(&mut self, other: ProjectPartial) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.exclude.is_some() {
            self.exclude = other.exclude;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ScanPartial {
    include_patterns: Option<Located<Vec<String>>>,
    exclude_patterns: Option<Located<Vec<String>>>,
}

impl ScanPartial {
    fn merge(&mut self, other: ScanPartial) {
        if other.include_patterns.is_some() {
            self.include_patterns = other.include_patterns;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct TocPartial {
    min_level: Option<Located<u8>>,
    max_level: Option<Located<u8>>,
    exclude_labels: Option<Located<Vec<String>>>,
    container_id: Option<Located<String>>,
    list_tag: Option<Located<String>>,
}

impl TocPartial {
    fn merge(&mut self, other: TocPartial) {
        if other.min_level.is_some() {
            self.min_level = other.min_level;
        }
        if other.max_level.is_some() {
            self.max_level = other.max_level;
        }
        if other.exclude_labels.is_some() {
            self.exclude_labels = other.exclude_labels;
        }
        if other.container_id.is_some() {
            self.container_id = other.container_id;
        }
        if other.list_tag.is_some() {
            self.list_tag = other.list_tag;
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

impl Default for Located<Vec<String>> {
    fn default() -> Self {
        Located::new(Vec::new(), ConfigSource::default(PathBuf::from(".")))
    }
}

fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    let path = &located.value;
    if path.is_absolute() {
        path.clone()
    } else {
        located.source.base_dir.join(path)
    }
}

fn compile_patterns(
    located: Located<Vec<String>>,
    context: &str,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    for pattern in located.value {
        match Pattern::new(located.source.clone(), pattern) {
            Ok(compiled) => patterns.push(compiled),
            Err(err) => errors.push(err.with_context(context)),
        }
    }
    patterns
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    project: ProjectSettings,
    scan: ScanSettings,
    toc: TocSettings,
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    project: Option<RawProject>,
    #[serde(default)]
    scan: Option<RawScan>,
    #[serde(default)]
    toc: Option<RawToc>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            project: self
                .project
                .map(|project| project.into_partial(source.clone())),
            scan: self.scan.map(|scan| scan.into_partial(source.clone())),
            toc: self.toc.map(|toc| toc.into_partial(source)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
}

impl RawProject {
    fn into_partial(self, source: ConfigSource) -> ProjectPartial {
        ProjectPartial {
            name: self.name.map(|value| Located::new(value, source.clone())),
            root: self.root.map(|value| Located::new(value, source.clone())),
            exclude: self.exclude.map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawScan {
    #[serde(default)]
    include_patterns: Option<Vec<String>>,
    #[serde(default)]
    exclude_patterns: Option<Vec<String>>,
}

impl RawScan {
    fn into_partial(self, source: ConfigSource) -> ScanPartial {
        ScanPartial {
            include_patterns: self
                .include_patterns
                .map(|value| Located::new(value, source.clone())),
            exclude_patterns: self
                .exclude_patterns
                .map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawToc {
    #[serde(default)]
    min_level: Option<u8>,
    #[serde(default)]
    max_level: Option<u8>,
    #[serde(default)]
    exclude_labels: Option<Vec<String>>,
    #[serde(default)]
    container_id: Option<String>,
    #[serde(default)]
    list_tag: Option<String>,
}

impl RawToc {
    fn into_partial(self, source: ConfigSource) -> TocPartial {
        TocPartial {
            min_level: self
                .min_level
                .map(|value| Located::new(value, source.clone())),
            max_level: self
                .max_level
                .map(|value| Located::new(value, source.clone())),
            exclude_labels: self
                .exclude_labels
                .map(|value| Located::new(value, source.clone())),
            container_id: self
                .container_id
                .map(|value| Located::new(value, source.clone())),
            list_tag: self.list_tag.map(|value| Located::new(value, source)),
        }
    }
}
