use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use html_toc_config::{Config, IGNORE_FILE_NAME};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use log::{debug, warn};

use crate::paths::{absolutize, normalize_path, relative_to};
use crate::{OperationError, ScanOptions};

/// A file selected for processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    pub absolute: PathBuf,
    /// Path relative to the project root; absolute when outside it.
    pub relative: PathBuf,
}

/// Resolve the files a scan should visit, sorted and de-duplicated.
///
/// Directories are walked and filtered through the include patterns; files
/// named explicitly skip the include check. Exclude patterns and the root
/// `.html-toc-ignore` apply to both.
pub(crate) fn collect_targets(
    config: &Config,
    scan: &ScanOptions,
) -> Result<Vec<Target>, OperationError> {
    let root = normalize_path(&config.project.root);
    let working_dir = &config.sources.working_directory;
    let root_ignore = if scan.respect_ignore {
        load_root_ignore(&root)
    } else {
        None
    };
    let filter = TargetFilter {
        config,
        root: &root,
        ignore: root_ignore.as_ref(),
    };

    let requested: Vec<PathBuf> = if scan.paths.is_empty() {
        vec![root.clone()]
    } else {
        scan.paths
            .iter()
            .map(|path| absolutize(path, working_dir))
            .collect()
    };

    let mut targets = BTreeMap::new();
    for path in requested {
        if path.is_file() {
            if let Some(target) = filter.accept(&path, true) {
                targets.insert(target.relative.clone(), target);
            }
        } else if path.is_dir() {
            for file in walk(&path, scan.respect_ignore)? {
                if let Some(target) = filter.accept(&file, false) {
                    targets.insert(target.relative.clone(), target);
                }
            }
        } else {
            return Err(OperationError::InvalidInput(format!(
                "path not found: {}",
                path.display()
            )));
        }
    }

    Ok(targets.into_values().collect())
}

struct TargetFilter<'a> {
    config: &'a Config,
    root: &'a Path,
    ignore: Option<&'a Gitignore>,
}

impl TargetFilter<'_> {
    fn accept(&self, absolute: &Path, explicit: bool) -> Option<Target> {
        let relative = relative_to(absolute, self.root);
        let matchable = relative.as_deref().unwrap_or(absolute);

        if !explicit && !self.config.scan.include.matches(matchable) {
            return None;
        }
        if self.config.scan.exclude.matches(matchable)
            || self.config.project.exclude.matches(matchable)
        {
            debug!("excluded by pattern: {}", matchable.display());
            return None;
        }
        if let (Some(ignore), Some(relative)) = (self.ignore, relative.as_deref()) {
            if ignore
                .matched_path_or_any_parents(relative, false)
                .is_ignore()
            {
                debug!("ignored via {IGNORE_FILE_NAME}: {}", relative.display());
                return None;
            }
        }

        Some(Target {
            absolute: absolute.to_path_buf(),
            relative: relative.unwrap_or_else(|| absolute.to_path_buf()),
        })
    }
}

fn load_root_ignore(root: &Path) -> Option<Gitignore> {
    let path = root.join(IGNORE_FILE_NAME);
    if !path.is_file() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&path) {
        warn!("failed to read {}: {err}", path.display());
    }
    match builder.build() {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            warn!("ignoring malformed {}: {err}", path.display());
            None
        }
    }
}

fn walk(dir: &Path, respect_ignore: bool) -> Result<Vec<PathBuf>, OperationError> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .filter_entry(|entry| entry.file_name() != ".git");
    if respect_ignore {
        builder.add_custom_ignore_filename(IGNORE_FILE_NAME);
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|err| OperationError::Io {
            path: dir.to_path_buf(),
            source: err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk failed")),
        })?;
        if entry.file_type().is_some_and(|kind| kind.is_file()) {
            files.push(normalize_path(entry.path()));
        }
    }
    Ok(files)
}
