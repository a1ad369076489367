use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use html_toc_builder::{Loaded, RunOutcome, SkipReason, TocBuilder};
use html_toc_config::TocSettings;
use html_toc_dom::Dom;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::discover::{collect_targets, Target};
use crate::paths::display_path;
use crate::write::{atomic_write, unified_diff};
use crate::{OperationError, Operations, ScanOptions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TocMode {
    /// Report out-of-date files without touching them.
    #[default]
    Check,
    /// Rewrite out-of-date files in place.
    Update,
    /// Print unified diffs for out-of-date files.
    Diff,
}

#[derive(Clone, Debug, Default)]
pub struct TocOptions {
    pub scan: ScanOptions,
    pub mode: TocMode,
    /// Suppress the summary when nothing needs changing.
    pub quiet: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TocStatus {
    Unchanged,
    OutOfSync,
    Updated,
    Skipped(SkipReason),
    /// The file is not valid UTF-8.
    Unreadable,
}

#[derive(Clone, Debug)]
pub struct TocChange {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub status: TocStatus,
    pub diff: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TocOutcome {
    pub changes: Vec<TocChange>,
    pub rendered: String,
    pub exit_code: i32,
}

impl Operations {
    /// Bring the TOC of every targeted file up to date, or report which ones
    /// are stale.
    pub fn toc(&self, options: TocOptions) -> Result<TocOutcome, OperationError> {
        let targets = collect_targets(self.config(), &options.scan)?;
        debug!("toc: {} candidate files", targets.len());

        let settings = &self.config().toc;
        let changes = targets
            .par_iter()
            .map(|target| process_file(target, settings, options.mode))
            .collect::<Result<Vec<_>, _>>()?;

        let stale = changes
            .iter()
            .filter(|change| matches!(change.status, TocStatus::OutOfSync))
            .count();
        let exit_code = match options.mode {
            TocMode::Check | TocMode::Diff if stale > 0 => 1,
            _ => 0,
        };
        let rendered = render_summary(&changes, options.mode, options.quiet);

        Ok(TocOutcome {
            changes,
            rendered,
            exit_code,
        })
    }
}

fn process_file(
    target: &Target,
    settings: &TocSettings,
    mode: TocMode,
) -> Result<TocChange, OperationError> {
    let change = |status, diff| TocChange {
        path: target.relative.clone(),
        status,
        diff,
    };

    let original = match fs::read_to_string(&target.absolute) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::InvalidData => {
            warn!("skipping {}: not valid UTF-8", target.absolute.display());
            return Ok(change(TocStatus::Unreadable, None));
        }
        Err(source) => {
            return Err(OperationError::Io {
                path: target.absolute.clone(),
                source,
            })
        }
    };

    let mut host = Loaded::new(Dom::parse(&original));
    let outcome = TocBuilder::new(settings.clone()).attach(&mut host);
    match outcome {
        Some(RunOutcome::Applied(_)) => {}
        Some(RunOutcome::Skipped(reason)) => {
            debug!("skipping {}: {reason}", target.relative.display());
            return Ok(change(TocStatus::Skipped(reason), None));
        }
        None => return Ok(change(TocStatus::Unchanged, None)),
    }

    let updated = host.into_inner().to_html();
    if updated == original {
        return Ok(change(TocStatus::Unchanged, None));
    }

    match mode {
        TocMode::Check => Ok(change(TocStatus::OutOfSync, None)),
        TocMode::Diff => {
            let diff = unified_diff(&original, &updated, &display_path(&target.relative));
            Ok(change(TocStatus::OutOfSync, diff))
        }
        TocMode::Update => {
            atomic_write(&target.absolute, &updated).map_err(|source| OperationError::Io {
                path: target.absolute.clone(),
                source,
            })?;
            info!("updated TOC in {}", target.relative.display());
            Ok(change(TocStatus::Updated, None))
        }
    }
}

fn render_summary(changes: &[TocChange], mode: TocMode, quiet: bool) -> String {
    let mut lines = Vec::new();
    for change in changes {
        let path = display_path(&change.path);
        match (&change.status, mode) {
            (TocStatus::OutOfSync, TocMode::Diff) => {
                if let Some(diff) = &change.diff {
                    lines.push(diff.trim_end().to_string());
                }
            }
            (TocStatus::OutOfSync, _) => lines.push(format!("TOC out of date: {path}")),
            (TocStatus::Updated, _) => lines.push(format!("Updated TOC: {path}")),
            (TocStatus::Unreadable, _) => lines.push(format!("Skipped unreadable file: {path}")),
            _ => {}
        }
    }

    if lines.is_empty() && !quiet {
        let checked = changes
            .iter()
            .filter(|change| !matches!(change.status, TocStatus::Skipped(_)))
            .count();
        lines.push(format!("All TOCs up to date ({checked} files checked)"));
    }

    lines.join("\n")
}
