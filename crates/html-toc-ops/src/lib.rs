//! High-level operations shared by html-toc commands.

use std::path::PathBuf;

use html_toc_config::{Config, ConfigError};
use thiserror::Error;

mod discover;
mod document;
pub mod paths;
mod sync;
mod write;

pub use document::{DocumentSource, OutlineFormat, OutlineOutcome, RenderOutcome};
pub use sync::{TocChange, TocMode, TocOptions, TocOutcome, TocStatus};
pub use write::{atomic_write, unified_diff};

/// Operation bundle the CLI hooks into.
pub struct Operations {
    config: Config,
}

impl Operations {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Which files an operation should visit.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Files or directories; empty means the whole project root.
    pub paths: Vec<PathBuf>,
    /// Honour `.html-toc-ignore` files.
    pub respect_ignore: bool,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    InvalidInput(String),
}
