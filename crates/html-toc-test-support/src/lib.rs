//! Shared test harness utilities for html-toc crates.

use std::fs;
use std::path::{Path, PathBuf};

use html_toc_config::{Config, LoadOptions, CONFIG_FILE_NAME, IGNORE_FILE_NAME};
use tempfile::TempDir;

/// Page with an empty `#toc` container and a small heading hierarchy.
pub const SAMPLE_PAGE: &str = "<!DOCTYPE html>
<html>
<body>
<div id=\"toc\"></div>
<h2>Intro</h2>
<h3>Background</h3>
<h2>Usage</h2>
</body>
</html>
";

/// Temporary project directory whose files are written on demand.
pub struct TestWorkspace {
    _dir: TempDir,
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = fs::canonicalize(dir.path()).expect("canonicalize tempdir");
        TestWorkspace { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write(CONFIG_FILE_NAME, contents)
    }

    pub fn write_ignore(&self, contents: &str) -> PathBuf {
        self.write(IGNORE_FILE_NAME, contents)
    }

    /// Load configuration as if the workspace root were the working directory.
    pub fn config(&self) -> Config {
        Config::load(LoadOptions::default().with_working_dir(&self.root)).expect("load config")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
