use std::fs;
use std::io::{self, Write};
use std::path::Path;

use similar::TextDiff;
use tempfile::Builder;

/// Replace `path` with `contents` through a sibling temporary file and a
/// rename, so readers never observe a half-written document.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = Builder::new().prefix(".html-toc").tempfile_in(parent)?;
    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mode = metadata.permissions().mode();
            let _ = fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode));
        }
    }

    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}

/// Unified diff between two versions of `path`, `None` when they match.
pub fn unified_diff(original: &str, modified: &str, path: &str) -> Option<String> {
    if original == modified {
        return None;
    }

    let diff = TextDiff::from_lines(original, modified);
    let rendered = diff
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string();
    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn identical_content_has_no_diff() {
        assert!(unified_diff("<p>a</p>\n", "<p>a</p>\n", "index.html").is_none());
    }

    #[test]
    fn diff_carries_headers_and_changed_lines() {
        let diff = unified_diff(
            "<div id=\"toc\"></div>\n<h2>A</h2>\n",
            "<div id=\"toc\"><ul></ul></div>\n<h2>A</h2>\n",
            "docs/index.html",
        )
        .expect("diff");
        assert!(diff.contains("--- a/docs/index.html"));
        assert!(diff.contains("+++ b/docs/index.html"));
        assert!(diff.contains("-<div id=\"toc\"></div>"));
        assert!(diff.contains("+<div id=\"toc\"><ul></ul></div>"));
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("page.html");
        fs::write(&path, "old").expect("seed file");

        atomic_write(&path, "new").expect("atomic write");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "new");
        let leftovers = fs::read_dir(temp.path()).expect("list dir").count();
        assert_eq!(leftovers, 1);
    }
}
