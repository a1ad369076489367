use std::path::{Component, Path, PathBuf};

/// Canonicalise `.` and `..` path segments without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `path` against `base` when it is relative.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Path of `absolute` below `root`, or `None` when it lies outside.
pub fn relative_to(absolute: &Path, root: &Path) -> Option<PathBuf> {
    absolute.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Forward-slash rendering used in reports and diff headers.
pub fn display_path(path: &Path) -> String {
    if path.is_absolute() {
        return path.display().to_string();
    }
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
