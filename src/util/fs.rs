//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let base = Path::new("/ws");
        assert_eq!(relative_path(base, Path::new("/ws/src/a")), PathBuf::from("src/a"));
        assert_eq!(relative_path(base, base), PathBuf::new());
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/project");
        assert_eq!(
            resolve_path(base, Path::new("db/index.toml")),
            PathBuf::from("/project/db/index.toml")
        );
        assert_eq!(
            resolve_path(base, Path::new("/etc/index.toml")),
            PathBuf::from("/etc/index.toml")
        );
    }
}
