use std::path::{Component, Path, PathBuf};

/// Join a configured relative path onto the project root, refusing anything
/// that would land outside it once `..` segments are resolved.
pub fn resolve_within_root(root: &Path, relative: impl AsRef<Path>) -> Result<PathBuf, String> {
    let relative = relative.as_ref();
    if relative.is_absolute() {
        return Err(format!(
            "Path '{}' must be relative to the project root",
            relative.display()
        ));
    }

    let resolved = normalize_path(&root.join(relative));
    if !resolved.starts_with(normalize_path(root)) {
        return Err(format!(
            "Path '{}' escapes project root '{}'",
            relative.display(),
            root.display()
        ));
    }
    Ok(resolved)
}

/// `path` relative to `root` for display, or `path` unchanged when it is not below `root`.
pub fn display_relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve `.` and `..` lexically. The path need not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir => {}
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stylesheet_path() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_within_root(root, "app/global.css").unwrap(),
            PathBuf::from("/project/app/global.css")
        );
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = Path::new("/project");
        assert!(resolve_within_root(root, "../../etc/passwd").is_err());
        assert!(resolve_within_root(root, "/etc/passwd").is_err());
    }

    #[test]
    fn test_resolve_allows_internal_parent() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_within_root(root, "src/../app/global.css").unwrap(),
            PathBuf::from("/project/app/global.css")
        );
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/project");
        assert_eq!(
            display_relative(root, Path::new("/project/src/Layout.jsx")),
            PathBuf::from("src/Layout.jsx")
        );
        assert_eq!(
            display_relative(root, Path::new("/elsewhere/a.jsx")),
            PathBuf::from("/elsewhere/a.jsx")
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
    }
}
