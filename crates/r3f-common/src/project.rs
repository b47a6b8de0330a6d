use std::path::{Path, PathBuf};

/// Files whose presence marks the root of a generated project.
const PROJECT_MARKERS: &[&str] = &["package.json", "tailwind.config.js", "next.config.js"];

/// Walk upward from `start` to the nearest directory holding a project marker.
/// Returns `None` if the filesystem root is reached first.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start.to_path_buf()
    };

    loop {
        if PROJECT_MARKERS.iter().any(|m| current.join(m).exists()) {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Validate a new project name: one path segment, no leading dot, no separators.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("project name is empty".to_string());
    }
    if name.starts_with('.') {
        return Err(format!("project name '{name}' must not start with '.'"));
    }
    if name.contains(['/', '\\']) || name.chars().any(char::is_whitespace) {
        return Err(format!(
            "project name '{name}' must be a single directory name without whitespace"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_project_root_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let sub = dir.path().join("src").join("components").join("dom");
        fs::create_dir_all(&sub).unwrap();

        assert_eq!(find_project_root(&sub).unwrap(), dir.path());
    }

    #[test]
    fn test_find_project_root_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tailwind.config.js"), "").unwrap();
        let file = dir.path().join("Layout.jsx");
        fs::write(&file, "").unwrap();

        assert_eq!(find_project_root(&file).unwrap(), dir.path());
    }

    #[test]
    fn test_find_project_root_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_project_root(dir.path()).is_none());
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("my-app").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name(".hidden").is_err());
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("my app").is_err());
    }
}
