use serde::Serialize;
use std::path::{Path, PathBuf};

/// Locate `name`: the project's `node_modules/.bin` first, then `PATH`.
pub fn find_bin(name: &str, project_root: &Path) -> Option<PathBuf> {
    let local = project_root.join("node_modules").join(".bin").join(name);
    if local.exists() {
        return Some(local);
    }
    which::which(name).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Arguments installing the declared dependencies.
    pub fn install_args(&self) -> Vec<&'static str> {
        vec!["install"]
    }

    /// Arguments adding `packages` as dependencies.
    pub fn add_args<'a>(&self, packages: &[&'a str]) -> Vec<&'a str> {
        let mut args = match self {
            Self::Yarn => vec!["add"],
            Self::Npm => vec!["install"],
        };
        args.extend_from_slice(packages);
        args
    }

    /// Arguments adding `packages` as development dependencies.
    pub fn add_dev_args<'a>(&self, packages: &[&'a str]) -> Vec<&'a str> {
        let mut args = match self {
            Self::Yarn => vec!["add", "--dev"],
            Self::Npm => vec!["install", "--save-dev"],
        };
        args.extend_from_slice(packages);
        args
    }
}

/// Prefer yarn when it is on `PATH`.
pub fn detect_package_manager() -> PackageManager {
    if which::which("yarn").is_ok() {
        PackageManager::Yarn
    } else {
        PackageManager::Npm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_local_bin_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let bin_dir = dir.path().join("node_modules").join(".bin");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::write(bin_dir.join("tailwindcss-test-only"), "").unwrap();

        assert_eq!(
            find_bin("tailwindcss-test-only", dir.path()),
            Some(bin_dir.join("tailwindcss-test-only"))
        );
    }

    #[test]
    fn test_missing_bin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_bin("definitely-not-a-real-tool-r3f", dir.path()), None);
    }

    #[test]
    fn test_package_manager_args() {
        assert_eq!(PackageManager::Yarn.install_args(), vec!["install"]);
        assert_eq!(PackageManager::Npm.install_args(), vec!["install"]);
        assert_eq!(
            PackageManager::Yarn.add_args(&["styled-components"]),
            vec!["add", "styled-components"]
        );
        assert_eq!(
            PackageManager::Npm.add_args(&["styled-components"]),
            vec!["install", "styled-components"]
        );
        assert_eq!(
            PackageManager::Yarn.add_dev_args(&["babel-plugin-styled-components"]),
            vec!["add", "--dev", "babel-plugin-styled-components"]
        );
        assert_eq!(
            PackageManager::Npm.add_dev_args(&["babel-plugin-styled-components"]),
            vec!["install", "--save-dev", "babel-plugin-styled-components"]
        );
    }
}
