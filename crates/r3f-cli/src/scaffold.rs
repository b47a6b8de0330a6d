use crate::error::CliError;
use r3f_common::project::validate_project_name;
use r3f_migrate::{MigrationConfig, MigrationReport};
use r3f_tools::detect_package_manager;
use r3f_tools::runners::{git, package_manager};
use std::path::PathBuf;

pub const DEFAULT_TEMPLATE: &str = "https://github.com/pmndrs/react-three-next";
pub const DEFAULT_BRANCH: &str = "main";

/// Runtime packages the styled-components variant needs.
pub const STYLED_PACKAGES: &[&str] = &["styled-components", "react-is"];
pub const STYLED_DEV_PACKAGES: &[&str] = &["babel-plugin-styled-components"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Style {
    /// Keep the template's utility classes
    Tailwind,
    /// Migrate utility classes to styled-components
    Styled,
}

/// One `new` invocation.
pub struct Scaffold {
    pub name: String,
    pub parent: PathBuf,
    pub style: Style,
    pub template: String,
    pub branch: String,
}

impl Scaffold {
    pub fn destination(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    /// Clone, install, optionally migrate, commit. Returns the migration
    /// report when a migration ran.
    pub async fn run(&self) -> Result<Option<MigrationReport>, CliError> {
        validate_project_name(&self.name).map_err(CliError::Project)?;
        let dest = self.destination();
        if dest.exists() {
            return Err(CliError::Project(format!(
                "'{}' already exists",
                dest.display()
            )));
        }

        tracing::info!(name = %self.name, style = ?self.style, "creating project");
        git::clone_template(&self.template, &self.branch, &dest).await?;

        let pm = detect_package_manager();
        tracing::info!(manager = pm.program(), "installing packages");
        package_manager::install(pm, &dest).await?;

        let report = match self.style {
            Style::Tailwind => None,
            Style::Styled => {
                package_manager::add(pm, &dest, STYLED_PACKAGES).await?;
                package_manager::add_dev(pm, &dest, STYLED_DEV_PACKAGES).await?;
                let report =
                    r3f_migrate::migrate_project(&dest, MigrationConfig::default(), false).await?;
                Some(report)
            }
        };

        if let Err(e) = git::init_repository(&dest, "Initial commit from create-r3f-app").await {
            tracing::warn!("could not initialize git repository: {e}");
        }

        tracing::info!(dest = %dest.display(), "project ready");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold(parent: PathBuf, name: &str) -> Scaffold {
        Scaffold {
            name: name.to_string(),
            parent,
            style: Style::Styled,
            template: "https://example.invalid/template.git".to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    #[tokio::test]
    async fn test_existing_destination_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();
        let result = scaffold(dir.path().to_path_buf(), "taken").run().await;
        assert!(matches!(result, Err(CliError::Project(_))));
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = scaffold(dir.path().to_path_buf(), "../escape").run().await;
        assert!(matches!(result, Err(CliError::Project(_))));
        assert!(!dir.path().join("../escape").exists());
    }

    #[test]
    fn test_styled_variant_packages() {
        assert!(STYLED_PACKAGES.contains(&"styled-components"));
        assert!(STYLED_PACKAGES.contains(&"react-is"));
        assert_eq!(STYLED_DEV_PACKAGES, &["babel-plugin-styled-components"]);
    }
}
