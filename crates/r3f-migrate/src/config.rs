use crate::error::MigrateError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for one migration run. Every field has a default matching the
/// starter template, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Directories searched for target files, relative to the project root.
    pub source_dirs: Vec<String>,
    /// Base names (without extension) of the files to migrate.
    pub target_names: Vec<String>,
    pub extensions: Vec<String>,
    /// Global style sheet compiled for the style table and then replaced.
    pub global_stylesheet: String,
    pub tailwind_config: String,
    /// Source compiled to produce the replacement global sheet.
    pub base_layer_source: String,
    pub class_attribute: String,
    pub component_suffix: String,
    /// Start generated style files with `'use client'`.
    pub client_directive: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            source_dirs: vec!["src".into(), "app".into()],
            target_names: vec!["Layout".into(), "Instructions".into()],
            extensions: vec!["jsx".into(), "tsx".into()],
            global_stylesheet: "app/global.css".into(),
            tailwind_config: "tailwind.config.js".into(),
            base_layer_source: "@tailwind base;".into(),
            class_attribute: codemod_core::scan::DEFAULT_CLASS_ATTRIBUTE.into(),
            component_suffix: codemod_core::synthesize::DEFAULT_COMPONENT_SUFFIX.into(),
            client_directive: true,
        }
    }
}

impl MigrationConfig {
    pub fn from_json(json: &str) -> Result<Self, MigrateError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MigrateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self, MigrateError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(MigrateError::io(path))?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), MigrateError> {
        if self.class_attribute.is_empty() {
            return Err(MigrateError::Config("class_attribute must not be empty".into()));
        }
        let valid_suffix = self
            .component_suffix
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
        if !valid_suffix {
            return Err(MigrateError::Config(format!(
                "component_suffix '{}' is not an identifier fragment",
                self.component_suffix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(MigrationConfig::from_json("{}").unwrap(), MigrationConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            MigrationConfig::from_json(r#"{"target_names": ["Page"], "client_directive": false}"#)
                .unwrap();
        assert_eq!(config.target_names, vec!["Page"]);
        assert!(!config.client_directive);
        assert_eq!(config.global_stylesheet, "app/global.css");
    }

    #[test]
    fn test_bad_suffix_rejected() {
        assert!(matches!(
            MigrationConfig::from_json(r#"{"component_suffix": "-style"}"#),
            Err(MigrateError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            MigrationConfig::from_json("{"),
            Err(MigrateError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migrate.json");
        std::fs::write(&path, r#"{"source_dirs": ["components"]}"#).unwrap();
        let config = MigrationConfig::load(&path).await.unwrap();
        assert_eq!(config.source_dirs, vec!["components"]);
    }
}
