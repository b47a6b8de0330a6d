use serde::Serialize;
use std::path::PathBuf;

/// What a migration run did (or, for a dry run, would have done).
/// Paths are relative to the project root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub project_root: PathBuf,
    pub dry_run: bool,
    /// Distinct class names in the compiled style table.
    pub style_table_classes: usize,
    pub files: Vec<FileReport>,
    pub style_files: Vec<StyleFileReport>,
    /// Replaced global style sheet; `None` until that stage runs.
    pub global_stylesheet: Option<PathBuf>,
    /// Unresolved class tokens across all files, first appearance order.
    pub dropped_tokens: Vec<String>,
}

impl MigrationReport {
    pub fn component_count(&self) -> usize {
        self.files.iter().map(|f| f.components.len()).sum()
    }

    pub(crate) fn record_dropped(&mut self, tokens: &[String]) {
        for token in tokens {
            if !self.dropped_tokens.contains(token) {
                self.dropped_tokens.push(token.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Components synthesized from this file, in creation order.
    pub components: Vec<String>,
    /// Elements that reused a component created earlier in the file.
    pub reused: usize,
    pub dropped_tokens: Vec<String>,
    /// False when the formatted result equals the original content or in a dry run.
    pub written: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleFileReport {
    pub path: PathBuf,
    pub components: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_dropped_dedups_in_order() {
        let mut report = MigrationReport::default();
        report.record_dropped(&["sm:flex".into(), "lg:grid".into()]);
        report.record_dropped(&["lg:grid".into(), "xl:p-4".into()]);
        assert_eq!(report.dropped_tokens, vec!["sm:flex", "lg:grid", "xl:p-4"]);
    }

    #[test]
    fn test_serializes_paths_and_counts() {
        let report = MigrationReport {
            project_root: PathBuf::from("/tmp/app"),
            files: vec![FileReport {
                path: PathBuf::from("src/Layout.jsx"),
                components: vec!["LayoutStyle".into(), "LayoutStyle1".into()],
                reused: 0,
                dropped_tokens: vec![],
                written: true,
            }],
            ..Default::default()
        };
        assert_eq!(report.component_count(), 2);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["path"], "src/Layout.jsx");
        assert_eq!(json["global_stylesheet"], serde_json::Value::Null);
    }
}
