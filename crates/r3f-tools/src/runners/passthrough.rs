use super::SourceFormatter;
use crate::error::ToolError;
use std::path::Path;

/// Returns its input untouched. Used when no formatter is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughFormatter;

#[async_trait::async_trait]
impl SourceFormatter for PassthroughFormatter {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn format(&self, source: &str, _file: &Path, _project_root: &Path) -> Result<String, ToolError> {
        Ok(source.to_string())
    }
}
