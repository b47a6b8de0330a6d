use super::{run_command, SourceFormatter};
use crate::error::ToolError;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Formats through `prettier --stdin-filepath`. Prettier resolves
/// `.prettierrc` and picks the parser from the path it is given.
pub struct PrettierRunner {
    bin: PathBuf,
}

impl PrettierRunner {
    pub fn new(bin: PathBuf) -> Self {
        Self { bin }
    }
}

#[async_trait::async_trait]
impl SourceFormatter for PrettierRunner {
    fn name(&self) -> &str {
        "prettier"
    }

    async fn format(&self, source: &str, file: &Path, project_root: &Path) -> Result<String, ToolError> {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(project_root);
        cmd.arg("--stdin-filepath").arg(file);

        let output = run_command(cmd, self.name(), Some(source))
            .await?
            .success(self.name())?;
        Ok(output.stdout)
    }
}
