use super::{run_command, StyleCompiler};
use crate::error::ToolError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Runs the Tailwind CLI: `tailwindcss -c <config> -i <input>`, CSS on stdout.
pub struct TailwindRunner {
    bin: PathBuf,
    config: PathBuf,
}

impl TailwindRunner {
    /// `config` is relative to the project root the compile runs in.
    pub fn new(bin: PathBuf, config: impl Into<PathBuf>) -> Self {
        Self {
            bin,
            config: config.into(),
        }
    }
}

#[async_trait::async_trait]
impl StyleCompiler for TailwindRunner {
    fn name(&self) -> &str {
        "tailwindcss"
    }

    async fn compile(&self, source: &str, project_root: &Path) -> Result<String, ToolError> {
        // The CLI only reads its input from a file.
        let mut input = tempfile::Builder::new().suffix(".css").tempfile()?;
        input.write_all(source.as_bytes())?;
        input.flush()?;

        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(project_root);
        cmd.arg("-c").arg(&self.config).arg("-i").arg(input.path());

        let output = run_command(cmd, self.name(), None).await?.success(self.name())?;
        tracing::debug!(bytes = output.stdout.len(), "compiled style sheet");
        Ok(output.stdout)
    }
}
