pub mod git;
pub mod package_manager;
pub mod passthrough;
pub mod prettier;
pub mod tailwind;

use crate::error::ToolError;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Captured result of one subprocess run.
#[derive(Debug)]
pub struct RunnerOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunnerOutput {
    /// Turn a non-zero exit into [`ToolError::Failed`].
    pub fn success(self, tool: &str) -> Result<Self, ToolError> {
        if self.exit_code == 0 {
            Ok(self)
        } else {
            Err(ToolError::Failed {
                tool: tool.to_string(),
                code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Compiles a utility-class style sheet into plain CSS.
#[async_trait::async_trait]
pub trait StyleCompiler: Send + Sync {
    fn name(&self) -> &str;

    async fn compile(&self, source: &str, project_root: &Path) -> Result<String, ToolError>;
}

/// Formats source text the way the project's formatter configuration says.
#[async_trait::async_trait]
pub trait SourceFormatter: Send + Sync {
    fn name(&self) -> &str;

    /// `file` only selects the parser and config; it is not read.
    async fn format(&self, source: &str, file: &Path, project_root: &Path) -> Result<String, ToolError>;
}

/// Run `cmd` to completion, feeding `stdin` if given.
pub(crate) async fn run_command(
    mut cmd: Command,
    tool: &str,
    stdin: Option<&str>,
) -> Result<RunnerOutput, ToolError> {
    let exec_err = |source| ToolError::ToolExecution {
        tool: tool.to_string(),
        source,
    };

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });

    tracing::debug!(tool, "spawning");
    let mut child = cmd.spawn().map_err(exec_err)?;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        pipe.write_all(input.as_bytes()).await.map_err(exec_err)?;
    }
    let output = child.wait_with_output().await.map_err(exec_err)?;

    Ok(RunnerOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stdin_is_piped() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "tr a-z A-Z"]);
        let out = run_command(cmd, "tr", Some("flex")).await.unwrap();
        assert_eq!(out.stdout, "FLEX");
        assert_eq!(out.exit_code, 0);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failed() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo broken >&2; exit 3"]);
        let err = run_command(cmd, "sh", None)
            .await
            .unwrap()
            .success("sh")
            .unwrap_err();
        match err {
            ToolError::Failed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "broken");
            }
            other => panic!("Expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let cmd = Command::new("/nonexistent/r3f-tool");
        assert!(matches!(
            run_command(cmd, "r3f-tool", None).await,
            Err(ToolError::ToolExecution { .. })
        ));
    }
}
