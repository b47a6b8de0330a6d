use super::run_command;
use crate::error::ToolError;
use std::path::Path;
use tokio::process::Command;

/// Clone a single template branch into `dest`, then detach it
/// from the template's history by removing `.git`.
pub async fn clone_template(template: &str, branch: &str, dest: &Path) -> Result<(), ToolError> {
    if dest.exists() {
        return Err(ToolError::DestinationExists {
            path: dest.to_path_buf(),
        });
    }

    let mut cmd = Command::new("git");
    cmd.args(["clone", "--recursive", "--single-branch", "--branch", branch, template])
        .arg(dest);
    tracing::info!(template, branch, dest = %dest.display(), "cloning template");
    run_command(cmd, "git", None).await?.success("git")?;

    let git_dir = dest.join(".git");
    if tokio::fs::try_exists(&git_dir).await? {
        tokio::fs::remove_dir_all(&git_dir).await?;
    }
    Ok(())
}

/// Start a fresh repository holding the generated project as one commit.
pub async fn init_repository(dir: &Path, message: &str) -> Result<(), ToolError> {
    for args in [
        vec!["init", "--quiet"],
        vec!["add", "-A"],
        vec!["commit", "--quiet", "--no-verify", "-m", message],
    ] {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir).args(&args);
        run_command(cmd, "git", None).await?.success("git")?;
    }
    tracing::info!(dir = %dir.display(), "initialized git repository");
    Ok(())
}
