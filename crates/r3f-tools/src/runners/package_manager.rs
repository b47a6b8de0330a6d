use super::run_command;
use crate::detection::PackageManager;
use crate::error::ToolError;
use std::path::Path;
use tokio::process::Command;

/// Install the project's declared dependencies.
pub async fn install(pm: PackageManager, project_root: &Path) -> Result<(), ToolError> {
    run(pm, project_root, pm.install_args()).await
}

/// Add `packages` as runtime dependencies.
pub async fn add(pm: PackageManager, project_root: &Path, packages: &[&str]) -> Result<(), ToolError> {
    run(pm, project_root, pm.add_args(packages)).await
}

/// Add `packages` as development dependencies.
pub async fn add_dev(pm: PackageManager, project_root: &Path, packages: &[&str]) -> Result<(), ToolError> {
    run(pm, project_root, pm.add_dev_args(packages)).await
}

async fn run(pm: PackageManager, project_root: &Path, args: Vec<&str>) -> Result<(), ToolError> {
    let bin = which::which(pm.program()).map_err(|_| ToolError::ToolNotFound {
        tool: pm.program().to_string(),
    })?;

    let mut cmd = Command::new(bin);
    cmd.current_dir(project_root).args(&args);
    tracing::info!(manager = pm.program(), args = ?args, "running package manager");
    run_command(cmd, pm.program(), None).await?.success(pm.program())?;
    Ok(())
}
