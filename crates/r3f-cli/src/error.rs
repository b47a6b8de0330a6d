use r3f_migrate::MigrateError;
use r3f_tools::ToolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid project: {0}")]
    Project(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Migrate(#[from] MigrateError),

    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
