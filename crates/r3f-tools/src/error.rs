use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{tool}' not found in node_modules/.bin or on PATH")]
    ToolNotFound { tool: String },

    #[error("Failed to execute '{tool}': {source}")]
    ToolExecution {
        tool: String,
        source: std::io::Error,
    },

    #[error("'{tool}' exited with status {code}: {stderr}")]
    Failed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("Destination '{}' already exists", path.display())]
    DestinationExists { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
