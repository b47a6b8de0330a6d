use codemod_core::{RewriteError, ScanError, StyleSheetError};
use codemod_lang::LangError;
use r3f_tools::ToolError;
use std::path::PathBuf;
use thiserror::Error;

/// The style sheet could not be turned into a style table. Raised before
/// any project file is touched.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Style compiler '{tool}' not found. Install dependencies first.")]
    CompilerNotFound { tool: String },

    #[error("Failed to read style sheet {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Style compiler failed: {0}")]
    Tool(#[from] ToolError),

    #[error("Compiled CSS could not be parsed: {0}")]
    StyleSheet(#[from] StyleSheetError),
}

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Internal consistency error in {}: {message}", file.display())]
    InternalConsistency { file: PathBuf, message: String },

    #[error("Failed to scan {}: {source}", file.display())]
    Scan { file: PathBuf, source: ScanError },

    #[error("Unsupported file {}: {source}", file.display())]
    UnsupportedFile { file: PathBuf, source: LangError },

    #[error("Failed to format {}: {source}", file.display())]
    Format { file: PathBuf, source: ToolError },

    #[error("Rewriting {} produced invalid output: {source}", file.display())]
    InvalidResult { file: PathBuf, source: RewriteError },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MigrateError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Split rewrite failures into the consistency check and everything else.
    pub(crate) fn from_rewrite(file: PathBuf, err: RewriteError) -> Self {
        match err {
            RewriteError::InternalConsistency { message, .. } => {
                Self::InternalConsistency { file, message }
            }
            other => Self::InvalidResult {
                file,
                source: other,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_literal_maps_to_internal_consistency() {
        let err = MigrateError::from_rewrite(
            PathBuf::from("app/Layout.jsx"),
            RewriteError::InternalConsistency {
                file: PathBuf::from("/abs/app/Layout.jsx"),
                message: "no component".into(),
            },
        );
        match err {
            MigrateError::InternalConsistency { file, message } => {
                assert_eq!(file, PathBuf::from("app/Layout.jsx"));
                assert_eq!(message, "no component");
            }
            other => panic!("Expected InternalConsistency, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_regression_maps_to_invalid_result() {
        let err = MigrateError::from_rewrite(
            PathBuf::from("app/Layout.jsx"),
            RewriteError::InvalidResult {
                before: 0,
                after: 2,
                errors: vec![],
            },
        );
        assert!(matches!(
            err,
            MigrateError::InvalidResult {
                source: RewriteError::InvalidResult { after: 2, .. },
                ..
            }
        ));
        assert!(err.to_string().starts_with("Rewriting app/Layout.jsx produced invalid output"));
    }
}
