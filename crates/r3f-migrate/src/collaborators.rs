use crate::config::MigrationConfig;
use crate::error::CompileError;
use r3f_tools::{find_bin, PassthroughFormatter, PrettierRunner, SourceFormatter, StyleCompiler, TailwindRunner};
use std::path::Path;

/// Locate the project's style compiler. Without one there is no style
/// table, so a missing binary is fatal.
pub fn detect_style_compiler(
    project_root: &Path,
    config: &MigrationConfig,
) -> Result<Box<dyn StyleCompiler>, CompileError> {
    let bin = find_bin("tailwindcss", project_root).ok_or_else(|| CompileError::CompilerNotFound {
        tool: "tailwindcss".into(),
    })?;
    tracing::debug!(bin = %bin.display(), "using style compiler");
    Ok(Box::new(TailwindRunner::new(bin, &config.tailwind_config)))
}

/// Locate the project's formatter, falling back to leaving output as generated.
pub fn detect_formatter(project_root: &Path) -> Box<dyn SourceFormatter> {
    match find_bin("prettier", project_root) {
        Some(bin) => {
            tracing::debug!(bin = %bin.display(), "using formatter");
            Box::new(PrettierRunner::new(bin))
        }
        None => {
            tracing::warn!("prettier not found; generated files will not be formatted");
            Box::new(PassthroughFormatter)
        }
    }
}
