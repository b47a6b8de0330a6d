//! Migrates a generated project from utility classes to styled components.
//!
//! [`Migration`] drives the stages; [`migrate_project`] wires it to the
//! project's own Tailwind and Prettier installs.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod file_ops;
pub mod pipeline;
pub mod report;

pub use config::MigrationConfig;
pub use error::{CompileError, MigrateError};
pub use pipeline::Migration;
pub use report::MigrationReport;

use std::path::Path;

/// Migrate the project at `project_root` using the tools installed in it.
pub async fn migrate_project(
    project_root: &Path,
    config: MigrationConfig,
    dry_run: bool,
) -> Result<MigrationReport, MigrateError> {
    let compiler = collaborators::detect_style_compiler(project_root, &config)?;
    let formatter = collaborators::detect_formatter(project_root);
    Migration::new(project_root, config, compiler, formatter)
        .dry_run(dry_run)
        .run()
        .await
}
