//! Filesystem helpers shared by the migration driver and the CLI.

pub mod fs_utils;
pub mod project;
pub mod walk;
