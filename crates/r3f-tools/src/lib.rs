//! External collaborators: the style compiler, the source formatter, git and
//! the package manager, each driven as a subprocess.

pub mod detection;
pub mod error;
pub mod runners;

pub use detection::{detect_package_manager, find_bin, PackageManager};
pub use error::ToolError;
pub use runners::passthrough::PassthroughFormatter;
pub use runners::prettier::PrettierRunner;
pub use runners::tailwind::TailwindRunner;
pub use runners::{RunnerOutput, SourceFormatter, StyleCompiler};
