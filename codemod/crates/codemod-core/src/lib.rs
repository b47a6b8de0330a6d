//! codemod-core: pure computation for the utility-class to styled-component
//! migration.
//!
//! Nothing here touches the filesystem or spawns processes. Compiled CSS and
//! markup source go in; a style table, synthesized components and rewritten
//! source come out. Grammars live in `codemod-lang`.

pub mod edit;
pub mod rewrite;
pub mod scan;
pub mod selector;
pub mod stylesheet;
pub mod synthesize;
pub mod validate;

pub use rewrite::{MarkupRewriter, RewriteError, RewriteOutcome};
pub use scan::{MarkupScanner, ScanError, ScannedElement};
pub use stylesheet::{ClassNameInfo, SelectorContext, StyleSheetError, StyleTable};
pub use synthesize::{ComponentCollection, ComponentSynthesizer, FileSynthesis, SynthesizedComponent};
