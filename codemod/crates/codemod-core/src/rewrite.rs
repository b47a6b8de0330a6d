//! Markup rewriter.
//!
//! Swaps each class-carrying element for its synthesized component, drops
//! the class attribute, and injects one import for every component the
//! file uses. Everything else in the file is left byte-for-byte intact.

use crate::edit::{EditConflict, EditSet, TextEdit};
use crate::scan::MarkupScanner;
use crate::synthesize::{ComponentCollection, SynthesizedComponent};
use crate::validate::{collect_syntax_errors, parse_best_effort, SyntaxError, ValidationError};
use codemod_lang::javascript::{detect_quote_style, detect_semicolons, directive_end};
use codemod_lang::SupportedLanguage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize)]
pub enum RewriteError {
    #[error("{}: {message}", file.display())]
    InternalConsistency { file: PathBuf, message: String },
    #[error("{}: {count} markup element(s) scanned but {language} cannot hold markup", file.display())]
    NotMarkup {
        file: PathBuf,
        language: String,
        count: usize,
    },
    #[error(transparent)]
    Edit(#[from] EditConflict),
    #[error(transparent)]
    Parse(#[from] ValidationError),
    #[error("Rewrite introduced syntax errors ({before} before, {after} after)")]
    InvalidResult {
        before: usize,
        after: usize,
        errors: Vec<SyntaxError>,
    },
}

/// Result of rewriting one file.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    pub content: String,
    /// Elements whose tag was replaced.
    pub replaced: usize,
    /// Identifiers named by the injected import, in synthesis order.
    pub imported: Vec<String>,
}

impl RewriteOutcome {
    fn unchanged(source: &str) -> Self {
        Self {
            content: source.to_string(),
            replaced: 0,
            imported: vec![],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkupRewriter {
    scanner: MarkupScanner,
}

impl MarkupRewriter {
    pub fn new(scanner: MarkupScanner) -> Self {
        Self { scanner }
    }

    /// Rewrite `source` against the components `file` synthesized.
    ///
    /// A file with no components comes back unchanged.
    pub fn rewrite(
        &self,
        file: &Path,
        source: &str,
        language: SupportedLanguage,
        components: &ComponentCollection,
    ) -> Result<RewriteOutcome, RewriteError> {
        let owned: Vec<&SynthesizedComponent> = components.for_file(file).collect();
        if owned.is_empty() {
            return Ok(RewriteOutcome::unchanged(source));
        }
        if !language.supports_markup() {
            return Err(RewriteError::NotMarkup {
                file: file.to_path_buf(),
                language: format!("{language:?}"),
                count: owned.len(),
            });
        }

        let tree = parse_best_effort(source, language)?;
        let errors_before = collect_syntax_errors(&tree, source).len();
        let elements = self.scanner.scan(file, source, &tree);

        let mut edits = Vec::with_capacity(elements.len() * 3 + 1);
        for element in &elements {
            let component = components
                .find(file, &element.attribute.value)
                .ok_or_else(|| RewriteError::InternalConsistency {
                    file: file.to_path_buf(),
                    message: format!(
                        "class literal {:?} on <{}> has no synthesized component",
                        element.attribute.value, element.tag
                    ),
                })?;

            let label = format!("{} -> {}", element.tag, component.name);
            edits.push(TextEdit::replace(
                element.opening_name.start,
                element.opening_name.end,
                component.name.as_str(),
                format!("open {label}"),
            ));
            if let Some(closing) = &element.closing_name {
                edits.push(TextEdit::replace(
                    closing.start,
                    closing.end,
                    component.name.as_str(),
                    format!("close {label}"),
                ));
            }
            edits.push(TextEdit::delete(
                element.attribute.removal.start,
                element.attribute.removal.end,
                format!("drop {}", self.scanner.attribute()),
            ));
        }

        let imported: Vec<String> = owned.iter().map(|c| c.name.clone()).collect();
        let at = directive_end(source, &tree).unwrap_or(0);
        let mut statement = import_statement(
            &imported,
            &import_specifier(&owned[0].companion),
            detect_quote_style(source, &tree),
            detect_semicolons(source, &tree),
        );
        if at > 0 && !source[..at].ends_with('\n') {
            statement.insert(0, '\n');
        }
        // Sorts before any rename that happens to start at the same offset.
        edits.push(TextEdit::insert(at, statement, "import components").with_priority(-1));

        let content = EditSet::new(edits, source)?.apply(source);

        verify_rewrite(&content, language, errors_before)?;

        tracing::debug!(
            file = %file.display(),
            replaced = elements.len(),
            components = imported.len(),
            "rewrote markup"
        );

        Ok(RewriteOutcome {
            content,
            replaced: elements.len(),
            imported,
        })
    }
}

/// Re-parse rewritten `content`; it may not carry more syntax errors than
/// the source it came from.
fn verify_rewrite(
    content: &str,
    language: SupportedLanguage,
    errors_before: usize,
) -> Result<(), RewriteError> {
    let tree = parse_best_effort(content, language)?;
    let errors = collect_syntax_errors(&tree, content);
    if errors.len() > errors_before {
        return Err(RewriteError::InvalidResult {
            before: errors_before,
            after: errors.len(),
            errors,
        });
    }
    Ok(())
}

/// `./Layout.style` for `src/Layout.style.jsx`: a sibling path without extension.
pub fn import_specifier(companion: &Path) -> String {
    let stem = companion
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    format!("./{stem}")
}

fn import_statement(names: &[String], module: &str, quote: char, semicolon: bool) -> String {
    format!(
        "import {{ {} }} from {quote}{module}{quote}{}\n",
        names.join(", "),
        if semicolon { ";" } else { "" }
    )
}
