//! Parsing entry points and syntax-error accounting.

use codemod_lang::registry::parser_for_language;
use codemod_lang::{LangError, SupportedLanguage};
use serde::Serialize;
use thiserror::Error;
use tree_sitter::{Node, Tree};

#[derive(Debug, Clone, Error, Serialize)]
pub enum ValidationError {
    #[error("No parser available: {0}")]
    Language(String),
    #[error("tree-sitter parser returned None (timeout or cancellation)")]
    ParseFailed,
}

impl From<LangError> for ValidationError {
    fn from(err: LangError) -> Self {
        Self::Language(err.to_string())
    }
}

/// A single syntax error location.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxError {
    /// 1-indexed.
    pub line: usize,
    /// 1-indexed.
    pub column: usize,
    /// Up to 30 bytes of source on either side of the error.
    pub context: String,
    /// `ERROR` or the kind of the missing node.
    pub node_kind: String,
}

/// Parse without validation. The tree may contain error nodes.
pub fn parse_best_effort(source: &str, lang: SupportedLanguage) -> Result<Tree, ValidationError> {
    let mut parser = parser_for_language(lang)?;
    parser.parse(source, None).ok_or(ValidationError::ParseFailed)
}

/// Collect every ERROR/MISSING node in `tree`, in document order.
pub fn collect_syntax_errors(tree: &Tree, source: &str) -> Vec<SyntaxError> {
    let mut errors = Vec::new();
    let root = tree.root_node();
    if root.has_error() {
        collect_errors_recursive(&root, source, &mut errors);
    }
    errors
}

fn collect_errors_recursive(node: &Node, source: &str, errors: &mut Vec<SyntaxError>) {
    if node.is_error() || node.is_missing() {
        let start = node.start_position();
        let from = floor_char_boundary(source, node.start_byte().saturating_sub(30));
        let to = ceil_char_boundary(source, node.end_byte() + 30);
        errors.push(SyntaxError {
            line: start.row + 1,
            column: start.column + 1,
            context: source[from..to].to_string(),
            node_kind: node.kind().to_string(),
        });
    }

    // Subtrees without errors can be skipped entirely.
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            collect_errors_recursive(&child, source, errors);
        }
    }
}

fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.min(s.len());
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
