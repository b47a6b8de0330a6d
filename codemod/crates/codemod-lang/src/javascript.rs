//! JavaScript/JSX dialect helpers.
//!
//! Small, tree-driven questions the rewriter asks before it emits new
//! statements: is there a file-level directive to keep first, and which
//! quote/semicolon conventions does the file already follow.

use tree_sitter::{Node, Tree};

/// File-level directives that must stay the first statement of a module.
pub const MODULE_DIRECTIVES: &[&str] = &["use client", "use server", "use strict"];

/// Find the byte offset just past a leading module directive.
///
/// Only directives that precede every other statement count (comments and a
/// shebang may come before them). Returns the offset after the directive's
/// line terminator, or `None` when the module has no leading directive.
pub fn directive_end(source: &str, tree: &Tree) -> Option<usize> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut last_directive_end = None;

    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "comment" | "hash_bang_line" => continue,
            "expression_statement" if directive_text(&child, source).is_some() => {
                let end = child.end_byte();
                let line_end = source[end..]
                    .find('\n')
                    .map(|i| end + i + 1)
                    .unwrap_or(source.len());
                last_directive_end = Some(line_end);
            }
            _ => break,
        }
    }

    last_directive_end
}

/// Return the directive value if `stmt` is an expression statement holding
/// only a recognised directive string.
fn directive_text<'s>(stmt: &Node, source: &'s str) -> Option<&'s str> {
    let expr = stmt.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    let raw = &source[expr.start_byte()..expr.end_byte()];
    let inner = raw.get(1..raw.len().checked_sub(1)?)?;
    MODULE_DIRECTIVES.contains(&inner).then_some(inner)
}

/// Detect the quote character the file prefers for string literals.
///
/// Counts `string` nodes outside JSX attributes (attribute strings follow
/// markup conventions, not script ones). Ties resolve to single quotes.
pub fn detect_quote_style(source: &str, tree: &Tree) -> char {
    let mut single = 0usize;
    let mut double = 0usize;
    count_string_quotes(&tree.root_node(), source, &mut single, &mut double);
    if double > single {
        '"'
    } else {
        '\''
    }
}

fn count_string_quotes(node: &Node, source: &str, single: &mut usize, double: &mut usize) {
    if node.kind() == "jsx_attribute" {
        return;
    }
    if node.kind() == "string" {
        match source.as_bytes().get(node.start_byte()) {
            Some(b'\'') => *single += 1,
            Some(b'"') => *double += 1,
            _ => {}
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count_string_quotes(&child, source, single, double);
    }
}

/// Detect whether top-level statements end with semicolons.
pub fn detect_semicolons(source: &str, tree: &Tree) -> bool {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut with_semi = 0usize;
    let mut without_semi = 0usize;

    for child in root.named_children(&mut cursor) {
        if !matches!(
            child.kind(),
            "import_statement" | "expression_statement" | "lexical_declaration"
        ) {
            continue;
        }
        if source[child.start_byte()..child.end_byte()].ends_with(';') {
            with_semi += 1;
        } else {
            without_semi += 1;
        }
    }

    with_semi > without_semi
}
