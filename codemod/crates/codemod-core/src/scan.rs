//! Markup scanner.
//!
//! A single pre-order traversal that yields each JSX element together with
//! its class attribute literal. Element and literal come from the same node
//! visit, so the i-th reported tag always belongs to the i-th literal.

use crate::validate::{parse_best_effort, ValidationError};
use codemod_lang::SupportedLanguage;
use serde::Serialize;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Node, Tree};

/// The attribute name utility classes are applied through in React markup.
pub const DEFAULT_CLASS_ATTRIBUTE: &str = "className";

#[derive(Debug, Clone, Error, Serialize)]
pub enum ScanError {
    #[error("{language:?} files cannot contain markup")]
    NotMarkup { language: String },
    #[error(transparent)]
    Parse(#[from] ValidationError),
}

/// A class attribute whose value is a plain string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassAttribute {
    /// The literal's contents without quotes.
    pub value: String,
    /// The attribute node (`className="..."`).
    pub span: Range<usize>,
    /// The attribute plus the whitespace separating it from what precedes it.
    pub removal: Range<usize>,
}

impl ClassAttribute {
    /// Individual class-name tokens, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.value.split_whitespace()
    }
}

/// One markup element carrying a literal class attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedElement {
    pub file: PathBuf,
    /// Position in scan (document) order, starting at 0.
    pub ordinal: usize,
    /// Element name as written: `div`, `Canvas`, `motion.div`.
    pub tag: String,
    pub opening_name: Range<usize>,
    /// `None` for self-closing elements.
    pub closing_name: Option<Range<usize>>,
    pub attribute: ClassAttribute,
}

impl ScannedElement {
    /// Lowercase, undotted names are host elements (`styled.div`); anything
    /// else is a component reference (`styled(Canvas)`).
    pub fn is_intrinsic(&self) -> bool {
        self.tag.chars().next().is_some_and(|c| c.is_ascii_lowercase()) && !self.tag.contains('.')
    }
}

#[derive(Debug, Clone)]
pub struct MarkupScanner {
    attribute: String,
}

impl Default for MarkupScanner {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_ATTRIBUTE)
    }
}

impl MarkupScanner {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Parse `source` and scan it.
    pub fn scan_source(
        &self,
        file: &Path,
        source: &str,
        language: SupportedLanguage,
    ) -> Result<Vec<ScannedElement>, ScanError> {
        if !language.supports_markup() {
            return Err(ScanError::NotMarkup {
                language: format!("{language:?}"),
            });
        }
        let tree = parse_best_effort(source, language)?;
        Ok(self.scan(file, source, &tree))
    }

    /// Scan an already-parsed tree. Elements are reported in document order.
    pub fn scan(&self, file: &Path, source: &str, tree: &Tree) -> Vec<ScannedElement> {
        let mut found = Vec::new();
        self.visit(&tree.root_node(), file, source, &mut found);
        found
    }

    fn visit(&self, node: &Node, file: &Path, source: &str, found: &mut Vec<ScannedElement>) {
        if matches!(node.kind(), "jsx_opening_element" | "jsx_self_closing_element") {
            if let Some((tag, opening_name, attribute)) = self.match_element(node, source) {
                let closing_name = closing_name_range(node);
                found.push(ScannedElement {
                    file: file.to_path_buf(),
                    ordinal: found.len(),
                    tag,
                    opening_name,
                    closing_name,
                    attribute,
                });
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(&child, file, source, found);
        }
    }

    fn match_element(
        &self,
        element: &Node,
        source: &str,
    ) -> Option<(String, Range<usize>, ClassAttribute)> {
        let name = element.child_by_field_name("name")?;

        let mut cursor = element.walk();
        let attr = element
            .children_by_field_name("attribute", &mut cursor)
            .find(|a| a.kind() == "jsx_attribute" && self.is_class_attribute(a, source))?;

        let value = attr.named_child(1)?;
        if value.kind() != "string" {
            tracing::trace!(
                line = attr.start_position().row + 1,
                "skipping computed class attribute"
            );
            return None;
        }
        let raw = &source[value.start_byte()..value.end_byte()];
        let literal = raw.get(1..raw.len().saturating_sub(1))?.to_string();

        let removal_start = attr
            .prev_sibling()
            .map(|prev| prev.end_byte())
            .unwrap_or_else(|| attr.start_byte());

        Some((
            source[name.start_byte()..name.end_byte()].to_string(),
            name.start_byte()..name.end_byte(),
            ClassAttribute {
                value: literal,
                span: attr.start_byte()..attr.end_byte(),
                removal: removal_start..attr.end_byte(),
            },
        ))
    }

    fn is_class_attribute(&self, attr: &Node, source: &str) -> bool {
        attr.named_child(0)
            .filter(|n| n.kind() == "property_identifier")
            .is_some_and(|n| &source[n.start_byte()..n.end_byte()] == self.attribute)
    }
}

fn closing_name_range(opening: &Node) -> Option<Range<usize>> {
    if opening.kind() != "jsx_opening_element" {
        return None;
    }
    let element = opening.parent().filter(|p| p.kind() == "jsx_element")?;
    let name = element.child_by_field_name("close_tag")?.child_by_field_name("name")?;
    Some(name.start_byte()..name.end_byte())
}
