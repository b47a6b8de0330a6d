//! StyleTable: utility class name -> resolved declarations.
//!
//! Built from the CSS a utility-first style compiler emits. Only rules whose
//! selector is a single class, optionally followed by a pseudo-class, are
//! recorded; anything with combinators or compound selectors is skipped.
//! Enclosing conditional at-rules (`@media`, `@supports`) become part of the
//! rule's [`SelectorContext`].

use crate::selector::{parse_class_selector, split_selector_list};
use crate::validate::{parse_best_effort, ValidationError};
use codemod_lang::SupportedLanguage;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tree_sitter::Node;

/// Bookkeeping keys an extractor may attach to a rule record. They never
/// reach the declaration set handed to synthesis.
pub const RESERVED_KEYS: &[&str] = &["__rule", "__source", "__pseudo", "__scope", "__context"];

#[derive(Debug, Clone, Error, Serialize)]
pub enum StyleSheetError {
    #[error("Failed to parse compiled stylesheet: {0}")]
    Parse(#[from] ValidationError),
}

/// Where a declaration applies: inside zero or more conditional at-rules
/// (outermost first), optionally narrowed by a pseudo-class suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SelectorContext {
    pub at_rules: Vec<String>,
    pub pseudo: Option<String>,
}

impl SelectorContext {
    pub fn new(at_rules: Vec<String>, pseudo: Option<String>) -> Self {
        Self { at_rules, pseudo }
    }

    pub fn is_empty(&self) -> bool {
        self.at_rules.is_empty() && self.pseudo.is_none()
    }

    /// Block headers to open, outermost first, in nested-template syntax
    /// (`@media (...)`, then `&:hover`).
    pub fn block_headers(&self) -> Vec<String> {
        let mut headers = self.at_rules.clone();
        if let Some(pseudo) = &self.pseudo {
            headers.push(format!("&{pseudo}"));
        }
        headers
    }
}

/// The resolved declarations of one class under one selector context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassNameInfo {
    context: SelectorContext,
    declarations: IndexMap<String, String>,
}

impl ClassNameInfo {
    /// Build from raw `(property, value)` pairs, dropping [`RESERVED_KEYS`].
    /// A repeated property keeps its first position and its last value.
    pub fn new<I>(context: SelectorContext, declarations: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut info = Self {
            context,
            declarations: IndexMap::new(),
        };
        info.extend(declarations);
        info
    }

    pub fn context(&self) -> &SelectorContext {
        &self.context
    }

    pub fn declarations(&self) -> &IndexMap<String, String> {
        &self.declarations
    }

    fn extend<I>(&mut self, declarations: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (property, value) in declarations {
            if RESERVED_KEYS.contains(&property.as_str()) {
                continue;
            }
            self.declarations.insert(property, value);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    classes: HashMap<String, Vec<ClassNameInfo>>,
    skipped_selectors: usize,
}

impl StyleTable {
    /// Parse compiled CSS into a table.
    pub fn from_css(css: &str) -> Result<Self, StyleSheetError> {
        let masked = mask_for_parsing(css);
        let tree = parse_best_effort(&masked, SupportedLanguage::Css)?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("compiled stylesheet has syntax errors; affected rules are skipped");
        }

        let mut table = Self::default();
        let mut at_rules = Vec::new();
        // Node ranges index into `masked`, which has the same byte layout as `css`.
        table.collect_items(&root, css, &mut at_rules);
        tracing::debug!(
            classes = table.classes.len(),
            skipped = table.skipped_selectors,
            "extracted style table"
        );
        Ok(table)
    }

    /// Every context a class resolves under, in stylesheet order.
    /// Unknown classes resolve to an empty slice.
    pub fn lookup(&self, class: &str) -> &[ClassNameInfo] {
        self.classes.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of rule selectors that were not plain utility classes.
    pub fn skipped_selectors(&self) -> usize {
        self.skipped_selectors
    }

    /// Record `info` for `class`, merging into an existing entry with the same context.
    pub fn insert(&mut self, class: impl Into<String>, info: ClassNameInfo) {
        let entries = self.classes.entry(class.into()).or_default();
        match entries.iter_mut().find(|e| e.context == info.context) {
            Some(existing) => existing.extend(info.declarations),
            None => entries.push(info),
        }
    }

    fn collect_items(&mut self, parent: &Node, css: &str, at_rules: &mut Vec<String>) {
        let mut cursor = parent.walk();
        for child in parent.named_children(&mut cursor) {
            match child.kind() {
                "rule_set" => self.collect_rule_set(&child, css, at_rules),
                "media_statement" | "supports_statement" | "at_rule" => {
                    let Some(block) = child_of_kind(&child, "block") else {
                        continue;
                    };
                    let prelude = normalize_whitespace(&css[child.start_byte()..block.start_byte()]);
                    if prelude.starts_with("@layer") {
                        self.collect_items(&block, css, at_rules);
                        continue;
                    }
                    at_rules.push(prelude);
                    self.collect_items(&block, css, at_rules);
                    at_rules.pop();
                }
                _ => {}
            }
        }
    }

    fn collect_rule_set(&mut self, rule: &Node, css: &str, at_rules: &[String]) {
        let (Some(selectors), Some(block)) =
            (child_of_kind(rule, "selectors"), child_of_kind(rule, "block"))
        else {
            return;
        };
        let declarations = collect_declarations(&block, css);
        if declarations.is_empty() {
            return;
        }

        let selector_text = &css[selectors.start_byte()..selectors.end_byte()];
        for selector in split_selector_list(selector_text) {
            match parse_class_selector(selector) {
                Some(parsed) => {
                    let context = SelectorContext::new(at_rules.to_vec(), parsed.pseudo);
                    self.insert(parsed.class, ClassNameInfo::new(context, declarations.clone()));
                }
                None => {
                    tracing::trace!(selector, "skipping non-utility selector");
                    self.skipped_selectors += 1;
                }
            }
        }
    }
}

/// `(property, value)` pairs of a block's declarations, values trimmed of
/// the terminating `;` but keeping `!important`.
fn collect_declarations(block: &Node, css: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut cursor = block.walk();
    for decl in block.named_children(&mut cursor) {
        if decl.kind() != "declaration" {
            continue;
        }
        let Some(property) = child_of_kind(&decl, "property_name") else {
            continue;
        };
        let Some(colon) = child_of_kind(&decl, ":") else {
            continue;
        };
        let value = css[colon.end_byte()..decl.end_byte()]
            .trim()
            .trim_end_matches(';')
            .trim_end();
        declarations.push((
            css[property.start_byte()..property.end_byte()].to_string(),
            value.to_string(),
        ));
    }
    declarations
}

fn child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Produce a byte-for-byte same-length copy of `css` that the CSS grammar
/// accepts: escape sequences (`\:`, `\/`, `\[`) become identifier characters,
/// and an all-whitespace custom property value (`--tw-pan-x:  ;`) gets a
/// placeholder character.
fn mask_for_parsing(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('_');
                if let Some(escaped) = chars.next() {
                    if escaped.is_ascii() && !is_ident_char(escaped) {
                        out.push('_');
                    } else {
                        out.push(escaped);
                    }
                }
            }
            ':' => {
                out.push(':');
                let mut lookahead = chars.clone();
                let mut blanks = 0usize;
                while lookahead.next_if(|w| w.is_ascii_whitespace()).is_some() {
                    blanks += 1;
                }
                if blanks > 0 && lookahead.peek() == Some(&';') {
                    chars.next();
                    out.push('_');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(info: &ClassNameInfo) -> Vec<(&str, &str)> {
        info.declarations()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_plain_classes() {
        let css = ".flex {\n  display: flex;\n}\n.items-center {\n  align-items: center;\n}\n";
        let table = StyleTable::from_css(css).unwrap();
        assert_eq!(table.len(), 2);
        let flex = table.lookup("flex");
        assert_eq!(flex.len(), 1);
        assert!(flex[0].context().is_empty());
        assert_eq!(decls(&flex[0]), vec![("display", "flex")]);
        assert_eq!(decls(&table.lookup("items-center")[0]), vec![("align-items", "center")]);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let css = ".bg-zinc-800 { --tw-bg-opacity: 1; background-color: rgb(39 39 42 / var(--tw-bg-opacity)); }";
        let table = StyleTable::from_css(css).unwrap();
        assert_eq!(
            decls(&table.lookup("bg-zinc-800")[0]),
            vec![
                ("--tw-bg-opacity", "1"),
                ("background-color", "rgb(39 39 42 / var(--tw-bg-opacity))"),
            ]
        );
    }

    #[test]
    fn test_escaped_pseudo_class() {
        let css = ".hover\\:text-gray-50:hover { color: rgb(249 250 251); }";
        let table = StyleTable::from_css(css).unwrap();
        let info = &table.lookup("hover:text-gray-50")[0];
        assert_eq!(info.context().pseudo.as_deref(), Some(":hover"));
        assert!(info.context().at_rules.is_empty());
        assert_eq!(decls(info), vec![("color", "rgb(249 250 251)")]);
    }

    #[test]
    fn test_media_context() {
        let css = "@media (min-width: 768px) {\n  .md\\:w-1\\/2 {\n    width: 50%;\n  }\n}\n";
        let table = StyleTable::from_css(css).unwrap();
        let info = &table.lookup("md:w-1/2")[0];
        assert_eq!(info.context().at_rules, vec!["@media (min-width: 768px)".to_string()]);
        assert_eq!(info.context().pseudo, None);
    }

    #[test]
    fn test_same_class_under_two_contexts() {
        let css = ".container { width: 100%; }\n@media (min-width: 640px) { .container { max-width: 640px; } }";
        let table = StyleTable::from_css(css).unwrap();
        let entries = table.lookup("container");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].context().is_empty());
        assert_eq!(decls(&entries[1]), vec![("max-width", "640px")]);
    }

    #[test]
    fn test_combinator_selectors_skipped() {
        let css = ".space-x-4 > :not([hidden]) ~ :not([hidden]) { margin-left: 1rem; }\n.group:hover .group-hover\\:block { display: block; }";
        let table = StyleTable::from_css(css).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.skipped_selectors(), 2);
    }

    #[test]
    fn test_important_and_bang_prefix() {
        let css = ".\\!p-0 { padding: 0px !important; }";
        let table = StyleTable::from_css(css).unwrap();
        assert_eq!(decls(&table.lookup("!p-0")[0]), vec![("padding", "0px !important")]);
    }

    #[test]
    fn test_empty_custom_property_does_not_derail_parsing() {
        let css = "*, ::before, ::after {\n  --tw-pan-x:  ;\n  --tw-ring-inset:  ;\n}\n.flex { display: flex; }\n";
        let table = StyleTable::from_css(css).unwrap();
        assert_eq!(decls(&table.lookup("flex")[0]), vec![("display", "flex")]);
    }

    #[test]
    fn test_reserved_keys_excluded() {
        let info = ClassNameInfo::new(
            SelectorContext::default(),
            vec![
                ("__rule".to_string(), "r".to_string()),
                ("color".to_string(), "red".to_string()),
                ("__context".to_string(), "@media".to_string()),
            ],
        );
        assert_eq!(decls(&info), vec![("color", "red")]);
    }

    #[test]
    fn test_unknown_class_resolves_empty() {
        let table = StyleTable::from_css(".flex { display: flex; }").unwrap();
        assert!(table.lookup("sm:flex").is_empty());
        assert!(!table.contains("sm:flex"));
    }

    #[test]
    fn test_mask_preserves_length() {
        let css = ".md\\:w-1\\/2:hover { --x:  ; width: 50%; } .é\\é {}";
        assert_eq!(mask_for_parsing(css).len(), css.len());
    }

    #[test]
    fn test_block_headers_nest_pseudo_inside_media() {
        let ctx = SelectorContext::new(
            vec!["@media (min-width: 768px)".into()],
            Some(":hover".into()),
        );
        assert_eq!(ctx.block_headers(), vec!["@media (min-width: 768px)", "&:hover"]);
    }
}
