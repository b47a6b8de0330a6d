//! Byte-range text edits.
//!
//! The rewriter never mutates a syntax tree. It computes replacements
//! against the original source and applies them in one pass, back to
//! front, so earlier offsets stay valid while later ones change.

use serde::Serialize;
use thiserror::Error;

/// Replaces bytes `[start..end)` of the ORIGINAL source with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
    /// Human-readable label for diagnostics.
    pub label: String,
    /// Among insertions at the same offset, lower priority lands first in the output.
    pub priority: i32,
}

impl TextEdit {
    pub fn replace(start: usize, end: usize, replacement: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
            label: label.into(),
            priority: 0,
        }
    }

    pub fn insert(at: usize, text: impl Into<String>, label: impl Into<String>) -> Self {
        Self::replace(at, at, text, label)
    }

    pub fn delete(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self::replace(start, end, String::new(), label)
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn is_insertion(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum EditConflict {
    #[error("Edits overlap: '{a_label}' [{a_start}..{a_end}) and '{b_label}' [{b_start}..{b_end})")]
    Overlapping {
        a_label: String,
        a_start: usize,
        a_end: usize,
        b_label: String,
        b_start: usize,
        b_end: usize,
    },
    #[error("Edit '{label}' byte range [{start}..{end}) is outside a {source_len}-byte source")]
    OutOfBounds {
        label: String,
        start: usize,
        end: usize,
        source_len: usize,
    },
    #[error("Edit '{label}' splits a UTF-8 character at byte {offset}")]
    NotCharBoundary { label: String, offset: usize },
}

/// A validated, non-overlapping set of edits for one source string.
#[derive(Debug, Clone, Default)]
pub struct EditSet {
    edits: Vec<TextEdit>,
}

impl EditSet {
    /// Sort and validate `edits` against `source`.
    pub fn new(mut edits: Vec<TextEdit>, source: &str) -> Result<Self, EditConflict> {
        edits.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.priority.cmp(&b.priority))
        });

        for edit in &edits {
            if edit.start > edit.end || edit.end > source.len() {
                return Err(EditConflict::OutOfBounds {
                    label: edit.label.clone(),
                    start: edit.start,
                    end: edit.end,
                    source_len: source.len(),
                });
            }
            for offset in [edit.start, edit.end] {
                if !source.is_char_boundary(offset) {
                    return Err(EditConflict::NotCharBoundary {
                        label: edit.label.clone(),
                        offset,
                    });
                }
            }
        }

        for pair in edits.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.is_insertion() && b.is_insertion() && a.start == b.start {
                continue;
            }
            if a.end > b.start {
                return Err(EditConflict::Overlapping {
                    a_label: a.label.clone(),
                    a_start: a.start,
                    a_end: a.end,
                    b_label: b.label.clone(),
                    b_start: b.start,
                    b_end: b.end,
                });
            }
        }

        Ok(Self { edits })
    }

    /// Apply every edit to `source` and return the new text.
    pub fn apply(&self, source: &str) -> String {
        let mut result = source.to_string();
        for edit in self.edits.iter().rev() {
            result.replace_range(edit.start..edit.end, &edit.replacement);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Edits in ascending start order.
    pub fn iter(&self) -> impl Iterator<Item = &TextEdit> {
        self.edits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_tag_and_drop_attribute() {
        let source = r#"<div className="flex" id="a">x</div>"#;
        let edits = vec![
            TextEdit::replace(1, 4, "LayoutStyle", "open tag"),
            TextEdit::delete(4, 21, "drop className"),
            TextEdit::replace(32, 35, "LayoutStyle", "close tag"),
        ];
        let set = EditSet::new(edits, source).unwrap();
        assert_eq!(set.apply(source), r#"<LayoutStyle id="a">x</LayoutStyle>"#);
    }

    #[test]
    fn test_edits_applied_regardless_of_input_order() {
        let source = "ab cd ef";
        let edits = vec![
            TextEdit::replace(6, 8, "YYY", "last"),
            TextEdit::replace(0, 2, "LONGER", "first"),
            TextEdit::replace(3, 5, "X", "middle"),
        ];
        let set = EditSet::new(edits, source).unwrap();
        assert_eq!(set.apply(source), "LONGER X YYY");
    }

    #[test]
    fn test_insertions_at_same_offset_follow_priority() {
        let source = "body";
        let edits = vec![
            TextEdit::insert(0, "second\n", "b").with_priority(1),
            TextEdit::insert(0, "first\n", "a"),
        ];
        let set = EditSet::new(edits, source).unwrap();
        assert_eq!(set.apply(source), "first\nsecond\nbody");
    }

    #[test]
    fn test_overlap_rejected() {
        let source = "hello world";
        let edits = vec![
            TextEdit::replace(3, 8, "X", "a"),
            TextEdit::replace(5, 10, "Y", "b"),
        ];
        assert!(matches!(
            EditSet::new(edits, source),
            Err(EditConflict::Overlapping { .. })
        ));
    }

    #[test]
    fn test_adjacent_edits_allowed() {
        let source = "<div className=\"x\">";
        let edits = vec![
            TextEdit::replace(1, 4, "A", "tag"),
            TextEdit::delete(4, 18, "attr"),
        ];
        let set = EditSet::new(edits, source).unwrap();
        assert_eq!(set.apply(source), "<A>");
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let edits = vec![TextEdit::delete(3, 10, "oob")];
        assert!(matches!(
            EditSet::new(edits, "hello"),
            Err(EditConflict::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_char_boundary_rejected() {
        let source = "é";
        let edits = vec![TextEdit::delete(1, 2, "half")];
        assert!(matches!(
            EditSet::new(edits, source),
            Err(EditConflict::NotCharBoundary { .. })
        ));
    }

    #[test]
    fn test_empty_set_is_identity() {
        let set = EditSet::new(vec![], "unchanged").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.apply("unchanged"), "unchanged");
    }
}
