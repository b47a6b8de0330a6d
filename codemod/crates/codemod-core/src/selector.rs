//! Utility-class selector parsing.
//!
//! Compiled utility CSS escapes every non-identifier character in a class
//! name (`.md\:w-1\/2`, `.\32xl\:p-4`). These helpers undo the escaping and
//! split off a trailing pseudo-class.

use crate::stylesheet::is_ident_char;

/// A selector of the form `.class` or `.class:pseudo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    /// Unescaped class name, as written in markup.
    pub class: String,
    /// Pseudo-class/element suffix including its colon(s), e.g. `:hover`.
    pub pseudo: Option<String>,
}

/// Split a selector list on top-level commas.
pub fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let mut escaped = false;

    for (i, c) in list.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

/// Parse a single selector. Returns `None` for anything other than one class
/// optionally followed by a pseudo-class chain (no combinators, no
/// additional classes or attributes).
pub fn parse_class_selector(selector: &str) -> Option<ClassSelector> {
    let selector = selector.trim();
    let rest = selector.strip_prefix('.')?;

    let mut class = String::new();
    let mut chars = rest.char_indices().peekable();
    let mut consumed = rest.len();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let (_, escaped) = chars.next()?;
            if escaped.is_ascii_hexdigit() {
                let mut hex = String::from(escaped);
                while hex.len() < 6 {
                    match chars.next_if(|(_, h)| h.is_ascii_hexdigit()) {
                        Some((_, h)) => hex.push(h),
                        None => break,
                    }
                }
                // One whitespace character terminates a hex escape.
                chars.next_if(|(_, w)| *w == ' ');
                let code = u32::from_str_radix(&hex, 16).ok()?;
                class.push(char::from_u32(code)?);
            } else {
                class.push(escaped);
            }
        } else if is_ident_char(c) {
            class.push(c);
        } else {
            consumed = i;
            break;
        }
    }

    if class.is_empty() {
        return None;
    }

    let tail = &rest[consumed..];
    if tail.is_empty() {
        return Some(ClassSelector { class, pseudo: None });
    }
    let is_pseudo_chain = tail.starts_with(':')
        && !tail
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '>' | '+' | '~' | '.' | '[' | '#'));
    is_pseudo_chain.then(|| ClassSelector {
        class,
        pseudo: Some(tail.to_string()),
    })
}
