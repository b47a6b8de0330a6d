//! Component synthesizer.
//!
//! Turns each distinct class-attribute literal of a file into one styled
//! component definition, resolving every class token against the
//! [`StyleTable`]. Tokens the table does not know are dropped silently.

use crate::scan::ScannedElement;
use crate::stylesheet::{SelectorContext, StyleTable};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_COMPONENT_SUFFIX: &str = "Style";

/// Declarations resolved from a class string, grouped by selector context.
/// The context-free group, when present, is always first; the remaining
/// groups follow in the order their first token appeared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub groups: Vec<(SelectorContext, IndexMap<String, String>)>,
    /// Tokens with no entry in the style table, in token order.
    pub dropped: Vec<String>,
}

impl ResolvedStyle {
    /// Resolve whitespace-separated class tokens against `table`.
    pub fn resolve<'a, I>(table: &StyleTable, tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut groups: IndexMap<SelectorContext, IndexMap<String, String>> = IndexMap::new();
        let mut dropped = Vec::new();

        for token in tokens {
            let entries = table.lookup(token);
            if entries.is_empty() {
                dropped.push(token.to_string());
                continue;
            }
            for info in entries {
                let group = groups.entry(info.context().clone()).or_default();
                for (property, value) in info.declarations() {
                    group.insert(property.clone(), value.clone());
                }
            }
        }

        let base = groups.shift_remove(&SelectorContext::default());
        let groups = base
            .map(|decls| (SelectorContext::default(), decls))
            .into_iter()
            .chain(groups)
            .collect();

        Self { groups, dropped }
    }

    /// Declarations that apply unconditionally.
    pub fn base(&self) -> Option<&IndexMap<String, String>> {
        self.groups
            .first()
            .filter(|(ctx, _)| ctx.is_empty())
            .map(|(_, decls)| decls)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render as a template literal body, two-space indented.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (context, declarations) in &self.groups {
            let headers = context.block_headers();
            let mut depth = 1;
            for header in &headers {
                push_line(&mut css, depth, &format!("{header} {{"));
                depth += 1;
            }
            for (property, value) in declarations {
                push_line(&mut css, depth, &format!("{property}: {value};"));
            }
            for _ in &headers {
                depth -= 1;
                push_line(&mut css, depth, "}");
            }
        }
        css
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(line);
    out.push('\n');
}

/// One generated styled component. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedComponent {
    /// Exported identifier, e.g. `LayoutStyle1`.
    pub name: String,
    /// The markup file the component was derived from.
    pub file: PathBuf,
    /// Where the definition is written, e.g. `Layout.style.jsx`.
    pub companion: PathBuf,
    /// The class-attribute literal this component replaces.
    pub class_names: String,
    /// Tag of the first element that carried `class_names`.
    pub tag: String,
    /// `styled.div` or `styled(Canvas)`.
    pub constructor: String,
    /// Template literal body.
    pub css: String,
}

impl SynthesizedComponent {
    /// The exported definition as it appears in the companion file.
    pub fn definition(&self) -> String {
        format!(
            "export const {} = {}`\n{}`\n",
            self.name, self.constructor, self.css
        )
    }
}

/// Every component synthesized during one migration run, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ComponentCollection {
    components: Vec<SynthesizedComponent>,
}

impl ComponentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynthesizedComponent> {
        self.components.iter()
    }

    /// Components synthesized from `file`, in creation order.
    pub fn for_file<'a>(&'a self, file: &'a Path) -> impl Iterator<Item = &'a SynthesizedComponent> + 'a {
        self.components.iter().filter(move |c| c.file == file)
    }

    /// The component `file` synthesized for `class_names`, if any.
    pub fn find(&self, file: &Path, class_names: &str) -> Option<&SynthesizedComponent> {
        self.components
            .iter()
            .find(|c| c.file == file && c.class_names == class_names)
    }

    /// Components grouped by companion path, groups in first-appearance order.
    pub fn by_companion(&self) -> Vec<(&Path, Vec<&SynthesizedComponent>)> {
        let mut groups: IndexMap<&Path, Vec<&SynthesizedComponent>> = IndexMap::new();
        for component in &self.components {
            groups
                .entry(component.companion.as_path())
                .or_default()
                .push(component);
        }
        groups.into_iter().collect()
    }

    fn push(&mut self, component: SynthesizedComponent) {
        self.components.push(component);
    }
}

/// What synthesizing one file produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileSynthesis {
    /// Names of newly created components, in scan order.
    pub created: Vec<String>,
    /// Elements whose literal matched an earlier component of the same file.
    pub reused: usize,
    /// Class tokens with no style table entry.
    pub dropped_tokens: Vec<String>,
}

pub struct ComponentSynthesizer<'t> {
    table: &'t StyleTable,
    suffix: String,
}

impl<'t> ComponentSynthesizer<'t> {
    pub fn new(table: &'t StyleTable) -> Self {
        Self {
            table,
            suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Synthesize components for `elements` (one file's scan, in scan order)
    /// and append them to `collection`.
    pub fn synthesize_file(
        &self,
        file: &Path,
        elements: &[ScannedElement],
        collection: &mut ComponentCollection,
    ) -> FileSynthesis {
        let mut outcome = FileSynthesis::default();

        for element in elements {
            let class_names = &element.attribute.value;
            if collection.find(file, class_names).is_some() {
                outcome.reused += 1;
                continue;
            }

            let style = ResolvedStyle::resolve(self.table, element.attribute.tokens());
            for token in &style.dropped {
                tracing::debug!(file = %file.display(), token = %token, "class not in style table, dropped");
            }
            outcome.dropped_tokens.extend(style.dropped.iter().cloned());

            let occurrence = collection.for_file(file).count();
            let component = SynthesizedComponent {
                name: self.component_name(file, occurrence),
                file: file.to_path_buf(),
                companion: companion_path(file),
                class_names: class_names.clone(),
                tag: element.tag.clone(),
                constructor: constructor_for(element),
                css: style.to_css(),
            };
            outcome.created.push(component.name.clone());
            collection.push(component);
        }

        outcome
    }

    /// `<Base><Suffix>` for the first component of a file, then
    /// `<Base><Suffix>1`, `<Base><Suffix>2`, ...
    pub fn component_name(&self, file: &Path, occurrence: usize) -> String {
        let base = pascal_case(
            file.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default(),
        );
        if occurrence == 0 {
            format!("{base}{}", self.suffix)
        } else {
            format!("{base}{}{occurrence}", self.suffix)
        }
    }
}

/// `src/components/dom/Layout.jsx` -> `src/components/dom/Layout.style.jsx`.
pub fn companion_path(file: &Path) -> PathBuf {
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let name = match file.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.style.{ext}"),
        None => format!("{stem}.style"),
    };
    file.with_file_name(name)
}

fn constructor_for(element: &ScannedElement) -> String {
    if element.is_intrinsic() {
        format!("styled.{}", element.tag)
    } else {
        format!("styled({})", element.tag)
    }
}

/// Capitalize the first letter of each identifier-safe run; drop the rest.
fn pascal_case(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    for part in stem.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$')) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
