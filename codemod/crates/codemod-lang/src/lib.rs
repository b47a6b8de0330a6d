//! codemod-lang: grammar selection and JSX-specific helpers.
//!
//! This crate knows which tree-sitter grammar parses which file type,
//! plus the few dialect conventions (directives, quote style, semicolons)
//! the rewriter needs to emit code that blends in.

pub mod javascript;
pub mod registry;

use thiserror::Error;
use tree_sitter::Language;

#[derive(Debug, Clone, Error)]
pub enum LangError {
    #[error("Unsupported language: {0}")]
    Unsupported(String),

    #[error("Grammar for {0:?} was not compiled into this build")]
    GrammarMissing(SupportedLanguage),

    #[error("Grammar for {0:?} is incompatible with the linked tree-sitter runtime")]
    VersionMismatch(SupportedLanguage),
}

/// Supported language identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Css,
}

impl SupportedLanguage {
    /// Detect language from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Result<Self, LangError> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Ok(Self::JavaScript),
            "jsx" => Ok(Self::Jsx),
            "ts" | "mts" | "cts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            "css" => Ok(Self::Css),
            other => Err(LangError::Unsupported(other.to_string())),
        }
    }

    /// Whether files of this language may contain JSX markup.
    pub fn supports_markup(&self) -> bool {
        matches!(self, Self::JavaScript | Self::Jsx | Self::Tsx)
    }

    /// Get the tree-sitter Language for this language.
    ///
    /// Plain JavaScript and JSX share the JavaScript grammar, which parses
    /// JSX natively. TypeScript and TSX need distinct grammars because
    /// `<T>` is a type assertion in `.ts` and an element in `.tsx`.
    pub fn ts_language(&self) -> Result<Language, LangError> {
        match self {
            #[cfg(feature = "javascript")]
            Self::JavaScript | Self::Jsx => Ok(tree_sitter_javascript::LANGUAGE.into()),
            #[cfg(all(not(feature = "javascript"), feature = "typescript"))]
            Self::JavaScript | Self::Jsx => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
            #[cfg(feature = "typescript")]
            Self::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            #[cfg(feature = "typescript")]
            Self::Tsx => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
            #[cfg(feature = "css")]
            Self::Css => Ok(tree_sitter_css::LANGUAGE.into()),
            #[allow(unreachable_patterns)]
            other => Err(LangError::GrammarMissing(*other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SupportedLanguage::from_extension(".JSX").unwrap(), SupportedLanguage::Jsx);
        assert_eq!(SupportedLanguage::from_extension("mjs").unwrap(), SupportedLanguage::JavaScript);
        assert_eq!(SupportedLanguage::from_extension("tsx").unwrap(), SupportedLanguage::Tsx);
        assert!(SupportedLanguage::from_extension("scss").is_err());
    }

    #[test]
    fn test_markup_support() {
        assert!(SupportedLanguage::Jsx.supports_markup());
        assert!(SupportedLanguage::Tsx.supports_markup());
        assert!(!SupportedLanguage::TypeScript.supports_markup());
        assert!(!SupportedLanguage::Css.supports_markup());
    }
}
