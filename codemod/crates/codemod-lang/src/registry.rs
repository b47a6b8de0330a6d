//! Language registry: detect languages and build configured parsers.

use crate::{LangError, SupportedLanguage};
use std::path::Path;
use tree_sitter::Parser;

/// Create a parser configured for the given language.
pub fn parser_for_language(lang: SupportedLanguage) -> Result<Parser, LangError> {
    let language = lang.ts_language()?;
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|_| LangError::VersionMismatch(lang))?;
    Ok(parser)
}

/// Detect language from a file path's extension.
pub fn detect_language(path: &Path) -> Result<SupportedLanguage, LangError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    SupportedLanguage::from_extension(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jsx() {
        assert_eq!(
            detect_language(Path::new("src/components/dom/Layout.jsx")).unwrap(),
            SupportedLanguage::Jsx
        );
    }

    #[test]
    fn test_detect_tsx() {
        assert_eq!(
            detect_language(Path::new("app/page.tsx")).unwrap(),
            SupportedLanguage::Tsx
        );
    }

    #[test]
    fn test_detect_css() {
        assert_eq!(
            detect_language(Path::new("app/global.css")).unwrap(),
            SupportedLanguage::Css
        );
    }

    #[test]
    fn test_detect_unsupported() {
        assert!(detect_language(Path::new("package.json")).is_err());
        assert!(detect_language(Path::new("Makefile")).is_err());
    }

    #[test]
    fn test_parser_for_jsx_parses_markup() {
        let mut parser = parser_for_language(SupportedLanguage::Jsx).unwrap();
        let tree = parser
            .parse("const a = <div className=\"flex\">hi</div>;", None)
            .unwrap();
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn test_parser_for_css() {
        let mut parser = parser_for_language(SupportedLanguage::Css).unwrap();
        let tree = parser.parse(".flex { display: flex; }", None).unwrap();
        assert!(!tree.root_node().has_error());
    }
}
