//! Symbol extraction for the outline
//!
//! A language picks one [`SymbolExtractionStrategy`]:
//! - [`StructuralGrammar`]: parses the whole buffer and walks the definitions
//!   breadth-first (`class A`, `def f()`)
//! - [`LineHeuristic`]: matches each physical line on its own (`#include <x>`,
//!   `function main()`)
//!
//! The result is always a flat list; nesting is never inferred. Symbols are
//! extracted on demand (tab switch, save) rather than on every edit, see
//! [`Outline::refresh`].

pub mod line_heuristic;
pub mod navigation;
pub mod python;
mod symbol;

pub use line_heuristic::LineHeuristic;
pub use navigation::Outline;
pub use python::StructuralGrammar;
pub use symbol::{Extraction, Symbol, SymbolExtractionStrategy, SymbolKind};

use crate::error::Diagnostic;
use crate::language::LanguageRegistry;

/// Extract symbols for a language id, keeping diagnostics
///
/// An unknown language, or one without a strategy, yields an empty result with an
/// unsupported-language diagnostic.
pub fn extract_symbols_with_diagnostics(
    text: &str,
    language: &str,
    registry: &LanguageRegistry,
) -> Extraction {
    match registry.extractor(language) {
        Some(strategy) => {
            let extraction = strategy.extract(text);
            tracing::debug!(
                language,
                strategy = strategy.name(),
                symbols = extraction.symbols.len(),
                "extracted symbols"
            );
            extraction
        }
        None => {
            tracing::debug!(language, "no symbol strategy registered");
            Extraction::failed(Diagnostic::unsupported_language(language))
        }
    }
}

/// Extract symbols for a language id
///
/// Never fails: any problem gives an empty (or partial) list.
pub fn extract_symbols(text: &str, language: &str, registry: &LanguageRegistry) -> Vec<Symbol> {
    extract_symbols_with_diagnostics(text, language, registry).symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    #[test]
    fn test_dispatch_by_language() {
        let registry = LanguageRegistry::with_defaults();

        let c = extract_symbols("#define N 4\nint main() {\n", "c", &registry);
        assert_eq!(c.len(), 2);
        assert_eq!(c[1].label, "function main()");

        let python = extract_symbols("class A:\n    pass\n", "python", &registry);
        assert_eq!(python, vec![Symbol::new(SymbolKind::Class, "class A", 1)]);
    }

    #[test]
    fn test_unknown_language_is_empty() {
        let registry = LanguageRegistry::with_defaults();
        assert!(extract_symbols("class A:\n    pass\n", "unknown", &registry).is_empty());

        let extraction = extract_symbols_with_diagnostics("x", "unknown", &registry);
        assert_eq!(
            extraction.diagnostics[0].kind,
            DiagnosticKind::UnsupportedLanguage
        );
    }
}
