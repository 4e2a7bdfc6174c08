//! Line-heuristic symbol strategy
//!
//! One pass over physical lines, each line judged on its own:
//! - a trimmed line starting with the directive prefix is a directive symbol,
//!   labelled with the trimmed line itself
//! - a line matching `return-type name(params) {` is a function symbol,
//!   labelled `function name()`
//!
//! There is no scope tracking and a signature split over several lines is not seen.

use super::symbol::{Extraction, Symbol, SymbolExtractionStrategy, SymbolKind};
use crate::language::{LanguageSpec, TokenizerStrategy};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SIGNATURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_\*\s]*?)\s+\**([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)\s*\{")
        .unwrap()
});

#[derive(Debug, Clone, Default)]
pub struct LineHeuristic {
    directive_prefix: Option<String>,
    keywords: HashSet<String>,
}

impl LineHeuristic {
    pub fn new(directive_prefix: Option<String>, keywords: HashSet<String>) -> Self {
        Self {
            directive_prefix,
            keywords,
        }
    }

    /// Directive prefix from the language's per-line syntax, keywords from its table
    pub fn from_spec(spec: &LanguageSpec) -> Self {
        let directive_prefix = match &spec.tokenizer {
            TokenizerStrategy::PerLine(syntax) => syntax.directive_prefix.clone(),
            TokenizerStrategy::WholeDocument => None,
        };
        Self::new(directive_prefix, spec.keywords.iter().cloned().collect())
    }

    fn symbol_for_line(&self, line: &str, number: usize) -> Option<Symbol> {
        let trimmed = line.trim();

        if let Some(prefix) = &self.directive_prefix {
            if trimmed.starts_with(prefix.as_str()) {
                return Some(Symbol::new(SymbolKind::Directive, trimmed, number));
            }
        }

        let caps = SIGNATURE_REGEX.captures(trimmed)?;
        let name = caps.get(2)?.as_str();
        // `else if (x) {` has the shape of a signature
        if self.keywords.contains(name) {
            return None;
        }
        Some(Symbol::new(
            SymbolKind::Function,
            format!("function {name}()"),
            number,
        ))
    }
}

impl SymbolExtractionStrategy for LineHeuristic {
    fn name(&self) -> &str {
        "line-heuristic"
    }

    fn extract(&self, source: &str) -> Extraction {
        let symbols = source
            .lines()
            .enumerate()
            .filter_map(|(index, line)| self.symbol_for_line(line, index + 1))
            .collect();
        Extraction::from_symbols(symbols)
    }
}
