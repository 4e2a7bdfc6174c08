//! Structural-grammar symbol strategy
//!
//! Lexes the buffer into logical lines ([`layout`]), parses class and function
//! definitions with a chumsky grammar ([`grammar`]) and walks the result
//! breadth-first. Labels are `class Name` and `def name()`; `async def` counts as a
//! function definition.
//!
//! Any failure, lexical or grammatical, gives an empty symbol list and a
//! structural-parse-failure diagnostic.

pub mod grammar;
pub mod layout;

use super::symbol::{Extraction, Symbol, SymbolExtractionStrategy, SymbolKind};
use grammar::{breadth_first, parse_definitions, DefinitionKind};
use layout::build_layout;

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralGrammar;

impl StructuralGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolExtractionStrategy for StructuralGrammar {
    fn name(&self) -> &str {
        "structural-grammar"
    }

    fn extract(&self, source: &str) -> Extraction {
        let parsed = build_layout(source).and_then(parse_definitions);
        let definitions = match parsed {
            Ok(definitions) => definitions,
            Err(diagnostic) => {
                tracing::warn!(%diagnostic, "structural parse failed");
                return Extraction::failed(diagnostic);
            }
        };

        let symbols = breadth_first(&definitions)
            .into_iter()
            .map(|definition| match definition.kind {
                DefinitionKind::Class => Symbol::new(
                    SymbolKind::Class,
                    format!("class {}", definition.name),
                    definition.line,
                ),
                DefinitionKind::Function => Symbol::new(
                    SymbolKind::Function,
                    format!("def {}()", definition.name),
                    definition.line,
                ),
            })
            .collect();

        Extraction::from_symbols(symbols)
    }
}
