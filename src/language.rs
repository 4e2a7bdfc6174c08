//! Language registration
//!
//! A language is data ([`LanguageSpec`]) plus the strategies compiled from it:
//! - a tokenizer: either the per-line scanner or the whole-document tokenizer
//! - an optional symbol-extraction strategy for the outline
//!
//! Compiling happens once, at registration, so that a bad definition fails there
//! and every later lookup is infallible. Adding a language never touches the
//! scanning algorithms; it is a new [`LanguageSpec`] plus a choice of existing strategies.

pub mod builtin;
pub mod registry;
pub mod spec;

pub use registry::LanguageRegistry;
pub use spec::{LanguageFile, LanguageSpec, LineSyntax, SymbolStrategy, TokenizerStrategy};

use crate::classifier::WordTables;
use crate::error::ConfigError;
use crate::lexing::document::DocumentTokenizer;
use crate::lexing::line_scan::LineScanner;
use crate::outline::line_heuristic::LineHeuristic;
use crate::outline::python::StructuralGrammar;
use crate::outline::SymbolExtractionStrategy;
use std::fmt;
use std::sync::Arc;

/// The tokenizer a language was compiled to
#[derive(Debug, Clone)]
pub enum Tokenizer {
    PerLine(LineScanner),
    WholeDocument(DocumentTokenizer),
}

/// A validated language with its compiled strategies
#[derive(Clone)]
pub struct Language {
    spec: LanguageSpec,
    tables: WordTables,
    tokenizer: Tokenizer,
    extractor: Option<Arc<dyn SymbolExtractionStrategy>>,
}

impl Language {
    /// Validate a spec and build its strategies
    pub fn compile(spec: LanguageSpec) -> Result<Self, ConfigError> {
        spec.validate()?;

        let tables = WordTables::from_spec(&spec);
        let tokenizer = match &spec.tokenizer {
            TokenizerStrategy::PerLine(syntax) => {
                Tokenizer::PerLine(LineScanner::new(&spec.id, syntax, &spec.keywords, &spec.builtins)?)
            }
            TokenizerStrategy::WholeDocument => {
                Tokenizer::WholeDocument(DocumentTokenizer::new(tables.clone()))
            }
        };
        let extractor: Option<Arc<dyn SymbolExtractionStrategy>> = match spec.symbols {
            SymbolStrategy::None => None,
            SymbolStrategy::StructuralGrammar => Some(Arc::new(StructuralGrammar::new())),
            SymbolStrategy::LineHeuristic => Some(Arc::new(LineHeuristic::from_spec(&spec))),
        };

        Ok(Self {
            spec,
            tables,
            tokenizer,
            extractor,
        })
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn spec(&self) -> &LanguageSpec {
        &self.spec
    }

    pub fn tables(&self) -> &WordTables {
        &self.tables
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// The strategy selected by the spec, if any
    pub fn extractor(&self) -> Option<&Arc<dyn SymbolExtractionStrategy>> {
        self.extractor.as_ref()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("id", &self.spec.id)
            .field("tokenizer", &self.spec.tokenizer)
            .field("symbols", &self.spec.symbols)
            .finish()
    }
}
