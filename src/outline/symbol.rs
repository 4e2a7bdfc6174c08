use crate::error::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a symbol stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolKind {
    Class,
    Function,
    Directive,
}

/// An outline entry: a display-ready label and the 1-based line it points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub label: String,
    pub line: usize,
}

impl Symbol {
    pub fn new(kind: SymbolKind, label: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            label: label.into(),
            line,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.label)
    }
}

/// Result of running a strategy over a buffer
///
/// On failure `symbols` holds whatever was collected (often nothing) and the
/// problem is described in `diagnostics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub symbols: Vec<Symbol>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols,
            diagnostics: Vec::new(),
        }
    }

    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            symbols: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A way of turning buffer text into outline symbols
///
/// Implementations never panic on malformed input; failures go into the returned
/// [`Extraction`].
pub trait SymbolExtractionStrategy: Send + Sync {
    /// Stable name, used in logs and reports
    fn name(&self) -> &str;

    /// Extract symbols from the full buffer text
    fn extract(&self, source: &str) -> Extraction;
}
