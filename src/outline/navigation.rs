//! Outline navigation model
//!
//! Holds the symbols of the last refresh plus a selection, and turns the selected
//! symbol into the line the editor cursor should move to. A renderer draws it; this
//! type only keeps the state.

use super::symbol::Symbol;
use super::extract_symbols_with_diagnostics;
use crate::error::Diagnostic;
use crate::language::LanguageRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    symbols: Vec<Symbol>,
    diagnostics: Vec<Diagnostic>,
    selected: Option<usize>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the symbol list from the current buffer text
    ///
    /// The selection is kept by index when it still fits, otherwise it moves to
    /// the first symbol (or to nothing for an empty list).
    pub fn refresh(&mut self, text: &str, language: &str, registry: &LanguageRegistry) {
        let extraction = extract_symbols_with_diagnostics(text, language, registry);
        self.symbols = extraction.symbols;
        self.diagnostics = extraction.diagnostics;
        self.selected = match (self.selected, self.symbols.is_empty()) {
            (_, true) => None,
            (Some(index), false) if index < self.symbols.len() => Some(index),
            (_, false) => Some(0),
        };
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Symbol> {
        self.symbols.get(self.selected?)
    }

    /// Select a symbol by index; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.symbols.len() {
            self.selected = Some(index);
        }
    }

    pub fn select_next(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1).min(self.symbols.len() - 1),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| index.saturating_sub(1)));
    }

    /// 0-based line to place the cursor on for the selected symbol
    ///
    /// Clamped to the last line of a buffer with `line_count` lines, the way a
    /// cursor stops moving down at the end of the document.
    pub fn jump_target(&self, line_count: usize) -> Option<usize> {
        let symbol = self.selected()?;
        let line = symbol.line.saturating_sub(1);
        Some(line.min(line_count.saturating_sub(1)))
    }
}
