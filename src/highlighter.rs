//! Host-facing highlighting session
//!
//! The host opens buffers, forwards its buffer-changed notifications and asks for
//! the spans of the lines it is about to draw. Per buffer the session keeps:
//! - for per-line languages, the cached [`LineStates`], updated incrementally when
//!   the host says which lines an edit touched
//! - for whole-document languages, the last [`StyleMap`], rebuilt from scratch on
//!   every change
//!
//! Everything is synchronous. Each call works on the snapshot it is handed and
//! replaces the previous result of that buffer.

use crate::buffer::{BufferChanged, BufferId, TextBuffer};
use crate::error::Diagnostic;
use crate::language::{Language, LanguageRegistry, Tokenizer};
use crate::lexing::{BlockState, LineScan, LineScanner, LineStates};
use crate::style::{StyleMap, StyledSpan};
use serde::Serialize;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

/// Styles of a whole buffer plus what was recovered while building them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub styles: StyleMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Highlight a full text with a language's tokenizer
pub fn highlight_text(language: &Language, text: &str) -> Highlight {
    match language.tokenizer() {
        Tokenizer::PerLine(scanner) => Highlight {
            styles: LineStates::scan_text(scanner, text).to_style_map(),
            diagnostics: Vec::new(),
        },
        Tokenizer::WholeDocument(tokenizer) => {
            let (styles, diagnostics) = tokenizer.style_map(text);
            Highlight {
                styles,
                diagnostics,
            }
        }
    }
}

/// Style map of a full text for a language id; empty for an unknown language
pub fn tokenize_document(text: &str, language: &str, registry: &LanguageRegistry) -> StyleMap {
    match registry.get(language) {
        Some(language) => highlight_text(&language, text).styles,
        None => {
            tracing::debug!(language, "no tokenizer registered");
            StyleMap::new()
        }
    }
}

/// Scan one line of a per-line language with the state carried in from the line
/// before
pub fn scan_line(scanner: &LineScanner, line: &str, incoming: BlockState) -> LineScan {
    scanner.scan_line(line, incoming)
}

#[derive(Debug)]
enum Cache {
    PerLine(LineStates),
    WholeDocument(Highlight),
}

#[derive(Debug)]
struct Document {
    language: Arc<Language>,
    cache: Cache,
}

impl Document {
    fn build(language: Arc<Language>, buffer: &dyn TextBuffer) -> Self {
        let cache = match language.tokenizer() {
            Tokenizer::PerLine(scanner) => Cache::PerLine(LineStates::scan_all(scanner, buffer)),
            Tokenizer::WholeDocument(_) => {
                Cache::WholeDocument(highlight_text(&language, &buffer.text()))
            }
        };
        Self { language, cache }
    }
}

/// Highlighting state for every open buffer
pub struct Highlighter {
    registry: Arc<LanguageRegistry>,
    documents: HashMap<BufferId, Document>,
}

impl Highlighter {
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self {
            registry,
            documents: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Start tracking a buffer and highlight it
    ///
    /// Returns false when the language is unknown; the buffer then simply has no
    /// styling.
    pub fn open(&mut self, id: BufferId, language: &str, buffer: &dyn TextBuffer) -> bool {
        let Some(language) = self.registry.get(language) else {
            tracing::debug!(buffer = id.0, language, "unsupported language, no styling");
            self.documents.remove(&id);
            return false;
        };
        tracing::debug!(buffer = id.0, language = language.id(), "buffer opened");
        self.documents.insert(id, Document::build(language, buffer));
        true
    }

    /// React to a buffer-changed notification
    ///
    /// `buffer` is the content after the change. Returns the lines whose styles
    /// were recomputed; an untracked buffer gives an empty range.
    pub fn buffer_changed(&mut self, change: &BufferChanged, buffer: &dyn TextBuffer) -> Range<usize> {
        let Some(document) = self.documents.get_mut(&change.buffer) else {
            return 0..0;
        };
        let line_count = buffer.line_count();

        match (&mut document.cache, document.language.tokenizer()) {
            (Cache::PerLine(states), Tokenizer::PerLine(scanner)) => match change.edit {
                Some(edit) => {
                    let range = states.apply_edit(scanner, edit, buffer);
                    tracing::debug!(buffer = change.buffer.0, ?range, "incremental rescan");
                    range
                }
                None => {
                    *states = LineStates::scan_all(scanner, buffer);
                    tracing::debug!(buffer = change.buffer.0, line_count, "full rescan");
                    0..line_count
                }
            },
            (cache, _) => {
                *cache = Cache::WholeDocument(highlight_text(&document.language, &buffer.text()));
                tracing::debug!(buffer = change.buffer.0, line_count, "re-tokenized document");
                0..line_count
            }
        }
    }

    /// Stop tracking a buffer
    pub fn close(&mut self, id: BufferId) {
        self.documents.remove(&id);
    }

    pub fn is_open(&self, id: BufferId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn language(&self, id: BufferId) -> Option<&Arc<Language>> {
        self.documents.get(&id).map(|document| &document.language)
    }

    /// Spans for one line of a buffer, empty when there are none
    pub fn line_styles(&self, id: BufferId, line: usize) -> &[StyledSpan] {
        match self.documents.get(&id).map(|document| &document.cache) {
            Some(Cache::PerLine(states)) => states.spans(line),
            Some(Cache::WholeDocument(highlight)) => highlight.styles.line(line),
            None => &[],
        }
    }

    /// Style map of a whole buffer
    pub fn style_map(&self, id: BufferId) -> Option<StyleMap> {
        match &self.documents.get(&id)?.cache {
            Cache::PerLine(states) => Some(states.to_style_map()),
            Cache::WholeDocument(highlight) => Some(highlight.styles.clone()),
        }
    }

    /// Diagnostics of the last tokenize of a buffer
    pub fn diagnostics(&self, id: BufferId) -> &[Diagnostic] {
        match self.documents.get(&id).map(|document| &document.cache) {
            Some(Cache::WholeDocument(highlight)) => &highlight.diagnostics,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{LineEdit, TextSnapshot};
    use crate::style::StyleTag;

    fn highlighter() -> Highlighter {
        Highlighter::new(Arc::new(LanguageRegistry::with_defaults()))
    }

    #[test]
    fn test_open_unknown_language() {
        let mut highlighter = highlighter();
        let id = BufferId(1);
        assert!(!highlighter.open(id, "cobol", &TextSnapshot::new("MOVE A TO B")));
        assert!(!highlighter.is_open(id));
        assert!(highlighter.line_styles(id, 0).is_empty());
        assert!(highlighter.style_map(id).is_none());
    }

    #[test]
    fn test_per_line_incremental_change() {
        let mut highlighter = highlighter();
        let id = BufferId(1);
        highlighter.open(id, "c", &TextSnapshot::new("int a;\nint b;\nint c;"));

        let after = TextSnapshot::new("int a; /*\nint b;\nint c;");
        let range = highlighter.buffer_changed(
            &BufferChanged::with_edit(id, LineEdit::single_line(0)),
            &after,
        );

        assert_eq!(range, 0..3);
        assert_eq!(
            highlighter.line_styles(id, 2),
            &[StyledSpan::new(0, 6, StyleTag::Comment)]
        );
    }

    #[test]
    fn test_whole_document_change_retokenizes() {
        let mut highlighter = highlighter();
        let id = BufferId(7);
        highlighter.open(id, "python", &TextSnapshot::new("x = 1\ny = 2\n"));
        assert_eq!(
            highlighter.line_styles(id, 1),
            &[StyledSpan::new(4, 1, StyleTag::Number)]
        );

        // An edit on a later line is picked up without touching line 0
        let after = TextSnapshot::new("x = 1\ny = '''\n");
        let range = highlighter.buffer_changed(&BufferChanged::whole(id), &after);

        assert_eq!(range, 0..3);
        assert!(highlighter.line_styles(id, 1).is_empty());
        assert_eq!(highlighter.diagnostics(id).len(), 1);
    }

    #[test]
    fn test_change_for_untracked_buffer() {
        let mut highlighter = highlighter();
        let range = highlighter.buffer_changed(
            &BufferChanged::whole(BufferId(3)),
            &TextSnapshot::new("x"),
        );
        assert_eq!(range, 0..0);
    }

    #[test]
    fn test_close_drops_state() {
        let mut highlighter = highlighter();
        let id = BufferId(2);
        highlighter.open(id, "c", &TextSnapshot::new("return;"));
        assert_eq!(highlighter.language(id).map(|l| l.id()), Some("c"));
        highlighter.close(id);
        assert!(highlighter.line_styles(id, 0).is_empty());
    }

    #[test]
    fn test_tokenize_document_by_id() {
        let registry = LanguageRegistry::with_defaults();
        let map = tokenize_document("/* a */\ncode();\n/* b\nc */", "c", &registry);
        assert_eq!(map.line(0), &[StyledSpan::new(0, 7, StyleTag::Comment)]);
        assert_eq!(map.line(2), &[StyledSpan::new(0, 4, StyleTag::Comment)]);
        assert!(tokenize_document("x", "nope", &registry).is_empty());
    }
}
