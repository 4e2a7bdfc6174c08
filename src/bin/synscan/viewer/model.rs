//! Data model for the viewer
//!
//! The Model holds the pure state:
//! - the file text and its highlighting session
//! - the outline and its selection
//! - the file cursor line
//!
//! It knows nothing about rendering, so it can be tested on its own.

use std::sync::Arc;
use synscan::buffer::TextBuffer;
use synscan::{
    BufferId, Diagnostic, Highlighter, Language, LanguageRegistry, Outline, StyledSpan,
    TextSnapshot,
};

const BUFFER: BufferId = BufferId(1);

/// Which pane currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    FileViewer,
    OutlineViewer,
}

impl Focus {
    /// Toggle focus to the other pane
    pub fn toggle(&self) -> Focus {
        match self {
            Focus::FileViewer => Focus::OutlineViewer,
            Focus::OutlineViewer => Focus::FileViewer,
        }
    }
}

pub struct Model {
    registry: Arc<LanguageRegistry>,
    language: Option<Arc<Language>>,
    buffer: TextSnapshot,
    highlighter: Highlighter,
    outline: Outline,
    cursor: usize,
}

impl Model {
    /// Build the model and run the first highlight and outline pass
    pub fn new(
        text: impl Into<String>,
        registry: Arc<LanguageRegistry>,
        language: Option<Arc<Language>>,
    ) -> Self {
        let buffer = TextSnapshot::new(text);
        let mut highlighter = Highlighter::new(registry.clone());
        if let Some(language) = &language {
            highlighter.open(BUFFER, language.id(), &buffer);
        }

        let mut model = Model {
            registry,
            language,
            buffer,
            highlighter,
            outline: Outline::new(),
            cursor: 0,
        };
        model.refresh_outline();
        model
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_deref()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line(&self, index: usize) -> &str {
        self.buffer.line(index).unwrap_or("")
    }

    pub fn line_styles(&self, index: usize) -> &[StyledSpan] {
        self.highlighter.line_styles(BUFFER, index)
    }

    /// Diagnostics from highlighting followed by those of the last outline refresh
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.highlighter
            .diagnostics(BUFFER)
            .iter()
            .chain(self.outline.diagnostics())
            .collect()
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn refresh_outline(&mut self) {
        match &self.language {
            Some(language) => {
                self.outline
                    .refresh(self.buffer.as_str(), language.id(), &self.registry)
            }
            None => self.outline = Outline::new(),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.line_count().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.line_count().saturating_sub(1);
    }

    pub fn select_next_symbol(&mut self) {
        self.outline.select_next();
    }

    pub fn select_previous_symbol(&mut self) {
        self.outline.select_previous();
    }

    /// Move the file cursor to the selected symbol; false when nothing is selected
    pub fn jump_to_selected(&mut self) -> bool {
        match self.outline.jump_target(self.line_count()) {
            Some(line) => {
                self.cursor = line;
                true
            }
            None => false,
        }
    }
}
