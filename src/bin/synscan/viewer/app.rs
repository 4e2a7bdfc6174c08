//! Application state and key handling
//!
//! Global keys (quit, focus switch, outline refresh) are handled here; the rest
//! go to whichever pane has focus.

use super::model::{Focus, Model};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Lines moved by PageUp/PageDown
const PAGE: isize = 20;

pub struct App {
    pub model: Model,
    pub focus: Focus,
    pub should_quit: bool,
}

impl App {
    pub fn new(model: Model) -> Self {
        App {
            model,
            focus: Focus::default(),
            should_quit: false,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab => {
                self.toggle_focus();
                return true;
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.model.refresh_outline();
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::FileViewer => self.handle_file_key(key.code),
            Focus::OutlineViewer => self.handle_outline_key(key.code),
        }
    }

    fn handle_file_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.model.move_cursor(-1),
            KeyCode::Down => self.model.move_cursor(1),
            KeyCode::PageUp => self.model.move_cursor(-PAGE),
            KeyCode::PageDown => self.model.move_cursor(PAGE),
            KeyCode::Home => self.model.cursor_to_start(),
            KeyCode::End => self.model.cursor_to_end(),
            _ => return false,
        }
        true
    }

    fn handle_outline_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.model.select_previous_symbol(),
            KeyCode::Down => self.model.select_next_symbol(),
            KeyCode::Enter => {
                if self.model.jump_to_selected() {
                    self.focus = Focus::FileViewer;
                }
            }
            _ => return false,
        }
        true
    }
}
