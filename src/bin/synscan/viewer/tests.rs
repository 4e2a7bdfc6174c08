//! Whole-application tests against a test backend

use super::app::App;
use super::model::{Focus, Model};
use super::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use synscan::LanguageRegistry;

const PYTHON: &str = "import os\n\nclass Config:\n    def load(self):\n        pass\n\ndef main():\n    Config().load()\n";

/// Application wrapper drawing into an 80x24 test terminal
struct TestApp {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl TestApp {
    fn with_content(content: &str, language: &str) -> Self {
        let registry = Arc::new(LanguageRegistry::with_defaults());
        let language = registry.get(language);
        let app = App::new(Model::new(content, registry, language));
        let terminal = Terminal::new(TestBackend::new(80, 24)).expect("Failed to create terminal");
        TestApp { app, terminal }
    }

    fn send_key(&mut self, code: KeyCode) -> String {
        self.send_key_with_modifiers(code, KeyModifiers::empty())
    }

    fn send_key_with_modifiers(&mut self, code: KeyCode, modifiers: KeyModifiers) -> String {
        let _ = self.app.handle_key(KeyEvent::new(code, modifiers));
        self.render()
    }

    fn render(&mut self) -> String {
        let app = &self.app;
        self.terminal
            .draw(|frame| ui::render(frame, app, "test.py"))
            .expect("Failed to draw");

        let buffer = self.terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn test_initial_render_shows_both_panes() {
    let mut test = TestApp::with_content(PYTHON, "python");
    let screen = test.render();

    assert!(screen.contains("synscan:: test.py [Python]"));
    assert!(screen.contains("Outline"));
    assert!(screen.contains("class Config"));
    assert!(screen.contains("def main()"));
    assert!(screen.contains("def load()"));
    assert!(screen.contains("line 1/9"));
}

#[test]
fn test_enter_jumps_to_symbol() {
    let mut test = TestApp::with_content(PYTHON, "python");
    test.send_key(KeyCode::Tab);
    assert_eq!(test.app.focus, Focus::OutlineViewer);

    // Breadth-first: class Config, def main(), def load()
    test.send_key(KeyCode::Down);
    let screen = test.send_key(KeyCode::Enter);

    assert_eq!(test.app.model.cursor(), 6);
    assert_eq!(test.app.focus, Focus::FileViewer);
    assert!(screen.contains("line 7/9"));
}

#[test]
fn test_file_cursor_moves() {
    let mut test = TestApp::with_content(PYTHON, "python");
    test.send_key(KeyCode::Down);
    test.send_key(KeyCode::Down);
    assert_eq!(test.app.model.cursor(), 2);
    test.send_key(KeyCode::End);
    assert_eq!(test.app.model.cursor(), 8);
    test.send_key(KeyCode::Home);
    assert_eq!(test.app.model.cursor(), 0);
}

#[test]
fn test_broken_source_shows_diagnostic() {
    let mut test = TestApp::with_content("def broken(:\n    pass\n", "python");
    let screen = test.render();
    assert!(screen.contains("(no symbols)"));
    assert!(screen.contains("structural-parse-failure"));
}

#[test]
fn test_quit_keys() {
    let mut test = TestApp::with_content("int x;", "c");
    test.send_key(KeyCode::Char('x'));
    assert!(!test.app.should_quit);
    test.send_key_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(test.app.should_quit);
}

#[test]
fn test_refresh_keeps_outline() {
    let mut test = TestApp::with_content("#include <stdio.h>\nint main() {\n}\n", "c");
    assert_eq!(test.app.model.outline().symbols().len(), 2);
    let screen = test.send_key(KeyCode::Char('r'));
    assert!(screen.contains("function main()"));
    assert!(screen.contains("#include <stdio.h>"));
}
