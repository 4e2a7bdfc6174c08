//! Colors for the viewer
//!
//! Two layers: `syntax` maps each [`StyleTag`] to a terminal style, and the
//! methods below name the UI element they style so the render code never picks
//! colors itself.

use ratatui::style::{Color, Modifier, Style};
use synscan::StyleTag;

#[derive(Debug, Clone)]
pub struct Theme {
    active: Style,
    cursor_line: Style,
    label: Style,
    error: Style,
    title: Style,
}

impl Theme {
    /// Terminal style of a style tag
    pub fn syntax(&self, tag: StyleTag) -> Style {
        match tag {
            StyleTag::Default => Style::default(),
            StyleTag::Keyword => Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            StyleTag::Builtin => Style::default().fg(Color::Cyan),
            StyleTag::Type => Style::default().fg(Color::Yellow),
            StyleTag::String => Style::default().fg(Color::Green),
            StyleTag::Comment => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            StyleTag::Number => Style::default().fg(Color::LightRed),
            StyleTag::Operator => Style::default().fg(Color::White),
            StyleTag::Directive => Style::default().fg(Color::LightMagenta),
            StyleTag::CallTarget => Style::default().fg(Color::LightBlue),
            StyleTag::Argument => Style::default().fg(Color::LightYellow),
        }
    }

    /// Background of the line holding the file cursor
    pub fn file_viewer_cursor(&self) -> Style {
        self.cursor_line
    }

    pub fn outline_selected(&self) -> Style {
        self.active
    }

    pub fn status_label(&self) -> Style {
        self.label
    }

    pub fn error_message(&self) -> Style {
        self.error
    }

    pub fn title_bar(&self) -> Style {
        self.title
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            cursor_line: Style::default().bg(Color::Rgb(40, 40, 60)),
            label: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            title: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}
