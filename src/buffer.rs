//! Text buffer collaborators
//!
//! The host editor owns the text. The core only needs to read it (the whole text,
//! or one line by index) and to be told when it changed. [`TextSnapshot`] is a
//! ready-made implementation for hosts that hold plain strings.

use crate::location::SourceLocation;
use std::borrow::Cow;

/// Read access to a buffer's current content
///
/// Lines are split on `\n`; a trailing `\r` is not part of the line. A buffer
/// ending in a newline has one more, empty, line after it.
pub trait TextBuffer {
    /// Full text of the buffer
    fn text(&self) -> Cow<'_, str>;

    /// Text of one line without its terminator
    fn line(&self, index: usize) -> Option<&str>;

    /// Number of lines
    fn line_count(&self) -> usize;
}

/// Identity of a buffer, as the host knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

/// Line-level description of an edit
///
/// `removed` lines starting at `start_line` were replaced by `inserted` lines. An
/// edit inside a single line is `{start_line, removed: 1, inserted: 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdit {
    pub start_line: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl LineEdit {
    pub fn new(start_line: usize, removed: usize, inserted: usize) -> Self {
        Self {
            start_line,
            removed,
            inserted,
        }
    }

    /// An edit that stays within one line
    pub fn single_line(line: usize) -> Self {
        Self::new(line, 1, 1)
    }
}

/// Notification the host fires after a buffer's content changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferChanged {
    pub buffer: BufferId,
    /// Lines touched by the edit, when the host knows them
    pub edit: Option<LineEdit>,
}

impl BufferChanged {
    /// A change with unknown extent: everything is rebuilt
    pub fn whole(buffer: BufferId) -> Self {
        Self { buffer, edit: None }
    }

    pub fn with_edit(buffer: BufferId, edit: LineEdit) -> Self {
        Self {
            buffer,
            edit: Some(edit),
        }
    }
}

/// An immutable snapshot of buffer text with a line index
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    text: String,
    lines: SourceLocation,
}

impl TextSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = SourceLocation::new(&text);
        Self { text, lines }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextBuffer for TextSnapshot {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn line(&self, index: usize) -> Option<&str> {
        let start = self.lines.line_start(index)?;
        let len = self.lines.line_len(&self.text, index);
        Some(&self.text[start..start + len])
    }

    fn line_count(&self) -> usize {
        self.lines.line_count()
    }
}

impl From<&str> for TextSnapshot {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lines() {
        let snapshot = TextSnapshot::new("first\r\nsecond\n");
        assert_eq!(snapshot.line_count(), 3);
        assert_eq!(snapshot.line(0), Some("first"));
        assert_eq!(snapshot.line(1), Some("second"));
        assert_eq!(snapshot.line(2), Some(""));
        assert_eq!(snapshot.line(3), None);
    }

    #[test]
    fn test_empty_snapshot_has_one_line() {
        let snapshot = TextSnapshot::new("");
        assert_eq!(snapshot.line_count(), 1);
        assert_eq!(snapshot.line(0), Some(""));
    }
}
