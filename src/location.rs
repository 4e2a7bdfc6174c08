//! Position and location tracking for source text
//!
//! Every lexer in this crate works on byte offsets into the buffer. Renderers and the
//! outline want line/column pairs instead, so this module converts between the two.
//!
//! ## Conventions
//!
//! - Lines are 0-based, matching buffer line indices. Symbols convert to 1-based at
//!   the outline boundary.
//! - Columns are byte offsets from the start of the line. They always fall on UTF-8
//!   character boundaries because every lexer match does.
//! - A [`Location`] is end-exclusive: `0:0..0:3` covers the first three bytes.
//!
//! ## Byte-to-Line Conversion
//!
//! ```text
//! SourceLocation pre-computes line start byte offsets:
//!   "ab\ncd"  ->  line_starts = [0, 3]
//!
//! byte_to_position(4) uses binary search:
//!   - Find line: binary_search(&4) -> Err(2), so line 1
//!   - Column: 4 - 3 = 1
//! ```
//!
//! This is O(log n) per conversion, which keeps whole-document tokenizing linear in
//! practice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A position in source text (0-based line, byte column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A start/end pair of positions, end-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the location starts and ends on the same physical line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Number of physical lines touched by this location
    pub fn line_span(&self) -> usize {
        self.end.line - self.start.line + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Position::default(), Position::default())
    }
}

/// Fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Total length of the source in bytes
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// Convert a byte range to a location
    pub fn range_to_location(&self, range: &Range<usize>) -> Location {
        Location::new(
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    /// Total number of lines (a trailing newline opens one more, empty, line)
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where a line starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Length in bytes of a line's content, excluding its line terminator
    pub fn line_len(&self, source: &str, line: usize) -> usize {
        let Some(start) = self.line_start(line) else {
            return 0;
        };
        let end = match self.line_start(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        };
        let text = &source[start..end];
        text.strip_suffix('\r').unwrap_or(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let pos = Position::new(5, 10);
        assert_eq!(format!("{}", pos), "5:10");
    }

    #[test]
    fn test_location_display() {
        let location = Location::new(Position::new(1, 0), Position::new(2, 5));
        assert_eq!(format!("{}", location), "1:0..2:5");
        assert_eq!(location.line_span(), 2);
        assert!(!location.is_single_line());
    }

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("Hello");
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(0, 4));
        assert_eq!(loc.byte_to_position(5), Position::new(0, 5));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("ab\ncd\n");
        assert_eq!(loc.byte_to_position(2), Position::new(0, 2));
        assert_eq!(loc.byte_to_position(3), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(1, 1));
        assert_eq!(loc.byte_to_position(6), Position::new(2, 0));
        assert_eq!(loc.line_count(), 3);
    }

    #[test]
    fn test_byte_to_position_multibyte() {
        // 'é' is two bytes; columns are byte offsets
        let loc = SourceLocation::new("é = 1\nx");
        assert_eq!(loc.byte_to_position(2), Position::new(0, 2));
        assert_eq!(loc.byte_to_position(7), Position::new(1, 0));
    }

    #[test]
    fn test_line_len_excludes_terminators() {
        let source = "abc\r\nde\n\nlast";
        let loc = SourceLocation::new(source);
        assert_eq!(loc.line_len(source, 0), 3);
        assert_eq!(loc.line_len(source, 1), 2);
        assert_eq!(loc.line_len(source, 2), 0);
        assert_eq!(loc.line_len(source, 3), 4);
        assert_eq!(loc.line_len(source, 9), 0);
    }
}
