//! Style tags, styled spans and the per-line style map
//!
//! This module holds the vocabulary shared by both tokenizing paths. Nothing here
//! knows about colors or fonts: a [`StyleTag`] names *what* a range of text is, and
//! the renderer decides how that looks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Display style assigned to a range of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    Default,
    Keyword,
    Builtin,
    Type,
    String,
    Comment,
    Number,
    Operator,
    Directive,
    CallTarget,
    Argument,
}

impl StyleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleTag::Default => "default",
            StyleTag::Keyword => "keyword",
            StyleTag::Builtin => "builtin",
            StyleTag::Type => "type",
            StyleTag::String => "string",
            StyleTag::Comment => "comment",
            StyleTag::Number => "number",
            StyleTag::Operator => "operator",
            StyleTag::Directive => "directive",
            StyleTag::CallTarget => "call-target",
            StyleTag::Argument => "argument",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse kind a lexer assigns to a lexeme before style resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntacticCategory {
    Keyword,
    String,
    Comment,
    Number,
    Identifier,
    Operator,
    Directive,
}

/// Resolved kind of a produced token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    Identifier,
    Builtin,
    Operator,
    Directive,
    Default,
}

/// A styled sub-range of one rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyledSpan {
    /// Byte column where the span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    pub style: StyleTag,
}

impl StyledSpan {
    pub fn new(start: usize, len: usize, style: StyleTag) -> Self {
        Self { start, len, style }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Styled spans for each line of a buffer, keyed by 0-based line index
///
/// Lines without an entry carry no extra styling. A style map is always rebuilt
/// wholesale; callers replace the previous map instead of patching it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMap {
    lines: BTreeMap<usize, Vec<StyledSpan>>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span to a line; zero-length spans are dropped
    pub fn push(&mut self, line: usize, span: StyledSpan) {
        if span.len == 0 {
            return;
        }
        self.lines.entry(line).or_default().push(span);
    }

    /// Replace all spans of a line
    pub fn set_line(&mut self, line: usize, spans: Vec<StyledSpan>) {
        if spans.is_empty() {
            self.lines.remove(&line);
        } else {
            self.lines.insert(line, spans);
        }
    }

    /// Spans for a line, in the order they were produced
    pub fn line(&self, line: usize) -> &[StyledSpan] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over styled lines in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[StyledSpan])> {
        self.lines.iter().map(|(line, spans)| (*line, spans.as_slice()))
    }

    /// Number of lines that carry at least one span
    pub fn styled_line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Highest styled line index, if any
    pub fn last_line(&self) -> Option<usize> {
        self.lines.keys().next_back().copied()
    }
}

/// Collapse a per-byte style buffer into spans, skipping default runs
///
/// Both the per-line scanner and the document expander produce last-write-wins
/// layering this way.
pub(crate) fn spans_from_cells(cells: &[StyleTag]) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    let mut start = 0;

    while start < cells.len() {
        let style = cells[start];
        let mut end = start + 1;
        while end < cells.len() && cells[end] == style {
            end += 1;
        }
        if style != StyleTag::Default {
            spans.push(StyledSpan::new(start, end - start, style));
        }
        start = end;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tag_names() {
        assert_eq!(StyleTag::CallTarget.as_str(), "call-target");
        assert_eq!(format!("{}", StyleTag::Comment), "comment");
    }

    #[test]
    fn test_style_map_drops_empty_spans() {
        let mut map = StyleMap::new();
        map.push(0, StyledSpan::new(0, 0, StyleTag::Keyword));
        assert!(map.is_empty());

        map.push(2, StyledSpan::new(1, 3, StyleTag::Keyword));
        assert_eq!(map.line(2), &[StyledSpan::new(1, 3, StyleTag::Keyword)]);
        assert!(map.line(0).is_empty());
        assert_eq!(map.last_line(), Some(2));
    }

    #[test]
    fn test_set_line_with_no_spans_removes_entry() {
        let mut map = StyleMap::new();
        map.push(1, StyledSpan::new(0, 1, StyleTag::Number));
        map.set_line(1, Vec::new());
        assert_eq!(map.styled_line_count(), 0);
    }

    #[test]
    fn test_spans_from_cells_merges_runs() {
        use StyleTag::*;
        let cells = [Keyword, Keyword, Default, String, String, String, Default];
        assert_eq!(
            spans_from_cells(&cells),
            vec![StyledSpan::new(0, 2, Keyword), StyledSpan::new(3, 3, String)]
        );
    }
}
