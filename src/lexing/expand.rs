//! Per-line expansion of document tokens
//!
//! Third pass: a single-line token becomes one span. A token spanning lines becomes
//! a partial span on its first line (start column to end of line), full-line spans
//! on the lines in between and a partial span on its last line (column 0 to end
//! column). Tokens with the default style produce nothing.

use super::document::Token;
use crate::location::SourceLocation;
use crate::style::{StyleMap, StyleTag, StyledSpan};

/// Build the style map of a token stream
pub fn expand_tokens(source: &str, tokens: &[Token]) -> StyleMap {
    let lines = SourceLocation::new(source);
    let mut map = StyleMap::new();

    for token in tokens.iter().filter(|t| t.style != StyleTag::Default) {
        let start = token.location.start;
        let end = token.location.end;

        if start.line == end.line {
            map.push(
                start.line,
                StyledSpan::new(start.column, end.column - start.column, token.style),
            );
            continue;
        }

        let first_len = lines.line_len(source, start.line).saturating_sub(start.column);
        map.push(start.line, StyledSpan::new(start.column, first_len, token.style));
        for line in start.line + 1..end.line {
            map.push(line, StyledSpan::new(0, lines.line_len(source, line), token.style));
        }
        map.push(end.line, StyledSpan::new(0, end.column, token.style));
    }

    map
}
