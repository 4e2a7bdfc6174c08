//! Per-line scanner for C-family languages
//!
//! Scans one line with a fixed list of rules. Each rule paints its matches onto a
//! per-byte style buffer, and later rules overwrite earlier ones where they overlap
//! (last write wins, no layering):
//!
//! 1. whole line default
//! 2. directive lines (trimmed text starts with the directive prefix)
//! 3. line comment marker to end of line
//! 4. double-quoted strings (escape aware, single line)
//! 5. numeric literals
//! 6. keywords
//! 7. builtin type names
//! 8. call heuristic: `name (` is a call target, identifiers up to the first `)`
//!    after it are arguments
//! 9. block comments, using the incoming [`BlockState`]
//!
//! The call heuristic is deliberately naive. It stops at the first `)` whatever the
//! nesting, does not skip strings or comments inside the argument span, and treats
//! `if (` like any other call. Rule 3 does not know about strings either, so a `//`
//! inside a string comments out the rest of the line except the string itself.

use super::block::BlockState;
use crate::error::ConfigError;
use crate::language::LineSyntax;
use crate::style::{spans_from_cells, StyleTag, StyledSpan};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

static STRING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(?:[^"\\\n]|\\.)*""#).unwrap());

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());

static CALL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap());

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").unwrap());

/// Styled spans of one line plus the block state it leaves behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    pub spans: Vec<StyledSpan>,
    pub exit: BlockState,
}

/// Compiled per-line scanner for one language
#[derive(Debug, Clone)]
pub struct LineScanner {
    syntax: LineSyntax,
    keywords: Option<Regex>,
    types: Option<Regex>,
}

impl LineScanner {
    /// Compile a scanner from a language's markers and word tables
    pub fn new(
        language: &str,
        syntax: &LineSyntax,
        keywords: &BTreeSet<String>,
        types: &BTreeSet<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            syntax: syntax.clone(),
            keywords: word_regex(language, keywords)?,
            types: word_regex(language, types)?,
        })
    }

    pub fn syntax(&self) -> &LineSyntax {
        &self.syntax
    }

    /// Scan one line given the block state at its start
    ///
    /// Pure: the same line and incoming state always produce the same result.
    pub fn scan_line(&self, line: &str, incoming: BlockState) -> LineScan {
        let text = line.trim_end_matches(|c| c == '\n' || c == '\r');
        let mut cells = vec![StyleTag::Default; text.len()];

        if let Some(prefix) = &self.syntax.directive_prefix {
            let trimmed = text.trim_start();
            if trimmed.starts_with(prefix.as_str()) {
                paint(&mut cells, text.len() - trimmed.len()..text.len(), StyleTag::Directive);
            }
        }

        if let Some(marker) = &self.syntax.line_comment {
            if let Some(at) = text.find(marker.as_str()) {
                paint(&mut cells, at..text.len(), StyleTag::Comment);
            }
        }

        for m in STRING_REGEX.find_iter(text) {
            paint(&mut cells, m.range(), StyleTag::String);
        }
        for m in NUMBER_REGEX.find_iter(text) {
            paint(&mut cells, m.range(), StyleTag::Number);
        }
        if let Some(keywords) = &self.keywords {
            for m in keywords.find_iter(text) {
                paint(&mut cells, m.range(), StyleTag::Keyword);
            }
        }
        if let Some(types) = &self.types {
            for m in types.find_iter(text) {
                paint(&mut cells, m.range(), StyleTag::Type);
            }
        }

        annotate_calls(text, &mut cells);

        let exit = self.paint_block_comments(text, incoming, &mut cells);

        LineScan {
            spans: spans_from_cells(&cells),
            exit,
        }
    }

    fn paint_block_comments(
        &self,
        text: &str,
        incoming: BlockState,
        cells: &mut [StyleTag],
    ) -> BlockState {
        let Some((open, close)) = &self.syntax.block_comment else {
            return BlockState::Normal;
        };

        let mut pos = 0;
        if incoming == BlockState::InsideBlockComment {
            match text.find(close.as_str()) {
                Some(at) => {
                    pos = at + close.len();
                    paint(cells, 0..pos, StyleTag::Comment);
                }
                None => {
                    paint(cells, 0..text.len(), StyleTag::Comment);
                    return BlockState::InsideBlockComment;
                }
            }
        }

        while let Some(found) = text[pos..].find(open.as_str()) {
            let start = pos + found;
            let body = start + open.len();
            match text[body..].find(close.as_str()) {
                Some(found_close) => {
                    pos = body + found_close + close.len();
                    paint(cells, start..pos, StyleTag::Comment);
                }
                None => {
                    paint(cells, start..text.len(), StyleTag::Comment);
                    return BlockState::InsideBlockComment;
                }
            }
        }

        BlockState::Normal
    }
}

/// Call targets and their (first-level, naive) arguments
fn annotate_calls(text: &str, cells: &mut [StyleTag]) {
    for caps in CALL_REGEX.captures_iter(text) {
        let (Some(call), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        paint(cells, name.range(), StyleTag::CallTarget);

        let args_start = call.end();
        if let Some(close) = text[args_start..].find(')') {
            let args = &text[args_start..args_start + close];
            for ident in IDENTIFIER_REGEX.find_iter(args) {
                paint(
                    cells,
                    args_start + ident.start()..args_start + ident.end(),
                    StyleTag::Argument,
                );
            }
        }
    }
}

fn paint(cells: &mut [StyleTag], range: Range<usize>, style: StyleTag) {
    let end = range.end.min(cells.len());
    let start = range.start.min(end);
    cells[start..end].fill(style);
}

/// `\b(?:a|b|c)\b` over a word table, or `None` for an empty table
fn word_regex(language: &str, words: &BTreeSet<String>) -> Result<Option<Regex>, ConfigError> {
    if words.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    let pattern = format!(r"\b(?:{})\b", alternatives.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| ConfigError::Pattern {
            language: language.to_string(),
            source,
        })
}
