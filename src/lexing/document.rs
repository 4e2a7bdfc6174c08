//! Whole-document tokenizer
//!
//! Lexes an entire buffer at once so that literals spanning lines (triple-quoted
//! strings) are seen whole. The result is a flat list of classified tokens with
//! start/end positions; [`expand`](super::expand) later cuts them into per-line
//! spans.
//!
//! Malformed input never aborts tokenizing:
//! - an unterminated single-line string leaves its quote unstyled and lexing goes on
//!   right after it
//! - an unterminated triple-quoted string ends tokenizing at its opener; the result
//!   is marked incomplete and the rest of the buffer keeps the default style

use super::calls::annotate_calls;
use super::expand::expand_tokens;
use super::tokens::{tokenize_with_spans, RawToken};
use crate::classifier::{style_for_kind, WordTables};
use crate::error::Diagnostic;
use crate::location::{Location, SourceLocation};
use crate::style::{StyleMap, StyleTag, TokenKind};
use std::ops::Range;

/// A classified lexeme of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub style: StyleTag,
    /// Byte range in the source
    pub range: Range<usize>,
    /// Start and end (exclusive) as 0-based line/column pairs
    pub location: Location,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    /// 1-based line the token starts on
    pub fn source_line(&self) -> usize {
        self.location.start.line + 1
    }
}

/// Tokens of a document plus whatever was recovered along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenization {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// False when tokenizing stopped early at an unterminated literal
    pub complete: bool,
}

/// Tokenizer for one whole-document language
#[derive(Debug, Clone)]
pub struct DocumentTokenizer {
    tables: WordTables,
}

impl DocumentTokenizer {
    pub fn new(tables: WordTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &WordTables {
        &self.tables
    }

    /// First pass: lex and classify every lexeme
    pub fn classify_tokens(&self, source: &str) -> Tokenization {
        let locator = SourceLocation::new(source);
        let mut result = Tokenization {
            complete: true,
            ..Default::default()
        };

        for (raw, range) in tokenize_with_spans(source) {
            let location = locator.range_to_location(&range);
            let kind = match raw {
                Ok(RawToken::Newline) => continue,
                Ok(RawToken::String(quoted)) if quoted.is_open() && quoted.triple => {
                    result.diagnostics.push(Diagnostic::malformed_literal(
                        location.start.line + 1,
                        "unterminated triple-quoted string",
                    ));
                    result.complete = false;
                    break;
                }
                Ok(RawToken::String(quoted)) if quoted.is_open() => {
                    result.diagnostics.push(Diagnostic::malformed_literal(
                        location.start.line + 1,
                        "unterminated string literal",
                    ));
                    TokenKind::Default
                }
                Ok(raw) => match raw.category() {
                    Some(category) => self.tables.kind(&source[range.clone()], category),
                    None => TokenKind::Default,
                },
                Err(()) => TokenKind::Default,
            };

            result.tokens.push(Token {
                kind,
                style: style_for_kind(kind),
                range,
                location,
            });
        }

        if !result.complete {
            tracing::debug!(
                tokens = result.tokens.len(),
                "tokenizing stopped at an unterminated literal"
            );
        }
        result
    }

    /// First and second pass: classified tokens with call annotations
    pub fn tokenize(&self, source: &str) -> Tokenization {
        let mut result = self.classify_tokens(source);
        annotate_calls(source, &mut result.tokens);
        result
    }

    /// All three passes: the style map of a document plus recovered diagnostics
    pub fn style_map(&self, source: &str) -> (StyleMap, Vec<Diagnostic>) {
        let result = self.tokenize(source);
        (expand_tokens(source, &result.tokens), result.diagnostics)
    }
}
