//! Raw tokens for the whole-document path
//!
//! Defined with the logos derive macro. String literals are matched by their opening
//! quote only; a callback then scans for the closing quote and reports whether it
//! found one. This keeps the unterminated cases explicit:
//!
//! - an unterminated single-line string is just its opening quote, and lexing
//!   resumes right after it; a backslash before the line break continues it
//! - an unterminated triple-quoted string is its opening quotes, and the caller
//!   decides to stop (the rest of the buffer is inside the literal)

use crate::style::SyntacticCategory;
use logos::{Lexer, Logos};

/// Whether a quoted literal found its closing quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Closed,
    Open,
}

/// Shape of a string literal token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoted {
    pub triple: bool,
    pub termination: Termination,
}

impl Quoted {
    pub fn is_open(self) -> bool {
        self.termination == Termination::Open
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"([ \t\f\r]|\\\r?\n)+")]
pub enum RawToken {
    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r#"(?:[rRbBuUfF][rRbBuUfF]?)?""#, |lex| close_string(lex, b'"'))]
    #[regex(r"(?:[rRbBuUfF][rRbBuUfF]?)?'", |lex| close_string(lex, b'\''))]
    String(Quoted),

    #[regex(r"[0-9][0-9_]*(?:\.[0-9_]*)?(?:[eE][+-]?[0-9]+)?[jJ]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+")]
    Number,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Name,

    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    #[regex(r"[+\-*/%@&|^~<>=!]+")]
    Operator,

    #[token("\n")]
    Newline,
}

impl RawToken {
    /// Category handed to the classifier, `None` for layout-only tokens
    pub fn category(self) -> Option<SyntacticCategory> {
        match self {
            RawToken::Comment => Some(SyntacticCategory::Comment),
            RawToken::String(_) => Some(SyntacticCategory::String),
            RawToken::Number => Some(SyntacticCategory::Number),
            RawToken::Name => Some(SyntacticCategory::Identifier),
            RawToken::Newline => None,
            _ => Some(SyntacticCategory::Operator),
        }
    }

    pub fn is_open_bracket(self) -> bool {
        matches!(
            self,
            RawToken::OpenParen | RawToken::OpenBracket | RawToken::OpenBrace
        )
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(
            self,
            RawToken::CloseParen | RawToken::CloseBracket | RawToken::CloseBrace
        )
    }
}

/// Decide between a single and a triple quote, then scan for the closer
///
/// The token covers the whole literal when it is closed and only the opening
/// quote(s) when it is not.
fn close_string(lex: &mut Lexer<RawToken>, quote: u8) -> Quoted {
    let rest = lex.remainder().as_bytes();
    if rest.len() >= 2 && rest[0] == quote && rest[1] == quote {
        lex.bump(2);
        let termination = close_triple(lex, quote);
        return Quoted {
            triple: true,
            termination,
        };
    }
    Quoted {
        triple: false,
        termination: close_single(lex, quote),
    }
}

fn close_triple(lex: &mut Lexer<RawToken>, quote: u8) -> Termination {
    let closer = [quote; 3];
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        if rest[i] == b'\\' {
            i += 2;
            continue;
        }
        if rest[i..].starts_with(&closer) {
            lex.bump(i + closer.len());
            return Termination::Closed;
        }
        i += 1;
    }
    Termination::Open
}

/// Scan for the closing quote on the same line, or on a later one after an
/// escaped line break
fn close_single(lex: &mut Lexer<RawToken>, quote: u8) -> Termination {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' if rest[i + 1..].starts_with(b"\r\n") => i += 3,
            b'\\' => i += 2,
            b'\n' | b'\r' => break,
            b if b == quote => {
                lex.bump(i + 1);
                return Termination::Closed;
            }
            _ => i += 1,
        }
    }
    Termination::Open
}

/// Tokenize a source string, keeping byte spans
///
/// Characters no rule matches come back as `Err(())` with their span.
pub fn tokenize_with_spans(source: &str) -> Vec<(Result<RawToken, ()>, std::ops::Range<usize>)> {
    RawToken::lexer(source).spanned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_simple_statement() {
        assert_eq!(
            kinds("x = foo(1)\n"),
            vec![
                RawToken::Name,
                RawToken::Operator,
                RawToken::Name,
                RawToken::OpenParen,
                RawToken::Number,
                RawToken::CloseParen,
                RawToken::Newline,
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = tokenize_with_spans("a # note\nb");
        assert_eq!(tokens[1], (Ok(RawToken::Comment), 2..8));
        assert_eq!(tokens[2], (Ok(RawToken::Newline), 8..9));
    }

    fn quoted(triple: bool, termination: Termination) -> RawToken {
        RawToken::String(Quoted {
            triple,
            termination,
        })
    }

    #[test]
    fn test_strings_with_prefixes_and_escapes() {
        let source = r#"s = rb"a\"b" + 'c'"#;
        let tokens = tokenize_with_spans(source);
        assert_eq!(tokens[2], (Ok(quoted(false, Termination::Closed)), 4..12));
        assert_eq!(tokens[4], (Ok(quoted(false, Termination::Closed)), 15..18));
    }

    #[test]
    fn test_unterminated_string_is_just_the_quote() {
        let tokens = tokenize_with_spans("x = 'abc\ny");
        assert_eq!(tokens[2], (Ok(quoted(false, Termination::Open)), 4..5));
        assert_eq!(tokens[3], (Ok(RawToken::Name), 5..8));
        assert_eq!(tokens[4], (Ok(RawToken::Newline), 8..9));
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let source = "x = \"\"\"one\ntwo\"\"\"\ny";
        let tokens = tokenize_with_spans(source);
        assert_eq!(tokens[2], (Ok(quoted(true, Termination::Closed)), 4..17));
        assert_eq!(tokens[3], (Ok(RawToken::Newline), 17..18));
    }

    #[test]
    fn test_escaped_line_break_continues_string() {
        let tokens = tokenize_with_spans("x = 'a\\\nb' + c");
        assert_eq!(tokens[2], (Ok(quoted(false, Termination::Closed)), 4..10));
        assert_eq!(tokens[4], (Ok(RawToken::Name), 13..14));

        let tokens = tokenize_with_spans("'a\\\r\nb'");
        assert_eq!(tokens[0], (Ok(quoted(false, Termination::Closed)), 0..7));
    }

    #[test]
    fn test_trailing_backslash_leaves_string_open() {
        let tokens = tokenize_with_spans("x = 'a\\");
        assert_eq!(tokens[2], (Ok(quoted(false, Termination::Open)), 4..5));
    }

    #[test]
    fn test_unterminated_triple_quoted_string() {
        let tokens = tokenize_with_spans("x = '''never closed\n");
        assert_eq!(tokens[2], (Ok(quoted(true, Termination::Open)), 4..7));
    }

    #[test]
    fn test_empty_string_is_not_triple() {
        let tokens = tokenize_with_spans("'' x");
        assert_eq!(tokens[0], (Ok(quoted(false, Termination::Closed)), 0..2));
        assert_eq!(tokens[1], (Ok(RawToken::Name), 3..4));
    }

    #[test]
    fn test_numbers() {
        for source in ["0", "42", "3.14", "1.", "1e10", "0xFF", "0o17", "0b101", "1_000", "2j"] {
            assert_eq!(kinds(source), vec![RawToken::Number], "{source}");
        }
    }

    #[test]
    fn test_line_continuation_is_skipped() {
        assert_eq!(
            kinds("a = \\\n  b"),
            vec![RawToken::Name, RawToken::Operator, RawToken::Name]
        );
    }

    #[test]
    fn test_unicode_identifiers() {
        let tokens = tokenize_with_spans("café = größe_2");
        assert_eq!(tokens[0], (Ok(RawToken::Name), 0..5));
        assert_eq!(tokens[2], (Ok(RawToken::Name), 8..17));
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let tokens = tokenize_with_spans("a $ b");
        assert_eq!(tokens[1], (Err(()), 2..3));
    }
}
