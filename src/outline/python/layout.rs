//! Logical-line layout for the structural grammar
//!
//! Turns the raw token stream into what the grammar needs: the definition keywords,
//! names, `(` and top-level `:` markers, and explicit `Newline`/`Indent`/`Dedent`
//! tokens. Everything else collapses to `Other`.
//!
//! # Algorithm
//!
//! 1. Comments, blank lines and newlines inside brackets are dropped, so one
//!    `Newline` ends each logical line.
//! 2. The first token of a logical line sets its indentation (tabs advance to the
//!    next multiple of 8). Compared with the indentation stack:
//!    - deeper: push it and emit `Indent`
//!    - shallower: pop and emit `Dedent` until equal; no equal level is an error
//! 3. At the end, close the last logical line and emit a `Dedent` per open level.
//!
//! Unterminated strings, unknown characters and unbalanced brackets are reported
//! as structural parse failures.

use crate::error::Diagnostic;
use crate::lexing::tokens::{tokenize_with_spans, RawToken};
use crate::location::SourceLocation;
use std::cmp::Ordering;
use std::fmt;

const TAB_WIDTH: usize = 8;

/// Token as the structural grammar sees it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tok {
    Class,
    Def,
    Async,
    Name(String),
    OpenParen,
    /// A `:` outside brackets
    Colon,
    Other,
    Newline,
    Indent,
    Dedent,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Class => write!(f, "'class'"),
            Tok::Def => write!(f, "'def'"),
            Tok::Async => write!(f, "'async'"),
            Tok::Name(name) => write!(f, "name '{name}'"),
            Tok::OpenParen => write!(f, "'('"),
            Tok::Colon => write!(f, "':'"),
            Tok::Other => write!(f, "token"),
            Tok::Newline => write!(f, "end of line"),
            Tok::Indent => write!(f, "indent"),
            Tok::Dedent => write!(f, "dedent"),
        }
    }
}

/// A layout token with its 1-based source line
pub type LineToken = (Tok, usize);

struct LayoutBuilder<'a> {
    source: &'a str,
    lines: SourceLocation,
    tokens: Vec<LineToken>,
    indents: Vec<usize>,
    /// Open brackets with the line they were opened on
    brackets: Vec<(RawToken, usize)>,
    line_has_content: bool,
    last_line: usize,
}

impl<'a> LayoutBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: SourceLocation::new(source),
            tokens: Vec::new(),
            indents: vec![0],
            brackets: Vec::new(),
            line_has_content: false,
            last_line: 1,
        }
    }

    fn indentation_before(&self, offset: usize, line: usize) -> usize {
        let start = self.lines.line_start(line - 1).unwrap_or(0);
        self.source[start..offset].chars().fold(0, |width, c| match c {
            '\t' => (width / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => width + 1,
        })
    }

    fn open_logical_line(&mut self, offset: usize, line: usize) -> Result<(), Diagnostic> {
        let width = self.indentation_before(offset, line);
        let current = self.indents.last().copied().unwrap_or(0);

        match width.cmp(&current) {
            Ordering::Greater => {
                self.indents.push(width);
                self.tokens.push((Tok::Indent, line));
            }
            Ordering::Less => {
                while self.indents.last().is_some_and(|&level| level > width) {
                    self.indents.pop();
                    self.tokens.push((Tok::Dedent, line));
                }
                if self.indents.last() != Some(&width) {
                    return Err(Diagnostic::parse_failure(
                        line,
                        "unindent does not match any outer indentation level",
                    ));
                }
            }
            Ordering::Equal => {}
        }

        self.line_has_content = true;
        Ok(())
    }

    fn close_logical_line(&mut self, line: usize) {
        if self.line_has_content {
            self.tokens.push((Tok::Newline, line));
            self.line_has_content = false;
        }
    }

    fn push(&mut self, raw: RawToken, text: &str, offset: usize, line: usize) -> Result<(), Diagnostic> {
        if !self.line_has_content && self.brackets.is_empty() {
            self.open_logical_line(offset, line)?;
        }

        let tok = match raw {
            RawToken::Name => match text {
                "class" => Tok::Class,
                "def" => Tok::Def,
                "async" => Tok::Async,
                _ => Tok::Name(text.to_string()),
            },
            RawToken::OpenParen if self.brackets.is_empty() => Tok::OpenParen,
            RawToken::Colon if self.brackets.is_empty() => Tok::Colon,
            _ => Tok::Other,
        };

        if raw.is_open_bracket() {
            self.brackets.push((raw, line));
        } else if raw.is_close_bracket() {
            let expected = match raw {
                RawToken::CloseParen => RawToken::OpenParen,
                RawToken::CloseBracket => RawToken::OpenBracket,
                _ => RawToken::OpenBrace,
            };
            match self.brackets.pop() {
                Some((open, _)) if open == expected => {}
                _ => {
                    return Err(Diagnostic::parse_failure(
                        line,
                        format!("unmatched '{text}'"),
                    ))
                }
            }
        }

        self.tokens.push((tok, line));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<LineToken>, Diagnostic> {
        if let Some((_, line)) = self.brackets.first() {
            return Err(Diagnostic::parse_failure(*line, "bracket was never closed"));
        }
        let line = self.last_line;
        self.close_logical_line(line);
        while self.indents.len() > 1 {
            self.indents.pop();
            self.tokens.push((Tok::Dedent, line));
        }
        Ok(self.tokens)
    }
}

/// Build the layout token stream of a buffer
pub fn build_layout(source: &str) -> Result<Vec<LineToken>, Diagnostic> {
    let mut builder = LayoutBuilder::new(source);

    for (raw, range) in tokenize_with_spans(source) {
        let line = builder.lines.byte_to_position(range.start).line + 1;
        builder.last_line = line;
        let text = source.get(range.clone()).unwrap_or_default();

        match raw {
            Ok(RawToken::Comment) => {}
            Ok(RawToken::Newline) => {
                if builder.brackets.is_empty() {
                    builder.close_logical_line(line);
                }
            }
            Ok(RawToken::String(quoted)) if quoted.is_open() => {
                let what = if quoted.triple {
                    "unterminated triple-quoted string"
                } else {
                    "unterminated string literal"
                };
                return Err(Diagnostic::parse_failure(line, what));
            }
            Ok(raw) => builder.push(raw, text, range.start, line)?,
            Err(()) => {
                return Err(Diagnostic::parse_failure(
                    line,
                    format!("invalid character '{text}'"),
                ))
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    fn toks(source: &str) -> Vec<Tok> {
        build_layout(source)
            .unwrap()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn test_flat_statements() {
        assert_eq!(
            toks("x = 1\ny = 2\n"),
            vec![
                Tok::Name("x".into()),
                Tok::Other,
                Tok::Other,
                Tok::Newline,
                Tok::Name("y".into()),
                Tok::Other,
                Tok::Other,
                Tok::Newline,
            ]
        );
    }

    #[test]
    fn test_indent_and_dedent() {
        let source = "class A:\n    def m(self):\n        pass\n\n# note\nx = 1";
        assert_eq!(
            toks(source),
            vec![
                Tok::Class,
                Tok::Name("A".into()),
                Tok::Colon,
                Tok::Newline,
                Tok::Indent,
                Tok::Def,
                Tok::Name("m".into()),
                Tok::OpenParen,
                Tok::Name("self".into()),
                Tok::Other,
                Tok::Colon,
                Tok::Newline,
                Tok::Indent,
                Tok::Name("pass".into()),
                Tok::Newline,
                Tok::Dedent,
                Tok::Dedent,
                Tok::Name("x".into()),
                Tok::Other,
                Tok::Other,
                Tok::Newline,
            ]
        );
    }

    #[test]
    fn test_dedents_at_end_of_input() {
        let tokens = toks("if x:\n    y\n");
        assert_eq!(&tokens[tokens.len() - 2..], &[Tok::Newline, Tok::Dedent]);
    }

    #[test]
    fn test_brackets_join_lines() {
        let layout = build_layout("f(a,\n  b)\ng()\n").unwrap();
        let newlines: Vec<usize> = layout
            .iter()
            .filter(|(tok, _)| *tok == Tok::Newline)
            .map(|(_, line)| *line)
            .collect();
        assert_eq!(newlines, vec![2, 3]);
        assert!(!layout.iter().any(|(tok, _)| *tok == Tok::Indent));
    }

    #[test]
    fn test_colon_inside_brackets_is_other() {
        let tokens = toks("d = {1: 2}\n");
        assert!(!tokens.contains(&Tok::Colon));
    }

    #[test]
    fn test_tabs_expand_to_eight() {
        let tokens = toks("if x:\n\ty\n        z\n");
        assert_eq!(tokens.iter().filter(|t| **t == Tok::Indent).count(), 1);
        assert_eq!(tokens.iter().filter(|t| **t == Tok::Dedent).count(), 1);
    }

    #[test]
    fn test_inconsistent_dedent() {
        let err = build_layout("if x:\n    y\n  z\n").unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::StructuralParseFailure);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(build_layout("x = (1,\n2\n").unwrap_err().line, 1);
        assert_eq!(build_layout("x = 1)\n").unwrap_err().line, 1);
        assert!(build_layout("x = [1)\n").is_err());
    }

    #[test]
    fn test_unterminated_strings_fail() {
        assert!(build_layout("x = 'abc\n").is_err());
        let err = build_layout("x = 1\ny = '''abc\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("triple"));
    }

    #[test]
    fn test_unicode_names() {
        assert_eq!(
            toks("def größe():\n    café = 1\n"),
            vec![
                Tok::Def,
                Tok::Name("größe".into()),
                Tok::OpenParen,
                Tok::Other,
                Tok::Colon,
                Tok::Newline,
                Tok::Indent,
                Tok::Name("café".into()),
                Tok::Other,
                Tok::Other,
                Tok::Newline,
                Tok::Dedent,
            ]
        );
    }

    #[test]
    fn test_continued_string_is_one_logical_line() {
        let layout = build_layout("msg = 'abc\\\ndef'\nx = 1\n").unwrap();
        let newlines: Vec<usize> = layout
            .iter()
            .filter(|(tok, _)| *tok == Tok::Newline)
            .map(|(_, line)| *line)
            .collect();
        assert_eq!(newlines, vec![2, 3]);
        assert!(!layout.iter().any(|(tok, _)| *tok == Tok::Def));
    }

    #[test]
    fn test_empty_source() {
        assert!(toks("").is_empty());
        assert!(toks("\n\n# only a comment\n").is_empty());
    }
}
