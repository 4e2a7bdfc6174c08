//! Call expression annotation
//!
//! Second pass over a classified token stream. An identifier (or builtin name)
//! directly followed by `(` becomes a call target. From that `(` the pass tracks
//! parenthesis depth starting at 1; every identifier seen at depth 1 becomes an
//! argument. When the depth returns to 0 the outer scan resumes after the consumed
//! span, so no token is reclassified twice.
//!
//! This is a hint, not a parser. Identifiers nested one level deeper (`f(g(x))`)
//! are neither arguments of `f` nor call targets themselves, and an unclosed `(`
//! consumes the rest of the document.

use super::document::Token;
use crate::style::{StyleTag, TokenKind};

fn is_callable(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Builtin)
}

fn is_punct(token: &Token, source: &str, punct: &str) -> bool {
    token.kind == TokenKind::Operator && token.text(source) == punct
}

/// Restyle call targets and their first-level arguments in place
pub fn annotate_calls(source: &str, tokens: &mut [Token]) {
    let mut i = 0;
    while i + 1 < tokens.len() {
        if !(is_callable(&tokens[i]) && is_punct(&tokens[i + 1], source, "(")) {
            i += 1;
            continue;
        }

        tokens[i].style = StyleTag::CallTarget;

        let mut depth = 1;
        let mut j = i + 2;
        while j < tokens.len() {
            if is_punct(&tokens[j], source, "(") {
                depth += 1;
            } else if is_punct(&tokens[j], source, ")") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else if depth == 1 && is_callable(&tokens[j]) {
                tokens[j].style = StyleTag::Argument;
            }
            j += 1;
        }

        i = j + 1;
    }
}
