//! Structural grammar over layout tokens
//!
//! Only definitions matter for the outline, so the grammar knows three kinds of
//! statement:
//!
//! ```text
//! statement   := class_def | function_def | line
//! class_def   := 'class' NAME header* ':' body
//! function_def:= 'async'? 'def' NAME '(' header* ':' body
//! line        := token+ (suite | NEWLINE)     (not led by 'class'/'def';
//!                                              suite only after a trailing ':')
//! body        := suite | token+ NEWLINE
//! suite       := NEWLINE INDENT statement+ DEDENT
//! ```
//!
//! Definitions found in the suite of a plain compound statement (`if`, `with`,
//! `try`, ...) belong to the enclosing scope.

use super::layout::{LineToken, Tok};
use crate::error::Diagnostic;
use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use std::collections::VecDeque;

type ParserError = Simple<LineToken>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Class,
    Function,
}

/// A class or function definition with the definitions nested in its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub name: String,
    /// 1-based line of the `class`/`def` keyword
    pub line: usize,
    pub children: Vec<Definition>,
}

impl Definition {
    fn new(kind: DefinitionKind, name: String, line: usize, children: Vec<Definition>) -> Self {
        Self {
            kind,
            name,
            line,
            children,
        }
    }
}

/// Match a specific token, keeping its line
fn token(tok: Tok) -> impl Parser<LineToken, LineToken, Error = ParserError> + Clone {
    filter(move |(t, _): &LineToken| *t == tok)
}

fn name() -> impl Parser<LineToken, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, _line): LineToken| match tok {
        Tok::Name(name) => Ok(name),
        other => Err(Simple::custom(span, format!("expected a name, found {other}"))),
    })
}

fn flatten(nested: Vec<Vec<Definition>>) -> Vec<Definition> {
    nested.into_iter().flatten().collect()
}

/// Parser for a whole module
fn module() -> impl Parser<LineToken, Vec<Definition>, Error = ParserError> {
    let statement = recursive(|statement| {
        let line_token = filter(|(t, _): &LineToken| {
            !matches!(t, Tok::Newline | Tok::Indent | Tok::Dedent)
        });
        let header_token = filter(|(t, _): &LineToken| {
            !matches!(t, Tok::Colon | Tok::Newline | Tok::Indent | Tok::Dedent)
        });

        let suite = token(Tok::Newline)
            .ignore_then(token(Tok::Indent))
            .ignore_then(statement.repeated().at_least(1))
            .then_ignore(token(Tok::Dedent))
            .map(flatten);

        let inline_body = line_token
            .clone()
            .repeated()
            .at_least(1)
            .then_ignore(token(Tok::Newline))
            .map(|_| Vec::new());

        let body = suite.clone().or(inline_body);

        let class_def = token(Tok::Class)
            .map(|(_, line)| line)
            .then(name())
            .then_ignore(header_token.clone().repeated())
            .then_ignore(token(Tok::Colon))
            .then(body.clone())
            .map(|((line, name), children)| {
                Definition::new(DefinitionKind::Class, name, line, children)
            });

        let function_def = token(Tok::Async)
            .or_not()
            .ignore_then(token(Tok::Def).map(|(_, line)| line))
            .then(name())
            .then_ignore(token(Tok::OpenParen))
            .then_ignore(header_token.repeated())
            .then_ignore(token(Tok::Colon))
            .then(body)
            .map(|((line, name), children)| {
                Definition::new(DefinitionKind::Function, name, line, children)
            });

        let definition = class_def.or(function_def).map(|def| vec![def]);

        // A malformed definition must not pass as a plain line
        let line_start = filter(|(t, _): &LineToken| {
            !matches!(
                t,
                Tok::Class | Tok::Def | Tok::Newline | Tok::Indent | Tok::Dedent
            )
        });

        let line = line_start
            .then(line_token.repeated())
            .then(suite.map(Some).or(token(Tok::Newline).to(None)))
            .try_map(|((first, rest), nested): ((LineToken, Vec<LineToken>), Option<Vec<Definition>>), span| {
                let last = rest.last().unwrap_or(&first);
                let opens_block = last.0 == Tok::Colon;
                match nested {
                    Some(_) if !opens_block => Err(Simple::custom(span, "unexpected indent")),
                    nested => Ok(nested.unwrap_or_default()),
                }
            });

        definition.or(line)
    });

    statement.repeated().map(flatten).then_ignore(end())
}

fn to_diagnostic(error: &ParserError, tokens: &[LineToken]) -> Diagnostic {
    let line = tokens
        .get(error.span().start)
        .or(tokens.last())
        .map(|(_, line)| *line)
        .unwrap_or(1);

    let message = match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        _ => match error.found() {
            Some((tok, _)) => format!("unexpected {tok}"),
            None => "unexpected end of input".to_string(),
        },
    };

    Diagnostic::parse_failure(line, message)
}

/// Parse layout tokens into nested definitions
///
/// Only the first error is reported.
pub fn parse_definitions(tokens: Vec<LineToken>) -> Result<Vec<Definition>, Diagnostic> {
    let lines = tokens.clone();
    module().parse(tokens).map_err(|errors| match errors.first() {
        Some(error) => to_diagnostic(error, &lines),
        None => Diagnostic::parse_failure(0, "parse failed"),
    })
}

/// Definitions in breadth-first order: all top-level ones in source order, then
/// their direct children, and so on
pub fn breadth_first(definitions: &[Definition]) -> Vec<&Definition> {
    let mut queue: VecDeque<&Definition> = definitions.iter().collect();
    let mut order = Vec::new();
    while let Some(definition) = queue.pop_front() {
        order.push(definition);
        queue.extend(definition.children.iter());
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::python::layout::build_layout;

    fn parse(source: &str) -> Result<Vec<Definition>, Diagnostic> {
        parse_definitions(build_layout(source)?)
    }

    fn names(definitions: &[Definition]) -> Vec<(&str, usize)> {
        breadth_first(definitions)
            .into_iter()
            .map(|d| (d.name.as_str(), d.line))
            .collect()
    }

    #[test]
    fn test_nested_definitions() {
        let source = "class A:\n    def m(self):\n        pass\n\ndef f():\n    return 1\n";
        let definitions = parse(source).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].kind, DefinitionKind::Class);
        assert_eq!(definitions[0].children[0].name, "m");
        assert_eq!(names(&definitions), vec![("A", 1), ("f", 5), ("m", 2)]);
    }

    #[test]
    fn test_definitions_inside_compound_statements() {
        let source = "\
if DEBUG:
    def trace(msg):
        print(msg)
else:
    trace = None
try:
    import x
except ImportError:
    class X: pass
";
        let definitions = parse(source).unwrap();
        assert_eq!(names(&definitions), vec![("trace", 2), ("X", 9)]);
    }

    #[test]
    fn test_headers_with_annotations_and_defaults() {
        let source = "\
@decorator
async def fetch(url: str, *, timeout=lambda: 3) -> dict[str, int]:
    ...
class B(A, metaclass=M):
    x: int = 1
";
        let definitions = parse(source).unwrap();
        assert_eq!(names(&definitions), vec![("fetch", 2), ("B", 4)]);
    }

    #[test]
    fn test_unexpected_indent_fails() {
        let err = parse("x = 1\n    y = 2\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_missing_name_fails() {
        let err = parse("def (x):\n    pass\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(parse("class:\n    pass\n").is_err());
    }

    #[test]
    fn test_missing_body_fails() {
        assert!(parse("def f():\n").is_err());
    }

    #[test]
    fn test_empty_module() {
        assert!(parse("").unwrap().is_empty());
    }
}
