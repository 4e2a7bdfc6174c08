//! Per-line scanning of C sources through the public API

use rstest::rstest;
use synscan::language::Tokenizer;
use synscan::lexing::LineScanner;
use synscan::{
    scan_line, tokenize_document, BlockState, LanguageRegistry, StyleTag, StyledSpan,
};

fn registry() -> LanguageRegistry {
    LanguageRegistry::with_defaults()
}

/// Helper: the per-line scanner of the built-in C language
fn with_c_scanner<R>(f: impl FnOnce(&LineScanner) -> R) -> R {
    let registry = registry();
    let language = registry.get("c").expect("c is built in");
    match language.tokenizer() {
        Tokenizer::PerLine(scanner) => f(scanner),
        Tokenizer::WholeDocument(_) => panic!("c should scan per line"),
    }
}

fn span(start: usize, len: usize, style: StyleTag) -> StyledSpan {
    StyledSpan::new(start, len, style)
}

#[test]
fn test_block_comment_round_trip() {
    let map = tokenize_document("/* a */\ncode();\n/* b\nc */", "c", &registry());

    assert_eq!(map.line(0), &[span(0, 7, StyleTag::Comment)]);
    assert_eq!(map.line(1), &[span(0, 4, StyleTag::CallTarget)]);
    assert_eq!(map.line(2), &[span(0, 4, StyleTag::Comment)]);
    assert_eq!(map.line(3), &[span(0, 4, StyleTag::Comment)]);
}

#[test]
fn test_call_annotation() {
    let map = tokenize_document("foo(bar, 1);", "c", &registry());
    assert_eq!(
        map.line(0),
        &[
            span(0, 3, StyleTag::CallTarget),
            span(4, 3, StyleTag::Argument),
            span(9, 1, StyleTag::Number),
        ]
    );
}

#[rstest]
#[case("#include <stdio.h>", vec![span(0, 18, StyleTag::Directive)])]
#[case("  #define MAX 10", vec![span(2, 12, StyleTag::Directive), span(14, 2, StyleTag::Number)])]
#[case("return 0;", vec![span(0, 6, StyleTag::Keyword), span(7, 1, StyleTag::Number)])]
#[case("unsigned long n;", vec![span(0, 8, StyleTag::Type), span(9, 4, StyleTag::Type)])]
#[case("x = 3.25; // half", vec![span(4, 4, StyleTag::Number), span(10, 7, StyleTag::Comment)])]
// Argument matching does not skip strings, so the word inside the literal wins
#[case(
    "puts(\"hi\");",
    vec![
        span(0, 4, StyleTag::CallTarget),
        span(5, 1, StyleTag::String),
        span(6, 2, StyleTag::Argument),
        span(8, 1, StyleTag::String),
    ]
)]
fn test_rule_order(#[case] line: &str, #[case] expected: Vec<StyledSpan>) {
    let scan = with_c_scanner(|scanner| scan_line(scanner, line, BlockState::Normal));
    assert_eq!(scan.spans, expected);
    assert_eq!(scan.exit, BlockState::Normal);
}

#[test]
fn test_state_threads_through_lines() {
    with_c_scanner(|scanner| {
        let first = scan_line(scanner, "int x; /* start", BlockState::Normal);
        assert_eq!(first.exit, BlockState::InsideBlockComment);

        let middle = scan_line(scanner, " x */ y /* z", first.exit);
        assert_eq!(
            middle.spans,
            vec![span(0, 5, StyleTag::Comment), span(8, 4, StyleTag::Comment)]
        );
        assert_eq!(middle.exit, BlockState::InsideBlockComment);

        let last = scan_line(scanner, "end */ int y;", middle.exit);
        assert_eq!(
            last.spans,
            vec![span(0, 6, StyleTag::Comment), span(7, 3, StyleTag::Type)]
        );
        assert_eq!(last.exit, BlockState::Normal);
    });
}

#[test]
fn test_same_line_and_state_give_same_scan() {
    with_c_scanner(|scanner| {
        let line = "a(); /* b";
        let once = scan_line(scanner, line, BlockState::InsideBlockComment);
        let twice = scan_line(scanner, line, BlockState::InsideBlockComment);
        assert_eq!(once, twice);

        let normal = scan_line(scanner, line, BlockState::Normal);
        assert_ne!(once.spans, normal.spans);
    });
}

#[test]
fn test_unterminated_string_keeps_rest_of_line() {
    let map = tokenize_document("char *s = \"oops; int x = 5;\nreturn 0;", "c", &registry());

    assert_eq!(
        map.line(0),
        &[
            span(0, 4, StyleTag::Type),
            span(17, 3, StyleTag::Type),
            span(25, 1, StyleTag::Number),
        ]
    );
    assert_eq!(
        map.line(1),
        &[span(0, 6, StyleTag::Keyword), span(7, 1, StyleTag::Number)]
    );
}

#[test]
fn test_call_heuristic_stops_at_first_close() {
    // Only one level is tracked: `c` sits after the first `)` and is left alone
    let map = tokenize_document("f(a, g(b), c);", "c", &registry());
    assert_eq!(
        map.line(0),
        &[
            span(0, 1, StyleTag::CallTarget),
            span(2, 1, StyleTag::Argument),
            span(5, 1, StyleTag::CallTarget),
            span(7, 1, StyleTag::Argument),
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let map = tokenize_document("int a;\r\nint b;\r\n", "c", &registry());
    assert_eq!(map.line(0), &[span(0, 3, StyleTag::Type)]);
    assert_eq!(map.line(1), &[span(0, 3, StyleTag::Type)]);
}
