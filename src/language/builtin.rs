//! Built-in language tables
//!
//! Word lists are enumerated constants. They are only the default registration:
//! a YAML definition with the same id replaces them.

use super::spec::{LanguageSpec, LineSyntax, SymbolStrategy, TokenizerStrategy};

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "const", "continue", "default", "do", "else", "enum", "extern",
    "for", "goto", "if", "inline", "register", "restrict", "return", "sizeof", "static",
    "struct", "switch", "typedef", "union", "volatile", "while",
];

const C_TYPES: &[&str] = &[
    "bool", "char", "double", "float", "int", "long", "short", "signed", "unsigned", "void",
    "size_t", "ssize_t", "ptrdiff_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
    "uint16_t", "uint32_t", "uint64_t", "FILE",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

const PYTHON_BUILTINS: &[&str] = &[
    "abs", "all", "any", "ascii", "bin", "bool", "breakpoint", "bytearray", "bytes",
    "callable", "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir",
    "divmod", "enumerate", "eval", "exec", "filter", "float", "format", "frozenset",
    "getattr", "globals", "hasattr", "hash", "help", "hex", "id", "input", "int",
    "isinstance", "issubclass", "iter", "len", "list", "locals", "map", "max", "memoryview",
    "min", "next", "object", "oct", "open", "ord", "pow", "print", "property", "range",
    "repr", "reversed", "round", "set", "setattr", "slice", "sorted", "staticmethod", "str",
    "sum", "super", "tuple", "type", "vars", "zip", "__import__",
];

fn words(list: &[&str]) -> std::collections::BTreeSet<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// C: per-line scanning, line-heuristic outline
pub fn c() -> LanguageSpec {
    LanguageSpec {
        id: "c".into(),
        name: "C".into(),
        extensions: vec!["c".into(), "h".into()],
        keywords: words(C_KEYWORDS),
        builtins: words(C_TYPES),
        tokenizer: TokenizerStrategy::PerLine(LineSyntax::c_family()),
        symbols: SymbolStrategy::LineHeuristic,
    }
}

/// Python: whole-document tokenizing, structural-grammar outline
pub fn python() -> LanguageSpec {
    LanguageSpec {
        id: "python".into(),
        name: "Python".into(),
        extensions: vec!["py".into(), "pyw".into()],
        keywords: words(PYTHON_KEYWORDS),
        builtins: words(PYTHON_BUILTINS),
        tokenizer: TokenizerStrategy::WholeDocument,
        symbols: SymbolStrategy::StructuralGrammar,
    }
}

/// Every built-in language
pub fn all() -> Vec<LanguageSpec> {
    vec![c(), python()]
}
