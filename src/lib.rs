//! # synscan
//!
//! Tokenizing and outline extraction for editor decoration.
//!
//! The crate turns buffer text into two things a renderer can draw:
//! - a [`StyleMap`]: styled spans per line, for syntax highlighting
//! - a flat list of [`Symbol`]s, for an outline panel
//!
//! ## Paths
//!
//! Languages pick one of two tokenizing paths when they are registered:
//!
//! - **per-line** (C family): every line is scanned on its own, with the
//!   block-comment state carried in from the line before ([`scan_line`]). After an
//!   edit only the touched lines, plus whatever the changed state reaches, are
//!   scanned again.
//! - **whole-document** (Python family): the buffer is lexed at once so multi-line
//!   strings are seen whole ([`tokenize_document`]), call expressions are annotated
//!   and the tokens are cut into per-line spans.
//!
//! Symbols come from a structural grammar or from a line heuristic
//! ([`extract_symbols`]).
//!
//! ## Failure model
//!
//! Expected failures never surface as errors: malformed literals, grammar failures
//! and unknown languages degrade to "no extra styling" or an empty outline, and are
//! reported as [`Diagnostic`]s next to the result. Only loading language
//! definitions and writing reports return `Result`.
//!
//! ## Session use
//!
//! Hosts that keep buffers open use a [`Highlighter`]: open a buffer, forward
//! [`BufferChanged`] notifications, look up [`Highlighter::line_styles`] while
//! drawing. The outline is refreshed on demand through [`Outline::refresh`].

pub mod buffer;
pub mod classifier;
pub mod error;
pub mod formats;
pub mod highlighter;
pub mod language;
pub mod lexing;
pub mod location;
pub mod logging;
pub mod outline;
pub mod style;

pub use buffer::{BufferChanged, BufferId, LineEdit, TextBuffer, TextSnapshot};
pub use classifier::{classify_token, WordTables};
pub use error::{ConfigError, Diagnostic, DiagnosticKind, FormatError};
pub use highlighter::{highlight_text, scan_line, tokenize_document, Highlight, Highlighter};
pub use language::{Language, LanguageRegistry, LanguageSpec};
pub use lexing::{BlockState, LineScan};
pub use outline::{extract_symbols, Outline, Symbol, SymbolExtractionStrategy, SymbolKind};
pub use style::{StyleMap, StyleTag, StyledSpan, SyntacticCategory, TokenKind};
