//! Tokenizing paths
//!
//! Two independent paths turn buffer text into styled spans:
//!
//! - **Per-line** ([`line_scan`] + [`block`]): each line is scanned on its own with
//!   the block-comment state carried in from the line before. Any single line can be
//!   re-scanned in isolation given that state, which is what makes edits cheap.
//! - **Whole-document** ([`tokens`] → [`document`] → [`calls`] → [`expand`]): the
//!   entire buffer is lexed at once because literals may span lines. Tokens are
//!   classified, call expressions are annotated, and the result is cut into
//!   per-line spans.
//!
//! Both paths end in a [`StyleMap`](crate::style::StyleMap).

pub mod block;
pub mod calls;
pub mod document;
pub mod expand;
pub mod line_scan;
pub mod tokens;

pub use block::{BlockState, LineStates};
pub use document::{DocumentTokenizer, Token, Tokenization};
pub use line_scan::{LineScan, LineScanner};
