//! Language definitions as plain data
//!
//! A [`LanguageSpec`] is everything the core needs to know about a language: its
//! word tables, which tokenizing path it takes and how its symbols are extracted.
//! Specs deserialize from YAML, so adding a language needs no code.
//!
//! ```yaml
//! languages:
//!   - id: go
//!     name: Go
//!     extensions: [go]
//!     keywords: [func, return, if, for]
//!     builtins: [int, string, bool]
//!     tokenizer:
//!       kind: per-line
//!       line_comment: "//"
//!       block_comment: ["/*", "*/"]
//!     symbols: line-heuristic
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which tokenizing path a language takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TokenizerStrategy {
    /// Line-by-line scanning with carried block-comment state
    PerLine(LineSyntax),
    /// Whole-buffer tokenizing, for languages with multi-line literals
    WholeDocument,
}

/// Comment and directive markers used by the per-line scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSyntax {
    #[serde(default)]
    pub line_comment: Option<String>,
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
    #[serde(default)]
    pub directive_prefix: Option<String>,
}

impl LineSyntax {
    /// C-family markers: `//`, `/* */` and `#` directives
    pub fn c_family() -> Self {
        Self {
            line_comment: Some("//".into()),
            block_comment: Some(("/*".into(), "*/".into())),
            directive_prefix: Some("#".into()),
        }
    }
}

/// How symbols are extracted for the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymbolStrategy {
    /// No outline for this language
    #[default]
    None,
    /// Full structural parse, then a walk over class/function definitions
    StructuralGrammar,
    /// Independent per-line pattern matching for directives and signatures
    LineHeuristic,
}

/// Complete description of one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// File extensions without the leading dot
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub builtins: BTreeSet<String>,
    pub tokenizer: TokenizerStrategy,
    #[serde(default)]
    pub symbols: SymbolStrategy,
}

impl LanguageSpec {
    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Reject definitions the scanners cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidLanguage {
            language: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("language id must not be empty"));
        }
        if self.extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(invalid("file extensions must not be empty"));
        }

        if let TokenizerStrategy::PerLine(syntax) = &self.tokenizer {
            if matches!(&syntax.line_comment, Some(marker) if marker.is_empty()) {
                return Err(invalid("empty line comment marker"));
            }
            if let Some((open, close)) = &syntax.block_comment {
                if open.is_empty() || close.is_empty() {
                    return Err(invalid("empty block comment marker"));
                }
            }
            if matches!(&syntax.directive_prefix, Some(prefix) if prefix.is_empty()) {
                return Err(invalid("empty directive prefix"));
            }
        }

        Ok(())
    }
}

/// Top-level shape of a language definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageFile {
    #[serde(default)]
    pub languages: Vec<LanguageSpec>,
}
