//! Error and diagnostic types
//!
//! Expected failures (a malformed literal, a source file the structural grammar
//! rejects, a buffer in a language nobody registered) are not errors for the host:
//! they degrade to "no extra styling" and travel as [`Diagnostic`] values next to
//! the usable result. Only configuration and output problems are real `Err`s.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Category of a recovered problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Unterminated string or comment, recovered locally
    MalformedLiteral,
    /// The structural grammar rejected the buffer
    StructuralParseFailure,
    /// No strategy is registered for the buffer's language
    UnsupportedLanguage,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::MalformedLiteral => "malformed-literal",
            DiagnosticKind::StructuralParseFailure => "structural-parse-failure",
            DiagnosticKind::UnsupportedLanguage => "unsupported-language",
        }
    }
}

/// A recovered problem, reportable to the user but never fatal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line the problem was found on (0 when not tied to a line)
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn malformed_literal(line: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::MalformedLiteral, line, message)
    }

    pub fn parse_failure(line: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::StructuralParseFailure, line, message)
    }

    pub fn unsupported_language(language: &str) -> Self {
        Self::new(
            DiagnosticKind::UnsupportedLanguage,
            0,
            format!("no language registered for '{language}'"),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.kind.as_str(), self.message)
        } else {
            write!(f, "{}:{}: {}", self.kind.as_str(), self.line, self.message)
        }
    }
}

/// Errors raised while loading or validating language definitions
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid language definition file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("language '{language}': {reason}")]
    InvalidLanguage { language: String, reason: String },

    #[error("language '{language}': failed to compile word pattern: {source}")]
    Pattern {
        language: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while serializing a report
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
