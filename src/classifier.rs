//! Token classification
//!
//! Maps a lexeme and the syntactic category its lexer gave it to a [`StyleTag`].
//! Classification is a pure lookup: the only inputs besides the lexeme are the
//! keyword and builtin tables of the language, bundled as [`WordTables`].
//!
//! Rules, in order:
//! - comment → comment, string literal → string, numeric literal → number
//! - identifier → keyword if in the keyword table, builtin if in the builtin table,
//!   otherwise default
//! - a lexeme the lexer already knows is a keyword → keyword
//! - anything else → default

use crate::language::LanguageSpec;
use crate::style::{StyleTag, SyntacticCategory, TokenKind};
use std::collections::HashSet;

/// Keyword and builtin-name tables for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTables {
    keywords: HashSet<String>,
    builtins: HashSet<String>,
}

impl WordTables {
    pub fn new<K, B>(keywords: K, builtins: B) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            builtins: builtins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_spec(spec: &LanguageSpec) -> Self {
        Self::new(spec.keywords.iter().cloned(), spec.builtins.iter().cloned())
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    /// Resolve the kind of a lexeme
    pub fn kind(&self, lexeme: &str, category: SyntacticCategory) -> TokenKind {
        match category {
            SyntacticCategory::Comment => TokenKind::Comment,
            SyntacticCategory::String => TokenKind::String,
            SyntacticCategory::Number => TokenKind::Number,
            SyntacticCategory::Keyword => TokenKind::Keyword,
            SyntacticCategory::Identifier if self.is_keyword(lexeme) => TokenKind::Keyword,
            SyntacticCategory::Identifier if self.is_builtin(lexeme) => TokenKind::Builtin,
            SyntacticCategory::Identifier => TokenKind::Identifier,
            SyntacticCategory::Operator => TokenKind::Operator,
            SyntacticCategory::Directive => TokenKind::Directive,
        }
    }

    /// Resolve the style tag of a lexeme
    pub fn classify(&self, lexeme: &str, category: SyntacticCategory) -> StyleTag {
        style_for_kind(self.kind(lexeme, category))
    }
}

/// Style tag carried by a freshly classified token
///
/// Operators and directives fall through to default here: the per-line path styles
/// directives itself, and operators are left to the renderer's base style.
pub fn style_for_kind(kind: TokenKind) -> StyleTag {
    match kind {
        TokenKind::Comment => StyleTag::Comment,
        TokenKind::String => StyleTag::String,
        TokenKind::Number => StyleTag::Number,
        TokenKind::Keyword => StyleTag::Keyword,
        TokenKind::Builtin => StyleTag::Builtin,
        TokenKind::Identifier
        | TokenKind::Operator
        | TokenKind::Directive
        | TokenKind::Default => StyleTag::Default,
    }
}

/// Classify a lexeme against a language's word tables
pub fn classify_token(lexeme: &str, category: SyntacticCategory, tables: &WordTables) -> StyleTag {
    tables.classify(lexeme, category)
}
