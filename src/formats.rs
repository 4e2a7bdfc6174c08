//! Report serialization
//!
//! A [`Report`] bundles what the core produced for one file: its styles, its
//! symbols and the diagnostics recovered along the way. Each output format
//! implements [`Formatter`] and is registered with a [`FormatRegistry`].

use crate::error::{Diagnostic, FormatError};
use crate::outline::Symbol;
use crate::style::StyleMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

/// Everything reported for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub path: String,
    /// Language id, `None` when no language matched
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<Vec<Symbol>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new(path: impl Into<String>, language: Option<String>) -> Self {
        Self {
            path: path.into(),
            language,
            ..Default::default()
        }
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn with_symbols(mut self, symbols: Vec<Symbol>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }
}

/// Trait for report formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "json", "simple")
    fn name(&self) -> &str;

    fn serialize(&self, report: &Report) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, report: &Report) -> Result<String, FormatError> {
        serde_json::to_string_pretty(report).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, report: &Report) -> Result<String, FormatError> {
        serde_yaml::to_string(report).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML document"
    }
}

/// Line-oriented text for terminals
///
/// ```text
/// path: main.c (c)
/// styles:
///   2: 0+4 keyword, 7+2 number
/// symbols:
///   1 #include <stdio.h>
/// ```
pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn name(&self) -> &str {
        "simple"
    }

    fn serialize(&self, report: &Report) -> Result<String, FormatError> {
        let mut out = String::new();
        write_simple(&mut out, report).map_err(|e| FormatError::Serialization(e.to_string()))?;
        Ok(out)
    }

    fn description(&self) -> &str {
        "Human-readable summary"
    }
}

fn write_simple(out: &mut String, report: &Report) -> std::fmt::Result {
    write!(out, "path: {}", report.path)?;
    match &report.language {
        Some(language) => writeln!(out, " ({language})")?,
        None => writeln!(out, " (unsupported)")?,
    }

    if let Some(styles) = &report.styles {
        writeln!(out, "styles:")?;
        for (line, spans) in styles.iter() {
            let spans: Vec<String> = spans
                .iter()
                .map(|span| format!("{}+{} {}", span.start, span.len, span.style))
                .collect();
            writeln!(out, "  {line}: {}", spans.join(", "))?;
        }
    }

    if let Some(symbols) = &report.symbols {
        writeln!(out, "symbols:")?;
        for symbol in symbols {
            writeln!(out, "  {} {}", symbol.line, symbol.label)?;
        }
    }

    if !report.diagnostics.is_empty() {
        writeln!(out, "diagnostics:")?;
        for diagnostic in &report.diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }

    Ok(())
}

/// Registry of report formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing one with the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, report: &Report, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(report)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SimpleFormatter);
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SymbolKind;
    use crate::style::{StyleTag, StyledSpan};

    fn report() -> Report {
        let mut styles = StyleMap::new();
        styles.push(0, StyledSpan::new(0, 18, StyleTag::Directive));
        styles.push(2, StyledSpan::new(0, 3, StyleTag::Type));
        styles.push(2, StyledSpan::new(4, 4, StyleTag::CallTarget));

        Report::new("main.c", Some("c".to_string()))
            .with_styles(styles)
            .with_symbols(vec![
                Symbol::new(SymbolKind::Directive, "#include <stdio.h>", 1),
                Symbol::new(SymbolKind::Function, "function main()", 3),
            ])
    }

    #[test]
    fn test_defaults_registered() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["json", "simple", "yaml"]);
        assert!(registry.has("simple"));
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        let result = registry.serialize(&report(), "xml");
        assert!(matches!(result, Err(FormatError::FormatNotFound(name)) if name == "xml"));
    }

    #[test]
    fn test_simple_format() {
        let output = FormatRegistry::with_defaults()
            .serialize(&report(), "simple")
            .unwrap();
        insta::assert_snapshot!(output, @r###"
path: main.c (c)
styles:
  0: 0+18 directive
  2: 0+3 type, 4+4 call-target
symbols:
  1 #include <stdio.h>
  3 function main()
"###);
    }

    #[test]
    fn test_simple_format_with_diagnostics() {
        let report = Report::new("broken.py", Some("python".to_string()))
            .with_symbols(Vec::new())
            .with_diagnostics(vec![Diagnostic::parse_failure(2, "unexpected indent")]);
        let output = SimpleFormatter.serialize(&report).unwrap();
        insta::assert_snapshot!(output, @r###"
path: broken.py (python)
symbols:
diagnostics:
  structural-parse-failure:2: unexpected indent
"###);
    }

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.serialize(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["language"], "c");
        assert_eq!(value["styles"]["lines"]["2"][1]["style"], "call-target");
        assert_eq!(value["symbols"][1]["label"], "function main()");
        assert_eq!(value["symbols"][0]["kind"], "directive");
    }

    #[test]
    fn test_yaml_omits_missing_sections() {
        let report = Report::new("notes.txt", None);
        let output = YamlFormatter.serialize(&report).unwrap();
        assert!(output.contains("path: notes.txt"));
        assert!(output.contains("language: null"));
        assert!(!output.contains("styles"));
    }
}
