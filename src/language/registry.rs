//! Language registry
//!
//! Maps language ids and file extensions to compiled [`Language`]s. Registering an
//! id that already exists replaces it, and its extensions are re-bound, so a YAML
//! file can both add languages and override the built-in ones.

use super::builtin;
use super::spec::{LanguageFile, LanguageSpec};
use super::Language;
use crate::error::ConfigError;
use crate::outline::SymbolExtractionStrategy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Registry of languages known to the core
#[derive(Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, Arc<Language>>,
    /// Lowercased extension -> language id
    extensions: HashMap<String, String>,
    /// Strategies registered at run time, overriding the spec's choice
    extractors: HashMap<String, Arc<dyn SymbolExtractionStrategy>>,
}

impl LanguageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in languages
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for spec in builtin::all() {
            // Built-in specs are covered by tests; a failure here is a bug in the tables
            if let Err(err) = registry.register(spec) {
                tracing::error!("built-in language rejected: {err}");
            }
        }
        registry
    }

    /// Register a language, replacing any language with the same id
    pub fn register(&mut self, spec: LanguageSpec) -> Result<(), ConfigError> {
        let language = Language::compile(spec)?;
        let id = language.id().to_string();

        self.extensions.retain(|_, owner| owner != &id);
        for ext in &language.spec().extensions {
            let ext = normalize_extension(ext);
            if let Some(previous) = self.extensions.insert(ext.clone(), id.clone()) {
                tracing::debug!(extension = %ext, from = %previous, to = %id, "extension re-bound");
            }
        }

        tracing::debug!(language = %id, "language registered");
        self.languages.insert(id, Arc::new(language));
        Ok(())
    }

    /// Register a custom symbol-extraction strategy for a language id
    pub fn register_extractor(
        &mut self,
        language: impl Into<String>,
        strategy: Arc<dyn SymbolExtractionStrategy>,
    ) {
        self.extractors.insert(language.into(), strategy);
    }

    /// Get a language by id
    pub fn get(&self, id: &str) -> Option<Arc<Language>> {
        self.languages.get(id).cloned()
    }

    /// Check if a language id is registered
    pub fn has(&self, id: &str) -> bool {
        self.languages.contains_key(id)
    }

    /// Look up a language by file extension (with or without the dot, any case)
    pub fn language_for_extension(&self, ext: &str) -> Option<Arc<Language>> {
        let id = self.extensions.get(&normalize_extension(ext))?;
        self.get(id)
    }

    /// Look up a language from a file path's extension
    pub fn language_for_path(&self, path: impl AsRef<Path>) -> Option<Arc<Language>> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.language_for_extension(ext)
    }

    /// Symbol strategy for a language: a custom one if registered, else the spec's
    pub fn extractor(&self, id: &str) -> Option<Arc<dyn SymbolExtractionStrategy>> {
        if let Some(custom) = self.extractors.get(id) {
            return Some(custom.clone());
        }
        self.languages.get(id)?.extractor().cloned()
    }

    /// All registered languages, sorted by id
    pub fn list(&self) -> Vec<Arc<Language>> {
        let mut languages: Vec<_> = self.languages.values().cloned().collect();
        languages.sort_by(|a, b| a.id().cmp(b.id()));
        languages
    }

    /// Register every language of a YAML definition document
    ///
    /// Returns how many languages were registered. Registration stops at the first
    /// invalid definition; the ones before it stay registered.
    pub fn load_yaml_str(&mut self, yaml: &str) -> Result<usize, ConfigError> {
        let file: LanguageFile = serde_yaml::from_str(yaml)?;
        let count = file.languages.len();
        for spec in file.languages {
            self.register(spec)?;
        }
        Ok(count)
    }

    /// Register every language of a YAML definition file
    pub fn load_yaml_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_yaml_str(&yaml)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
