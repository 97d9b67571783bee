//! Per-language option sets.
//!
//! Each language package accepts its own free-form compile/parse options.
//! Options are kept as JSON objects keyed by the language short name so that
//! nodes can carry them without knowing every language's option schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Options for a single language (a JSON object).
pub type OptionsBase = Map<String, Value>;

/// Option bags for several languages, keyed by language short name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageOptionsSet {
    languages: BTreeMap<String, OptionsBase>,
}

/// Compile options attached to nodes and passed to compilers.
pub type CompileOptionsSet = LanguageOptionsSet;

/// Parse options passed to parsers.
pub type ParseOptionsSet = LanguageOptionsSet;

impl LanguageOptionsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a JSON document of the form `{ "ts": { ... }, "python": { ... } }`.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn get(&self, language: &str) -> Option<&OptionsBase> {
        self.languages.get(language)
    }

    /// Options for `language`, created empty if absent.
    pub fn entry(&mut self, language: impl Into<String>) -> &mut OptionsBase {
        self.languages.entry(language.into()).or_default()
    }

    pub fn set(&mut self, language: impl Into<String>, key: impl Into<String>, value: Value) {
        self.entry(language).insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.languages.values().all(Map::is_empty)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Effective options for `language`: these options, overridden key by key
    /// by `overrides`.
    pub fn resolve(&self, language: &str, overrides: Option<&OptionsBase>) -> OptionsBase {
        let mut merged = self.get(language).cloned().unwrap_or_default();
        if let Some(overrides) = overrides {
            for (key, value) in overrides {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
