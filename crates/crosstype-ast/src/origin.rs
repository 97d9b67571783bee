//! Provenance data carried by nodes. Never traversed as children.

use crosstype_common::{CompileOptionsSet, TagMap};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFileInfo {
    pub file_name: String,
    pub package_name: Option<String>,
    pub package_path: Option<String>,
}

/// Where a node came from. Each language fills in what it knows; anything
/// language-specific goes into `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeOrigin {
    pub language: String,
    pub source_file_info: Option<SourceFileInfo>,
    pub source_text: Option<String>,
    pub tags: TagMap,
    /// Language-specific kind, for intrinsics that map onto one shared kind
    /// (e.g. `undefined` and `null` both become `Null`).
    pub specific_kind: Option<u32>,
    pub extra: Map<String, Value>,
}

impl NodeOrigin {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_specific_kind(mut self, kind: u32) -> Self {
        self.specific_kind = Some(kind);
        self
    }
}

/// A file a Definition is emitted to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputFile {
    pub file_name: String,
    pub language: String,
    /// Overrides applied on top of the Definition's compile options.
    pub compile_options: Option<CompileOptionsSet>,
}
