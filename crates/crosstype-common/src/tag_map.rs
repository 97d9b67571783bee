//! Free-form tags attached to a node's origin.
//!
//! Parsers record language-level annotations here (JSDoc tags, decorators,
//! schema keywords). A tag may carry a JSON value or be a bare marker.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered collection of tags by name.
///
/// Bare marker tags are stored without a value and read back as `true`
/// by [`TagMap::to_object`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap {
    tags: IndexMap<String, Option<Value>>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag with a value, returning the previous entry if any.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Option<Value>> {
        self.tags.insert(name.into(), Some(value))
    }

    /// Insert a bare marker tag (no value).
    pub fn mark(&mut self, name: impl Into<String>) -> Option<Option<Value>> {
        self.tags.insert(name.into(), None)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Option<Value>> {
        self.tags.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<Value>> {
        self.tags.shift_remove(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Convert to a JSON object. Tags without a value become `true`.
    pub fn to_object(&self) -> Map<String, Value> {
        self.tags
            .iter()
            .map(|(name, value)| (name.clone(), value.clone().unwrap_or(Value::Bool(true))))
            .collect()
    }
}

impl FromIterator<(String, Option<Value>)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<Value>)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/tag_map_tests.rs"]
mod tag_map_tests;
