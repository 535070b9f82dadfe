//! One named source of key/value configuration entries.

use crate::error::ConfigError;
use crate::props;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// An order-irrelevant mapping of property keys to values.
///
/// Layers compose by merge-override: the incoming layer's entries
/// replace or add to the existing ones, never removing any. This is
/// what lets several discovered files within one category accumulate
/// into a single logical layer.
///
/// Serializes transparently as a plain string map, so harnesses can
/// hand over externally built parameter sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyLayer {
    entries: BTreeMap<String, String>,
}

impl PropertyLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text into a layer.
    ///
    /// Duplicate keys keep the value appearing last in the text.
    pub fn parse_str(text: &str) -> Self {
        props::parse_str(text).into_iter().collect()
    }

    /// Read and parse one properties file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse_str(&text))
    }

    /// Replace or add every entry of `source` into this layer.
    ///
    /// Idempotent: merging the same source twice leaves the layer
    /// unchanged after the first merge.
    pub fn merge_override(&mut self, source: &PropertyLayer) {
        for (key, value) in &source.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Set a single entry, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present in this layer.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys, in deterministic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyLayer {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
