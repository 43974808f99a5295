//! Pattern configuration and its raw entries
//!
//! A configuration maps each semantic value to one entry or a list of
//! entries. Entries come in shorthand and structured forms:
//!
//! ```toml
//! season = "re:s(\\d+)"
//! container = ["mkv", "avi"]
//!
//! [episode]
//! regex = "e(\\d+)"
//! validator = "import:is_int"
//! ```

use crate::error::ConfigError;
use crate::types::{OptionValue, Options};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One raw configuration entry, decoded from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// A single pattern, literal unless it carries the regex marker
    Literal(String),
    /// Pattern lists (`string`, `regex`, legacy `pattern`) plus options
    Structured(Options),
    /// Several entries for the same semantic value
    ListOf(Vec<RawEntry>),
}

impl RawEntry {
    /// Build a structured entry from key/value pairs
    pub fn structured<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<OptionValue>,
    {
        RawEntry::Structured(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The entries this raw entry stands for
    ///
    /// A single entry is viewed as a one-element list.
    pub fn as_slice(&self) -> &[RawEntry] {
        match self {
            RawEntry::ListOf(entries) => entries,
            single => std::slice::from_ref(single),
        }
    }
}

impl From<&str> for RawEntry {
    fn from(pattern: &str) -> Self {
        RawEntry::Literal(pattern.to_string())
    }
}

impl From<String> for RawEntry {
    fn from(pattern: String) -> Self {
        RawEntry::Literal(pattern)
    }
}

impl From<Options> for RawEntry {
    fn from(options: Options) -> Self {
        RawEntry::Structured(options)
    }
}

impl From<Vec<RawEntry>> for RawEntry {
    fn from(entries: Vec<RawEntry>) -> Self {
        RawEntry::ListOf(entries)
    }
}

/// Ordered mapping from semantic value to its entries
///
/// Insertion order is kept so engines see registrations in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternConfig {
    entries: IndexMap<String, RawEntry>,
}

impl PatternConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: PatternConfig = toml::from_str(s)?;
        Ok(config)
    }

    /// Add or replace the entries for a semantic value
    pub fn insert(&mut self, value: impl Into<String>, entry: impl Into<RawEntry>) {
        self.entries.insert(value.into(), entry.into());
    }

    /// Builder form of [`PatternConfig::insert`]
    pub fn with(mut self, value: impl Into<String>, entry: impl Into<RawEntry>) -> Self {
        self.insert(value, entry);
        self
    }

    pub fn get(&self, value: &str) -> Option<&RawEntry> {
        self.entries.get(value)
    }

    /// Iterate (semantic value, entry) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawEntry>> FromIterator<(K, V)> for PatternConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = PatternConfig::new();
        for (value, entry) in iter {
            config.insert(value, entry);
        }
        config
    }
}
