//! Layered option defaults
//!
//! An options table holds a `default` layer that applies to every pattern
//! type and optional per-type layers that override it key by key:
//!
//! ```toml
//! [default]
//! ignore_case = true
//!
//! [regex]
//! abbreviations = ["-"]
//! ```

use crate::error::ConfigError;
use crate::types::{OptionSelector, Options, PatternType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Option layers keyed by selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsTable {
    layers: IndexMap<OptionSelector, Options>,
}

impl OptionsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an options table from TOML text
    ///
    /// Top-level keys must be `default`, `regex` or `string`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let table: OptionsTable = toml::from_str(s)?;
        Ok(table)
    }

    /// Replace the layer for `selector`
    pub fn with_layer(mut self, selector: impl Into<OptionSelector>, options: Options) -> Self {
        self.layers.insert(selector.into(), options);
        self
    }

    /// Replace the default layer
    pub fn with_defaults(self, options: Options) -> Self {
        self.with_layer(OptionSelector::Default, options)
    }

    pub fn layer(&self, selector: OptionSelector) -> Option<&Options> {
        self.layers.get(&selector)
    }

    /// Options applying to every pattern type
    pub fn defaults(&self) -> Option<&Options> {
        self.layer(OptionSelector::Default)
    }

    /// Options applying to one pattern type only
    pub fn type_options(&self, pattern_type: PatternType) -> Option<&Options> {
        self.layer(OptionSelector::Type(pattern_type))
    }

    /// Default and type-specific layers merged for `pattern_type`
    pub fn options_for(&self, pattern_type: PatternType) -> Options {
        merge_layers([self.defaults(), self.type_options(pattern_type)].into_iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Shallow merge of option layers, later layers winning key by key
///
/// Returns a new mapping; the inputs are left untouched. A key keeps the
/// position of its first occurrence.
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a Options>) -> Options {
    let mut merged = Options::new();
    for layer in layers {
        for (name, value) in layer {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}
