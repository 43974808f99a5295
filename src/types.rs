#![forbid(unsafe_code)]

//! Core domain types for pattern-config
//!
//! This module defines the fundamental types shared by the configuration
//! model, the loader and the engine interface.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat, insertion-ordered option mapping
pub type Options = IndexMap<String, OptionValue>;

/// Option key that carries the semantic value of an entry
pub const VALUE_KEY: &str = "value";

/// Option key holding a validator reference
pub const VALIDATOR_KEY: &str = "validator";

/// Deprecated singular pattern key
pub const LEGACY_PATTERN_KEY: &str = "pattern";

/// Pattern kinds the engine can register
///
/// Variant order is the dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Regex,
    String,
}

impl PatternType {
    /// All pattern types, in dispatch order
    pub const ALL: [PatternType; 2] = [PatternType::Regex, PatternType::String];

    /// Returns the option key this pattern type is declared under
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Regex => "regex",
            PatternType::String => "string",
        }
    }

    /// Returns true if `key` names a pattern type
    pub fn is_pattern_key(key: &str) -> bool {
        Self::ALL.iter().any(|t| t.as_str() == key)
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown pattern type '{}'", s))
    }
}

/// Key of an options table layer
///
/// `Default` applies to every pattern type; `Type` only to its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionSelector {
    Default,
    Type(PatternType),
}

impl OptionSelector {
    /// Name of the sentinel default selector
    pub const DEFAULT_NAME: &'static str = "default";

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSelector::Default => Self::DEFAULT_NAME,
            OptionSelector::Type(pattern_type) => pattern_type.as_str(),
        }
    }
}

impl fmt::Display for OptionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PatternType> for OptionSelector {
    fn from(pattern_type: PatternType) -> Self {
        OptionSelector::Type(pattern_type)
    }
}

impl TryFrom<String> for OptionSelector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::DEFAULT_NAME {
            return Ok(OptionSelector::Default);
        }
        value
            .parse::<PatternType>()
            .map(OptionSelector::Type)
            .map_err(|_| {
                format!(
                    "unknown option selector '{}', expected 'default', 'regex' or 'string'",
                    value
                )
            })
    }
}

impl From<OptionSelector> for String {
    fn from(selector: OptionSelector) -> Self {
        selector.as_str().to_string()
    }
}

/// A configuration option value, as decoded from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<OptionValue>),
    Table(IndexMap<String, OptionValue>),
}

impl OptionValue {
    /// Returns the string slice if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Int(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::Str(_) => "string",
            OptionValue::List(_) => "list",
            OptionValue::Table(_) => "table",
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_type_names() {
        assert_eq!(PatternType::Regex.as_str(), "regex");
        assert_eq!(PatternType::String.as_str(), "string");
        assert_eq!("regex".parse::<PatternType>(), Ok(PatternType::Regex));
        assert!("functional".parse::<PatternType>().is_err());
    }

    #[test]
    fn test_pattern_type_dispatch_order() {
        assert_eq!(PatternType::ALL, [PatternType::Regex, PatternType::String]);
        assert!(PatternType::is_pattern_key("string"));
        assert!(!PatternType::is_pattern_key("pattern"));
    }

    #[test]
    fn test_option_selector_from_string() {
        assert_eq!(
            OptionSelector::try_from("default".to_string()),
            Ok(OptionSelector::Default)
        );
        assert_eq!(
            OptionSelector::try_from("string".to_string()),
            Ok(OptionSelector::Type(PatternType::String))
        );
        assert!(OptionSelector::try_from("none".to_string()).is_err());
        assert_eq!(String::from(OptionSelector::Default), "default");
    }

    #[test]
    fn test_option_value_untagged_decoding() {
        let options: Options = toml::from_str(
            r#"
flag = true
priority = 3
ratio = 0.5
name = "episode"
tags = ["a", "b"]
nested = { key = "v" }
"#,
        )
        .unwrap();

        assert_eq!(options["flag"], OptionValue::Bool(true));
        assert_eq!(options["priority"].as_int(), Some(3));
        assert_eq!(options["ratio"], OptionValue::Float(0.5));
        assert_eq!(options["name"].as_str(), Some("episode"));
        assert_eq!(options["tags"].kind(), "list");
        assert_eq!(options["nested"].kind(), "table");

        let keys: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, ["flag", "priority", "ratio", "name", "tags", "nested"]);
    }
}
