#![forbid(unsafe_code)]

//! The registration interface a rule-matching engine exposes
//!
//! The loader never matches anything itself. It hands each pattern list,
//! with its fully resolved options, to the engine operation for that
//! pattern type.

use crate::error::EngineError;
use crate::types::{OptionValue, PatternType};
use crate::validators::Validator;
use indexmap::IndexMap;

/// An option value after validator references have been resolved
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// Passed through as configured
    Value(OptionValue),
    /// A resolved validator callable
    Validator(Validator),
}

impl ResolvedValue {
    pub fn as_value(&self) -> Option<&OptionValue> {
        match self {
            ResolvedValue::Value(value) => Some(value),
            ResolvedValue::Validator(_) => None,
        }
    }

    pub fn as_validator(&self) -> Option<&Validator> {
        match self {
            ResolvedValue::Validator(validator) => Some(validator),
            ResolvedValue::Value(_) => None,
        }
    }

    /// String content of a plain string value
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(OptionValue::as_str)
    }
}

impl From<OptionValue> for ResolvedValue {
    fn from(value: OptionValue) -> Self {
        ResolvedValue::Value(value)
    }
}

impl From<Validator> for ResolvedValue {
    fn from(validator: Validator) -> Self {
        ResolvedValue::Validator(validator)
    }
}

/// Options handed to a registration call
pub type ResolvedOptions = IndexMap<String, ResolvedValue>;

/// A rule-matching engine that accepts pattern registrations
///
/// There is one operation per pattern type. Options are opaque to the
/// loader apart from the `validator` key, which arrives resolved.
pub trait PatternEngine {
    /// Register regular-expression patterns
    fn regex(&mut self, patterns: &[String], options: &ResolvedOptions) -> Result<(), EngineError>;

    /// Register literal string patterns
    fn string(
        &mut self,
        patterns: &[String],
        options: &ResolvedOptions,
    ) -> Result<(), EngineError>;

    /// Register patterns through the operation matching `pattern_type`
    fn register(
        &mut self,
        pattern_type: PatternType,
        patterns: &[String],
        options: &ResolvedOptions,
    ) -> Result<(), EngineError> {
        match pattern_type {
            PatternType::Regex => self.regex(patterns, options),
            PatternType::String => self.string(patterns, options),
        }
    }
}

impl<E: PatternEngine + ?Sized> PatternEngine for &mut E {
    fn regex(&mut self, patterns: &[String], options: &ResolvedOptions) -> Result<(), EngineError> {
        (**self).regex(patterns, options)
    }

    fn string(
        &mut self,
        patterns: &[String],
        options: &ResolvedOptions,
    ) -> Result<(), EngineError> {
        (**self).string(patterns, options)
    }

    fn register(
        &mut self,
        pattern_type: PatternType,
        patterns: &[String],
        options: &ResolvedOptions,
    ) -> Result<(), EngineError> {
        (**self).register(pattern_type, patterns, options)
    }
}
