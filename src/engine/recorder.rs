#![forbid(unsafe_code)]

//! An engine that records registrations instead of matching
//!
//! Useful as a dry run over a configuration: the recorded calls show
//! exactly what a real engine would receive. In strict mode regex patterns
//! are compiled first and rejected if invalid.

use crate::engine::{PatternEngine, ResolvedOptions, ResolvedValue};
use crate::error::EngineError;
use crate::types::{OptionValue, PatternType, VALIDATOR_KEY, VALUE_KEY};
use crate::validators::Validator;
use regex::RegexBuilder;

/// Option key that makes strict regex compilation case-insensitive
const IGNORE_CASE_KEY: &str = "ignore_case";

/// One recorded registration call
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub pattern_type: PatternType,
    pub patterns: Vec<String>,
    pub options: ResolvedOptions,
}

impl Registration {
    pub fn option(&self, name: &str) -> Option<&ResolvedValue> {
        self.options.get(name)
    }

    /// The semantic value this registration tags matches with
    pub fn value(&self) -> Option<&OptionValue> {
        self.option(VALUE_KEY).and_then(ResolvedValue::as_value)
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.option(VALIDATOR_KEY)
            .and_then(ResolvedValue::as_validator)
    }
}

/// Records every registration it receives
#[derive(Debug, Default)]
pub struct RecordingEngine {
    registrations: Vec<Registration>,
    strict: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that compiles regex patterns before accepting them
    pub fn strict() -> Self {
        Self {
            registrations: Vec::new(),
            strict: true,
        }
    }

    /// Registrations in the order they were made
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn into_registrations(self) -> Vec<Registration> {
        self.registrations
    }

    /// Registrations of one pattern type
    pub fn of_type(&self, pattern_type: PatternType) -> impl Iterator<Item = &Registration> {
        self.registrations
            .iter()
            .filter(move |r| r.pattern_type == pattern_type)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    fn record(
        &mut self,
        pattern_type: PatternType,
        patterns: &[String],
        options: &ResolvedOptions,
    ) {
        self.registrations.push(Registration {
            pattern_type,
            patterns: patterns.to_vec(),
            options: options.clone(),
        });
    }
}

fn check_regex(patterns: &[String], options: &ResolvedOptions) -> Result<(), EngineError> {
    let ignore_case = options
        .get(IGNORE_CASE_KEY)
        .and_then(ResolvedValue::as_value)
        .and_then(OptionValue::as_bool)
        .unwrap_or(false);

    for pattern in patterns {
        RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| EngineError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
    }

    Ok(())
}

impl PatternEngine for RecordingEngine {
    fn regex(&mut self, patterns: &[String], options: &ResolvedOptions) -> Result<(), EngineError> {
        if self.strict {
            check_regex(patterns, options)?;
        }
        self.record(PatternType::Regex, patterns, options);
        Ok(())
    }

    fn string(
        &mut self,
        patterns: &[String],
        options: &ResolvedOptions,
    ) -> Result<(), EngineError> {
        self.record(PatternType::String, patterns, options);
        Ok(())
    }
}
