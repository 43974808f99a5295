//! Error types for pattern-config
//!
//! Errors follow a hierarchical structure: configuration, validator and
//! engine errors each have their own enum, and [`LoadError`] wraps them for
//! callers of the loader.

use crate::types::PatternType;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Settings or tables that parsed but do not make sense together
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Legacy `pattern` field used alongside the pattern list it maps onto
    #[error(
        "Entry for '{value}' sets both 'pattern' and '{pattern_type}'; use only the '{pattern_type}' list"
    )]
    ConflictingPattern {
        value: String,
        pattern_type: PatternType,
    },

    /// TOML decoding failure
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Validator reference resolution errors
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// Reference is empty after the import marker, or has an empty segment
    #[error("Malformed validator reference: '{0}'")]
    MalformedReference(String),

    /// No validator module registered under this name
    #[error("Validator module '{module}' not found (referenced by '{reference}')")]
    ModuleNotFound { module: String, reference: String },

    /// Module exists but has no such function
    #[error("Validator function '{function}' not found in module '{module}'")]
    FunctionNotFound { module: String, function: String },

    /// A module tried to register the same function twice
    #[error("Validator '{0}' is already registered")]
    DuplicateFunction(String),
}

/// Errors raised by a pattern engine while registering patterns
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Pattern the engine could not accept
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Any other refusal
    #[error("Registration rejected: {0}")]
    Rejected(String),
}

/// Top-level error type returned by the loader
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validator resolution error
    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    /// Engine refused a registration
    #[error("Engine error while registering {pattern_type} patterns for '{value}': {source}")]
    Engine {
        value: String,
        pattern_type: PatternType,
        #[source]
        source: EngineError,
    },
}
