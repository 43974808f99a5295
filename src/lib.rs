#![forbid(unsafe_code)]

//! pattern-config: declarative pattern configuration for tagging engines
//!
//! Pattern rules are authored as a mapping from semantic value to entries in
//! several shorthand forms. This crate normalizes those entries and turns
//! them into registration calls on a [`PatternEngine`], resolving validator
//! references along the way.
//!
//! ```
//! use pattern_config::{ConfigLoader, PatternConfig, RecordingEngine};
//!
//! let config = PatternConfig::parse(r#"
//! container = ["mkv", "avi"]
//!
//! [episode]
//! regex = "e(\\d+)"
//! validator = "import:is_int"
//! "#).unwrap();
//!
//! let mut engine = RecordingEngine::new();
//! let report = ConfigLoader::new().load(&config, None, &mut engine).unwrap();
//! assert_eq!(report.registrations, 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod types;
pub mod validators;

// Re-export error types for convenient access
pub use error::{ConfigError, EngineError, LoadError, ValidatorError};

// Re-export the main entry points
pub use config::{LegacyPatternPolicy, LoaderSettings, OptionsTable, PatternConfig, RawEntry};
pub use engine::{PatternEngine, RecordingEngine, Registration, ResolvedOptions, ResolvedValue};
pub use loader::{ConfigLoader, EntryDecl, LoadReport, load_config_patterns};
pub use types::{OptionSelector, OptionValue, Options, PatternType};
pub use validators::{Candidate, Validator, ValidatorCache, ValidatorRegistry};
