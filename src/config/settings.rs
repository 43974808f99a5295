//! Loader settings: shorthand markers and compatibility switches

use crate::error::ConfigError;
use crate::validators::builtin::BUILTIN_MODULE;
use serde::{Deserialize, Serialize};

/// Prefix marking a pattern string as a regular expression
pub const DEFAULT_REGEX_MARKER: &str = "re:";

/// Prefix marking an option value as a validator reference
pub const DEFAULT_IMPORT_MARKER: &str = "import:";

/// Settings controlling how entries are interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSettings {
    /// Prefix of regex shorthand patterns
    pub regex_marker: String,

    /// Prefix of validator references
    pub import_marker: String,

    /// Module searched for unqualified validator references
    pub default_validator_module: String,

    /// What to do when an entry mixes `pattern` with a pattern list
    pub legacy_pattern: LegacyPatternPolicy,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            regex_marker: DEFAULT_REGEX_MARKER.to_string(),
            import_marker: DEFAULT_IMPORT_MARKER.to_string(),
            default_validator_module: BUILTIN_MODULE.to_string(),
            legacy_pattern: LegacyPatternPolicy::default(),
        }
    }
}

impl LoaderSettings {
    /// Parse settings from TOML text; missing keys take their defaults
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let settings: LoaderSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regex_marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "regex_marker".to_string(),
                message: "marker must not be empty".to_string(),
            });
        }

        if self.import_marker.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "import_marker".to_string(),
                message: "marker must not be empty".to_string(),
            });
        }

        if self.regex_marker == self.import_marker {
            return Err(ConfigError::Validation(format!(
                "regex_marker and import_marker are both '{}'",
                self.regex_marker
            )));
        }

        if self.default_validator_module.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_validator_module".to_string(),
                message: "module name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Pattern body if `pattern` carries the regex marker
    pub fn strip_regex_marker<'a>(&self, pattern: &'a str) -> Option<&'a str> {
        pattern.strip_prefix(self.regex_marker.as_str())
    }

    /// Reference body if `value` carries the import marker
    pub fn strip_import_marker<'a>(&self, value: &'a str) -> Option<&'a str> {
        value.strip_prefix(self.import_marker.as_str())
    }
}

/// Handling of the deprecated `pattern` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LegacyPatternPolicy {
    /// `pattern` next to the list it maps onto is a configuration error
    #[default]
    Reject,
    /// `pattern` replaces that list
    Overwrite,
}
