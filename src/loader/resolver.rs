#![forbid(unsafe_code)]

//! Option value resolution
//!
//! Only the `validator` option is special: a string carrying the import
//! marker names a validator function and is replaced by the callable.
//! Everything else passes through unchanged.

use crate::config::LoaderSettings;
use crate::engine::{ResolvedOptions, ResolvedValue};
use crate::error::ValidatorError;
use crate::types::{OptionValue, Options, VALIDATOR_KEY};
use crate::validators::{Validator, ValidatorCache, ValidatorRef, ValidatorRegistry};

/// Resolves option values against a validator registry and cache
#[derive(Debug, Clone, Copy)]
pub struct OptionResolver<'a> {
    registry: &'a ValidatorRegistry,
    cache: &'a ValidatorCache,
    settings: &'a LoaderSettings,
}

impl<'a> OptionResolver<'a> {
    pub fn new(
        registry: &'a ValidatorRegistry,
        cache: &'a ValidatorCache,
        settings: &'a LoaderSettings,
    ) -> Self {
        Self {
            registry,
            cache,
            settings,
        }
    }

    /// Effective value of one option
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError` if a validator reference cannot be resolved.
    pub fn resolve(
        &self,
        name: &str,
        value: &OptionValue,
    ) -> Result<ResolvedValue, ValidatorError> {
        if name == VALIDATOR_KEY
            && let Some(reference) = value
                .as_str()
                .and_then(|s| self.settings.strip_import_marker(s))
        {
            return self.resolve_validator(reference).map(ResolvedValue::Validator);
        }

        Ok(ResolvedValue::Value(value.clone()))
    }

    /// Resolve a validator reference with the import marker stripped
    pub fn resolve_validator(&self, reference: &str) -> Result<Validator, ValidatorError> {
        let reference = ValidatorRef::parse(reference, &self.settings.default_validator_module)?;
        self.cache.get_or_resolve(&reference, self.registry)
    }

    /// Resolve every option, keeping order
    pub fn resolve_all(&self, options: &Options) -> Result<ResolvedOptions, ValidatorError> {
        options
            .iter()
            .map(|(name, value)| {
                self.resolve(name, value)
                    .map(|resolved| (name.clone(), resolved))
            })
            .collect()
    }
}
