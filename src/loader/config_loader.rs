#![forbid(unsafe_code)]

//! Configuration loader
//!
//! The ConfigLoader walks a [`PatternConfig`] in order and, for every
//! (semantic value, entry) pair:
//! - builds the canonical entry declaration
//! - dispatches its pattern lists to the engine
//!
//! The first error aborts the load. Registrations already made are not
//! rolled back, so a failed load leaves the engine in a state callers must
//! treat as invalid.

use crate::config::{LoaderSettings, OptionsTable, PatternConfig};
use crate::engine::PatternEngine;
use crate::error::{ConfigError, LoadError};
use crate::loader::{OptionResolver, build_entry_decl, dispatch};
use crate::validators::{ValidatorCache, ValidatorRegistry};

/// Counts from a completed load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries processed
    pub entries: usize,
    /// Registration calls made on the engine
    pub registrations: usize,
}

/// Drives configuration entries into a pattern engine
///
/// Holds the validator registry and settings; resolved validators are
/// memoized in the cache it borrows (the process-wide one by default).
#[derive(Debug)]
pub struct ConfigLoader<'c> {
    registry: ValidatorRegistry,
    settings: LoaderSettings,
    cache: &'c ValidatorCache,
}

impl ConfigLoader<'static> {
    /// Loader with built-in validators, default settings and the global cache
    pub fn new() -> Self {
        Self {
            registry: ValidatorRegistry::with_builtins(),
            settings: LoaderSettings::default(),
            cache: ValidatorCache::global(),
        }
    }
}

impl Default for ConfigLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> ConfigLoader<'c> {
    /// Replace the validator registry
    pub fn with_registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings fail validation.
    pub fn with_settings(mut self, settings: LoaderSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Memoize validators in `cache` instead
    pub fn with_cache<'n>(self, cache: &'n ValidatorCache) -> ConfigLoader<'n> {
        ConfigLoader {
            registry: self.registry,
            settings: self.settings,
            cache,
        }
    }

    /// Registry for modules to add their validators to
    pub fn registry_mut(&mut self) -> &mut ValidatorRegistry {
        &mut self.registry
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ValidatorCache {
        self.cache
    }

    /// Resolver bound to this loader's registry, cache and settings
    pub fn resolver(&self) -> OptionResolver<'_> {
        OptionResolver::new(&self.registry, self.cache, &self.settings)
    }

    /// Register every pattern in `config` with `engine`
    ///
    /// # Errors
    ///
    /// Returns the first `LoadError`; entries after it are not processed.
    pub fn load<E: PatternEngine + ?Sized>(
        &self,
        config: &PatternConfig,
        options: Option<&OptionsTable>,
        engine: &mut E,
    ) -> Result<LoadReport, LoadError> {
        let empty = OptionsTable::new();
        let table = options.unwrap_or(&empty);
        let resolver = self.resolver();
        let mut report = LoadReport::default();

        for (value, raw) in config.iter() {
            for entry in raw.as_slice() {
                let decl = build_entry_decl(entry, table, value, &self.settings)?;
                let registered = dispatch(&decl, table, &resolver, engine)?;
                if registered == 0 {
                    tracing::debug!(value, "entry declares no patterns, nothing registered");
                }
                report.entries += 1;
                report.registrations += registered;
            }
        }

        tracing::info!(
            entries = report.entries,
            registrations = report.registrations,
            "pattern configuration loaded"
        );

        Ok(report)
    }
}

/// Load `config` into `engine` with a default [`ConfigLoader`]
pub fn load_config_patterns<E: PatternEngine + ?Sized>(
    engine: &mut E,
    config: &PatternConfig,
    options: Option<&OptionsTable>,
) -> Result<LoadReport, LoadError> {
    ConfigLoader::new().load(config, options, engine)
}
