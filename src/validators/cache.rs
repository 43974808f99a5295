#![forbid(unsafe_code)]

//! Memoization of resolved validator references
//!
//! Entries are keyed by fully qualified name and never evicted. The key space
//! is the set of distinct validator names used in configuration, so growth is
//! bounded by the configuration itself.

use crate::error::ValidatorError;
use crate::validators::{Validator, ValidatorRef, ValidatorRegistry};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static GLOBAL_CACHE: LazyLock<ValidatorCache> = LazyLock::new(ValidatorCache::new);

/// Cache of resolved validators
///
/// Resolve-or-insert happens under one lock, so concurrent loaders see a
/// single validator per name.
#[derive(Debug, Default)]
pub struct ValidatorCache {
    entries: Mutex<HashMap<String, Validator>>,
}

impl ValidatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, created empty on first use
    pub fn global() -> &'static ValidatorCache {
        &GLOBAL_CACHE
    }

    /// Return the cached validator for `reference`, resolving it through
    /// `registry` on first use
    ///
    /// # Errors
    ///
    /// Lookup failures from the registry. Failed lookups are not cached.
    pub fn get_or_resolve(
        &self,
        reference: &ValidatorRef,
        registry: &ValidatorRegistry,
    ) -> Result<Validator, ValidatorError> {
        let key = reference.qualified_name();
        let mut entries = self.lock();

        if let Some(validator) = entries.get(&key) {
            tracing::trace!(validator = %key, "validator cache hit");
            return Ok(validator.clone());
        }

        let validator = registry.lookup(reference)?;
        tracing::trace!(validator = %key, "validator cache miss, resolved from registry");
        entries.insert(key, validator.clone());
        Ok(validator)
    }

    /// Cached validator for a fully qualified name, if any
    pub fn get(&self, qualified_name: &str) -> Option<Validator> {
        self.lock().get(qualified_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Validator>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
