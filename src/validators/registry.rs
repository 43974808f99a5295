#![forbid(unsafe_code)]

//! Validator registry
//!
//! The registry maps `module.function` names to validator callables. It is
//! populated explicitly; nothing is discovered at runtime.

use crate::error::ValidatorError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A candidate match handed to a validator
///
/// `start..end` is a byte range into `input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub input: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Candidate<'a> {
    pub fn new(input: &'a str, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Candidate spanning the whole input
    pub fn whole(input: &'a str) -> Self {
        Self::new(input, 0, input.len())
    }

    /// The matched text
    pub fn value(&self) -> &'a str {
        self.input.get(self.start..self.end).unwrap_or_default()
    }

    /// Character immediately before the match, if any
    pub fn char_before(&self) -> Option<char> {
        self.input.get(..self.start)?.chars().next_back()
    }

    /// Character immediately after the match, if any
    pub fn char_after(&self) -> Option<char> {
        self.input.get(self.end..)?.chars().next()
    }
}

type ValidatorFn = dyn Fn(&Candidate<'_>) -> bool + Send + Sync;

/// A named, shareable validator callable
///
/// Clones share the same callable. Equality is identity of that callable,
/// so two validators registered from the same function are still distinct.
#[derive(Clone)]
pub struct Validator {
    name: Arc<str>,
    func: Arc<ValidatorFn>,
}

impl Validator {
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Candidate<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Fully qualified name this validator was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the validator against a candidate
    pub fn call(&self, candidate: &Candidate<'_>) -> bool {
        (self.func)(candidate)
    }

    /// Returns true if both handles share the same callable
    pub fn same_as(&self, other: &Validator) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("func", &"<fn>")
            .finish()
    }
}

/// A parsed validator reference (`module.function` or bare `function`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatorRef {
    pub module: String,
    pub function: String,
}

impl ValidatorRef {
    /// Parse a reference with the import marker already stripped
    ///
    /// The last `.` separates module from function; without one the
    /// function is looked up in `default_module`.
    pub fn parse(reference: &str, default_module: &str) -> Result<Self, ValidatorError> {
        let (module, function) = match reference.rsplit_once('.') {
            Some((module, function)) => (module, function),
            None => (default_module, reference),
        };

        if module.is_empty() || function.is_empty() {
            return Err(ValidatorError::MalformedReference(reference.to_string()));
        }

        Ok(Self {
            module: module.to_string(),
            function: function.to_string(),
        })
    }

    /// `module.function`, the cache key
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.function)
    }
}

impl fmt::Display for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.function)
    }
}

/// Namespace of validator functions, grouped by module
#[derive(Debug, Default, Clone)]
pub struct ValidatorRegistry {
    modules: HashMap<String, HashMap<String, Validator>>,
}

impl ValidatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `validators` module
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtin::register_builtins(&mut registry);
        registry
    }

    /// Register a validator function under `module.function`
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::DuplicateFunction` if the name is taken.
    pub fn register<F>(
        &mut self,
        module: &str,
        function: &str,
        func: F,
    ) -> Result<(), ValidatorError>
    where
        F: Fn(&Candidate<'_>) -> bool + Send + Sync + 'static,
    {
        let qualified = format!("{}.{}", module, function);
        let functions = self.modules.entry(module.to_string()).or_default();
        if functions.contains_key(function) {
            return Err(ValidatorError::DuplicateFunction(qualified));
        }
        functions.insert(function.to_string(), Validator::new(qualified, func));
        Ok(())
    }

    /// Look up a validator by reference
    ///
    /// # Errors
    ///
    /// Returns `ModuleNotFound` or `FunctionNotFound`.
    pub fn lookup(&self, reference: &ValidatorRef) -> Result<Validator, ValidatorError> {
        let functions =
            self.modules
                .get(&reference.module)
                .ok_or_else(|| ValidatorError::ModuleNotFound {
                    module: reference.module.clone(),
                    reference: reference.qualified_name(),
                })?;

        functions
            .get(&reference.function)
            .cloned()
            .ok_or_else(|| ValidatorError::FunctionNotFound {
                module: reference.module.clone(),
                function: reference.function.clone(),
            })
    }

    /// Returns true if a module with this name has registered functions
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Number of registered functions across all modules
    pub fn len(&self) -> usize {
        self.modules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
