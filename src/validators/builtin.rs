#![forbid(unsafe_code)]

//! Built-in validators, registered as the `validators` module

use crate::error::ValidatorError;
use crate::validators::{Candidate, ValidatorRegistry};

/// Module name the built-in validators live under
pub const BUILTIN_MODULE: &str = "validators";

/// Characters that separate tokens
pub const SEPS: &str = " [](){}+*|=-_~#/\\.,;:";

/// Returns true if `c` separates tokens
pub fn is_sep(c: char) -> bool {
    c.is_whitespace() || SEPS.contains(c)
}

/// Matched text parses as an integer
pub fn int_coercable(candidate: &Candidate<'_>) -> bool {
    candidate.value().trim().parse::<i64>().is_ok()
}

/// Matched text is a non-empty run of ASCII digits
pub fn is_digit(candidate: &Candidate<'_>) -> bool {
    let value = candidate.value();
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Match starts the input or follows a separator
pub fn seps_before(candidate: &Candidate<'_>) -> bool {
    candidate.char_before().is_none_or(is_sep)
}

/// Match ends the input or precedes a separator
pub fn seps_after(candidate: &Candidate<'_>) -> bool {
    candidate.char_after().is_none_or(is_sep)
}

/// Match is bounded by separators or input edges on both sides
pub fn seps_surround(candidate: &Candidate<'_>) -> bool {
    seps_before(candidate) && seps_after(candidate)
}

const BUILTINS: &[(&str, fn(&Candidate<'_>) -> bool)] = &[
    ("int_coercable", int_coercable),
    ("is_int", int_coercable),
    ("is_digit", is_digit),
    ("seps_before", seps_before),
    ("seps_after", seps_after),
    ("seps_surround", seps_surround),
];

/// Register the built-in module into `registry`
///
/// Names already present are left untouched.
pub fn register_builtins(registry: &mut ValidatorRegistry) {
    for (name, func) in BUILTINS {
        match registry.register(BUILTIN_MODULE, name, *func) {
            Ok(()) => {}
            Err(ValidatorError::DuplicateFunction(qualified)) => {
                tracing::trace!(validator = %qualified, "keeping existing validator");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to register built-in validator");
            }
        }
    }
}
