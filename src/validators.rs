#![forbid(unsafe_code)]

//! Validator functions and their namespace
//!
//! Configuration refers to validators by name (`import:seps_surround`,
//! `import:titles.is_title`). Names are looked up in a [`ValidatorRegistry`]
//! that modules populate at start-up, and resolved references are memoized
//! in a [`ValidatorCache`].

pub mod builtin;
pub mod cache;
pub mod registry;

pub use cache::ValidatorCache;
pub use registry::{Candidate, Validator, ValidatorRef, ValidatorRegistry};
