#![forbid(unsafe_code)]

//! Dispatch of canonical declarations to engine registration calls

use crate::config::{OptionsTable, merge_layers};
use crate::engine::PatternEngine;
use crate::error::LoadError;
use crate::loader::{EntryDecl, OptionResolver};
use crate::types::{Options, PatternType};

/// Effective options for one pattern type of a declaration
///
/// The declaration's per-pattern context (defaults, entry keys and
/// `value`, with every pattern-type key removed) is overridden key by key
/// by the table's layer for `pattern_type`. The declaration is not
/// modified.
pub fn effective_options(
    decl: &EntryDecl,
    table: &OptionsTable,
    pattern_type: PatternType,
) -> Options {
    merge_layers(
        [Some(decl.options()), table.type_options(pattern_type)]
            .into_iter()
            .flatten(),
    )
}

/// Register every pattern list of `decl` with `engine`
///
/// Returns the number of registration calls made; an entry without
/// patterns registers nothing.
///
/// # Errors
///
/// Validator resolution failures and engine rejections, unchanged.
pub fn dispatch<E: PatternEngine + ?Sized>(
    decl: &EntryDecl,
    table: &OptionsTable,
    resolver: &OptionResolver<'_>,
    engine: &mut E,
) -> Result<usize, LoadError> {
    let mut registered = 0;

    for pattern_type in PatternType::ALL {
        let Some(patterns) = decl.patterns(pattern_type) else {
            continue;
        };

        let options = resolver.resolve_all(&effective_options(decl, table, pattern_type))?;

        tracing::debug!(
            value = decl.semantic_value(),
            pattern_type = %pattern_type,
            patterns = patterns.len(),
            "registering patterns"
        );

        engine
            .register(pattern_type, patterns, &options)
            .map_err(|source| LoadError::Engine {
                value: decl.semantic_value().to_string(),
                pattern_type,
                source,
            })?;
        registered += 1;
    }

    Ok(registered)
}
