#![forbid(unsafe_code)]

//! Canonical entry declarations
//!
//! Every raw entry shape (bare pattern, structured table, legacy `pattern`
//! field) is normalized into one [`EntryDecl`]: flat options plus typed,
//! non-empty pattern lists.

use crate::config::{LegacyPatternPolicy, LoaderSettings, OptionsTable, RawEntry};
use crate::error::ConfigError;
use crate::types::{LEGACY_PATTERN_KEY, OptionValue, Options, PatternType, VALUE_KEY};
use std::collections::BTreeMap;

/// A normalized configuration entry, ready for dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDecl {
    semantic_value: String,
    options: Options,
    patterns: BTreeMap<PatternType, Vec<String>>,
}

impl EntryDecl {
    /// The configuration key this entry was declared under
    pub fn semantic_value(&self) -> &str {
        &self.semantic_value
    }

    /// The tag matches should carry (`value` option)
    pub fn value(&self) -> Option<&OptionValue> {
        self.options.get(VALUE_KEY)
    }

    /// Flat options: default layer, then `value` and entry-local keys
    ///
    /// Pattern-type keys are never present here, so this is also the
    /// context shared by every registration call of the entry.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Patterns of one type; `None` when the entry declares none
    pub fn patterns(&self, pattern_type: PatternType) -> Option<&[String]> {
        self.patterns.get(&pattern_type).map(Vec::as_slice)
    }

    /// Pattern types present, in dispatch order
    pub fn pattern_types(&self) -> impl Iterator<Item = PatternType> + '_ {
        self.patterns.keys().copied()
    }

    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    // Empty lists are dropped so present lists are always non-empty
    fn set_patterns(&mut self, pattern_type: PatternType, patterns: Vec<String>) {
        if patterns.is_empty() {
            self.patterns.remove(&pattern_type);
        } else {
            self.patterns.insert(pattern_type, patterns);
        }
    }
}

/// Split a shorthand pattern into its type and body
pub fn classify_pattern<'p>(pattern: &'p str, settings: &LoaderSettings) -> (PatternType, &'p str) {
    match settings.strip_regex_marker(pattern) {
        Some(body) => (PatternType::Regex, body),
        None => (PatternType::String, pattern),
    }
}

/// Normalize one raw entry into a canonical declaration
///
/// # Errors
///
/// Returns `ConfigError` when a pattern key holds something other than
/// strings, when entry lists are nested, or when the legacy `pattern` field
/// clashes with a pattern list under [`LegacyPatternPolicy::Reject`].
pub fn build_entry_decl(
    entry: &RawEntry,
    table: &OptionsTable,
    value: &str,
    settings: &LoaderSettings,
) -> Result<EntryDecl, ConfigError> {
    let mut options = table.defaults().cloned().unwrap_or_default();
    options.insert(VALUE_KEY.to_string(), OptionValue::from(value));

    match entry {
        RawEntry::Structured(local) => {
            for (name, option) in local {
                options.insert(name.clone(), option.clone());
            }
        }
        RawEntry::ListOf(_) => {
            return Err(ConfigError::InvalidValue {
                field: value.to_string(),
                message: "entry lists cannot be nested".to_string(),
            });
        }
        RawEntry::Literal(_) => {}
    }

    let mut decl = EntryDecl {
        semantic_value: value.to_string(),
        ..EntryDecl::default()
    };

    for pattern_type in PatternType::ALL {
        if let Some(raw) = options.shift_remove(pattern_type.as_str()) {
            decl.set_patterns(pattern_type, pattern_list(value, pattern_type, raw)?);
        }
    }

    if let RawEntry::Literal(pattern) = entry {
        let (pattern_type, body) = classify_pattern(pattern, settings);
        decl.set_patterns(pattern_type, vec![body.to_string()]);
    }

    if let Some(legacy) = options.shift_remove(LEGACY_PATTERN_KEY) {
        let legacy = match legacy {
            OptionValue::Str(s) => s,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: format!("{}.{}", value, LEGACY_PATTERN_KEY),
                    message: format!("expected a string, found {}", other.kind()),
                });
            }
        };

        let (pattern_type, body) = classify_pattern(&legacy, settings);
        if settings.legacy_pattern == LegacyPatternPolicy::Reject
            && decl.patterns(pattern_type).is_some()
        {
            return Err(ConfigError::ConflictingPattern {
                value: value.to_string(),
                pattern_type,
            });
        }
        decl.set_patterns(pattern_type, vec![body.to_string()]);
    }

    decl.options = options;
    Ok(decl)
}

/// Pattern key contents as a list; a single string counts as one pattern
fn pattern_list(
    value: &str,
    pattern_type: PatternType,
    raw: OptionValue,
) -> Result<Vec<String>, ConfigError> {
    let invalid = |found: &OptionValue| ConfigError::InvalidValue {
        field: format!("{}.{}", value, pattern_type),
        message: format!("expected a string or list of strings, found {}", found.kind()),
    };

    match raw {
        OptionValue::Str(pattern) => Ok(vec![pattern]),
        OptionValue::List(items) => items
            .into_iter()
            .map(|item| match item {
                OptionValue::Str(pattern) => Ok(pattern),
                other => Err(invalid(&other)),
            })
            .collect(),
        other => Err(invalid(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LoaderSettings {
        LoaderSettings::default()
    }

    fn build(entry: RawEntry) -> EntryDecl {
        build_entry_decl(&entry, &OptionsTable::new(), "episode", &settings()).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_string_is_literal() {
        let decl = build(RawEntry::from("foo"));
        assert_eq!(decl.patterns(PatternType::String), Some(&strings(&["foo"])[..]));
        assert_eq!(decl.patterns(PatternType::Regex), None);
        assert_eq!(decl.value(), Some(&OptionValue::from("episode")));
    }

    #[test]
    fn test_bare_string_with_regex_marker() {
        let decl = build(RawEntry::from("re:f.*o"));
        assert_eq!(decl.patterns(PatternType::Regex), Some(&strings(&["f.*o"])[..]));
        assert_eq!(decl.patterns(PatternType::String), None);
    }

    #[test]
    fn test_legacy_pattern_converges_with_modern_form() {
        let legacy = build(RawEntry::structured([("pattern", "re:x")]));
        let modern = build(RawEntry::Structured(
            [(
                "regex".to_string(),
                OptionValue::List(vec![OptionValue::from("x")]),
            )]
            .into_iter()
            .collect(),
        ));
        assert_eq!(legacy, modern);
        assert!(!legacy.options().contains_key("pattern"));
    }

    #[test]
    fn test_legacy_literal_pattern() {
        let decl = build(RawEntry::structured([("pattern", "HDTV")]));
        assert_eq!(decl.patterns(PatternType::String), Some(&strings(&["HDTV"])[..]));
    }

    #[test]
    fn test_structured_single_string_is_one_pattern() {
        let decl = build(RawEntry::structured([("regex", "e(\\d+)")]));
        assert_eq!(
            decl.patterns(PatternType::Regex),
            Some(&strings(&["e(\\d+)"])[..])
        );
    }

    #[test]
    fn test_structured_regex_list_keeps_marker_text() {
        // Lists under `regex` are already regexes; no marker stripping
        let decl = build(RawEntry::Structured(
            [(
                "regex".to_string(),
                OptionValue::List(vec![OptionValue::from("re:abc")]),
            )]
            .into_iter()
            .collect(),
        ));
        assert_eq!(decl.patterns(PatternType::Regex), Some(&strings(&["re:abc"])[..]));
    }

    #[test]
    fn test_pattern_keys_removed_from_options() {
        let decl = build(RawEntry::structured([
            ("string", "mkv"),
            ("regex", "av[i]"),
            ("formatter", "lower"),
        ]));
        assert!(!decl.options().contains_key("string"));
        assert!(!decl.options().contains_key("regex"));
        assert_eq!(decl.options()["formatter"].as_str(), Some("lower"));
        assert_eq!(
            decl.pattern_types().collect::<Vec<_>>(),
            [PatternType::Regex, PatternType::String]
        );
    }

    #[test]
    fn test_empty_list_dropped() {
        let decl = build(RawEntry::Structured(
            [("string".to_string(), OptionValue::List(vec![]))]
                .into_iter()
                .collect(),
        ));
        assert!(!decl.has_patterns());
        assert!(decl.value().is_some());
    }

    #[test]
    fn test_defaults_applied_and_overridden() {
        let mut defaults = Options::new();
        defaults.insert("ignore_case".to_string(), OptionValue::Bool(true));
        defaults.insert("private".to_string(), OptionValue::Bool(false));
        let table = OptionsTable::new().with_defaults(defaults);

        let entry = RawEntry::structured([
            ("string", OptionValue::from("x")),
            ("private", OptionValue::Bool(true)),
        ]);
        let decl = build_entry_decl(&entry, &table, "other", &settings()).unwrap();

        assert_eq!(decl.options()["ignore_case"], OptionValue::Bool(true));
        assert_eq!(decl.options()["private"], OptionValue::Bool(true));
        assert_eq!(decl.value(), Some(&OptionValue::from("other")));
    }

    #[test]
    fn test_type_layer_not_applied_to_declaration() {
        let mut regex_only = Options::new();
        regex_only.insert("private".to_string(), OptionValue::Bool(true));
        let table = OptionsTable::new().with_layer(PatternType::Regex, regex_only);

        let decl = build_entry_decl(&RawEntry::from("re:x"), &table, "v", &settings()).unwrap();
        assert!(!decl.options().contains_key("private"));
    }

    #[test]
    fn test_entry_value_overrides_semantic_value() {
        let entry = RawEntry::structured([("string", "DVD"), ("value", "DVD-Rip")]);
        let decl = build_entry_decl(&entry, &OptionsTable::new(), "source", &settings()).unwrap();
        assert_eq!(decl.semantic_value(), "source");
        assert_eq!(decl.value(), Some(&OptionValue::from("DVD-Rip")));
    }

    #[test]
    fn test_legacy_conflict_rejected_by_default() {
        let entry = RawEntry::structured([("regex", "a"), ("pattern", "re:b")]);
        let result = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings());
        assert!(matches!(
            result,
            Err(ConfigError::ConflictingPattern {
                pattern_type: PatternType::Regex,
                ..
            })
        ));
    }

    #[test]
    fn test_legacy_conflict_overwrite_policy() {
        let settings = LoaderSettings {
            legacy_pattern: LegacyPatternPolicy::Overwrite,
            ..LoaderSettings::default()
        };
        let entry = RawEntry::structured([("regex", "a"), ("pattern", "re:b")]);
        let decl = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings).unwrap();
        assert_eq!(decl.patterns(PatternType::Regex), Some(&strings(&["b"])[..]));
    }

    #[test]
    fn test_legacy_different_slot_is_not_a_conflict() {
        let entry = RawEntry::structured([("string", "a"), ("pattern", "re:b")]);
        let decl = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings()).unwrap();
        assert_eq!(decl.patterns(PatternType::String), Some(&strings(&["a"])[..]));
        assert_eq!(decl.patterns(PatternType::Regex), Some(&strings(&["b"])[..]));
    }

    #[test]
    fn test_legacy_pattern_must_be_string() {
        let entry = RawEntry::structured([("pattern", OptionValue::Int(3))]);
        let result = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid value for v.pattern")
        );
    }

    #[test]
    fn test_non_string_pattern_item_rejected() {
        let entry = RawEntry::Structured(
            [(
                "string".to_string(),
                OptionValue::List(vec![OptionValue::from("a"), OptionValue::Int(1)]),
            )]
            .into_iter()
            .collect(),
        );
        let result = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field, .. }) if field == "v.string"
        ));
    }

    #[test]
    fn test_nested_list_rejected() {
        let entry = RawEntry::ListOf(vec![RawEntry::from("a")]);
        let result = build_entry_decl(&entry, &OptionsTable::new(), "v", &settings());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_structured_without_patterns() {
        let decl = build(RawEntry::structured([("validator", "import:is_int")]));
        assert!(!decl.has_patterns());
        assert_eq!(decl.options()["validator"].as_str(), Some("import:is_int"));
    }

    #[test]
    fn test_custom_regex_marker() {
        let settings = LoaderSettings {
            regex_marker: "rx:".to_string(),
            ..LoaderSettings::default()
        };
        let decl =
            build_entry_decl(&RawEntry::from("rx:\\d+"), &OptionsTable::new(), "v", &settings)
                .unwrap();
        assert_eq!(decl.patterns(PatternType::Regex), Some(&strings(&["\\d+"])[..]));

        let literal =
            build_entry_decl(&RawEntry::from("re:x"), &OptionsTable::new(), "v", &settings)
                .unwrap();
        assert_eq!(literal.patterns(PatternType::String), Some(&strings(&["re:x"])[..]));
    }
}
