//! Configuration model: pattern entries, option layers and loader settings

pub mod entry;
pub mod options_table;
pub mod settings;

pub use entry::{PatternConfig, RawEntry};
pub use options_table::{OptionsTable, merge_layers};
pub use settings::{LegacyPatternPolicy, LoaderSettings};
