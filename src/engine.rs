//! Pattern engine interface and a recording implementation

pub mod recorder;
pub mod registration;

pub use recorder::{RecordingEngine, Registration};
pub use registration::{PatternEngine, ResolvedOptions, ResolvedValue};
