//! Configuration loading pipeline
//!
//! raw entry -> [`build_entry_decl`] -> [`dispatch`] -> engine, driven by
//! [`ConfigLoader`].

pub mod config_loader;
pub mod declaration;
pub mod dispatcher;
pub mod resolver;

pub use config_loader::{ConfigLoader, LoadReport, load_config_patterns};
pub use declaration::{EntryDecl, build_entry_decl, classify_pattern};
pub use dispatcher::{dispatch, effective_options};
pub use resolver::OptionResolver;
