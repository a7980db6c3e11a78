//! # Migration Builder CLI
//!
//! Command-line interface for Migration Builder.
//!
//! ## Commands
//!
//! - `example` - Write the `Account` demonstration migration
//! - `generate` - Write a migration from a JSON table definition
//! - `render` - Print the statements of a table definition
//! - `validate` - Check a table definition
//!

pub mod commands;
pub mod config;

pub use commands::{Cli, Command, example_table, run};
pub use config::{BuilderConfig, CONFIG_FILE, DEFAULT_MIGRATIONS_PATH};

// Re-export dependencies for use in main.rs
pub use mbuilder_codegen;
pub use mbuilder_core;
pub use mbuilder_schema;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");
