//! # Migration Builder Core
//!
//! Core types and error handling for Migration Builder.
//!
//! This crate provides the foundational building blocks used by the schema
//! model and the migration generator, including:
//!
//! - **Types**: Column types and their attribute rules, on-delete actions,
//!   default values
//! - **Errors**: Unified error handling with `BuilderError` and `BuilderResult`
//!

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BuilderError, BuilderResult};
pub use types::{ColumnType, DefaultValue, OnDelete};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
