//! # Migration Builder Schema
//!
//! The in-memory schema model rendered by the migration generator.
//!
//! ## Core Concepts
//!
//! - **Column**: a validated column definition; attribute legality is a
//!   function of its type
//! - **ForeignKey**: a reference from a column of the table to a column of
//!   another table
//! - **Table**: a name, special column flags, and ordered columns and
//!   foreign keys; a foreign key may only be attached once its source column
//!   exists
//!
//! Validation fires at construction, on every setter, and at attachment.
//! Nothing is deferred to render time.
//!

// Module declarations
pub mod collection;
pub mod column;
pub mod foreign_key;
pub mod serialization;
pub mod table;
pub mod validation;

// Re-export commonly used types at crate root
pub use collection::{Collection, Columns, ForeignKeys};
pub use column::{Column, ColumnDefinition, ColumnOptions};
pub use foreign_key::{ForeignKey, ForeignKeyDefinition, ForeignKeyOptions};
pub use serialization::{load_table, load_table_from_str, save_table, table_to_string};
pub use table::{Table, TableDefinition, TableOptions};
pub use validation::validate_name;

// Re-export core types that are commonly used with the schema
pub use mbuilder_core::{BuilderError, BuilderResult, ColumnType, DefaultValue, OnDelete};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        BuilderError, BuilderResult, Column, ColumnOptions, ColumnType, DefaultValue, ForeignKey,
        ForeignKeyOptions, OnDelete, Table, TableOptions,
    };
}
