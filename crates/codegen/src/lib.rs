//! # Migration Builder Codegen
//!
//! Code generation engine for Migration Builder.
//!
//! This crate renders a validated table model into migration source code.
//!
//! ## Features
//!
//! - **Statement Rendering**: one pure renderer per statement kind (column,
//!   special column, foreign key)
//! - **Generator**: deterministic `Table` → `RenderedMigration` rendering
//! - **Migration**: a named migration bound to a table and target directory
//! - **Writer**: the `MigrationCreator` boundary and a stub-based
//!   filesystem implementation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod generator;
pub mod migration;
pub mod migrations;
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator::{Generator, RenderedMigration};
pub use migration::Migration;
pub use writer::{MigrationCreator, MigrationRequest, StubMigrationCreator};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Statement indentation used by the built-in stubs (inside `Schema::create`)
pub const DEFAULT_INDENT: usize = 12;

/// Configuration for the migration generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Spaces prepended to every rendered statement
    pub indent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the statement indentation
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
