//! # Migration Generator
//!
//! The `Generator` turns a validated [`Table`] into a [`RenderedMigration`]:
//! three independently embeddable blocks of statements.
//!
//! ## Pipeline
//!
//! ```text
//! Table + GeneratorConfig
//!         │
//!         ├──► column statements          (insertion order)
//!         ├──► special column statements  (soft delete, timestamps)
//!         ├──► foreign key statements     (insertion order)
//!         │
//!         ▼
//!   RenderedMigration { columns, special_columns, foreign_keys }
//! ```
//!
//! Rendering is pure: no I/O, no validation. The table is trusted to have
//! been built through the validating constructors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mbuilder_codegen::Generator;
//!
//! let rendered = Generator::with_defaults().render(&table)?;
//! println!("{}", rendered);
//! ```

use mbuilder_core::BuilderResult;
use mbuilder_schema::Table;

use crate::GeneratorConfig;
use crate::migrations::{
    column_statement, foreign_key_statement, indent_lines, special_column_statements,
};

// ============================================================================
// RenderedMigration
// ============================================================================

/// The three statement groups rendered from one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMigration {
    /// Column statements, unindented
    pub columns: Vec<String>,

    /// Special column statements, unindented
    pub special_columns: Vec<String>,

    /// Foreign key statements, unindented
    pub foreign_keys: Vec<String>,

    /// Spaces prepended to every statement in the blocks
    pub indent: usize,
}

impl RenderedMigration {
    /// Indented column block
    pub fn columns_block(&self) -> String {
        indent_lines(&self.columns, self.indent)
    }

    /// Indented special column block
    pub fn special_columns_block(&self) -> String {
        indent_lines(&self.special_columns, self.indent)
    }

    /// Indented foreign key block
    pub fn foreign_keys_block(&self) -> String {
        indent_lines(&self.foreign_keys, self.indent)
    }

    /// All statements in emission order
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .chain(&self.special_columns)
            .chain(&self.foreign_keys)
            .map(String::as_str)
    }

    /// Total number of statements
    pub fn statement_count(&self) -> usize {
        self.columns.len() + self.special_columns.len() + self.foreign_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statement_count() == 0
    }
}

impl std::fmt::Display for RenderedMigration {
    /// All three groups concatenated, one indented statement per line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.statements().map(str::to_string).collect();
        write!(f, "{}", indent_lines(&lines, self.indent))
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Renders tables into migration statements.
///
/// The `Generator` is stateless aside from its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Render a table into its three statement groups.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::Internal` if a column is in a state its
    /// setters cannot produce. This is a programming error, never a
    /// caller-input problem.
    pub fn render(&self, table: &Table) -> BuilderResult<RenderedMigration> {
        let columns = table
            .columns()
            .iter()
            .map(column_statement)
            .collect::<BuilderResult<Vec<_>>>()?;

        let special_columns =
            special_column_statements(table.has_soft_delete(), table.has_timestamps());

        let foreign_keys = table
            .foreign_keys()
            .iter()
            .map(foreign_key_statement)
            .collect::<Vec<_>>();

        let rendered = RenderedMigration {
            columns,
            special_columns,
            foreign_keys,
            indent: self.config.indent,
        };

        if rendered.is_empty() {
            tracing::warn!(table = table.name(), "table rendered no statements");
        }

        tracing::debug!(
            table = table.name(),
            columns = rendered.columns.len(),
            special_columns = rendered.special_columns.len(),
            foreign_keys = rendered.foreign_keys.len(),
            "table rendered",
        );

        Ok(rendered)
    }
}

// ============================================================================
// Tests
// ============================================================================
