//! # Migration
//!
//! A named migration bound to one table and a target directory. It renders
//! the table with a [`Generator`] and hands the blocks to a
//! [`MigrationCreator`].

use heck::ToSnakeCase;
use mbuilder_core::{BuilderError, BuilderResult};
use mbuilder_schema::Table;
use std::path::{Path, PathBuf};

use crate::generator::{Generator, RenderedMigration};
use crate::writer::{MigrationCreator, MigrationRequest};

/// One schema-creation (or alteration) operation for one table
#[derive(Debug, Clone)]
pub struct Migration<'a> {
    name: String,
    path: PathBuf,
    table: &'a Table,
    generator: Generator,
}

impl<'a> Migration<'a> {
    /// Create a migration; the name is trimmed and converted to snake_case
    pub fn new(
        name: impl AsRef<str>,
        path: impl Into<PathBuf>,
        table: &'a Table,
    ) -> BuilderResult<Self> {
        let name = name.as_ref().trim().to_snake_case();
        if name.is_empty() {
            return Err(BuilderError::invalid_identifier(
                "migration name",
                name,
            ));
        }

        Ok(Self {
            name,
            path: path.into(),
            table,
            generator: Generator::with_defaults(),
        })
    }

    /// Default name for a create migration: `create_<table>_table`
    pub fn default_name(table: &Table) -> String {
        format!("create_{}_table", table.name().to_snake_case())
    }

    /// Render with a specific generator
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &Table {
        self.table
    }

    /// Render all three statement groups
    pub fn render(&self) -> BuilderResult<RenderedMigration> {
        self.generator.render(self.table)
    }

    /// Indented column statements
    pub fn build_columns(&self) -> BuilderResult<String> {
        Ok(self.render()?.columns_block())
    }

    /// Indented special column statements
    pub fn build_special_columns(&self) -> BuilderResult<String> {
        Ok(self.render()?.special_columns_block())
    }

    /// Indented foreign key statements
    pub fn build_foreign_keys(&self) -> BuilderResult<String> {
        Ok(self.render()?.foreign_keys_block())
    }

    /// Render the table and write it through `creator`, returning the file path
    pub fn write_migration(
        &self,
        create: bool,
        creator: &dyn MigrationCreator,
    ) -> BuilderResult<PathBuf> {
        let rendered = self.render()?;
        let columns = rendered.columns_block();
        let special_columns = rendered.special_columns_block();
        let foreign_keys = rendered.foreign_keys_block();

        creator.create(&MigrationRequest {
            name: &self.name,
            path: &self.path,
            table: self.table.name(),
            columns: &columns,
            special_columns: &special_columns,
            foreign_keys: &foreign_keys,
            create,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
