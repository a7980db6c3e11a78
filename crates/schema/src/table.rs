//! Table definitions
//!
//! A `Table` aggregates a name, the table-wide special column flags
//! (timestamps, soft delete), and its ordered columns and foreign keys.
//! Cross-entity invariants are enforced when an element is attached:
//!
//! - a foreign key's source column must already exist on the table
//! - column names are unique within the table

use crate::collection::{Columns, ForeignKeys};
use crate::column::Column;
use crate::foreign_key::ForeignKey;
use crate::validation::require_name;
use mbuilder_core::{BuilderError, BuilderResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// TableOptions
// ============================================================================

/// Table-wide flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Emit the `created_at`/`updated_at` timestamp columns
    pub timestamps: bool,

    /// Emit the soft-delete marker column
    pub soft_delete: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            timestamps: true,
            soft_delete: false,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable timestamps
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Enable soft delete
    pub fn soft_delete(mut self) -> Self {
        self.soft_delete = true;
        self
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table model: the unit rendered into one migration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableDefinition", into = "TableDefinition")]
pub struct Table {
    name: String,
    timestamps: bool,
    soft_delete: bool,
    columns: Columns,
    foreign_keys: ForeignKeys,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>, options: TableOptions) -> BuilderResult<Self> {
        let name = name.into();
        require_name("table name", &name)?;

        Ok(Self {
            name,
            timestamps: options.timestamps,
            soft_delete: options.soft_delete,
            columns: Columns::new(),
            foreign_keys: ForeignKeys::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_timestamps(&self) -> bool {
        self.timestamps
    }

    pub fn has_soft_delete(&self) -> bool {
        self.soft_delete
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn foreign_keys(&self) -> &ForeignKeys {
        &self.foreign_keys
    }

    /// Check whether a column with exactly this name is attached
    pub fn column_exists(&self, name: &str) -> bool {
        self.columns.find(name).is_some()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) -> BuilderResult<&mut Self> {
        let name = name.into();
        require_name("table name", &name)?;
        self.name = name;
        Ok(self)
    }

    pub fn set_timestamps(&mut self, timestamps: bool) -> &mut Self {
        self.timestamps = timestamps;
        self
    }

    pub fn set_soft_delete(&mut self, soft_delete: bool) -> &mut Self {
        self.soft_delete = soft_delete;
        self
    }

    /// Append a column; names must be unique within the table
    pub fn add_column(&mut self, column: Column) -> BuilderResult<&mut Self> {
        if self.column_exists(column.name()) {
            return Err(BuilderError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name().to_string(),
            });
        }

        tracing::debug!(
            table = %self.name,
            column = column.name(),
            column_type = %column.column_type(),
            "column attached",
        );
        self.columns.push(column);
        Ok(self)
    }

    /// Append a foreign key; its source column must already be attached
    pub fn add_foreign_key(&mut self, foreign_key: ForeignKey) -> BuilderResult<&mut Self> {
        if !self.column_exists(foreign_key.column()) {
            return Err(BuilderError::DanglingReference {
                table: self.name.clone(),
                column: foreign_key.column().to_string(),
            });
        }

        tracing::debug!(
            table = %self.name,
            column = foreign_key.column(),
            references = %format!("{}.{}", foreign_key.on(), foreign_key.references()),
            "foreign key attached",
        );
        self.foreign_keys.push(foreign_key);
        Ok(self)
    }

    /// Builder form of [`add_column`](Table::add_column)
    pub fn with_column(mut self, column: Column) -> BuilderResult<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    /// Builder form of [`add_foreign_key`](Table::add_foreign_key)
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> BuilderResult<Self> {
        self.add_foreign_key(foreign_key)?;
        Ok(self)
    }
}

// ============================================================================
// TableDefinition (serialized form)
// ============================================================================

/// Serialized form of a table.
///
/// Deserializing a [`Table`] replays every column and foreign key through
/// the attachment checks, in file order. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableDefinition {
    pub name: String,

    #[serde(default = "enabled")]
    pub timestamps: bool,

    #[serde(default)]
    pub soft_delete: bool,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
}

fn enabled() -> bool {
    true
}

impl TryFrom<TableDefinition> for Table {
    type Error = BuilderError;

    fn try_from(def: TableDefinition) -> BuilderResult<Self> {
        let options = TableOptions {
            timestamps: def.timestamps,
            soft_delete: def.soft_delete,
        };
        let mut table = Table::new(def.name, options)?;
        for column in def.columns {
            table.add_column(column)?;
        }
        for foreign_key in def.foreign_keys {
            table.add_foreign_key(foreign_key)?;
        }
        Ok(table)
    }
}

impl From<Table> for TableDefinition {
    fn from(table: Table) -> Self {
        TableDefinition {
            name: table.name,
            timestamps: table.timestamps,
            soft_delete: table.soft_delete,
            columns: table.columns.as_slice().to_vec(),
            foreign_keys: table.foreign_keys.as_slice().to_vec(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnOptions;
    use crate::foreign_key::ForeignKeyOptions;
    use mbuilder_core::ColumnType;

    fn id_column() -> Column {
        Column::new("id", ColumnType::Integer, ColumnOptions::new().auto_increment()).unwrap()
    }

    fn user_fk() -> ForeignKey {
        ForeignKey::new("user_id", "id", "users", ForeignKeyOptions::new()).unwrap()
    }

    #[test]
    fn test_new_table_defaults() {
        let table = Table::new("posts", TableOptions::default()).unwrap();
        assert_eq!(table.name(), "posts");
        assert!(table.has_timestamps());
        assert!(!table.has_soft_delete());
        assert!(table.columns().is_empty());
        assert!(table.foreign_keys().is_empty());
    }

    #[test]
    fn test_invalid_table_name() {
        let err = Table::new("blog posts", TableOptions::default()).unwrap_err();
        assert!(matches!(err, BuilderError::InvalidIdentifier { .. }));

        assert!(Table::new("\"blog posts\"", TableOptions::default()).is_ok());
    }

    #[test]
    fn test_add_column_and_exists() {
        let mut table = Table::new("posts", TableOptions::default()).unwrap();
        assert!(!table.column_exists("id"));

        table.add_column(id_column()).unwrap();
        assert!(table.column_exists("id"));
        assert!(!table.column_exists("ID"));
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = Table::new("posts", TableOptions::default()).unwrap();
        table.add_column(id_column()).unwrap();

        let err = table.add_column(id_column()).unwrap_err();
        assert!(matches!(err, BuilderError::DuplicateColumn { ref column, .. } if column == "id"));
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_foreign_key_requires_existing_column() {
        let mut table = Table::new("posts", TableOptions::default()).unwrap();

        let err = table.add_foreign_key(user_fk()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::DanglingReference { ref column, .. } if column == "user_id"
        ));
        assert!(table.foreign_keys().is_empty());

        table
            .add_column(Column::new("user_id", ColumnType::Integer, ColumnOptions::new()).unwrap())
            .unwrap();
        table.add_foreign_key(user_fk()).unwrap();
        assert_eq!(table.foreign_keys().len(), 1);
    }

    #[test]
    fn test_builder_chain() {
        let table = Table::new("accounts", TableOptions::new().without_timestamps().soft_delete())
            .unwrap()
            .with_column(id_column())
            .unwrap();

        assert!(!table.has_timestamps());
        assert!(table.has_soft_delete());
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_flag_setters() {
        let mut table = Table::new("posts", TableOptions::default()).unwrap();
        table.set_timestamps(false).set_soft_delete(true);
        assert!(!table.has_timestamps());
        assert!(table.has_soft_delete());

        assert!(table.set_name("bad name").is_err());
        assert_eq!(table.name(), "posts");
    }

    #[test]
    fn test_deserialize_checks_foreign_keys() {
        let json = r#"{
            "name": "posts",
            "columns": [{"name": "title", "type": "string", "length": 120}],
            "foreignKeys": [{"column": "user_id", "references": "id", "on": "users"}]
        }"#;
        let err = serde_json::from_str::<Table>(json).unwrap_err();
        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn test_deserialize_flags() {
        let table: Table = serde_json::from_str(r#"{"name": "posts"}"#).unwrap();
        assert!(table.has_timestamps());
        assert!(!table.has_soft_delete());

        let table: Table =
            serde_json::from_str(r#"{"name": "posts", "timestamps": false, "softDelete": true}"#)
                .unwrap();
        assert!(!table.has_timestamps());
        assert!(table.has_soft_delete());
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let err = serde_json::from_str::<Table>(r#"{"name": "posts", "softDeletes": true}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown field `softDeletes`"));
    }

    #[test]
    fn test_serde_round_trip() {
        let table = Table::new("posts", TableOptions::new().soft_delete())
            .unwrap()
            .with_column(id_column())
            .unwrap()
            .with_column(Column::new("user_id", ColumnType::Integer, ColumnOptions::new()).unwrap())
            .unwrap()
            .with_foreign_key(user_fk())
            .unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let loaded: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, table);
    }
}
