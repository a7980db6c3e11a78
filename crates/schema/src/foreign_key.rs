//! Foreign key definitions
//!
//! A `ForeignKey` names a source column on the owning table, the referenced
//! column, and the referenced table. It is checked against the owning table
//! only when attached (see [`Table::add_foreign_key`](crate::Table::add_foreign_key)).

use crate::validation::require_name;
use mbuilder_core::{BuilderError, BuilderResult, OnDelete};
use serde::{Deserialize, Serialize};

/// Optional foreign-key settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKeyOptions {
    pub on_delete: Option<OnDelete>,
}

impl ForeignKeyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the on-delete action
    pub fn on_delete(mut self, action: OnDelete) -> Self {
        self.on_delete = Some(action);
        self
    }
}

/// A single validated foreign-key definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ForeignKeyDefinition", into = "ForeignKeyDefinition")]
pub struct ForeignKey {
    column: String,
    references: String,
    on: String,
    on_delete: Option<OnDelete>,
}

impl ForeignKey {
    /// Create a foreign key from `column` to `on`.`references`
    pub fn new(
        column: impl Into<String>,
        references: impl Into<String>,
        on: impl Into<String>,
        options: ForeignKeyOptions,
    ) -> BuilderResult<Self> {
        let column = column.into();
        let references = references.into();
        let on = on.into();

        require_name("foreign key column", &column)?;
        require_name("references column", &references)?;
        require_name("referenced table", &on)?;

        Ok(Self {
            column,
            references,
            on,
            on_delete: options.on_delete,
        })
    }

    /// Source column on the owning table
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Referenced column
    pub fn references(&self) -> &str {
        &self.references
    }

    /// Referenced table
    pub fn on(&self) -> &str {
        &self.on
    }

    pub fn on_delete(&self) -> Option<OnDelete> {
        self.on_delete
    }

    /// Set or clear the on-delete action
    pub fn set_on_delete(&mut self, action: Option<OnDelete>) -> &mut Self {
        self.on_delete = action;
        self
    }

    /// Set the on-delete action from its keyword (`restrict`, `cascade`, `set null`)
    pub fn set_on_delete_str(&mut self, action: Option<&str>) -> BuilderResult<&mut Self> {
        let action = action.map(str::parse::<OnDelete>).transpose()?;
        Ok(self.set_on_delete(action))
    }
}

// ============================================================================
// ForeignKeyDefinition (serialized form)
// ============================================================================

/// Serialized form of a foreign key; unknown keys are rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForeignKeyDefinition {
    pub column: String,
    pub references: String,
    pub on: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDelete>,
}

impl TryFrom<ForeignKeyDefinition> for ForeignKey {
    type Error = BuilderError;

    fn try_from(def: ForeignKeyDefinition) -> BuilderResult<Self> {
        let options = ForeignKeyOptions {
            on_delete: def.on_delete,
        };
        ForeignKey::new(def.column, def.references, def.on, options)
    }
}

impl From<ForeignKey> for ForeignKeyDefinition {
    fn from(fk: ForeignKey) -> Self {
        ForeignKeyDefinition {
            column: fk.column,
            references: fk.references,
            on: fk.on,
            on_delete: fk.on_delete,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_foreign_key() {
        let fk = ForeignKey::new(
            "user_id",
            "id",
            "users",
            ForeignKeyOptions::new().on_delete(OnDelete::Cascade),
        )
        .unwrap();

        assert_eq!(fk.column(), "user_id");
        assert_eq!(fk.references(), "id");
        assert_eq!(fk.on(), "users");
        assert_eq!(fk.on_delete(), Some(OnDelete::Cascade));
    }

    #[test]
    fn test_invalid_identifiers() {
        let err = ForeignKey::new("user id", "id", "users", ForeignKeyOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidIdentifier { ref field, .. } if field == "foreign key column"
        ));

        let err = ForeignKey::new("user_id", "-id", "users", ForeignKeyOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidIdentifier { ref field, .. } if field == "references column"
        ));

        let err = ForeignKey::new("user_id", "id", "2users", ForeignKeyOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::InvalidIdentifier { ref field, .. } if field == "referenced table"
        ));
    }

    #[test]
    fn test_set_on_delete_str() {
        let mut fk = ForeignKey::new("user_id", "id", "users", ForeignKeyOptions::new()).unwrap();
        fk.set_on_delete_str(Some("set null")).unwrap();
        assert_eq!(fk.on_delete(), Some(OnDelete::SetNull));

        let err = fk.set_on_delete_str(Some("no action")).unwrap_err();
        assert!(matches!(err, BuilderError::UnsupportedValue { .. }));
        assert_eq!(fk.on_delete(), Some(OnDelete::SetNull));

        fk.set_on_delete_str(None).unwrap();
        assert_eq!(fk.on_delete(), None);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"column": "user_id", "references": "id", "on": "users", "onDelete": "cascade"}"#;
        let fk: ForeignKey = serde_json::from_str(json).unwrap();
        assert_eq!(fk.on_delete(), Some(OnDelete::Cascade));

        let json = r#"{"column": "user_id", "references": "id", "on": "users", "onDelete": "explode"}"#;
        assert!(serde_json::from_str::<ForeignKey>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let json = r#"{"column": "user_id", "references": "id", "on": "users", "on_delete": "cascade"}"#;
        let err = serde_json::from_str::<ForeignKey>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field `on_delete`"));
    }
}
