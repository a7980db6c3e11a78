//! Error types for Migration Builder
//!
//! This module provides unified error handling for the schema model, the
//! migration generator, and the migration writer. Every validation failure
//! is raised at the offending call and names the rule and field involved.

use crate::types::ColumnType;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Migration Builder
#[derive(Debug, Error)]
pub enum BuilderError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A table, column, or foreign-key name failed the identifier grammar
    #[error("Invalid identifier for {field}: '{value}'")]
    InvalidIdentifier { field: String, value: String },

    /// Column type outside the supported set
    #[error("Column type is not supported: '{0}'")]
    UnsupportedType(String),

    /// Attribute set on a column type that does not support it
    #[error("{attribute} is not supported on column type {column_type}")]
    AttributeNotApplicable {
        attribute: String,
        column_type: ColumnType,
    },

    /// Mutually exclusive attribute combination
    #[error("Conflicting state on column '{column}': {message}")]
    ConflictingState { column: String, message: String },

    /// Enum-constrained field given an out-of-range value
    #[error("Unsupported value for {field}: '{value}'")]
    UnsupportedValue { field: String, value: String },

    /// Foreign key added for a column absent from the table
    #[error("Cannot add a foreign key on a column that does not exist: '{column}' (table '{table}')")]
    DanglingReference { table: String, column: String },

    /// Column name already present on the table
    #[error("Duplicate column name: '{column}' already exists in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// Migration file already exists
    #[error("Migration already exists: {0}")]
    OutputExists(PathBuf),

    // ========================================================================
    // Serialization / Configuration Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (a model reached a state its setters never produce)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BuilderError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(field: impl Into<String>, value: impl Into<String>) -> Self {
        BuilderError::InvalidIdentifier {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an attribute-not-applicable error
    pub fn not_applicable(attribute: impl Into<String>, column_type: ColumnType) -> Self {
        BuilderError::AttributeNotApplicable {
            attribute: attribute.into(),
            column_type,
        }
    }

    /// Create a conflicting state error
    pub fn conflict(column: impl Into<String>, msg: impl Into<String>) -> Self {
        BuilderError::ConflictingState {
            column: column.into(),
            message: msg.into(),
        }
    }

    /// Create an unsupported value error
    pub fn unsupported_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        BuilderError::UnsupportedValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        BuilderError::Internal(msg.into())
    }

    /// Check if this error is a caller-input validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BuilderError::InvalidIdentifier { .. }
                | BuilderError::UnsupportedType(_)
                | BuilderError::AttributeNotApplicable { .. }
                | BuilderError::ConflictingState { .. }
                | BuilderError::UnsupportedValue { .. }
                | BuilderError::DanglingReference { .. }
                | BuilderError::DuplicateColumn { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            BuilderError::Io(_)
                | BuilderError::FileRead { .. }
                | BuilderError::FileWrite { .. }
                | BuilderError::DirectoryCreate { .. }
                | BuilderError::OutputExists(_)
        )
    }
}

/// Result type alias using BuilderError
pub type BuilderResult<T> = Result<T, BuilderError>;

// ============================================================================
// Tests
// ============================================================================
