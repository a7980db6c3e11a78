//! Loading and saving table definitions
//!
//! Table definitions are stored as JSON. Loading goes through the same
//! validating constructors as building a table in code, so a loaded table
//! satisfies every column, foreign-key, and attachment rule.

use crate::Table;
use mbuilder_core::{BuilderError, BuilderResult};
use std::path::Path;

// ============================================================================
// Load Functions
// ============================================================================

/// Load a table definition from a file
///
/// # Example
///
/// ```rust,ignore
/// use mbuilder_schema::load_table;
///
/// let table = load_table("tables/posts.json")?;
/// println!("Loaded table: {}", table.name());
/// ```
pub fn load_table(path: impl AsRef<Path>) -> BuilderResult<Table> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| BuilderError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_table_from_str(&json).map_err(|e| match e {
        BuilderError::Json(je) => BuilderError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid table definition: {}", je),
        },
        other => other,
    })
}

/// Load a table definition from a JSON string
pub fn load_table_from_str(json: &str) -> BuilderResult<Table> {
    let table: Table = serde_json::from_str(json)?;
    Ok(table)
}

// ============================================================================
// Save Functions
// ============================================================================

/// Serialize a table definition to pretty-printed JSON
pub fn table_to_string(table: &Table) -> BuilderResult<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Save a table definition to a file, creating parent directories as needed
pub fn save_table(table: &Table, path: impl AsRef<Path>) -> BuilderResult<()> {
    let path = path.as_ref();
    let json = table_to_string(table)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| BuilderError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| BuilderError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
