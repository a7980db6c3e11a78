//! # Migration Statements
//!
//! This module renders a table model into schema-builder statements.
//! Statements come in three groups, emitted in this order:
//!
//! 1. **Column statements**, one per column in insertion order, with
//!    modifier clauses in a fixed order (default, nullable, unique, index,
//!    unsigned, comment)
//! 2. **Special column statements**: soft delete, then timestamps
//! 3. **Foreign key statements**, one per foreign key in insertion order
//!
//! Each statement is one line; an empty group contributes no lines.

pub mod statements;

pub use statements::{
    column_statement, default_clause, escape, foreign_key_statement, indent_lines,
    special_column_statements,
};
