//! Core types used throughout Migration Builder
//!
//! This module contains the scalar kinds shared by the schema model and the
//! migration generator: column types and their per-type attribute rules,
//! foreign-key delete actions, and column default values.

use crate::error::{BuilderError, BuilderResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Column Types
// ============================================================================

/// Column types supported by the schema builder
///
/// The serialized form is the camelCase builder method name, which is also
/// the name emitted in generated column statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    // Numeric
    TinyInteger,
    SmallInteger,
    Integer,
    MediumInteger,
    BigInteger,
    Boolean,
    Decimal,
    Float,
    Double,
    // Date and time
    Date,
    DateTime,
    Timestamp,
    Time,
    // String
    String,
    Char,
    TinyText,
    Text,
    MediumText,
    LongText,
}

impl ColumnType {
    /// Builder method name (e.g. `bigInteger`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::TinyInteger => "tinyInteger",
            ColumnType::SmallInteger => "smallInteger",
            ColumnType::Integer => "integer",
            ColumnType::MediumInteger => "mediumInteger",
            ColumnType::BigInteger => "bigInteger",
            ColumnType::Boolean => "boolean",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Date => "date",
            ColumnType::DateTime => "dateTime",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Time => "time",
            ColumnType::String => "string",
            ColumnType::Char => "char",
            ColumnType::TinyText => "tinyText",
            ColumnType::Text => "text",
            ColumnType::MediumText => "mediumText",
            ColumnType::LongText => "longText",
        }
    }

    /// Get all supported column types
    pub fn all() -> &'static [ColumnType] {
        &[
            ColumnType::TinyInteger,
            ColumnType::SmallInteger,
            ColumnType::Integer,
            ColumnType::MediumInteger,
            ColumnType::BigInteger,
            ColumnType::Boolean,
            ColumnType::Decimal,
            ColumnType::Float,
            ColumnType::Double,
            ColumnType::Date,
            ColumnType::DateTime,
            ColumnType::Timestamp,
            ColumnType::Time,
            ColumnType::String,
            ColumnType::Char,
            ColumnType::TinyText,
            ColumnType::Text,
            ColumnType::MediumText,
            ColumnType::LongText,
        ]
    }

    /// Integer family: the only types that accept auto-increment and unsigned
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::TinyInteger
                | ColumnType::SmallInteger
                | ColumnType::Integer
                | ColumnType::MediumInteger
                | ColumnType::BigInteger
        )
    }

    /// Check if the type accepts a length
    pub fn supports_length(&self) -> bool {
        matches!(
            self,
            ColumnType::Char
                | ColumnType::Decimal
                | ColumnType::Double
                | ColumnType::Float
                | ColumnType::String
        )
    }

    /// Check if the type accepts a fractional part (scale)
    pub fn supports_fractional(&self) -> bool {
        matches!(
            self,
            ColumnType::Decimal | ColumnType::Double | ColumnType::Float
        )
    }

    /// Check if the type accepts a default value
    pub fn supports_default(&self) -> bool {
        !matches!(
            self,
            ColumnType::TinyText | ColumnType::Text | ColumnType::MediumText | ColumnType::LongText
        )
    }

    /// Check if the type accepts auto-increment
    pub fn supports_auto_increment(&self) -> bool {
        self.is_integer()
    }

    /// Check if the type accepts unsigned
    pub fn supports_unsigned(&self) -> bool {
        self.is_integer()
    }

    /// Builder method used for an auto-incrementing column of this type
    /// (`integer` → `increments`, `bigInteger` → `bigIncrements`)
    pub fn increments_name(&self) -> Option<&'static str> {
        match self {
            ColumnType::TinyInteger => Some("tinyIncrements"),
            ColumnType::SmallInteger => Some("smallIncrements"),
            ColumnType::Integer => Some("increments"),
            ColumnType::MediumInteger => Some("mediumIncrements"),
            ColumnType::BigInteger => Some("bigIncrements"),
            _ => None,
        }
    }
}

impl FromStr for ColumnType {
    type Err = BuilderError;

    fn from_str(s: &str) -> BuilderResult<Self> {
        ColumnType::all()
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| BuilderError::UnsupportedType(s.to_string()))
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// On Delete Actions
// ============================================================================

/// Referential action taken when a referenced row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnDelete {
    /// Prevent deletion if related records exist
    #[serde(rename = "restrict")]
    Restrict,
    /// Delete related records when parent is deleted
    #[serde(rename = "cascade")]
    Cascade,
    /// Set foreign key to NULL when parent is deleted
    #[serde(rename = "set null", alias = "set-null")]
    SetNull,
}

impl OnDelete {
    /// Keyword emitted in the on-delete clause
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDelete::Restrict => "restrict",
            OnDelete::Cascade => "cascade",
            OnDelete::SetNull => "set null",
        }
    }

    /// Get all supported actions
    pub fn all() -> &'static [OnDelete] {
        &[OnDelete::Restrict, OnDelete::Cascade, OnDelete::SetNull]
    }
}

impl FromStr for OnDelete {
    type Err = BuilderError;

    fn from_str(s: &str) -> BuilderResult<Self> {
        if s == "set-null" {
            return Ok(OnDelete::SetNull);
        }

        OnDelete::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| BuilderError::unsupported_value("on delete", s))
    }
}

impl std::fmt::Display for OnDelete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Default Values
// ============================================================================

/// Scalar default value for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl DefaultValue {
    /// Integer interpretation of a numeric default.
    ///
    /// Floats truncate toward zero, booleans map to `1`/`0`, and strings count
    /// as numeric when their trimmed text parses as a finite number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DefaultValue::Boolean(b) => Some(i64::from(*b)),
            DefaultValue::Integer(i) => Some(*i),
            DefaultValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            DefaultValue::Float(_) => None,
            DefaultValue::String(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Some(i);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }
        }
    }

    /// False for NaN and infinite floats, which have no literal form
    pub fn is_finite(&self) -> bool {
        !matches!(self, DefaultValue::Float(f) if !f.is_finite())
    }

    /// An empty string default is treated as "no default"
    pub fn is_blank(&self) -> bool {
        matches!(self, DefaultValue::String(s) if s.is_empty())
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Integer(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Boolean(b) => write!(f, "{}", b),
            DefaultValue::Integer(i) => write!(f, "{}", i),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::String(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
