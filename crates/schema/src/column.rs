//! Column definitions
//!
//! This module contains the `Column` struct and its `ColumnOptions`
//! configuration. Every attribute's legality is a function of the column
//! type; setting an attribute the type does not support fails instead of
//! being ignored.

use crate::validation::require_name;
use mbuilder_core::{BuilderError, BuilderResult, ColumnType, DefaultValue};
use serde::{Deserialize, Serialize};

/// Reject defaults that cannot be written as a literal
fn check_default_value(value: &DefaultValue) -> BuilderResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BuilderError::unsupported_value(
            "default value",
            value.to_string(),
        ))
    }
}

// ============================================================================
// ColumnOptions
// ============================================================================

/// Every recognized column option.
///
/// The whole set is validated against the column type before any field is
/// applied, so there is no application order to reason about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOptions {
    /// Auto-increment (integer family only); implies unsigned
    pub auto_increment: bool,

    /// Length / precision (char, decimal, double, float, string)
    pub length: Option<u32>,

    /// Fractional part / scale (decimal, double, float); requires `length`
    pub fractional: Option<u32>,

    /// Default value; cannot be combined with auto-increment
    pub default_value: Option<DefaultValue>,

    /// Column comment
    pub comment: Option<String>,

    pub nullable: bool,

    pub unique: bool,

    pub index: bool,

    /// Unsigned (integer family only); `Some(false)` conflicts with auto-increment
    pub unsigned: Option<bool>,
}

impl ColumnOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Enable auto-increment
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Set the length
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the length and fractional part
    pub fn precision(mut self, length: u32, fractional: u32) -> Self {
        self.length = Some(length);
        self.fractional = Some(fractional);
        self
    }

    /// Set a default value
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the comment
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Mark the column nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the column indexed
    pub fn index(mut self) -> Self {
        self.index = true;
        self
    }

    /// Set unsigned explicitly
    pub fn unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = Some(unsigned);
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate the full option set for a column of the given type
    pub fn validate_for(&self, column: &str, column_type: ColumnType) -> BuilderResult<()> {
        if self.length.is_some() && !column_type.supports_length() {
            return Err(BuilderError::not_applicable("Length", column_type));
        }

        if self.fractional.is_some() {
            if !column_type.supports_fractional() {
                return Err(BuilderError::not_applicable("Fractional", column_type));
            }
            if self.length.is_none() {
                return Err(BuilderError::conflict(
                    column,
                    "a fractional part requires a length",
                ));
            }
        }

        if let Some(value) = &self.default_value {
            if !column_type.supports_default() {
                return Err(BuilderError::not_applicable("Default value", column_type));
            }
            check_default_value(value)?;
        }

        if self.auto_increment && !column_type.supports_auto_increment() {
            return Err(BuilderError::not_applicable("Auto increment", column_type));
        }

        if self.unsigned.is_some() && !column_type.supports_unsigned() {
            return Err(BuilderError::not_applicable("Unsigned", column_type));
        }

        if self.auto_increment {
            if self.default_value.is_some() {
                return Err(BuilderError::conflict(
                    column,
                    "cannot add a default value to an auto increment column",
                ));
            }
            if self.unsigned == Some(false) {
                return Err(BuilderError::conflict(
                    column,
                    "cannot set an auto increment column to signed",
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Column
// ============================================================================

/// A single validated column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColumnDefinition", into = "ColumnDefinition")]
pub struct Column {
    name: String,
    column_type: ColumnType,
    length: Option<u32>,
    fractional: Option<u32>,
    default_value: Option<DefaultValue>,
    comment: Option<String>,
    auto_increment: bool,
    nullable: bool,
    unique: bool,
    index: bool,
    unsigned: bool,
}

impl Column {
    /// Create a new column with the given name, type, and options
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        options: ColumnOptions,
    ) -> BuilderResult<Self> {
        let name = name.into();
        require_name("column name", &name)?;
        options.validate_for(&name, column_type)?;

        Ok(Self {
            name,
            column_type,
            length: options.length,
            fractional: options.fractional,
            default_value: options.default_value,
            comment: options.comment,
            auto_increment: options.auto_increment,
            nullable: options.nullable,
            unique: options.unique,
            index: options.index,
            unsigned: options.auto_increment || options.unsigned.unwrap_or(false),
        })
    }

    /// Create a new column from a type name such as `"bigInteger"`
    pub fn parse(
        name: impl Into<String>,
        type_name: &str,
        options: ColumnOptions,
    ) -> BuilderResult<Self> {
        let column_type = type_name.parse::<ColumnType>()?;
        Self::new(name, column_type, options)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn fractional(&self) -> Option<u32> {
        self.fractional
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_index(&self) -> bool {
        self.index
    }

    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Rename the column
    pub fn set_name(&mut self, name: impl Into<String>) -> BuilderResult<&mut Self> {
        let name = name.into();
        require_name("column name", &name)?;
        self.name = name;
        Ok(self)
    }

    /// Set the length, and the fractional part when given.
    ///
    /// Passing `None` for `fractional` keeps any fractional part already set.
    pub fn set_length(&mut self, length: u32, fractional: Option<u32>) -> BuilderResult<&mut Self> {
        if !self.column_type.supports_length() {
            return Err(BuilderError::not_applicable("Length", self.column_type));
        }
        if fractional.is_some() && !self.column_type.supports_fractional() {
            return Err(BuilderError::not_applicable("Fractional", self.column_type));
        }

        self.length = Some(length);
        if fractional.is_some() {
            self.fractional = fractional;
        }
        Ok(self)
    }

    /// Set or clear the default value
    pub fn set_default_value(
        &mut self,
        default_value: Option<DefaultValue>,
    ) -> BuilderResult<&mut Self> {
        if let Some(value) = &default_value {
            if !self.column_type.supports_default() {
                return Err(BuilderError::not_applicable(
                    "Default value",
                    self.column_type,
                ));
            }
            check_default_value(value)?;
            if self.auto_increment {
                return Err(BuilderError::conflict(
                    &self.name,
                    "cannot add a default value to an auto increment column",
                ));
            }
        }

        self.default_value = default_value;
        Ok(self)
    }

    /// Set or clear the comment
    pub fn set_comment(&mut self, comment: Option<String>) -> &mut Self {
        self.comment = comment;
        self
    }

    /// Toggle auto-increment.
    ///
    /// Enabling it clears any default value and forces the column unsigned.
    pub fn set_auto_increment(&mut self, auto_increment: bool) -> BuilderResult<&mut Self> {
        if !self.column_type.supports_auto_increment() {
            return Err(BuilderError::not_applicable(
                "Auto increment",
                self.column_type,
            ));
        }

        self.auto_increment = auto_increment;
        if auto_increment {
            self.default_value = None;
            self.unsigned = true;
        }
        Ok(self)
    }

    pub fn set_nullable(&mut self, nullable: bool) -> &mut Self {
        self.nullable = nullable;
        self
    }

    pub fn set_unique(&mut self, unique: bool) -> &mut Self {
        self.unique = unique;
        self
    }

    pub fn set_index(&mut self, index: bool) -> &mut Self {
        self.index = index;
        self
    }

    /// Set unsigned; an auto-increment column cannot be made signed
    pub fn set_unsigned(&mut self, unsigned: bool) -> BuilderResult<&mut Self> {
        if !self.column_type.supports_unsigned() {
            return Err(BuilderError::not_applicable("Unsigned", self.column_type));
        }
        if !unsigned && self.auto_increment {
            return Err(BuilderError::conflict(
                &self.name,
                "cannot set an auto increment column to signed",
            ));
        }

        self.unsigned = unsigned;
        Ok(self)
    }

    /// Current attributes expressed as an option set
    pub fn options(&self) -> ColumnOptions {
        ColumnOptions {
            auto_increment: self.auto_increment,
            length: self.length,
            fractional: self.fractional,
            default_value: self.default_value.clone(),
            comment: self.comment.clone(),
            nullable: self.nullable,
            unique: self.unique,
            index: self.index,
            unsigned: self.unsigned.then_some(true),
        }
    }
}

// ============================================================================
// ColumnDefinition (serialized form)
// ============================================================================

/// Serialized form of a column: `{"name": "id", "type": "integer", ...options}`.
///
/// Unknown keys are rejected, so a misspelled option fails to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto_increment: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fractional: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub index: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<bool>,
}

impl TryFrom<ColumnDefinition> for Column {
    type Error = BuilderError;

    fn try_from(def: ColumnDefinition) -> BuilderResult<Self> {
        let options = ColumnOptions {
            auto_increment: def.auto_increment,
            length: def.length,
            fractional: def.fractional,
            default_value: def.default_value,
            comment: def.comment,
            nullable: def.nullable,
            unique: def.unique,
            index: def.index,
            unsigned: def.unsigned,
        };
        Column::parse(def.name, &def.column_type, options)
    }
}

impl From<Column> for ColumnDefinition {
    fn from(column: Column) -> Self {
        let options = column.options();
        ColumnDefinition {
            column_type: column.column_type.as_str().to_string(),
            name: column.name,
            auto_increment: options.auto_increment,
            length: options.length,
            fractional: options.fractional,
            default_value: options.default_value,
            comment: options.comment,
            nullable: options.nullable,
            unique: options.unique,
            index: options.index,
            unsigned: options.unsigned,
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
    fn test_new_column_defaults() {
        let column = Column::new("email", ColumnType::String, ColumnOptions::new()).unwrap();
        assert_eq!(column.name(), "email");
        assert_eq!(column.column_type(), ColumnType::String);
        assert_eq!(column.length(), None);
        assert!(column.default_value().is_none());
        assert!(!column.is_auto_increment());
        assert!(!column.is_nullable());
        assert!(!column.is_unsigned());
    }

    #[test]
    fn test_invalid_name() {
        let err = Column::new("first name", ColumnType::String, ColumnOptions::new()).unwrap_err();
        assert!(matches!(err, BuilderError::InvalidIdentifier { .. }));

        let err = Column::new("1st", ColumnType::String, ColumnOptions::new()).unwrap_err();
        assert!(matches!(err, BuilderError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_unsupported_type() {
        for name in ["json", "uuid", "varchar", "Integer", ""] {
            let err = Column::parse("col", name, ColumnOptions::new()).unwrap_err();
            assert!(
                matches!(err, BuilderError::UnsupportedType(_)),
                "{name} should be unsupported"
            );
        }
        assert!(Column::parse("col", "mediumInteger", ColumnOptions::new()).is_ok());
    }

    #[test]
    fn test_length_on_date_fails() {
        let mut column = Column::new("born_on", ColumnType::Date, ColumnOptions::new()).unwrap();
        let err = column.set_length(10, None).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::AttributeNotApplicable {
                column_type: ColumnType::Date,
                ..
            }
        ));
        assert_eq!(column.length(), None);

        let err = Column::new("born_on", ColumnType::Date, ColumnOptions::new().length(10))
            .unwrap_err();
        assert!(matches!(err, BuilderError::AttributeNotApplicable { .. }));
    }

    #[test]
    fn test_length_on_string_succeeds() {
        let mut column = Column::new("name", ColumnType::String, ColumnOptions::new()).unwrap();
        column.set_length(255, None).unwrap();
        assert_eq!(column.length(), Some(255));
    }

    #[test]
    fn test_fractional_rules() {
        let column =
            Column::new("price", ColumnType::Decimal, ColumnOptions::new().precision(8, 2)).unwrap();
        assert_eq!(column.length(), Some(8));
        assert_eq!(column.fractional(), Some(2));

        // string takes a length but no fractional part
        let mut column = Column::new("code", ColumnType::String, ColumnOptions::new()).unwrap();
        let err = column.set_length(10, Some(2)).unwrap_err();
        assert!(matches!(err, BuilderError::AttributeNotApplicable { .. }));
        // the failed call left no partial length behind
        assert_eq!(column.length(), None);

        let options = ColumnOptions {
            fractional: Some(2),
            ..ColumnOptions::default()
        };
        let err = Column::new("price", ColumnType::Decimal, options).unwrap_err();
        assert!(matches!(err, BuilderError::ConflictingState { .. }));
    }

    #[test]
    fn test_set_length_with_fractional() {
        for column_type in [ColumnType::Decimal, ColumnType::Float] {
            let mut column = Column::new("amount", column_type, ColumnOptions::new()).unwrap();
            column.set_length(10, Some(3)).unwrap();
            assert_eq!(column.length(), Some(10));
            assert_eq!(column.fractional(), Some(3));
        }
    }

    #[test]
    fn test_fractional_on_string_in_options_fails() {
        let err = Column::new("code", ColumnType::String, ColumnOptions::new().precision(10, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            BuilderError::AttributeNotApplicable {
                column_type: ColumnType::String,
                ..
            }
        ));
    }

    #[test]
    fn test_set_length_keeps_existing_fractional() {
        let mut column =
            Column::new("price", ColumnType::Double, ColumnOptions::new().precision(8, 2)).unwrap();
        column.set_length(12, None).unwrap();
        assert_eq!(column.length(), Some(12));
        assert_eq!(column.fractional(), Some(2));
    }

    #[test]
    fn test_default_value_rules() {
        let mut column = Column::new("bio", ColumnType::Text, ColumnOptions::new()).unwrap();
        let err = column
            .set_default_value(Some(DefaultValue::from("n/a")))
            .unwrap_err();
        assert!(matches!(err, BuilderError::AttributeNotApplicable { .. }));

        // clearing is always allowed
        column.set_default_value(None).unwrap();

        let mut column = Column::new("status", ColumnType::String, ColumnOptions::new()).unwrap();
        column
            .set_default_value(Some(DefaultValue::from("active")))
            .unwrap();
        assert_eq!(column.default_value(), Some(&DefaultValue::from("active")));
    }

    #[test]
    fn test_auto_increment_clears_default_and_forces_unsigned() {
        let mut column =
            Column::new("id", ColumnType::Integer, ColumnOptions::new().default_value(5)).unwrap();
        assert!(column.default_value().is_some());
        assert!(!column.is_unsigned());

        column.set_auto_increment(true).unwrap();
        assert!(column.is_auto_increment());
        assert!(column.default_value().is_none());
        assert!(column.is_unsigned());
    }

    #[test]
    fn test_auto_increment_rejects_default() {
        let mut column =
            Column::new("id", ColumnType::BigInteger, ColumnOptions::new().auto_increment())
                .unwrap();
        let err = column
            .set_default_value(Some(DefaultValue::from(1)))
            .unwrap_err();
        assert!(matches!(err, BuilderError::ConflictingState { .. }));
    }

    #[test]
    fn test_auto_increment_with_default_in_options_fails() {
        let options = ColumnOptions::new().auto_increment().default_value(1);
        let err = Column::new("id", ColumnType::Integer, options).unwrap_err();
        assert!(matches!(err, BuilderError::ConflictingState { .. }));
    }

    #[test]
    fn test_auto_increment_not_applicable() {
        let err = Column::new("id", ColumnType::String, ColumnOptions::new().auto_increment())
            .unwrap_err();
        assert!(matches!(err, BuilderError::AttributeNotApplicable { .. }));

        let mut column = Column::new("flag", ColumnType::Boolean, ColumnOptions::new()).unwrap();
        assert!(column.set_auto_increment(true).is_err());
        assert!(column.set_unsigned(true).is_err());
    }

    #[test]
    fn test_unsigned_false_conflicts_with_auto_increment() {
        let mut column =
            Column::new("id", ColumnType::Integer, ColumnOptions::new().auto_increment()).unwrap();
        assert!(column.is_unsigned());

        let err = column.set_unsigned(false).unwrap_err();
        assert!(matches!(err, BuilderError::ConflictingState { .. }));
        assert!(column.is_unsigned());

        let options = ColumnOptions::new().auto_increment().unsigned(false);
        let err = Column::new("id", ColumnType::Integer, options).unwrap_err();
        assert!(matches!(err, BuilderError::ConflictingState { .. }));
    }

    #[test]
    fn test_disabling_auto_increment_allows_signed() {
        let mut column =
            Column::new("id", ColumnType::Integer, ColumnOptions::new().auto_increment()).unwrap();
        column.set_auto_increment(false).unwrap();
        column.set_unsigned(false).unwrap();
        assert!(!column.is_unsigned());
    }

    #[test]
    fn test_infallible_setters_chain() {
        let mut column = Column::new("email", ColumnType::String, ColumnOptions::new()).unwrap();
        column
            .set_nullable(true)
            .set_unique(true)
            .set_index(true)
            .set_comment(Some("Login address".to_string()));

        assert!(column.is_nullable());
        assert!(column.is_unique());
        assert!(column.is_index());
        assert_eq!(column.comment(), Some("Login address"));
    }

    #[test]
    fn test_serde_round_trip_through_definition() {
        let json = r#"{"name": "price", "type": "decimal", "length": 8, "fractional": 2, "nullable": true}"#;
        let column: Column = serde_json::from_str(json).unwrap();
        assert_eq!(column.length(), Some(8));
        assert!(column.is_nullable());

        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(value["type"], "decimal");
        assert!(value.get("unique").is_none());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let json = r#"{"name": "id", "type": "integer", "autoIncrement": true, "defaultValue": 1}"#;
        let err = serde_json::from_str::<Column>(json).unwrap_err();
        assert!(err.to_string().contains("auto increment"));

        let json = r#"{"name": "id", "type": "uuid"}"#;
        assert!(serde_json::from_str::<Column>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_misspelled_option() {
        let json = r#"{"name": "id", "type": "integer", "autoincrement": true}"#;
        let err = serde_json::from_str::<Column>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field `autoincrement`"));

        let json = r#"{"name": "bio", "type": "text", "default": "n/a"}"#;
        assert!(serde_json::from_str::<Column>(json).is_err());
    }

    #[test]
    fn test_non_finite_float_default_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Column::new(
                "ratio",
                ColumnType::Float,
                ColumnOptions::new().default_value(value),
            )
            .unwrap_err();
            assert!(matches!(
                err,
                BuilderError::UnsupportedValue { ref field, .. } if field == "default value"
            ));
        }

        let mut column = Column::new("ratio", ColumnType::Float, ColumnOptions::new()).unwrap();
        let err = column
            .set_default_value(Some(DefaultValue::from(f64::NAN)))
            .unwrap_err();
        assert!(matches!(err, BuilderError::UnsupportedValue { .. }));
        assert!(column.default_value().is_none());

        column
            .set_default_value(Some(DefaultValue::from(0.5)))
            .unwrap();
        assert_eq!(column.default_value(), Some(&DefaultValue::Float(0.5)));
    }
}
