//! # Statement Renderers
//!
//! One rendering function per statement kind. Each returns an unindented,
//! terminated statement; indentation is applied by [`indent_lines`] only.
//!
//! ```text
//! $table->string('name',255)->nullable();
//! $table->increments('id')->unsigned();
//! $table->softDeletes();
//! $table->foreign('user_id')->references('id')->on('users')->onDelete('cascade');
//! ```

use mbuilder_core::{BuilderError, BuilderResult, DefaultValue};
use mbuilder_schema::{Column, ForeignKey};

/// Receiver variable every statement is called on
pub const BLUEPRINT: &str = "$table";

/// Soft-delete marker statement
pub const SOFT_DELETES: &str = "$table->softDeletes();";

/// Timestamp columns statement
pub const TIMESTAMPS: &str = "$table->timestamps();";

// ============================================================================
// Column statements
// ============================================================================

/// Render one column-creation statement with its modifier clauses.
///
/// Fails with `Internal` on a combination the column setters never produce.
pub fn column_statement(column: &Column) -> BuilderResult<String> {
    let mut cmd = String::with_capacity(64);
    let name = quote(column.name());

    if column.is_auto_increment() {
        let method = column.column_type().increments_name().ok_or_else(|| {
            BuilderError::internal(format!(
                "column '{}' is auto increment but {} has no increments form",
                column.name(),
                column.column_type()
            ))
        })?;
        cmd.push_str(&format!("{}->{}({})", BLUEPRINT, method, name));
    } else {
        cmd.push_str(&format!(
            "{}->{}({}",
            BLUEPRINT,
            column.column_type(),
            name
        ));
        match (column.length(), column.fractional()) {
            (Some(length), Some(fractional)) => {
                cmd.push_str(&format!(",{},{}", length, fractional));
            }
            (Some(length), None) => cmd.push_str(&format!(",{}", length)),
            (None, Some(_)) => {
                return Err(BuilderError::internal(format!(
                    "column '{}' has a fractional part without a length",
                    column.name()
                )));
            }
            (None, None) => {}
        }
        cmd.push(')');
    }

    if let Some(clause) = column.default_value().and_then(default_clause) {
        cmd.push_str(&clause);
    }

    if column.is_nullable() {
        cmd.push_str("->nullable()");
    }

    if column.is_unique() {
        cmd.push_str("->unique()");
    }

    if column.is_index() {
        cmd.push_str("->index()");
    }

    if column.is_unsigned() {
        cmd.push_str("->unsigned()");
    }

    if let Some(comment) = column.comment() {
        cmd.push_str(&format!("->comment({})", quote(comment)));
    }

    cmd.push(';');
    Ok(cmd)
}

/// Render the default-value clause.
///
/// Numeric values render as integers, non-empty strings as quoted strings;
/// an empty string means no default.
pub fn default_clause(value: &DefaultValue) -> Option<String> {
    if let Some(number) = value.as_integer() {
        return Some(format!("->default({})", number));
    }

    match value {
        DefaultValue::String(s) if !s.is_empty() => Some(format!("->default({})", quote(s))),
        _ => None,
    }
}

// ============================================================================
// Special column statements
// ============================================================================

/// Special-column statements in emission order: soft delete, then timestamps
pub fn special_column_statements(soft_delete: bool, timestamps: bool) -> Vec<String> {
    let mut statements = Vec::with_capacity(2);

    if soft_delete {
        statements.push(SOFT_DELETES.to_string());
    }

    if timestamps {
        statements.push(TIMESTAMPS.to_string());
    }

    statements
}

// ============================================================================
// Foreign key statements
// ============================================================================

/// Render one foreign-key statement
pub fn foreign_key_statement(foreign_key: &ForeignKey) -> String {
    let mut cmd = format!(
        "{}->foreign({})->references({})->on({})",
        BLUEPRINT,
        quote(foreign_key.column()),
        quote(foreign_key.references()),
        quote(foreign_key.on()),
    );

    if let Some(action) = foreign_key.on_delete() {
        cmd.push_str(&format!("->onDelete({})", quote(action.as_str())));
    }

    cmd.push(';');
    cmd
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Escape `\` and `'` for use inside a single-quoted literal
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Single-quoted string literal with `\` and `'` escaped
pub fn quote(value: &str) -> String {
    format!("'{}'", escape(value))
}

/// Indent every statement by `indent` spaces and join with newlines.
///
/// An empty slice yields an empty string.
pub fn indent_lines(statements: &[String], indent: usize) -> String {
    let pad = " ".repeat(indent);
    statements
        .iter()
        .map(|s| format!("{}{}", pad, s))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mbuilder_core::{ColumnType, OnDelete};
    use mbuilder_schema::{ColumnOptions, ForeignKeyOptions};
    use pretty_assertions::assert_eq;

    fn column(name: &str, ty: ColumnType, options: ColumnOptions) -> Column {
        Column::new(name, ty, options).unwrap()
    }

    #[test]
    fn test_auto_increment_column() {
        let col = column("id", ColumnType::Integer, ColumnOptions::new().auto_increment());
        assert_eq!(
            column_statement(&col).unwrap(),
            "$table->increments('id')->unsigned();"
        );

        let col = column("id", ColumnType::BigInteger, ColumnOptions::new().auto_increment());
        assert_eq!(
            column_statement(&col).unwrap(),
            "$table->bigIncrements('id')->unsigned();"
        );
    }

    #[test]
    fn test_length_and_fractional_arguments() {
        let col = column("name", ColumnType::String, ColumnOptions::new().length(255));
        assert_eq!(column_statement(&col).unwrap(), "$table->string('name',255);");

        let col = column("price", ColumnType::Decimal, ColumnOptions::new().precision(8, 2));
        assert_eq!(column_statement(&col).unwrap(), "$table->decimal('price',8,2);");

        let col = column("born_on", ColumnType::Date, ColumnOptions::new());
        assert_eq!(column_statement(&col).unwrap(), "$table->date('born_on');");
    }

    #[test]
    fn test_modifier_order() {
        let options = ColumnOptions::new()
            .default_value(0)
            .nullable()
            .unique()
            .index()
            .unsigned(true)
            .comment("Sort position");
        let col = column("position", ColumnType::SmallInteger, options);

        assert_eq!(
            column_statement(&col).unwrap(),
            "$table->smallInteger('position')->default(0)->nullable()->unique()->index()->unsigned()->comment('Sort position');"
        );
    }

    #[test]
    fn test_default_clause_forms() {
        assert_eq!(
            default_clause(&DefaultValue::from(7)).as_deref(),
            Some("->default(7)")
        );
        assert_eq!(
            default_clause(&DefaultValue::from(9.75)).as_deref(),
            Some("->default(9)")
        );
        assert_eq!(
            default_clause(&DefaultValue::from("12")).as_deref(),
            Some("->default(12)")
        );
        assert_eq!(
            default_clause(&DefaultValue::from(true)).as_deref(),
            Some("->default(1)")
        );
        assert_eq!(
            default_clause(&DefaultValue::from("draft")).as_deref(),
            Some("->default('draft')")
        );
        assert_eq!(default_clause(&DefaultValue::from("")), None);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
        assert_eq!(quote("plain"), "'plain'");
    }

    #[test]
    fn test_special_column_order() {
        assert_eq!(
            special_column_statements(true, true),
            vec![SOFT_DELETES.to_string(), TIMESTAMPS.to_string()]
        );
        assert_eq!(special_column_statements(false, true), vec![TIMESTAMPS.to_string()]);
        assert!(special_column_statements(false, false).is_empty());
    }

    #[test]
    fn test_foreign_key_statement() {
        let fk = ForeignKey::new(
            "user_id",
            "id",
            "users",
            ForeignKeyOptions::new().on_delete(OnDelete::Cascade),
        )
        .unwrap();
        assert_eq!(
            foreign_key_statement(&fk),
            "$table->foreign('user_id')->references('id')->on('users')->onDelete('cascade');"
        );

        let fk = ForeignKey::new("team_id", "id", "teams", ForeignKeyOptions::new()).unwrap();
        assert_eq!(
            foreign_key_statement(&fk),
            "$table->foreign('team_id')->references('id')->on('teams');"
        );

        let fk = ForeignKey::new(
            "team_id",
            "id",
            "teams",
            ForeignKeyOptions::new().on_delete(OnDelete::SetNull),
        )
        .unwrap();
        assert!(foreign_key_statement(&fk).ends_with("->onDelete('set null');"));
    }

    #[test]
    fn test_indent_lines() {
        let lines = vec!["a;".to_string(), "b;".to_string()];
        assert_eq!(indent_lines(&lines, 4), "    a;\n    b;");
        assert_eq!(indent_lines(&[], 12), "");
    }
}
