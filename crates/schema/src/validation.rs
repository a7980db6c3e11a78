//! Identifier grammar shared by tables, columns, and foreign keys
//!
//! A name is valid when it is either a plain identifier (a letter or
//! underscore followed by up to 127 letters, digits, `@`, `$`, `#` or `_`,
//! Unicode aware) or one or more double-quoted segments without embedded
//! double quotes.

use mbuilder_core::{BuilderError, BuilderResult};
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[\p{L}_][\p{L}\p{N}@$#_]{0,127}|(?:"[^"]*")+)$"#)
        .expect("identifier pattern is valid")
});

/// Check a name against the identifier grammar
pub fn validate_name(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Validate a name, reporting `field` as the offending field on failure
pub(crate) fn require_name(field: &str, name: &str) -> BuilderResult<()> {
    if validate_name(name) {
        Ok(())
    } else {
        Err(BuilderError::invalid_identifier(field, name))
    }
}

// ============================================================================
// Tests
// ============================================================================
