//! Input validation primitives for CLI arguments.
//!
//! - Unwrapping Option values with descriptive errors
//! - Validating non-empty strings
//! - Parsing `key=value` assignments (`--var name=widget`)

use crate::error::{Error, Result};

/// Require an Option to contain a value.
///
/// ```ignore
/// validation::require(args.template, "template", "--template is required with --no-input")?
/// ```
pub fn require<T>(opt: Option<T>, field: &str, message: &str) -> Result<T> {
    opt.ok_or_else(|| Error::validation_invalid_argument(field, message, None, None))
}

/// Require a string to be non-empty after trimming.
///
/// Returns a reference to the trimmed string on success.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None, None))
    } else {
        Ok(trimmed)
    }
}

/// Split `key=value` at the first `=`. The key is trimmed and must be
/// non-empty; the value is kept as written and may be empty.
pub fn parse_assignment(raw: &str, field: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(Error::validation_invalid_argument(
            field,
            format!("Expected key=value, got '{}'", raw),
            None,
            None,
        ));
    };

    let key = require_non_empty(key, field, "Assignment key cannot be empty")?;
    Ok((key.to_string(), value.to_string()))
}

/// Parse every assignment, failing on the first malformed one.
pub fn parse_assignments(raw: &[String], field: &str) -> Result<Vec<(String, String)>> {
    raw.iter().map(|r| parse_assignment(r, field)).collect()
}
