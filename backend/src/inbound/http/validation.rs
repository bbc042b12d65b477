//! Shared validation helpers for inbound HTTP adapters.
//!
//! The store trusts its input, so required-ness and length limits are
//! enforced here, before any store call. Failures carry `{ field, code }`
//! details so clients can attribute the problem.

use serde_json::json;

use crate::domain::{Error, Status};

/// Maximum accepted title length, in characters.
pub(crate) const TITLE_MAX_CHARS: usize = 100;
/// Maximum accepted description length, in characters.
pub(crate) const DESCRIPTION_MAX_CHARS: usize = 1000;
/// Maximum accepted comment length, in characters.
pub(crate) const COMMENT_MAX_CHARS: usize = 500;

fn missing_field(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn too_long(field: &str, max: usize) -> Error {
    Error::invalid_request(format!("{field} cannot exceed {max} characters")).with_details(json!({
        "field": field,
        "max": max,
        "code": "too_long",
    }))
}

/// Validate a required free-text field, returning the trimmed value.
///
/// `max_chars` of `None` means the field has no length bound.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max_chars: Option<usize>,
) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(missing_field(field));
    }
    if let Some(max) = max_chars {
        if trimmed.chars().count() > max {
            return Err(too_long(field, max));
        }
    }
    Ok(trimmed.to_owned())
}

/// Parse a status token at the adapter edge. The domain only ever sees the
/// closed enumeration.
pub(crate) fn parse_status(field: &'static str, value: &str) -> Result<Status, Error> {
    value.parse::<Status>().map_err(|_| {
        Error::invalid_request(format!(
            "{field} must be one of Pending, InProgress or Resolved"
        ))
        .with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_status",
        }))
    })
}
