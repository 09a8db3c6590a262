//! Shared validation rules for request shapes.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use officex_core::AppResult;
use officex_core::types::parse_id;

/// Validate a request, converting failures into a validation error.
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate()?;
    Ok(())
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// `#RRGGBB` or `#RGB`.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| error("hex_color", "Color must start with '#'"))?;
    if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(error("hex_color", "Color must be #RGB or #RRGGBB"));
    }
    Ok(())
}

/// A file or folder name: non-empty, no path separators, not `.` or `..`.
pub fn validate_resource_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error("resource_name", "Name must not be blank"));
    }
    if value.contains('/') || value.contains("::") {
        return Err(error("resource_name", "Name must not contain '/' or '::'"));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(error("resource_name", "Name must not be '.' or '..'"));
    }
    Ok(())
}

/// Any prefixed identifier.
pub fn validate_prefixed_id(value: &str) -> Result<(), ValidationError> {
    parse_id(value)
        .map(|_| ())
        .map_err(|e| error("prefixed_id", e.message))
}

/// A label value: non-empty and free of whitespace.
pub fn validate_label_value(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(error("label_value", "Label must be non-empty without whitespace"));
    }
    Ok(())
}

/// A JSON document.
pub fn validate_json(value: &str) -> Result<(), ValidationError> {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|e| error("json", e.to_string()))
}

/// Every entry of a label list.
pub fn validate_label_values(values: &[String]) -> Result<(), ValidationError> {
    values.iter().try_for_each(|v| validate_label_value(v))
}
