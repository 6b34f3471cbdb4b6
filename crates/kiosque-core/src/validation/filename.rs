//! Filename validation and sanitization.
//!
//! The sanitized name is used for display and audit only. Storage keys are
//! generated independently, so path traversal via filename is structurally
//! impossible regardless of what happens here.

use crate::models::{ValidationError, ValidationErrorCode};

pub const MAX_FILENAME_LENGTH: usize = 255;

/// Reject empty or oversized filenames. A bad filename is user-correctable,
/// not a threat signal.
pub fn validate_filename(filename: &str) -> Option<ValidationError> {
    if filename.trim().is_empty() {
        return Some(ValidationError::new(
            ValidationErrorCode::EmptyOrLongFilename,
            "filename is required",
        ));
    }
    if filename.chars().count() > MAX_FILENAME_LENGTH {
        return Some(ValidationError::new(
            ValidationErrorCode::EmptyOrLongFilename,
            format!("filename too long (maximum {} characters)", MAX_FILENAME_LENGTH),
        ));
    }
    None
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
/// Sanitization is a fixed point: applying it to its own output changes nothing.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
