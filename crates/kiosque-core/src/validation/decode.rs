//! Base64 data-URL decoding and size guard.
//!
//! Input is expected to match `data:<mime-type>;base64,<payload>`. Malformed
//! input fails with `MALFORMED_ENCODING` and no later content checks run for
//! that file, since there are no bytes to inspect.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::{ValidationError, ValidationErrorCode};

/// A successfully decoded data URL.
#[derive(Debug)]
pub struct DecodedPayload {
    /// The MIME type the client declared in the data URL. Untrusted until
    /// verified against the content signature.
    pub declared_mime_type: String,
    pub bytes: Vec<u8>,
}

fn malformed(detail: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorCode::MalformedEncoding,
        format!(
            "invalid base64 data URL ({}); expected format: data:image/jpeg;base64,...",
            detail
        ),
    )
}

/// Check that a declared MIME type is structurally plausible: `type/subtype`
/// over a restricted character set. The allow-list check happens later in the
/// sniffer; this only rejects garbage that cannot name a type at all.
fn is_plausible_mime(mime: &str) -> bool {
    let Some((ty, subty)) = mime.split_once('/') else {
        return false;
    };
    let ok = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
    };
    ok(ty) && ok(subty)
}

/// Parse and decode a `data:<mime>;base64,<payload>` string.
pub fn decode_data_url(raw: &str) -> Result<DecodedPayload, ValidationError> {
    let rest = raw
        .strip_prefix("data:")
        .ok_or_else(|| malformed("missing data: prefix"))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| malformed("missing ;base64, separator"))?;

    if !is_plausible_mime(mime) {
        return Err(malformed("invalid MIME type"));
    }

    if payload.is_empty() {
        return Err(malformed("empty payload"));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| malformed("payload is not valid base64"))?;

    Ok(DecodedPayload {
        declared_mime_type: mime.to_string(),
        bytes,
    })
}

fn format_mib(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Enforce the per-file size ceiling. Oversized is not a threat signal by
/// itself, so this is a plain validation error, never a quarantine trigger.
pub fn check_file_size(size_bytes: u64, max_bytes: u64) -> Option<ValidationError> {
    if size_bytes > max_bytes {
        Some(ValidationError::new(
            ValidationErrorCode::FileTooLarge,
            format!(
                "file is {} (maximum: {})",
                format_mib(size_bytes),
                format_mib(max_bytes)
            ),
        ))
    } else {
        None
    }
}
