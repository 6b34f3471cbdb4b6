//! Magic-byte content verification.
//!
//! The signature table is data, not code: each supported format maps to one
//! or more byte-prefix patterns, where a pattern is a set of
//! `(offset, bytes)` segments that must all match. Adding a format is a table
//! entry, not a new branch.

use crate::models::{ValidationError, ValidationErrorCode};

/// Bytes inspected from the start of the buffer. 16 is sufficient for every
/// supported format (the deepest segment, WEBP, ends at offset 12).
pub const SNIFF_PREFIX_LEN: usize = 16;

/// One `(offset, expected bytes)` segment of a signature pattern.
pub type Segment = (usize, &'static [u8]);

/// A supported format with its accepted signature patterns.
pub struct FormatSignature {
    pub mime: &'static str,
    /// Alternative patterns; matching any one verifies the format.
    pub patterns: &'static [&'static [Segment]],
}

/// Allow-list of supported formats and their signatures.
pub const FORMAT_SIGNATURES: &[FormatSignature] = &[
    FormatSignature {
        mime: "image/jpeg",
        patterns: &[
            // JFIF, EXIF, and raw JPEG markers
            &[(0, &[0xFF, 0xD8, 0xFF, 0xE0])],
            &[(0, &[0xFF, 0xD8, 0xFF, 0xE1])],
            &[(0, &[0xFF, 0xD8, 0xFF, 0xDB])],
        ],
    },
    FormatSignature {
        mime: "image/png",
        patterns: &[&[(0, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])]],
    },
    FormatSignature {
        mime: "image/webp",
        // RIFF container header plus the WEBP fourcc at offset 8
        patterns: &[&[(0, b"RIFF"), (8, b"WEBP")]],
    },
    FormatSignature {
        mime: "image/gif",
        patterns: &[&[(0, b"GIF87a")], &[(0, b"GIF89a")]],
    },
];

/// Look up the signature entry for a declared MIME type, if allow-listed.
/// `image/jpg` is a common client alias for `image/jpeg`.
pub fn signature_for(declared: &str) -> Option<&'static FormatSignature> {
    let normalized = declared.trim().to_ascii_lowercase();
    let normalized = if normalized == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        normalized
    };
    FORMAT_SIGNATURES.iter().find(|s| s.mime == normalized)
}

fn pattern_matches(bytes: &[u8], pattern: &[Segment]) -> bool {
    pattern.iter().all(|(offset, expected)| {
        bytes
            .get(*offset..offset + expected.len())
            .is_some_and(|window| window == *expected)
    })
}

/// Verify a decoded buffer against the signatures for its declared type.
///
/// A declared type outside the allow-list is a plain rejection; a declared
/// type whose signature does not match the content is the spoofing case and
/// carries SECURITY severity. On success the returned type is the declared
/// one, now verified and safe to trust.
pub fn sniff_content(bytes: &[u8], declared_mime: &str) -> Result<&'static str, ValidationError> {
    let Some(signature) = signature_for(declared_mime) else {
        let allowed: Vec<&str> = FORMAT_SIGNATURES.iter().map(|s| s.mime).collect();
        return Err(ValidationError::new(
            ValidationErrorCode::UnsupportedType,
            format!(
                "file type not allowed: {} (allowed types: {})",
                declared_mime,
                allowed.join(", ")
            ),
        ));
    };

    let prefix = &bytes[..bytes.len().min(SNIFF_PREFIX_LEN)];
    if signature
        .patterns
        .iter()
        .any(|pattern| pattern_matches(prefix, pattern))
    {
        Ok(signature.mime)
    } else {
        Err(ValidationError::new(
            ValidationErrorCode::ContentMismatch,
            format!(
                "file content does not match declared type {} (possible spoofed upload)",
                declared_mime
            ),
        ))
    }
}
