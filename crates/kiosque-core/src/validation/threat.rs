//! Embedded-threat scan.
//!
//! Looks for literal byte sequences of script and executable formats inside
//! the first bytes of the buffer. This runs in addition to the signature
//! check: a file can carry a valid image header and still embed a polyglot
//! payload within the scanned window.

use crate::models::{ValidationError, ValidationErrorCode};

/// Number of leading bytes searched for threat patterns.
pub const SCAN_WINDOW: usize = 100;

/// A byte sequence associated with a script or executable format.
pub struct ThreatPattern {
    pub name: &'static str,
    pub bytes: &'static [u8],
}

pub const THREAT_PATTERNS: &[ThreatPattern] = &[
    ThreatPattern {
        name: "PHP",
        bytes: b"<?php",
    },
    ThreatPattern {
        name: "JavaScript",
        bytes: b"<script",
    },
    ThreatPattern {
        // MZ header of Windows PE executables
        name: "Executable",
        bytes: &[0x4D, 0x5A],
    },
    ThreatPattern {
        name: "ELF",
        bytes: &[0x7F, 0x45, 0x4C, 0x46],
    },
];

/// Scan the leading window of a buffer for threat patterns. Returns the first
/// matching pattern; the name goes into server-side audit logs, never back to
/// the client.
pub fn find_threat(bytes: &[u8]) -> Option<&'static ThreatPattern> {
    let window = &bytes[..bytes.len().min(SCAN_WINDOW)];
    THREAT_PATTERNS.iter().find(|pattern| {
        window
            .windows(pattern.bytes.len())
            .any(|w| w == pattern.bytes)
    })
}

/// Run the threat scan, producing a SECURITY-severity error on any match.
pub fn scan_for_threats(bytes: &[u8]) -> Option<ValidationError> {
    find_threat(bytes).map(|pattern| {
        ValidationError::new(
            ValidationErrorCode::SuspiciousContent,
            format!("suspicious content detected ({})", pattern.name),
        )
    })
}
