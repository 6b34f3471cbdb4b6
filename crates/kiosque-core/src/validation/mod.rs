//! Upload validation pipeline
//!
//! Pure, in-memory checks run against each upload candidate before any byte
//! touches durable storage: base64 decode and size guard, magic-byte content
//! verification, embedded-threat scan, and filename sanitization, composed by
//! the pipeline module into a single pass/fail/quarantine decision per file.
//!
//! Nothing in this module performs I/O, and for identical input the outcome
//! is always identical.

pub mod decode;
pub mod filename;
pub mod pipeline;
pub mod signature;
pub mod threat;

pub use decode::{check_file_size, decode_data_url, DecodedPayload};
pub use filename::{sanitize_filename, validate_filename, MAX_FILENAME_LENGTH};
pub use pipeline::{validate_batch, validate_file, UploadLimits};
pub use signature::{sniff_content, FORMAT_SIGNATURES, SNIFF_PREFIX_LEN};
pub use threat::{scan_for_threats, ThreatPattern, SCAN_WINDOW, THREAT_PATTERNS};
