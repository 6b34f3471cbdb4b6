//! Domain models
//!
//! Transient upload types (candidates, validation results) and persistent
//! file records (stored and quarantined). A file is never simultaneously a
//! [`StoredFile`] and a [`QuarantinedFile`]; the validation outcome is a
//! strict fork.

pub mod file;
pub mod upload;

pub use file::{FileStats, MimeTypeCount, QuarantinedFile, StoredFile};
pub use upload::{
    BatchValidation, FileValidation, Severity, UploadCandidate, ValidationError,
    ValidationErrorCode, ValidationResult,
};
