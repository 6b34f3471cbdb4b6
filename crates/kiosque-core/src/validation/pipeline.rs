//! Validation orchestrator.
//!
//! Composes decode → sniff → scan → sanitize into one decision per file,
//! accumulating every error the caller will want to see at once. Dependent
//! checks are skipped when their input is unavailable: no content checks
//! without decoded bytes. The sniffer and the threat scanner both always run
//! on decoded bytes — a file can pass signature verification and still embed
//! a payload, so neither short-circuits the other.

use crate::models::{
    BatchValidation, FileValidation, UploadCandidate, ValidationError, ValidationErrorCode,
    ValidationResult,
};
use crate::validation::{decode, filename, signature, threat};

/// Size ceilings for a single upload request.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_size_bytes: u64,
    pub max_batch_size_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024,
            max_batch_size_bytes: 100 * 1024 * 1024,
        }
    }
}

/// Validate one upload candidate. Deterministic: identical content and
/// declared type always produce the identical result.
pub fn validate_file(candidate: &UploadCandidate, limits: &UploadLimits) -> FileValidation {
    let mut errors: Vec<ValidationError> = Vec::new();
    let mut detected_mime_type: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut size_bytes: Option<u64> = None;

    match decode::decode_data_url(&candidate.raw_base64) {
        Ok(payload) => {
            let size = payload.bytes.len() as u64;
            size_bytes = Some(size);

            if let Some(err) = decode::check_file_size(size, limits.max_file_size_bytes) {
                errors.push(err);
            }

            match signature::sniff_content(&payload.bytes, &payload.declared_mime_type) {
                Ok(mime) => detected_mime_type = Some(mime.to_string()),
                Err(err) => errors.push(err),
            }

            if let Some(err) = threat::scan_for_threats(&payload.bytes) {
                errors.push(err);
            }

            bytes = Some(payload.bytes);
        }
        Err(err) => {
            // No bytes to inspect; content checks are skipped for this file.
            errors.push(err);
        }
    }

    if let Some(err) = filename::validate_filename(&candidate.declared_filename) {
        errors.push(err);
    }
    let sanitized_filename = filename::sanitize_filename(&candidate.declared_filename);

    FileValidation {
        result: ValidationResult::from_errors(
            errors,
            detected_mime_type,
            sanitized_filename,
            size_bytes,
        ),
        bytes,
    }
}

/// Validate a batch of candidates. Files are validated independently; the
/// aggregate-size ceiling is checked over the files that decoded and is
/// reported once for the whole batch, never per file.
pub fn validate_batch(candidates: &[UploadCandidate], limits: &UploadLimits) -> BatchValidation {
    let per_file: Vec<FileValidation> = candidates
        .iter()
        .map(|candidate| validate_file(candidate, limits))
        .collect();

    let total_bytes: u64 = per_file
        .iter()
        .filter_map(|v| v.result.size_bytes)
        .sum();

    let batch_error = if total_bytes > limits.max_batch_size_bytes {
        Some(ValidationError::new(
            ValidationErrorCode::BatchTooLarge,
            format!(
                "total upload size is {:.2}MB (maximum: {:.2}MB)",
                total_bytes as f64 / (1024.0 * 1024.0),
                limits.max_batch_size_bytes as f64 / (1024.0 * 1024.0)
            ),
        ))
    } else {
        None
    };

    BatchValidation {
        per_file,
        batch_error,
    }
}
