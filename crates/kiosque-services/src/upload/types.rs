//! Result types for the upload service

use kiosque_core::models::{QuarantinedFile, StoredFile, ValidationError, ValidationResult};
use kiosque_core::AppError;

/// What happened to one candidate of a processed batch.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Validated and persisted.
    Stored(StoredFile),
    /// Flagged by a security check and relocated to quarantine.
    Quarantined(QuarantinedFile),
    /// Not persisted. Either the file itself failed validation with
    /// user-correctable errors, or a batch-level failure stopped the whole
    /// request before persistence — in the latter case the wrapped per-file
    /// result may be valid, and the cause is in [`BatchOutcome::batch_error`].
    Rejected(ValidationResult),
    /// Passed validation but persistence failed; nothing left behind.
    Failed {
        result: ValidationResult,
        error: AppError,
    },
}

impl UploadOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, UploadOutcome::Stored(_))
    }

    pub fn is_quarantined(&self) -> bool {
        matches!(self, UploadOutcome::Quarantined(_))
    }
}

/// Outcome of processing one upload request.
///
/// Batch atomicity across files is deliberately NOT guaranteed: when a later
/// file fails, earlier files of the same batch stay stored. A batch-level
/// size failure is the exception — it is detected before any persistence, so
/// nothing is stored in that case.
#[derive(Debug)]
pub struct BatchOutcome {
    pub outcomes: Vec<UploadOutcome>,
    pub batch_error: Option<ValidationError>,
}

impl BatchOutcome {
    pub fn stored_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_stored()).count()
    }

    pub fn quarantined_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_quarantined()).count()
    }
}
