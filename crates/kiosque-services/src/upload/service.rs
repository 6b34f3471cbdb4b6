use std::sync::Arc;

use kiosque_core::models::{
    BatchValidation, FileValidation, Severity, StoredFile, UploadCandidate,
};
use kiosque_core::validation::{self, UploadLimits};
use kiosque_core::AppError;
use kiosque_db::FileRecordStore;
use kiosque_storage::{generate_upload_key, Storage};

use crate::quarantine::QuarantineService;

use super::types::{BatchOutcome, UploadOutcome};

/// Upload service
///
/// Runs the validation pipeline and persists the survivors: accepted files go
/// to durable storage plus a metadata record, suspect files go to quarantine
/// instead. Validation itself is pure and stateless per file; only
/// persistence does I/O.
pub struct UploadService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileRecordStore>,
    quarantine: QuarantineService,
    limits: UploadLimits,
}

impl UploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        files: Arc<dyn FileRecordStore>,
        quarantine: QuarantineService,
        limits: UploadLimits,
    ) -> Self {
        Self {
            storage,
            files,
            quarantine,
            limits,
        }
    }

    /// Validate a single candidate. No side effects.
    pub fn validate_file(&self, candidate: &UploadCandidate) -> FileValidation {
        validation::validate_file(candidate, &self.limits)
    }

    /// Validate a batch of candidates. No side effects.
    pub fn validate_batch(&self, candidates: &[UploadCandidate]) -> BatchValidation {
        validation::validate_batch(candidates, &self.limits)
    }

    /// Persist a file that passed validation: write bytes under a freshly
    /// generated storage key, then record the metadata. If the metadata write
    /// fails the orphaned bytes are deleted before the error propagates, so
    /// storage and metadata never diverge.
    pub async fn store_validated_file(
        &self,
        validation: FileValidation,
        owner_order_id: Option<&str>,
    ) -> Result<StoredFile, AppError> {
        if !validation.result.valid {
            return Err(AppError::InvalidInput(
                "file did not pass validation".to_string(),
            ));
        }

        let bytes = validation.bytes.ok_or_else(|| {
            AppError::Internal("validated file has no decoded bytes".to_string())
        })?;
        let mime_type = validation.result.detected_mime_type.ok_or_else(|| {
            AppError::Internal("validated file has no detected type".to_string())
        })?;

        let storage_key = generate_upload_key(&mime_type);
        let size_bytes = bytes.len() as i64;

        self.storage
            .upload_with_key(&storage_key, bytes, &mime_type)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_key = %storage_key, "Failed to upload to storage");
                AppError::Storage(format!("Failed to upload file: {}", e))
            })?;

        let file = StoredFile::new(
            storage_key.clone(),
            validation.result.sanitized_filename,
            mime_type,
            size_bytes,
            owner_order_id.map(|s| s.to_string()),
        );

        if let Err(e) = self.files.insert(&file).await {
            // Compensating action: the bytes were written but the metadata
            // record failed, so remove the orphan before reporting failure.
            tracing::error!(
                error = %e,
                file_id = %file.id,
                storage_key = %storage_key,
                "Metadata write failed after upload, deleting orphaned bytes"
            );
            if let Err(del) = self.storage.delete(&storage_key).await {
                tracing::error!(
                    error = %del,
                    storage_key = %storage_key,
                    "Failed to delete orphaned bytes"
                );
            }
            return Err(e);
        }

        tracing::info!(
            file_id = %file.id,
            storage_key = %file.storage_key,
            original_name = %file.original_name,
            mime_type = %file.mime_type,
            size_bytes = file.size_bytes,
            "File stored"
        );

        Ok(file)
    }

    /// Process one upload request end to end: validate every candidate, store
    /// the accepted files, relocate flagged ones to quarantine, and report
    /// per-file outcomes. A batch-level size failure short-circuits before
    /// any persistence.
    pub async fn process_batch(
        &self,
        candidates: &[UploadCandidate],
        owner_order_id: Option<&str>,
    ) -> BatchOutcome {
        let batch = self.validate_batch(candidates);

        if let Some(batch_error) = batch.batch_error {
            tracing::info!(
                files = candidates.len(),
                error = %batch_error,
                "Batch rejected before persistence"
            );
            return BatchOutcome {
                outcomes: batch
                    .per_file
                    .into_iter()
                    .map(|v| UploadOutcome::Rejected(v.result))
                    .collect(),
                batch_error: Some(batch_error),
            };
        }

        let mut outcomes = Vec::with_capacity(batch.per_file.len());

        for validation in batch.per_file {
            let outcome = self.settle_file(validation, owner_order_id).await;
            outcomes.push(outcome);
        }

        BatchOutcome {
            outcomes,
            batch_error: None,
        }
    }

    /// Decide the fate of one validated file: store, quarantine, or reject.
    async fn settle_file(
        &self,
        validation: FileValidation,
        owner_order_id: Option<&str>,
    ) -> UploadOutcome {
        if validation.result.requires_quarantine {
            let reason = validation
                .result
                .errors
                .iter()
                .filter(|e| e.severity() == Severity::Security)
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");

            // Security errors are only raised on decoded bytes, so these are
            // the bytes that were about to be stored.
            let Some(bytes) = validation.bytes else {
                return UploadOutcome::Rejected(validation.result);
            };

            return match self
                .quarantine
                .quarantine_file(bytes, &validation.result.sanitized_filename, &reason)
                .await
            {
                Ok(quarantined) => UploadOutcome::Quarantined(quarantined),
                Err(error) => UploadOutcome::Failed {
                    result: validation.result,
                    error,
                },
            };
        }

        if !validation.result.valid {
            return UploadOutcome::Rejected(validation.result);
        }

        let result = validation.result.clone();
        match self.store_validated_file(validation, owner_order_id).await {
            Ok(file) => UploadOutcome::Stored(file),
            Err(error) => UploadOutcome::Failed { result, error },
        }
    }
}
