use std::sync::Arc;

use kiosque_core::models::QuarantinedFile;
use kiosque_core::AppError;
use kiosque_db::QuarantineRecordStore;
use kiosque_storage::{generate_quarantine_key, Storage};

/// Quarantine service
///
/// Writes suspect bytes under the `quarantine/` key space and logs a record
/// with the detection reason. The record and the bytes are invisible to the
/// normal file read path.
#[derive(Clone)]
pub struct QuarantineService {
    storage: Arc<dyn Storage>,
    records: Arc<dyn QuarantineRecordStore>,
}

impl QuarantineService {
    pub fn new(storage: Arc<dyn Storage>, records: Arc<dyn QuarantineRecordStore>) -> Self {
        Self { storage, records }
    }

    /// Move the bytes that were about to be stored into quarantine instead,
    /// with the detection reason attached. The full reason goes to server-side
    /// logs and the quarantine record only — never back to the client.
    pub async fn quarantine_file(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
        reason: &str,
    ) -> Result<QuarantinedFile, AppError> {
        let storage_key = generate_quarantine_key();
        let size_bytes = bytes.len() as i64;

        self.storage
            .upload_with_key(&storage_key, bytes, "application/octet-stream")
            .await
            .map_err(|e| {
                tracing::error!(error = %e, storage_key = %storage_key, "Failed to write quarantine bytes");
                AppError::Storage(format!("Failed to quarantine file: {}", e))
            })?;

        let file = QuarantinedFile::new(
            storage_key.clone(),
            original_name.to_string(),
            reason.to_string(),
            size_bytes,
        );

        if let Err(e) = self.records.insert(&file).await {
            tracing::error!(
                error = %e,
                storage_key = %storage_key,
                "Quarantine record write failed, deleting quarantined bytes"
            );
            if let Err(del) = self.storage.delete(&storage_key).await {
                tracing::error!(
                    error = %del,
                    storage_key = %storage_key,
                    "Failed to delete quarantined bytes"
                );
            }
            return Err(e);
        }

        tracing::warn!(
            quarantine_id = %file.id,
            storage_key = %file.storage_key,
            original_name = %original_name,
            reason = %reason,
            size_bytes = size_bytes,
            "File quarantined"
        );

        Ok(file)
    }
}
