//! Shared test fixtures: in-memory record stores and upload payload builders.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use kiosque_core::models::{FileStats, MimeTypeCount, QuarantinedFile, StoredFile};
use kiosque_core::AppError;
use kiosque_db::{FileRecordStore, QuarantineRecordStore};
use uuid::Uuid;

/// In-memory stand-in for the Postgres file repository.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<Vec<StoredFile>>,
    fail_inserts: bool,
    fail_deletes: bool,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts always fail, for exercising the compensating
    /// delete path.
    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    /// A store whose deletes always fail, for exercising sweep resilience.
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.files.lock().unwrap().iter().any(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl FileRecordStore for InMemoryFileStore {
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError> {
        if self.fail_inserts {
            return Err(AppError::Internal("simulated insert failure".to_string()));
        }
        self.files.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StoredFile>, AppError> {
        Ok(self.files.lock().unwrap().clone())
    }

    async fn list_for_order(&self, order_id: &str) -> Result<Vec<StoredFile>, AppError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.owner_order_id.as_deref() == Some(order_id))
            .cloned()
            .collect())
    }

    async fn link_to_order(&self, id: Uuid, order_id: &str) -> Result<(), AppError> {
        let mut files = self.files.lock().unwrap();
        let file = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))?;
        file.owner_order_id = Some(order_id.to_string());
        Ok(())
    }

    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<StoredFile>, AppError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.created_at < cutoff)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.fail_deletes {
            return Err(AppError::Internal("simulated delete failure".to_string()));
        }
        self.files.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }

    async fn stats(&self) -> Result<FileStats, AppError> {
        let files = self.files.lock().unwrap();
        let mut by_type: Vec<MimeTypeCount> = Vec::new();
        for file in files.iter() {
            match by_type.iter_mut().find(|c| c.mime_type == file.mime_type) {
                Some(entry) => {
                    entry.count += 1;
                    entry.bytes += file.size_bytes;
                }
                None => by_type.push(MimeTypeCount {
                    mime_type: file.mime_type.clone(),
                    count: 1,
                    bytes: file.size_bytes,
                }),
            }
        }
        Ok(FileStats {
            total_files: files.len() as i64,
            total_bytes: files.iter().map(|f| f.size_bytes).sum(),
            files_by_type: by_type,
        })
    }
}

/// In-memory stand-in for the Postgres quarantine log.
#[derive(Default)]
pub struct InMemoryQuarantineStore {
    files: Mutex<Vec<QuarantinedFile>>,
}

impl InMemoryQuarantineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl QuarantineRecordStore for InMemoryQuarantineStore {
    async fn insert(&self, file: &QuarantinedFile) -> Result<(), AppError> {
        self.files.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<QuarantinedFile>, AppError> {
        Ok(self.files.lock().unwrap().clone())
    }

    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<QuarantinedFile>, AppError> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.quarantined_at < cutoff)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.files.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}

// Payload builders

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn jpeg_bytes() -> Vec<u8> {
    let mut b = vec![0xFF, 0xD8, 0xFF, 0xE0];
    b.extend_from_slice(&[0x00; 32]);
    b
}

pub fn gif_bytes() -> Vec<u8> {
    let mut b = b"GIF89a".to_vec();
    b.extend_from_slice(&[0x00; 32]);
    b
}
