//! Record-store traits
//!
//! Services depend on these traits rather than on concrete repositories, so
//! the upload and purge pipelines can be exercised against in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiosque_core::models::{FileStats, QuarantinedFile, StoredFile};
use kiosque_core::AppError;
use uuid::Uuid;

/// Metadata store for accepted uploads.
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, AppError>;

    /// List all stored files. Quarantined files never appear here.
    async fn list(&self) -> Result<Vec<StoredFile>, AppError>;

    async fn list_for_order(&self, order_id: &str) -> Result<Vec<StoredFile>, AppError>;

    /// Associate a previously uploaded file with an order.
    async fn link_to_order(&self, id: Uuid, order_id: &str) -> Result<(), AppError>;

    /// Files created before the cutoff, i.e. past their retention window.
    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<StoredFile>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn stats(&self) -> Result<FileStats, AppError>;
}

/// Record store for the quarantine log.
#[async_trait]
pub trait QuarantineRecordStore: Send + Sync {
    async fn insert(&self, file: &QuarantinedFile) -> Result<(), AppError>;

    async fn list(&self) -> Result<Vec<QuarantinedFile>, AppError>;

    /// Quarantined files past the quarantine retention window.
    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<QuarantinedFile>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
