use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// A validated file persisted to durable storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct StoredFile {
    pub id: Uuid,
    /// Generated, collision-resistant key used as the actual storage path.
    /// Never derived from the user-supplied filename.
    pub storage_key: String,
    /// Sanitized declared filename, kept for display and audit only.
    pub original_name: String,
    /// The detected (trusted) type, not the declared one.
    pub mime_type: String,
    pub size_bytes: i64,
    /// Files may be uploaded before an order exists and linked later.
    pub owner_order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn new(
        storage_key: String,
        original_name: String,
        mime_type: String,
        size_bytes: i64,
        owner_order_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            storage_key,
            original_name,
            mime_type,
            size_bytes,
            owner_order_id,
            created_at: Utc::now(),
        }
    }
}

/// A suspect file relocated to the isolated quarantine area. Quarantine is a
/// one-way transition: there is no release operation, only eventual purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct QuarantinedFile {
    pub id: Uuid,
    /// Key inside the isolated quarantine key space.
    pub storage_key: String,
    /// The sanitized filename the upload attempted to use.
    pub original_name: String,
    pub reason: String,
    pub size_bytes: i64,
    pub quarantined_at: DateTime<Utc>,
}

impl QuarantinedFile {
    pub fn new(storage_key: String, original_name: String, reason: String, size_bytes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            storage_key,
            original_name,
            reason,
            size_bytes,
            quarantined_at: Utc::now(),
        }
    }
}

/// Aggregate statistics over stored files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileStats {
    pub total_files: i64,
    pub total_bytes: i64,
    pub files_by_type: Vec<MimeTypeCount>,
}

/// Per-mime-type file count and byte total.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MimeTypeCount {
    pub mime_type: String,
    pub count: i64,
    pub bytes: i64,
}
