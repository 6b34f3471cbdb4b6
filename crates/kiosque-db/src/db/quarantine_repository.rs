use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiosque_core::models::QuarantinedFile;
use kiosque_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::QuarantineRecordStore;

/// Postgres-backed quarantine log. Kept in its own table, outside the normal
/// file read path.
#[derive(Clone)]
pub struct QuarantineRepository {
    pool: PgPool,
}

impl QuarantineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuarantineRecordStore for QuarantineRepository {
    async fn insert(&self, file: &QuarantinedFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO quarantine_files (id, storage_key, original_name, reason, size_bytes, quarantined_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(file.id)
        .bind(&file.storage_key)
        .bind(&file.original_name)
        .bind(&file.reason)
        .bind(file.size_bytes)
        .bind(file.quarantined_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<QuarantinedFile>, AppError> {
        let files = sqlx::query_as::<_, QuarantinedFile>(
            r#"
            SELECT id, storage_key, original_name, reason, size_bytes, quarantined_at
            FROM quarantine_files
            ORDER BY quarantined_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<QuarantinedFile>, AppError> {
        let files = sqlx::query_as::<_, QuarantinedFile>(
            r#"
            SELECT id, storage_key, original_name, reason, size_bytes, quarantined_at
            FROM quarantine_files
            WHERE quarantined_at < $1
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM quarantine_files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
