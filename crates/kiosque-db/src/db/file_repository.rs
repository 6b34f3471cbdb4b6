use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiosque_core::models::{FileStats, MimeTypeCount, StoredFile};
use kiosque_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::FileRecordStore;

/// Postgres-backed metadata store for accepted uploads.
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for FileRepository {
    async fn insert(&self, file: &StoredFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO files (id, storage_key, original_name, mime_type, size_bytes, owner_order_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(file.id)
        .bind(&file.storage_key)
        .bind(&file.original_name)
        .bind(&file.mime_type)
        .bind(file.size_bytes)
        .bind(&file.owner_order_id)
        .bind(file.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, AppError> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, storage_key, original_name, mime_type, size_bytes, owner_order_id, created_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    async fn list(&self) -> Result<Vec<StoredFile>, AppError> {
        let files = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, storage_key, original_name, mime_type, size_bytes, owner_order_id, created_at
            FROM files
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn list_for_order(&self, order_id: &str) -> Result<Vec<StoredFile>, AppError> {
        let files = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, storage_key, original_name, mime_type, size_bytes, owner_order_id, created_at
            FROM files
            WHERE owner_order_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn link_to_order(&self, id: Uuid, order_id: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE files SET owner_order_id = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(order_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("File {} not found", id)));
        }

        Ok(())
    }

    async fn get_expired(&self, cutoff: DateTime<Utc>) -> Result<Vec<StoredFile>, AppError> {
        let files = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT id, storage_key, original_name, mime_type, size_bytes, owner_order_id, created_at
            FROM files
            WHERE created_at < $1
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn stats(&self) -> Result<FileStats, AppError> {
        let files_by_type = sqlx::query_as::<_, MimeTypeCount>(
            r#"
            SELECT mime_type, COUNT(*) AS count, COALESCE(SUM(size_bytes), 0)::BIGINT AS bytes
            FROM files
            GROUP BY mime_type
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let total_files = files_by_type.iter().map(|c| c.count).sum();
        let total_bytes = files_by_type.iter().map(|c| c.bytes).sum();

        Ok(FileStats {
            total_files,
            total_bytes,
            files_by_type,
        })
    }
}
