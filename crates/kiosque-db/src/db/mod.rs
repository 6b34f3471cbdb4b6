//! Database repositories for data access layer
//!
//! This module contains the repository implementations for database
//! operations. The `files` table holds metadata for accepted uploads; the
//! `quarantine_files` table is a separate record space for suspect files and
//! is never exposed through the normal file read path.

pub mod file_repository;
pub mod quarantine_repository;
pub mod traits;

pub use file_repository::FileRepository;
pub use quarantine_repository::QuarantineRepository;
pub use traits::{FileRecordStore, QuarantineRecordStore};

use kiosque_core::AppError;
use sqlx::PgPool;

/// Run pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
    Ok(())
}
