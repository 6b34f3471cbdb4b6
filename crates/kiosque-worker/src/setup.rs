//! Database and service wiring for the purge worker.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use kiosque_core::Config;
use kiosque_db::{run_migrations, FileRecordStore, FileRepository, QuarantineRepository};
use kiosque_services::PurgeService;
use kiosque_storage::LocalStorage;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Wire storage and repositories into the purge service.
pub async fn setup_purge_service(config: &Config, pool: PgPool) -> Result<Arc<PurgeService>> {
    let storage = Arc::new(
        LocalStorage::new(
            config.local_storage_path.clone(),
            config.local_storage_base_url.clone(),
        )
        .await?,
    );

    let files = Arc::new(FileRepository::new(pool.clone()));
    let quarantine = Arc::new(QuarantineRepository::new(pool));

    let stats = files.stats().await?;
    tracing::info!(
        total_files = stats.total_files,
        total_bytes = stats.total_bytes,
        "File store at startup"
    );

    Ok(Arc::new(PurgeService::new(
        files,
        quarantine,
        storage,
        config.normal_retention(),
        config.quarantine_retention(),
        config.purge_interval(),
    )))
}
