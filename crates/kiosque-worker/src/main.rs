//! Retention purge worker.
//!
//! Long-running process that sweeps expired uploads and quarantined files on
//! a fixed interval. The first sweep runs at startup.

mod setup;
mod telemetry;

use kiosque_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env in development; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    telemetry::init_telemetry();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        normal_retention_days = config.normal_retention_days,
        quarantine_retention_days = config.quarantine_retention_days,
        purge_interval_secs = config.purge_interval_secs,
        "Starting purge worker"
    );

    let pool = setup::setup_database(&config).await?;
    let purge = setup::setup_purge_service(&config, pool).await?;

    let handle = purge.start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, stopping purge worker");
    handle.abort();

    Ok(())
}
