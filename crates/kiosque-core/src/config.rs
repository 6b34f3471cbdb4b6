//! Configuration module
//!
//! This module provides the configuration structure for the upload pipeline
//! and the purge worker, loaded from environment variables with sensible
//! defaults. Size limits and retention windows are tunable configuration,
//! not hard-coded invariants.

use std::env;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::validation::UploadLimits;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MIB: u64 = 1024 * 1024;

const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * MIB;
const DEFAULT_MAX_BATCH_SIZE_BYTES: u64 = 100 * MIB;
const DEFAULT_NORMAL_RETENTION_DAYS: i64 = 90;
const DEFAULT_QUARANTINE_RETENTION_DAYS: i64 = 30;
const DEFAULT_PURGE_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    // Database configuration
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    // Upload limits
    pub max_file_size_bytes: u64,
    pub max_batch_size_bytes: u64,
    // Retention configuration
    pub normal_retention_days: i64,
    pub quarantine_retention_days: i64,
    pub purge_interval_secs: u64,
}

/// Read an env var and parse it, falling back to a default when unset or unparseable.
fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = Config {
            environment: env_or("ENVIRONMENT", "development"),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            local_storage_path: env_or("LOCAL_STORAGE_PATH", "./data/uploads"),
            local_storage_base_url: env_or(
                "LOCAL_STORAGE_BASE_URL",
                "http://localhost:3000/uploads",
            ),
            max_file_size_bytes: env_parse("MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES),
            max_batch_size_bytes: env_parse("MAX_BATCH_SIZE_BYTES", DEFAULT_MAX_BATCH_SIZE_BYTES),
            normal_retention_days: env_parse(
                "NORMAL_RETENTION_DAYS",
                DEFAULT_NORMAL_RETENTION_DAYS,
            ),
            quarantine_retention_days: env_parse(
                "QUARANTINE_RETENTION_DAYS",
                DEFAULT_QUARANTINE_RETENTION_DAYS,
            ),
            purge_interval_secs: env_parse("PURGE_INTERVAL_SECS", DEFAULT_PURGE_INTERVAL_SECS),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("MAX_FILE_SIZE_BYTES must be greater than zero");
        }
        if self.max_batch_size_bytes < self.max_file_size_bytes {
            anyhow::bail!(
                "MAX_BATCH_SIZE_BYTES ({}) must be at least MAX_FILE_SIZE_BYTES ({})",
                self.max_batch_size_bytes,
                self.max_file_size_bytes
            );
        }
        if self.normal_retention_days <= 0 {
            anyhow::bail!("NORMAL_RETENTION_DAYS must be greater than zero");
        }
        if self.quarantine_retention_days <= 0 {
            anyhow::bail!("QUARANTINE_RETENTION_DAYS must be greater than zero");
        }
        if self.purge_interval_secs == 0 {
            anyhow::bail!("PURGE_INTERVAL_SECS must be greater than zero");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Per-file and batch size ceilings for the validation pipeline.
    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits {
            max_file_size_bytes: self.max_file_size_bytes,
            max_batch_size_bytes: self.max_batch_size_bytes,
        }
    }

    /// Retention window for normally stored files.
    pub fn normal_retention(&self) -> Duration {
        Duration::days(self.normal_retention_days)
    }

    /// Retention window for quarantined files.
    pub fn quarantine_retention(&self) -> Duration {
        Duration::days(self.quarantine_retention_days)
    }

    /// Interval between purge sweeps.
    pub fn purge_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.purge_interval_secs)
    }
}
