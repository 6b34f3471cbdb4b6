use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use kiosque_db::{FileRecordStore, QuarantineRecordStore};
use kiosque_storage::Storage;
use tokio::time::interval;

/// What a sweep removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PurgeReport {
    pub purged_count: u64,
    pub bytes_freed: u64,
}

impl PurgeReport {
    fn absorb(&mut self, other: PurgeReport) {
        self.purged_count += other.purged_count;
        self.bytes_freed += other.bytes_freed;
    }
}

/// Purge service
///
/// Sweeps both retention tracks: stored files past the normal window and
/// quarantined files past the quarantine window. A sweep only ever touches
/// files older than its window, so it can run concurrently with active
/// uploads. Per-file failures are logged and skipped; one bad file never
/// aborts the rest of the sweep.
#[derive(Clone)]
pub struct PurgeService {
    files: Arc<dyn FileRecordStore>,
    quarantine: Arc<dyn QuarantineRecordStore>,
    storage: Arc<dyn Storage>,
    normal_retention: Duration,
    quarantine_retention: Duration,
    sweep_interval: StdDuration,
}

impl PurgeService {
    pub fn new(
        files: Arc<dyn FileRecordStore>,
        quarantine: Arc<dyn QuarantineRecordStore>,
        storage: Arc<dyn Storage>,
        normal_retention: Duration,
        quarantine_retention: Duration,
        sweep_interval: StdDuration,
    ) -> Self {
        Self {
            files,
            quarantine,
            storage,
            normal_retention,
            quarantine_retention,
            sweep_interval,
        }
    }

    /// Start the background purge task. The first sweep runs immediately,
    /// then once per interval. Returns a JoinHandle for graceful shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(self.sweep_interval);

            loop {
                // First tick completes immediately: one sweep on process start.
                sweep_interval.tick().await;

                tracing::info!("Starting scheduled purge sweep");
                let report = self.run_sweep().await;
                tracing::info!(
                    purged_count = report.purged_count,
                    bytes_freed = report.bytes_freed,
                    "Purge sweep completed"
                );
            }
        })
    }

    /// Run one sweep over both tracks and report what was removed.
    pub async fn run_sweep(&self) -> PurgeReport {
        let now = Utc::now();
        let mut report = PurgeReport::default();

        report.absorb(self.sweep_stored_files(now - self.normal_retention).await);
        report.absorb(
            self.sweep_quarantined_files(now - self.quarantine_retention)
                .await,
        );

        report
    }

    async fn sweep_stored_files(&self, cutoff: chrono::DateTime<Utc>) -> PurgeReport {
        let mut report = PurgeReport::default();

        let expired = match self.files.get_expired(cutoff).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list expired files");
                return report;
            }
        };

        for file in expired {
            tracing::info!(
                file_id = %file.id,
                storage_key = %file.storage_key,
                created_at = %file.created_at,
                "Deleting expired file"
            );

            if let Err(e) = self.storage.delete(&file.storage_key).await {
                tracing::error!(
                    error = %e,
                    storage_key = %file.storage_key,
                    "Failed to delete file from storage, continuing with record deletion"
                );
            }

            match self.files.delete(file.id).await {
                Ok(_) => {
                    report.purged_count += 1;
                    report.bytes_freed += file.size_bytes.max(0) as u64;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        file_id = %file.id,
                        "Failed to delete file record"
                    );
                }
            }
        }

        report
    }

    async fn sweep_quarantined_files(&self, cutoff: chrono::DateTime<Utc>) -> PurgeReport {
        let mut report = PurgeReport::default();

        let expired = match self.quarantine.get_expired(cutoff).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list expired quarantined files");
                return report;
            }
        };

        for file in expired {
            tracing::info!(
                quarantine_id = %file.id,
                storage_key = %file.storage_key,
                quarantined_at = %file.quarantined_at,
                "Deleting expired quarantined file"
            );

            if let Err(e) = self.storage.delete(&file.storage_key).await {
                tracing::error!(
                    error = %e,
                    storage_key = %file.storage_key,
                    "Failed to delete quarantined file from storage, continuing with record deletion"
                );
            }

            match self.quarantine.delete(file.id).await {
                Ok(_) => {
                    report.purged_count += 1;
                    report.bytes_freed += file.size_bytes.max(0) as u64;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        quarantine_id = %file.id,
                        "Failed to delete quarantine record"
                    );
                }
            }
        }

        report
    }
}
