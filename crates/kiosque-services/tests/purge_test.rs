//! Retention sweep tests: both tracks, independent windows, per-file failures.

mod helpers;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use helpers::{jpeg_bytes, InMemoryFileStore, InMemoryQuarantineStore};
use kiosque_core::models::{QuarantinedFile, StoredFile};
use kiosque_db::{FileRecordStore, QuarantineRecordStore};
use kiosque_services::PurgeService;
use kiosque_storage::{LocalStorage, Storage};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    storage: Arc<LocalStorage>,
    files: Arc<InMemoryFileStore>,
    quarantine: Arc<InMemoryQuarantineStore>,
    service: PurgeService,
}

async fn fixture_with(files: InMemoryFileStore) -> Fixture {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(
        LocalStorage::new(dir.path(), "http://localhost:3000/files".to_string())
            .await
            .unwrap(),
    );
    let files = Arc::new(files);
    let quarantine = Arc::new(InMemoryQuarantineStore::new());

    let service = PurgeService::new(
        files.clone(),
        quarantine.clone(),
        storage.clone(),
        Duration::days(90),
        Duration::days(30),
        StdDuration::from_secs(86_400),
    );

    Fixture {
        _dir: dir,
        storage,
        files,
        quarantine,
        service,
    }
}

async fn fixture() -> Fixture {
    fixture_with(InMemoryFileStore::new()).await
}

/// Insert a stored file record with bytes on disk, back-dated by `age_days`.
async fn seed_stored(fx: &Fixture, key: &str, age_days: i64) -> StoredFile {
    let payload = jpeg_bytes();
    fx.storage
        .upload_with_key(key, payload.clone(), "image/jpeg")
        .await
        .unwrap();

    let mut file = StoredFile::new(
        key.to_string(),
        "photo.jpg".to_string(),
        "image/jpeg".to_string(),
        payload.len() as i64,
        None,
    );
    file.created_at = Utc::now() - Duration::days(age_days);
    fx.files.insert(&file).await.unwrap();
    file
}

/// Insert a quarantine record with bytes on disk, back-dated by `age_days`.
async fn seed_quarantined(fx: &Fixture, key: &str, age_days: i64) -> QuarantinedFile {
    let payload = jpeg_bytes();
    fx.storage
        .upload_with_key(key, payload.clone(), "application/octet-stream")
        .await
        .unwrap();

    let mut file = QuarantinedFile::new(
        key.to_string(),
        "photo.jpg".to_string(),
        "SUSPICIOUS_CONTENT: embedded JavaScript detected".to_string(),
        payload.len() as i64,
    );
    file.quarantined_at = Utc::now() - Duration::days(age_days);
    fx.quarantine.insert(&file).await.unwrap();
    file
}

#[tokio::test]
async fn test_expired_stored_file_is_purged_and_fresh_one_kept() {
    let fx = fixture().await;
    let expired = seed_stored(&fx, "uploads/expired.jpg", 91).await;
    let fresh = seed_stored(&fx, "uploads/fresh.jpg", 1).await;

    let report = fx.service.run_sweep().await;

    assert_eq!(report.purged_count, 1);
    assert_eq!(report.bytes_freed, expired.size_bytes as u64);
    assert!(!fx.files.contains(expired.id));
    assert!(fx.files.contains(fresh.id));
    assert!(!fx.storage.exists(&expired.storage_key).await.unwrap());
    assert!(fx.storage.exists(&fresh.storage_key).await.unwrap());
}

#[tokio::test]
async fn test_quarantine_ages_out_on_its_shorter_window() {
    let fx = fixture().await;
    // 45 days: expired on the 30-day quarantine track, not on the 90-day
    // normal track.
    let stored = seed_stored(&fx, "uploads/photo.jpg", 45).await;
    let quarantined = seed_quarantined(&fx, "quarantine/suspect", 45).await;

    let report = fx.service.run_sweep().await;

    assert_eq!(report.purged_count, 1);
    assert!(fx.files.contains(stored.id));
    assert_eq!(fx.quarantine.list().await.unwrap().len(), 0);
    assert!(!fx.storage.exists(&quarantined.storage_key).await.unwrap());
}

#[tokio::test]
async fn test_quarantine_inside_window_is_kept() {
    let fx = fixture().await;
    seed_quarantined(&fx, "quarantine/recent", 29).await;

    let report = fx.service.run_sweep().await;

    assert_eq!(report.purged_count, 0);
    assert_eq!(report.bytes_freed, 0);
    assert_eq!(fx.quarantine.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_bytes_still_remove_the_record() {
    let fx = fixture().await;
    // Record exists but the bytes were never written (or already lost).
    let mut orphan = StoredFile::new(
        "uploads/gone.jpg".to_string(),
        "gone.jpg".to_string(),
        "image/jpeg".to_string(),
        1024,
        None,
    );
    orphan.created_at = Utc::now() - Duration::days(120);
    fx.files.insert(&orphan).await.unwrap();

    let survivor = seed_stored(&fx, "uploads/also-old.jpg", 120).await;

    let report = fx.service.run_sweep().await;

    assert_eq!(report.purged_count, 2);
    assert!(!fx.files.contains(orphan.id));
    assert!(!fx.files.contains(survivor.id));
}

#[tokio::test]
async fn test_record_delete_failure_does_not_abort_the_other_track() {
    let fx = fixture_with(InMemoryFileStore::failing_deletes()).await;
    let stuck = seed_stored(&fx, "uploads/stuck.jpg", 120).await;
    let quarantined = seed_quarantined(&fx, "quarantine/old", 40).await;

    let report = fx.service.run_sweep().await;

    // The stored-file record could not be removed and is not counted, but the
    // quarantine track still gets swept.
    assert_eq!(report.purged_count, 1);
    assert_eq!(report.bytes_freed, quarantined.size_bytes as u64);
    assert!(fx.files.contains(stuck.id));
    assert_eq!(fx.quarantine.list().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_sweep_with_nothing_expired_reports_zero() {
    let fx = fixture().await;
    seed_stored(&fx, "uploads/new.jpg", 0).await;

    let report = fx.service.run_sweep().await;

    assert_eq!(report.purged_count, 0);
    assert_eq!(report.bytes_freed, 0);
    assert_eq!(fx.files.len(), 1);
}
