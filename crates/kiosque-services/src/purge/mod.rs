//! Purge service
//!
//! Periodic retention sweep over both file tracks. Normal uploads and
//! quarantined files age out on independent windows; one sweep handles both.

pub mod service;

pub use service::{PurgeReport, PurgeService};
