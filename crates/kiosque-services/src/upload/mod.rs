//! Upload service
//!
//! Orchestrates the per-request pipeline: validate → quarantine or store →
//! record metadata, with a compensating delete when the metadata write fails
//! after bytes were persisted.

pub mod service;
pub mod types;

pub use service::UploadService;
pub use types::{BatchOutcome, UploadOutcome};
