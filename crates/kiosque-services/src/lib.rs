//! Kiosque services
//!
//! Service layer tying the pure validation pipeline to storage and metadata
//! records: the upload service (validate, persist, compensate), the
//! quarantine service (relocate suspect bytes), and the purge service
//! (periodic retention sweep over both tracks).

pub mod purge;
pub mod quarantine;
pub mod upload;

pub use purge::{PurgeReport, PurgeService};
pub use quarantine::QuarantineService;
pub use upload::{BatchOutcome, UploadOutcome, UploadService};
