//! Kiosque storage backends
//!
//! Defines the [`Storage`] trait the upload pipeline writes through and the
//! local-filesystem implementation. Storage keys live in two disjoint key
//! spaces: `uploads/` for accepted files and `quarantine/` for suspect ones;
//! nothing in the normal read path ever resolves a quarantine key.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::{
    extension_for_mime, generate_quarantine_key, generate_upload_key, QUARANTINE_PREFIX,
    UPLOAD_PREFIX,
};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
