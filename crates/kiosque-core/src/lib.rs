//! Kiosque Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! upload validation pipeline shared across all Kiosque components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    BatchValidation, FileStats, FileValidation, QuarantinedFile, Severity, StoredFile,
    UploadCandidate, ValidationError, ValidationErrorCode, ValidationResult,
};
pub use validation::{validate_batch, validate_file, UploadLimits};
