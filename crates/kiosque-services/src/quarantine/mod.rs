//! Quarantine service
//!
//! Relocates suspect bytes into the isolated quarantine key space and records
//! the reason. Quarantine is a one-way transition; the only exit is the purge
//! sweep.

pub mod service;

pub use service::QuarantineService;
