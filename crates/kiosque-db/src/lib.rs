//! Kiosque database layer
//!
//! sqlx/Postgres repositories for stored-file and quarantine records, exposed
//! behind the record-store traits so services stay decoupled from Postgres.

pub mod db;

pub use db::{
    run_migrations, FileRecordStore, FileRepository, QuarantineRecordStore, QuarantineRepository,
};
