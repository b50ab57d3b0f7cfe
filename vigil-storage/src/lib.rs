//! # vigil-storage
//!
//! SQLite persistence for CVE and phishing records. Exposes
//! [`StorageEngine`], which implements `vigil_core::ThreatStore`:
//! keyword search over both record sets plus the derived aggregates
//! (severity distribution, vendor ranking, time trends).
//!
//! Records are written by the external collector; everything here apart
//! from the two insert methods is read-only.

pub mod engine;
pub mod pool;
pub mod queries;
pub mod schema;

pub use engine::StorageEngine;

use vigil_core::errors::{StorageError, VigilError};

/// Map a rusqlite (or other) error message into the storage error type.
pub(crate) fn to_storage_err(message: String) -> VigilError {
    VigilError::Storage(StorageError::Sqlite { message })
}
