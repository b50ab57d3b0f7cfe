//! The single write connection. Ingestion volume is low (feed batches),
//! so one mutex-guarded writer is enough under WAL.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use vigil_core::errors::{StorageError, VigilResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A mutex-guarded read/write SQLite connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the writer for the given database path.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory writer (for testing).
    pub fn open_in_memory() -> VigilResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&Connection) -> VigilResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            StorageError::PoolPoisoned {
                details: e.to_string(),
            }
        })?;
        f(&guard)
    }
}
