//! Round-robin pool of read-only connections. Under WAL, readers are
//! never blocked by the writer, so a handful of connections covers the
//! retrieval engine's concurrent fan-out. File-backed databases only:
//! separate in-memory connections are isolated databases, so in-memory
//! engines skip the pool and read through the writer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use vigil_core::errors::{StorageError, VigilResult};

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

/// Hard cap on readers; the query set is cheap and more buys nothing.
const MAX_READERS: usize = 8;

pub struct ReadPool {
    readers: Box<[Mutex<Connection>]>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `size` read-only connections (clamped to 1..=8) to the
    /// database at `path`.
    pub fn open(path: &Path, size: usize) -> VigilResult<Self> {
        let size = size.clamp(1, MAX_READERS);
        let mut readers = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            apply_read_pragmas(&conn)?;
            readers.push(Mutex::new(conn));
        }
        Ok(Self {
            readers: readers.into_boxed_slice(),
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader, round-robin.
    pub fn with_conn<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&Connection) -> VigilResult<T>,
    {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx].lock().map_err(|e| {
            StorageError::PoolPoisoned {
                details: e.to_string(),
            }
        })?;
        f(&guard)
    }
}
