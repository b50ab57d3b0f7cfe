//! SQLite connection handling: one mutex-guarded writer for ingestion,
//! plus a small round-robin pool of read-only connections for queries.
//! The engine owns both directly.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;
