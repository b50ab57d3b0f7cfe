//! Error types for the Vigil workspace.
//!
//! Each subsystem gets its own thiserror enum; `VigilError` unifies them
//! for callers that cross subsystem boundaries.

mod retrieval_error;
mod storage_error;

pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Workspace-wide result alias.
pub type VigilResult<T> = Result<T, VigilError>;

/// Top-level error unifying all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}
