/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("query task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
