/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("schema setup failed: {reason}")]
    SchemaFailed { reason: String },

    #[error("connection pool lock poisoned: {details}")]
    PoolPoisoned { details: String },
}
