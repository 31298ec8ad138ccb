//! Error types for log store operations.

/// Errors that can occur while reading or writing a log store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The SQLite backend rejected a statement or could not open the file.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred (creating the database directory, usually).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's dispatcher has stopped, so the operation never ran or its
    /// result could not be delivered.
    #[error("log store is closed")]
    Closed,

    /// A worker task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(String),

    /// The durable store was constructed outside a tokio runtime.
    #[error("no tokio runtime available to drive the store")]
    NoRuntime,

    /// A stored row carries a timestamp chrono cannot represent.
    #[error("invalid timestamp {0} in stored row")]
    InvalidTimestamp(i64),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        StoreError::Worker(e.to_string())
    }
}
