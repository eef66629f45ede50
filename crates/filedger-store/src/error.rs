use filedger_types::KeyError;

/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// An empty value was written. Empty values read back as absent keys.
    #[error("refusing to store empty value under {key:?}")]
    EmptyValue { key: String },

    /// A composite key could not be built or split.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// The rich query expression was rejected by the query engine.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// `next()` was called on a cursor with no remaining entries.
    #[error("query cursor exhausted")]
    CursorExhausted,

    /// The cursor was used after `close()`.
    #[error("query cursor already closed")]
    CursorClosed,

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("state lock poisoned")]
    LockPoisoned,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
