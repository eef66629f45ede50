//! Error types for record operations.

use filedger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during record operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A record with this name already exists.
    #[error("file already exists: {name}")]
    DuplicateRecord { name: String },

    /// No record is stored under this name.
    #[error("file does not exist: {name}")]
    NotFound { name: String },

    /// The record could not be encoded for storage.
    #[error("failed to encode record {name}: {reason}")]
    Serialization { name: String, reason: String },

    /// The stored bytes could not be decoded into a record.
    #[error("failed to decode record {name}: {reason}")]
    Deserialization { name: String, reason: String },

    /// A composite index key could not be built or split.
    #[error("failed to encode index key: {0}")]
    Encoding(#[source] StoreError),

    #[error("failed to get state for {key:?}: {source}")]
    StoreRead {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to put state for {key:?}: {source}")]
    StoreWrite {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to delete state for {key:?}: {source}")]
    StoreDelete {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The store rejected the query or the cursor failed to advance.
    #[error("query execution failed: {0}")]
    QueryExecution(#[source] StoreError),
}

/// Convenience type alias for record operations.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
