use thiserror::Error;

/// Errors produced while building or splitting composite keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("index name must not be empty")]
    EmptyIndexName,

    #[error("composite key attribute {position} contains reserved character {found:?}")]
    ReservedCharacter { position: usize, found: char },

    #[error("index name contains reserved character {0:?}")]
    ReservedInIndexName(char),

    #[error("key is not in the composite key namespace: {0:?}")]
    NotComposite(String),

    #[error("malformed composite key: {0}")]
    Malformed(String),
}

/// Result alias for key operations.
pub type KeyResult<T> = Result<T, KeyError>;
