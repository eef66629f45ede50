//! Foundation types for the file ledger.
//!
//! This crate provides the record and key types shared by every other
//! filedger crate. It has no knowledge of the backing state store.
//!
//! # Key Types
//!
//! - [`FileRecord`] -- Metadata for one managed file, keyed by name
//! - [`CompositeKey`] -- Builder and splitter for composite index keys
//! - [`KeyError`] -- Failure to encode or decode a composite key

pub mod error;
pub mod key;
pub mod record;

pub use error::{KeyError, KeyResult};
pub use key::{CompositeKey, COMPOSITE_KEY_NAMESPACE, MAX_UNICODE_RUNE};
pub use record::{FileRecord, HASH_NAME_INDEX, INDEX_SENTINEL};
