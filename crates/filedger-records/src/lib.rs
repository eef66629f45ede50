//! File record lifecycle for the file ledger.
//!
//! This crate is the core of filedger. It owns every invariant that spans
//! more than one state key:
//!
//! - A [`FileRecord`] is stored under its name, and a sentinel entry is
//!   stored under the composite key `hash~name(hash, name)`. The two are
//!   created and removed together by [`RecordStore`], with
//!   [`IndexMaintainer`] owning the index side.
//! - Names are unique. Creation reads before it writes and refuses to
//!   overwrite.
//! - [`QueryExecutor`] drains store cursors into a JSON array of
//!   `{"Key": .., "Record": ..}` objects and always releases the cursor.
//!
//! # Consistency Window
//!
//! The state store is not assumed to offer multi-key transactions. The
//! primary write and the index write are therefore two steps. If the second
//! step fails the operation reports the error and the state keeps the
//! first step (a record with no index entry, or an index entry with no
//! record). Nothing is retried at this layer.

pub mod error;
pub mod index;
pub mod query;
pub mod registry;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::{RecordError, RecordResult};
pub use filedger_types::FileRecord;
pub use index::IndexMaintainer;
pub use query::{materialize, QueryExecutor};
pub use registry::FileRegistry;
pub use store::RecordStore;
