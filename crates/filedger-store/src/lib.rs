//! State store boundary for the file ledger.
//!
//! The ledger platform owns the real world state: versioning, consensus and
//! transaction ordering all live there. This crate only describes the
//! surface the record layer consumes, and ships one backend that satisfies
//! it in process.
//!
//! # Storage Backends
//!
//! All backends implement the [`StateStore`] trait:
//!
//! - [`InMemoryStateStore`] -- `BTreeMap`-based store for tests, the CLI and
//!   embedding
//!
//! # Design Rules
//!
//! 1. An empty value is indistinguishable from an absent key, so writing one
//!    is an error.
//! 2. Query results are handed out as [`QueryCursor`]s: forward-only,
//!    single-pass, and closed exactly once. [`ScopedCursor`] enforces the
//!    last rule for callers.
//! 3. Composite keys are built and split by the store so that backends may
//!    choose their own key layout; the default follows
//!    [`filedger_types::CompositeKey`].
//! 4. The store never interprets plain values except when evaluating a rich
//!    query, and all backend errors are propagated.

pub mod cursor;
pub mod error;
pub mod memory;
pub mod query;
pub mod snapshot;
pub mod traits;

pub use cursor::{KeyValue, ScopedCursor, VecCursor};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStateStore;
pub use query::RichQuery;
pub use snapshot::StateSnapshot;
pub use traits::{QueryCursor, StateStore};
