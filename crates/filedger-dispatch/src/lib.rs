//! Operation router for the file ledger.
//!
//! The host ledger invokes a function by name with a list of string
//! arguments. [`Router`] maps those names to handlers over a
//! [`filedger_records::FileRegistry`] and folds every outcome into a
//! [`Response`]. A router is an ordinary value: build it once at startup and
//! pass it to whatever drives invocations.

pub mod handler;
pub mod response;
pub mod router;

pub use handler::{DELETE_FILE, FIND_BY_HASH, INIT_FILE, QUERY_FILE, READ_FILE};
pub use response::{Response, Status};
pub use router::{Handler, Router};
