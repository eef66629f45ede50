use std::sync::Arc;

use filedger_store::{KeyValue, StateStore};

use crate::error::{RecordError, RecordResult};
use crate::query::{materialize, QueryExecutor};
use crate::store::RecordStore;

/// Records, index and queries over one shared state store.
#[derive(Clone, Debug)]
pub struct FileRegistry {
    records: RecordStore,
    queries: QueryExecutor,
}

impl FileRegistry {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            records: RecordStore::new(Arc::clone(&store)),
            queries: QueryExecutor::new(store),
        }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn queries(&self) -> &QueryExecutor {
        &self.queries
    }

    /// Every record with `hash`, found through the index, as the same JSON
    /// array [`QueryExecutor::query`] produces.
    ///
    /// An index entry whose record is gone (left by a failed delete) is
    /// skipped and logged.
    pub fn find_by_hash(&self, hash: &str) -> RecordResult<Vec<u8>> {
        if hash.is_empty() {
            return Err(RecordError::InvalidArgument(
                "file hash must be a non-empty string".into(),
            ));
        }
        let names = self.records.index().names_for_hash(hash)?;
        let entries = names.into_iter().filter_map(|name| {
            match self.records.read_raw(&name) {
                Ok(value) => Some(Ok(KeyValue::new(name, value))),
                Err(RecordError::NotFound { name }) => {
                    tracing::warn!(name = %name, hash, "index entry points at missing record");
                    None
                }
                Err(err) => Some(Err(err)),
            }
        });
        materialize(entries)
    }
}
