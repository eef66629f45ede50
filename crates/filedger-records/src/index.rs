//! The `hash~name` secondary index.
//!
//! Every stored record owns exactly one index entry: the composite key
//! `hash~name(hash, name)` holding [`INDEX_SENTINEL`]. Scanning the index
//! by a hash prefix finds every record with that hash without touching the
//! primary entries.

use std::sync::Arc;

use filedger_store::{ScopedCursor, StateStore};
use filedger_types::{FileRecord, HASH_NAME_INDEX, INDEX_SENTINEL};

use crate::error::{RecordError, RecordResult};

/// Keeps index entries in step with record mutations.
#[derive(Clone)]
pub struct IndexMaintainer {
    store: Arc<dyn StateStore>,
}

impl IndexMaintainer {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// The composite key indexing `record`.
    pub fn index_key(&self, record: &FileRecord) -> RecordResult<String> {
        self.store
            .create_composite_key(HASH_NAME_INDEX, &record.index_attributes())
            .map_err(RecordError::Encoding)
    }

    /// Write the sentinel entry for `record`. Returns the index key.
    pub fn insert(&self, record: &FileRecord) -> RecordResult<String> {
        let key = self.index_key(record)?;
        self.store
            .put_state(&key, &INDEX_SENTINEL)
            .map_err(|source| RecordError::StoreWrite {
                key: key.clone(),
                source,
            })?;
        Ok(key)
    }

    /// Delete the entry for `record`. Returns the index key.
    pub fn remove(&self, record: &FileRecord) -> RecordResult<String> {
        let key = self.index_key(record)?;
        self.store
            .del_state(&key)
            .map_err(|source| RecordError::StoreDelete {
                key: key.clone(),
                source,
            })?;
        Ok(key)
    }

    /// Returns `true` if the entry for `record` exists.
    pub fn contains(&self, record: &FileRecord) -> RecordResult<bool> {
        let key = self.index_key(record)?;
        let value = self
            .store
            .get_state(&key)
            .map_err(|source| RecordError::StoreRead { key, source })?;
        Ok(value.is_some())
    }

    /// Names of every indexed record with `hash`, in key order.
    ///
    /// `hash` is lowercased first, matching how records are stored.
    pub fn names_for_hash(&self, hash: &str) -> RecordResult<Vec<String>> {
        let hash = hash.to_lowercase();
        let cursor = self
            .store
            .get_state_by_partial_composite_key(HASH_NAME_INDEX, &[hash.as_str()])
            .map_err(RecordError::QueryExecution)?;
        let mut cursor = ScopedCursor::new(cursor);

        let mut names = Vec::new();
        for entry in cursor.by_ref() {
            let entry = entry.map_err(RecordError::QueryExecution)?;
            let (index, mut attributes) = self
                .store
                .split_composite_key(&entry.key)
                .map_err(RecordError::Encoding)?;
            if index != HASH_NAME_INDEX || attributes.len() != 2 {
                return Err(RecordError::Deserialization {
                    name: format!("{:?}", entry.key),
                    reason: "not a hash~name index entry".into(),
                });
            }
            names.extend(attributes.pop());
        }
        cursor.finish().map_err(RecordError::QueryExecution)?;

        tracing::debug!(hash = %hash, matches = names.len(), "scanned hash index");
        Ok(names)
    }
}

impl std::fmt::Debug for IndexMaintainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexMaintainer")
            .field("index", &HASH_NAME_INDEX)
            .finish()
    }
}
