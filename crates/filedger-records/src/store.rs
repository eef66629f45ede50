use std::sync::Arc;

use filedger_store::StateStore;
use filedger_types::{FileRecord, COMPOSITE_KEY_NAMESPACE};

use crate::error::{RecordError, RecordResult};
use crate::index::IndexMaintainer;

/// Creates, reads and deletes file records.
///
/// Every mutation touches two keys: the record under its name and its entry
/// in the `hash~name` index. See the crate docs for what happens when the
/// second write fails.
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn StateStore>,
    index: IndexMaintainer,
}

impl RecordStore {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let index = IndexMaintainer::new(Arc::clone(&store));
        Self { store, index }
    }

    /// The index maintained alongside the records.
    pub fn index(&self) -> &IndexMaintainer {
        &self.index
    }

    /// Store a new record.
    ///
    /// `hash` and `url` are lowercased. Fails with
    /// [`RecordError::DuplicateRecord`] if `name` is already taken, leaving
    /// the existing record untouched.
    pub fn create(&self, name: &str, hash: &str, url: &str) -> RecordResult<FileRecord> {
        require_non_empty("file name", name)?;
        require_non_empty("file hash", hash)?;
        require_non_empty("file url", url)?;
        if name.starts_with(COMPOSITE_KEY_NAMESPACE) {
            return Err(RecordError::InvalidArgument(
                "file name must not start with U+0000".into(),
            ));
        }

        if self.read_raw_opt(name)?.is_some() {
            tracing::debug!(name, "file name already taken");
            return Err(RecordError::DuplicateRecord {
                name: name.to_string(),
            });
        }

        let record = FileRecord::new(name, hash, url);
        let bytes = record.to_json().map_err(|e| RecordError::Serialization {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        // Reject an unencodable hash before anything is written.
        self.index.index_key(&record)?;

        self.store
            .put_state(name, &bytes)
            .map_err(|source| RecordError::StoreWrite {
                key: name.to_string(),
                source,
            })?;

        if let Err(err) = self.index.insert(&record) {
            tracing::warn!(
                name,
                hash = %record.hash,
                error = %err,
                "record stored without its hash index entry"
            );
            return Err(err);
        }

        tracing::info!(name, hash = %record.hash, "file record created");
        Ok(record)
    }

    /// Read and decode the record stored under `name`.
    pub fn read(&self, name: &str) -> RecordResult<FileRecord> {
        let bytes = self.read_raw(name)?;
        FileRecord::from_json(&bytes).map_err(|e| RecordError::Deserialization {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read the stored JSON for `name` without decoding it.
    pub fn read_raw(&self, name: &str) -> RecordResult<Vec<u8>> {
        self.read_raw_opt(name)?
            .ok_or_else(|| RecordError::NotFound {
                name: name.to_string(),
            })
    }

    /// Delete the record under `name` and its index entry.
    ///
    /// The index key is rebuilt from the stored record, not from caller
    /// input. Returns the record that was removed.
    pub fn delete(&self, name: &str) -> RecordResult<FileRecord> {
        require_non_empty("file name", name)?;
        let record = self.read(name)?;

        self.store
            .del_state(name)
            .map_err(|source| RecordError::StoreDelete {
                key: name.to_string(),
                source,
            })?;

        if let Err(err) = self.index.remove(&record) {
            tracing::warn!(
                name,
                hash = %record.hash,
                error = %err,
                "record deleted but its hash index entry remains"
            );
            return Err(err);
        }

        tracing::info!(name, hash = %record.hash, "file record deleted");
        Ok(record)
    }

    fn read_raw_opt(&self, name: &str) -> RecordResult<Option<Vec<u8>>> {
        self.store
            .get_state(name)
            .map_err(|source| RecordError::StoreRead {
                key: name.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("index", &self.index)
            .finish()
    }
}

fn require_non_empty(what: &str, value: &str) -> RecordResult<()> {
    if value.is_empty() {
        return Err(RecordError::InvalidArgument(format!(
            "{what} must be a non-empty string"
        )));
    }
    Ok(())
}
