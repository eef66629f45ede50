use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use filedger_types::CompositeKey;

use crate::cursor::{KeyValue, VecCursor};
use crate::error::{StoreError, StoreResult};
use crate::query::RichQuery;
use crate::snapshot::StateSnapshot;
use crate::traits::{QueryCursor, StateStore};

/// In-memory, BTreeMap-based world state.
///
/// Intended for tests, the CLI and embedding. Keys iterate in byte order, so
/// query and range results are deterministic. Cursors are materialized when
/// the query runs and are unaffected by later writes.
pub struct InMemoryStateStore {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
        }
    }

    /// Restore a store from a snapshot.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot.entries),
        }
    }

    /// Copy the current state into a snapshot.
    pub fn snapshot(&self) -> StoreResult<StateSnapshot> {
        Ok(StateSnapshot {
            entries: self.read()?.clone(),
        })
    }

    /// Number of keys currently stored, index entries included.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return all keys in key order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

fn reject_empty(key: &str, value: &[u8]) -> StoreResult<()> {
    if value.is_empty() {
        return Err(StoreError::EmptyValue {
            key: key.to_string(),
        });
    }
    Ok(())
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        reject_empty(key, value)?;
        self.write()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn del_state(&self, key: &str) -> StoreResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn get_query_result(&self, query: &str) -> StoreResult<Box<dyn QueryCursor>> {
        let query = RichQuery::parse(query)?;
        let state = self.read()?;
        let matches = state
            .iter()
            .filter(|(key, _)| !CompositeKey::is_composite(key))
            .filter(|(_, value)| query.matches(value))
            .take(query.limit().unwrap_or(usize::MAX))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();
        Ok(Box::new(VecCursor::new(matches)))
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> StoreResult<Box<dyn QueryCursor>> {
        if start > end {
            return Err(StoreError::Backend(format!(
                "range start {start:?} is after end {end:?}"
            )));
        }
        let state = self.read()?;
        let entries = state
            .range::<str, _>((
                std::ops::Bound::Included(start),
                std::ops::Bound::Excluded(end),
            ))
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();
        Ok(Box::new(VecCursor::new(entries)))
    }

    /// Applies every entry under one write lock, or none of them.
    fn put_batch(&self, entries: &[(&str, &[u8])]) -> StoreResult<()> {
        for (key, value) in entries {
            reject_empty(key, value)?;
        }
        let mut state = self.write()?;
        for (key, value) in entries {
            state.insert((*key).to_string(), value.to_vec());
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStateStore")
            .field("key_count", &self.len())
            .finish()
    }
}
