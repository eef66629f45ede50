use filedger_types::CompositeKey;

use crate::cursor::KeyValue;
use crate::error::StoreResult;

/// A lazy, forward-only result set returned by a state query.
///
/// Cursors are single-pass and cannot be restarted. They hold backend
/// resources until [`QueryCursor::close`] is called; wrap them in a
/// [`crate::ScopedCursor`] to guarantee that happens on every exit path.
pub trait QueryCursor: Send {
    /// Returns `true` if another entry is available.
    fn has_next(&self) -> bool;

    /// Advance and return the next entry.
    fn next(&mut self) -> StoreResult<KeyValue>;

    /// Release backend resources held by the cursor.
    fn close(&mut self) -> StoreResult<()>;
}

/// Versioned key-value world state provided by the ledger platform.
///
/// Implementations must be thread-safe (`Send + Sync`). Ordering between
/// concurrent writers is the backend's concern; callers that read then
/// write get exactly the isolation the backend provides and nothing more.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any existing value.
    ///
    /// Empty values are rejected.
    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn del_state(&self, key: &str) -> StoreResult<()>;

    /// Run a rich query. The expression language belongs to the backend.
    fn get_query_result(&self, query: &str) -> StoreResult<Box<dyn QueryCursor>>;

    /// Iterate keys in `[start, end)` in key order.
    fn get_state_by_range(&self, start: &str, end: &str) -> StoreResult<Box<dyn QueryCursor>>;

    /// Build a composite key for a secondary index.
    fn create_composite_key(&self, index_name: &str, attributes: &[&str]) -> StoreResult<String> {
        Ok(CompositeKey::build(index_name, attributes)?)
    }

    /// Split a composite key back into its index name and attributes.
    fn split_composite_key(&self, key: &str) -> StoreResult<(String, Vec<String>)> {
        Ok(CompositeKey::parse(key)?.into_parts())
    }

    /// Iterate every composite key of `index_name` whose leading attributes
    /// equal `attributes`.
    fn get_state_by_partial_composite_key(
        &self,
        index_name: &str,
        attributes: &[&str],
    ) -> StoreResult<Box<dyn QueryCursor>> {
        let start = self.create_composite_key(index_name, attributes)?;
        let end = CompositeKey::range_end(&start);
        self.get_state_by_range(&start, &end)
    }

    /// Write several entries.
    ///
    /// The default implementation calls `put_state()` for each entry and is
    /// not atomic. Backends with multi-key transactions may override it.
    fn put_batch(&self, entries: &[(&str, &[u8])]) -> StoreResult<()> {
        entries
            .iter()
            .try_for_each(|(key, value)| self.put_state(key, value))
    }
}
