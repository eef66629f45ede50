//! Rich query execution and result materialization.

use std::sync::Arc;

use filedger_store::{KeyValue, ScopedCursor, StateStore};

use crate::error::{RecordError, RecordResult};

/// Runs opaque query expressions against the state store.
///
/// The expression language belongs to the store; this type never parses it.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn StateStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Execute `expression` and return the matches as a JSON array.
    ///
    /// The store's cursor is closed before this returns, on success and on
    /// failure alike.
    pub fn query(&self, expression: &str) -> RecordResult<Vec<u8>> {
        if expression.is_empty() {
            return Err(RecordError::InvalidArgument(
                "query expression must be a non-empty string".into(),
            ));
        }
        tracing::debug!(query = expression, "executing rich query");

        let cursor = self
            .store
            .get_query_result(expression)
            .map_err(RecordError::QueryExecution)?;
        let mut cursor = ScopedCursor::new(cursor);

        let result = materialize(cursor.by_ref().map(|r| r.map_err(RecordError::QueryExecution)));
        let closed = cursor.finish();
        let buffer = result?;
        closed.map_err(RecordError::QueryExecution)?;

        tracing::debug!(bytes = buffer.len(), "query result materialized");
        Ok(buffer)
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor").finish_non_exhaustive()
    }
}

/// Assemble `[{"Key":k1,"Record":v1},...]` from a stream of entries.
///
/// Keys are written as JSON strings. Values are copied verbatim: they are
/// expected to be JSON documents already. Stops at the first error.
pub fn materialize<I>(entries: I) -> RecordResult<Vec<u8>>
where
    I: IntoIterator<Item = RecordResult<KeyValue>>,
{
    let mut buffer = Vec::with_capacity(64);
    buffer.push(b'[');

    let mut first = true;
    for entry in entries {
        let entry = entry?;
        if !first {
            buffer.push(b',');
        }
        first = false;

        buffer.extend_from_slice(br#"{"Key":"#);
        serde_json::to_writer(&mut buffer, &entry.key).map_err(|e| {
            RecordError::Serialization {
                name: entry.key.clone(),
                reason: e.to_string(),
            }
        })?;
        buffer.extend_from_slice(br#","Record":"#);
        buffer.extend_from_slice(&entry.value);
        buffer.push(b'}');
    }

    buffer.push(b']');
    Ok(buffer)
}
