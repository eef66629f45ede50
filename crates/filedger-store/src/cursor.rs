//! Query cursors and scoped release.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::traits::QueryCursor;

/// One entry yielded by a query cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Cursor over a result set materialized when the query ran.
#[derive(Debug)]
pub struct VecCursor {
    entries: std::vec::IntoIter<KeyValue>,
    closed: bool,
}

impl VecCursor {
    pub fn new(entries: Vec<KeyValue>) -> Self {
        Self {
            entries: entries.into_iter(),
            closed: false,
        }
    }
}

impl QueryCursor for VecCursor {
    fn has_next(&self) -> bool {
        !self.closed && !self.entries.as_slice().is_empty()
    }

    fn next(&mut self) -> StoreResult<KeyValue> {
        if self.closed {
            return Err(StoreError::CursorClosed);
        }
        self.entries.next().ok_or(StoreError::CursorExhausted)
    }

    fn close(&mut self) -> StoreResult<()> {
        self.closed = true;
        // Drop the remaining entries now rather than with the cursor.
        self.entries = Vec::new().into_iter();
        Ok(())
    }
}

/// Owns a [`QueryCursor`] and closes it exactly once.
///
/// Iterating yields `StoreResult<KeyValue>` until the cursor reports no more
/// entries. Call [`ScopedCursor::finish`] to close explicitly and observe
/// the close error; otherwise the cursor is closed on drop and a close
/// failure is logged.
pub struct ScopedCursor {
    inner: Option<Box<dyn QueryCursor>>,
}

impl ScopedCursor {
    pub fn new(cursor: Box<dyn QueryCursor>) -> Self {
        Self {
            inner: Some(cursor),
        }
    }

    /// Close the cursor now, returning any error from the backend.
    pub fn finish(mut self) -> StoreResult<()> {
        self.release()
    }

    fn release(&mut self) -> StoreResult<()> {
        match self.inner.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl Iterator for ScopedCursor {
    type Item = StoreResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.inner.as_mut()?;
        if !cursor.has_next() {
            return None;
        }
        Some(cursor.next())
    }
}

impl Drop for ScopedCursor {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(error = %err, "failed to close query cursor");
        }
    }
}

impl std::fmt::Debug for ScopedCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedCursor")
            .field("open", &self.inner.is_some())
            .finish()
    }
}
