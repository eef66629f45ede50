//! Fault injection for record tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use filedger_store::{
    InMemoryStateStore, KeyValue, QueryCursor, StateStore, StoreError, StoreResult,
};
use filedger_types::CompositeKey;

/// Which store calls should fail.
#[derive(Clone, Debug, Default)]
pub struct Faults {
    pub fail_get: bool,
    pub fail_put_primary: bool,
    pub fail_put_index: bool,
    pub fail_del_primary: bool,
    pub fail_del_index: bool,
    pub fail_query: bool,
    /// Fail the cursor's `next()` after this many successful calls.
    pub fail_cursor_after: Option<usize>,
}

/// An [`InMemoryStateStore`] that fails on demand and counts calls.
pub struct FaultyStore {
    pub inner: InMemoryStateStore,
    faults: Mutex<Faults>,
    pub puts: AtomicUsize,
    pub closes: Arc<AtomicUsize>,
}

impl FaultyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryStateStore::new(),
            faults: Mutex::new(Faults::default()),
            puts: AtomicUsize::new(0),
            closes: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn set_faults(&self, faults: Faults) {
        *self.faults.lock().unwrap() = faults;
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn faults(&self) -> Faults {
        self.faults.lock().unwrap().clone()
    }

    fn wrap(&self, inner: Box<dyn QueryCursor>) -> Box<dyn QueryCursor> {
        Box::new(FaultyCursor {
            inner,
            fail_after: self.faults().fail_cursor_after,
            yielded: 0,
            closes: Arc::clone(&self.closes),
        })
    }
}

fn injected() -> StoreError {
    StoreError::Backend("injected failure".into())
}

impl StateStore for FaultyStore {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if self.faults().fail_get {
            return Err(injected());
        }
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let faults = self.faults();
        let is_index = CompositeKey::is_composite(key);
        if (is_index && faults.fail_put_index) || (!is_index && faults.fail_put_primary) {
            return Err(injected());
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put_state(key, value)
    }

    fn del_state(&self, key: &str) -> StoreResult<()> {
        let faults = self.faults();
        let is_index = CompositeKey::is_composite(key);
        if (is_index && faults.fail_del_index) || (!is_index && faults.fail_del_primary) {
            return Err(injected());
        }
        self.inner.del_state(key)
    }

    fn get_query_result(&self, query: &str) -> StoreResult<Box<dyn QueryCursor>> {
        if self.faults().fail_query {
            return Err(injected());
        }
        let cursor = self.inner.get_query_result(query)?;
        Ok(self.wrap(cursor))
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> StoreResult<Box<dyn QueryCursor>> {
        let cursor = self.inner.get_state_by_range(start, end)?;
        Ok(self.wrap(cursor))
    }
}

struct FaultyCursor {
    inner: Box<dyn QueryCursor>,
    fail_after: Option<usize>,
    yielded: usize,
    closes: Arc<AtomicUsize>,
}

impl QueryCursor for FaultyCursor {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn next(&mut self) -> StoreResult<KeyValue> {
        if self.fail_after == Some(self.yielded) {
            return Err(injected());
        }
        self.yielded += 1;
        self.inner.next()
    }

    fn close(&mut self) -> StoreResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close()
    }
}
