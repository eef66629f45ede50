//! Persisting the in-memory world state between CLI invocations.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use filedger_store::{InMemoryStateStore, StateSnapshot};

/// Load the state at `path`. A missing file is an empty state.
pub fn load_store(path: &Path) -> anyhow::Result<InMemoryStateStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting empty");
        return Ok(InMemoryStateStore::new());
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = StateSnapshot::from_json(&bytes)
        .with_context(|| format!("corrupt state file {}", path.display()))?;
    Ok(InMemoryStateStore::from_snapshot(snapshot))
}

/// Write `store` to `path`, replacing the file atomically.
pub fn save_store(store: &InMemoryStateStore, path: &Path) -> anyhow::Result<()> {
    let bytes = store.snapshot()?.to_json()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(&bytes)?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), keys = store.len(), "state saved");
    Ok(())
}
