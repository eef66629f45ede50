use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Serializable copy of a world state, used to persist the in-memory
/// backend between processes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub entries: BTreeMap<String, Vec<u8>>,
}

impl StateSnapshot {
    /// Encode the snapshot as JSON.
    pub fn to_json(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode a snapshot previously written by [`StateSnapshot::to_json`].
    pub fn from_json(bytes: &[u8]) -> StoreResult<Self> {
        let snapshot: Self =
            serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some((key, _)) = snapshot.entries.iter().find(|(_, v)| v.is_empty()) {
            return Err(StoreError::EmptyValue { key: key.clone() });
        }
        Ok(snapshot)
    }
}
