use serde::{Deserialize, Serialize};

/// Name of the secondary index mapping a content hash to file names.
pub const HASH_NAME_INDEX: &str = "hash~name";

/// Value stored under every index key.
///
/// Only the key carries meaning. The value must still be non-empty: the
/// state store treats an empty value as a deleted key.
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

/// Metadata for one managed file.
///
/// Stored as JSON under its `name`. `hash` and `url` are lowercased on
/// construction so lookups and index keys compare case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "FileName")]
    pub name: String,
    #[serde(rename = "FileHash")]
    pub hash: String,
    #[serde(rename = "FileUrl")]
    pub url: String,
}

impl FileRecord {
    /// Create a record, normalizing `hash` and `url` to lowercase.
    pub fn new(name: impl Into<String>, hash: &str, url: &str) -> Self {
        Self {
            name: name.into(),
            hash: hash.to_lowercase(),
            url: url.to_lowercase(),
        }
    }

    /// Serialize to the stored JSON form.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Parse a stored JSON value.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Attribute values for this record's `hash~name` index key.
    pub fn index_attributes(&self) -> [&str; 2] {
        [self.hash.as_str(), self.name.as_str()]
    }
}
