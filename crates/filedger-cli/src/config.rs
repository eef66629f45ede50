use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// CLI configuration, read from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiledgerConfig {
    /// Where the world state is persisted between invocations.
    pub state_file: PathBuf,
    /// Pretty-print JSON payloads.
    pub pretty: bool,
}

impl Default for FiledgerConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("filedger-state.json"),
            pretty: false,
        }
    }
}

impl FiledgerConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid filedger configuration")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = FiledgerConfig::default();
        assert_eq!(c.state_file, PathBuf::from("filedger-state.json"));
        assert!(!c.pretty);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = FiledgerConfig::from_toml("pretty = true").unwrap();
        assert!(c.pretty);
        assert_eq!(c.state_file, PathBuf::from("filedger-state.json"));
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(FiledgerConfig::from_toml("pretty = \"yes\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "state_file = \"/tmp/ledger.json\"").unwrap();
        let c = FiledgerConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(c.state_file, PathBuf::from("/tmp/ledger.json"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(FiledgerConfig::load(Path::new("/nonexistent/filedger.toml")).is_err());
    }
}
