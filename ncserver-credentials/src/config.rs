//! Credential provider configuration.

use crate::error::{CredentialError, CredentialResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where accounts and their authorized keys live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// Account database in `passwd(5)` format.
    pub passwd_path: PathBuf,
    /// Authorized keys file, relative to each account's home directory.
    pub authorized_keys_file: PathBuf,
    /// Accept an offer matching any entry of the file, not just the first.
    pub match_any_authorized_key: bool,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            passwd_path: PathBuf::from("/etc/passwd"),
            authorized_keys_file: PathBuf::from(".ssh/authorized_keys"),
            match_any_authorized_key: false,
        }
    }
}

impl CredentialConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CredentialResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CredentialResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CredentialError::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Path of the authorized keys file under `home`.
    #[must_use]
    pub fn authorized_keys_path(&self, home: &Path) -> PathBuf {
        home.join(&self.authorized_keys_file)
    }
}
