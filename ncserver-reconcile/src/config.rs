//! Engine configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the [`Reconciler`](crate::Reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Toggle password authentication on the `password` leaf.
    ///
    /// Off by default: only the `passsword` spelling toggles the flag, and a
    /// `password` leaf is logged and left alone.
    pub honor_password_leaf: bool,
    /// Dispatch an outbound connection when a call-home client is created.
    pub dispatch_call_home: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            honor_password_leaf: false,
            dispatch_call_home: true,
        }
    }
}

impl ReconcileConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
