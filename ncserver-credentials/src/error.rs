//! Error types for credential lookups.

use std::path::PathBuf;
use thiserror::Error;

/// Credential-specific errors.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No host key with this name has a local definition.
    #[error("host key \"{0}\" not found")]
    HostKeyNotFound(String),

    /// The host key definition lacks a required leaf.
    #[error("host key \"{name}\" has no {missing}")]
    IncompleteHostKey { name: String, missing: &'static str },

    /// The algorithm identity is not in the supported table.
    #[error("unknown private key algorithm \"{0}\"")]
    UnknownAlgorithm(String),

    /// No account with this name exists.
    #[error("no account \"{0}\"")]
    UnknownAccount(String),

    /// An authorized key entry could not be decoded.
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration snapshot could not be loaded.
    #[error("invalid configuration snapshot: {0}")]
    Snapshot(#[from] ncserver_types::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CredentialError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
