//! Error types for the reconciliation engine.

use crate::identity::PathTemplate;
use ncserver_model::ListError;
use ncserver_types::{ChangeOperation, ClientName, EndpointTarget};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Result type for runtime mutations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors a runtime reports for a rejected mutation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(EndpointTarget),

    #[error("endpoint already exists: {0}")]
    DuplicateEndpoint(EndpointTarget),

    #[error("unknown call-home client: {0}")]
    UnknownClient(ClientName),

    #[error("call-home client already exists: {0}")]
    DuplicateClient(ClientName),

    #[error("host key list: {0}")]
    HostKeys(#[from] ListError),

    #[error("runtime rejected {0}")]
    Rejected(String),
}

/// Errors that abort a change batch.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The change stream could not be opened or failed mid-iteration.
    #[error("change stream: {0}")]
    Stream(#[from] ncserver_types::Error),

    /// The changed node does not sit where its path template expects.
    #[error("cannot resolve owner of {path} ({template}): {reason}")]
    Identity {
        path: String,
        template: PathTemplate,
        reason: String,
    },

    /// The runtime rejected a mutation.
    #[error("runtime mutation failed: {0}")]
    Runtime(#[from] RuntimeError),

    /// A leaf value has the wrong type or cannot be converted.
    #[error("invalid value at {path}: {reason}")]
    InvalidValue { path: String, reason: String },

    /// An operation the field cannot take, e.g. modifying a list entry.
    #[error("unexpected {operation} at {path}")]
    UnexpectedOperation {
        path: String,
        operation: ChangeOperation,
    },

    /// A list entry without its `name` key.
    #[error("list entry at {path} has no name key")]
    MissingKey { path: String },
}

impl ReconcileError {
    /// Maps the failure to the single code reported back to the store.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Stream(_) => ErrorCode::OperationFailed,
            Self::InvalidValue { .. } => ErrorCode::InvalidArgument,
            Self::Identity { .. }
            | Self::Runtime(_)
            | Self::UnexpectedOperation { .. }
            | Self::MissingKey { .. } => ErrorCode::Internal,
        }
    }
}

/// Failure code handed back to the configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    Internal,
    InvalidArgument,
    OperationFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Internal => "internal error",
            Self::InvalidArgument => "invalid argument",
            Self::OperationFailed => "operation failed",
        };
        f.write_str(s)
    }
}

/// Errors loading a [`ReconcileConfig`](crate::ReconcileConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
