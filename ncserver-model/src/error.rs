use thiserror::Error;

/// Errors from ordered host-key list maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("host key already listed: {0}")]
    Duplicate(String),

    #[error("host key not listed: {0}")]
    NotFound(String),

    #[error("move anchor not listed: {0}")]
    AnchorNotFound(String),

    #[error("host key cannot be anchored to itself: {0}")]
    SelfAnchor(String),
}

/// Errors from parsing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown start-with value: {0}")]
    UnknownStartWith(String),

    #[error("unknown authentication method flags: {0:#04x}")]
    UnknownAuthBits(u8),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
