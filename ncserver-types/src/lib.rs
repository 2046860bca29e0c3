//! Core type definitions for ncserver.
//!
//! This crate defines the store-facing types the reconciliation engine and the
//! credential provider are written against:
//! - Entity names (listening endpoints, call-home clients)
//! - The configuration data tree (arena of typed schema nodes)
//! - Change events and the change-stream contract
//! - A recorded change batch usable as an in-process change stream
//!
//! The configuration store itself is external. Everything here describes the
//! shape of what it hands over, not how it stores or commits data.

mod batch;
mod change;
mod datetime;
mod names;
pub mod schema;
mod selector;
mod tree;
mod value;

pub use batch::{ChangeBatch, RecordedChange};
pub use change::{ChangeEvent, ChangeOperation, ChangeSource, ChangeStream};
pub use datetime::datetime_to_epoch;
pub use names::{ClientName, EndpointName, EndpointTarget};
pub use selector::Selector;
pub use tree::{ConfigTree, NodeId, NodeRef};
pub use value::NodeValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("invalid subtree selector: {0}")]
    InvalidSelector(String),

    #[error("change iteration failed: {0}")]
    Iteration(String),

    #[error("malformed configuration tree: {0}")]
    MalformedTree(String),
}
