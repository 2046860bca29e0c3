//! Reconciliation engine for ncserver.
//!
//! The configuration store hands over one change batch per changed subtree.
//! [`Reconciler::reconcile`] pulls the batch, resolves the owning endpoint or
//! call-home client of every event through a [`PathTemplate`], and issues the
//! matching mutation against a [`ServerRuntime`]:
//!
//! - scalar leaves are set, and restored to their documented default on delete
//! - host-key list entries are appended, removed and re-anchored in order
//! - authentication methods are folded into the endpoint's [`AuthMethodSet`]
//!   one flag per event
//! - endpoint and call-home client list entries create and tear down runtime
//!   entities
//!
//! A batch either applies fully or stops at the first fatal error. Mutations
//! issued before the failure stand; rolling back is the store's job.
//!
//! [`AuthMethodSet`]: ncserver_model::AuthMethodSet

mod appliers;
pub mod config;
pub mod error;
pub mod identity;
mod lifecycle;
pub mod memory;
pub mod reconciler;
pub mod runtime;
pub mod subtree;

pub use config::ReconcileConfig;
pub use error::{ConfigError, ErrorCode, ReconcileError, ReconcileResult, RuntimeError, RuntimeResult};
pub use identity::{resolve_client, resolve_endpoint, resolve_owner, Owner, PathTemplate};
pub use memory::{ClientState, EndpointState, MemoryServer};
pub use reconciler::{BatchSummary, Outcome, Reconciler, ReplayStep};
pub use runtime::ServerRuntime;
pub use subtree::Subtree;
