//! Runtime-side value types for ncserver.
//!
//! These are the pieces of live server state the reconciliation engine
//! mutates, independent of any particular runtime:
//!
//! - [`AuthMethodSet`]: SSH client authentication methods as a flag set
//! - [`HostKeyList`]: ordered host-key names with insert/remove/move semantics
//! - [`KeepaliveParams`], [`AuthLimits`], [`PeriodicParams`], [`ReconnectStrategy`]:
//!   transport and call-home parameters with their documented defaults

mod auth_methods;
mod error;
mod host_key_list;
mod params;

pub use auth_methods::{AuthMethod, AuthMethodSet};
pub use error::{ListError, ModelError, ModelResult};
pub use host_key_list::HostKeyList;
pub use params::{
    AuthLimits, ConnectionType, KeepaliveParams, KeepaliveUpdate, PeriodicParams,
    ReconnectStrategy, StartWith, TransportKind, DEFAULT_ANCHOR_TIME, DEFAULT_AUTH_ATTEMPTS,
    DEFAULT_AUTH_TIMEOUT, DEFAULT_IDLE_TIME, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_PROBES,
    DEFAULT_PERIOD, DEFAULT_PERIODIC_IDLE_TIMEOUT, DEFAULT_PROBE_INTERVAL,
    DEFAULT_RECONNECT_MAX_ATTEMPTS,
};
