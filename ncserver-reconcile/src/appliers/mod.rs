//! Per-field appliers. Each consumes one change event, resolves its owner
//! and issues the runtime mutation it maps to.

pub(crate) mod auth_methods;
pub(crate) mod call_home;
pub(crate) mod host_keys;
pub(crate) mod scalar;
pub(crate) mod transport;
