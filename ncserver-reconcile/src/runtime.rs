//! The runtime-mutation contract.
//!
//! A [`ServerRuntime`] is the live server object: endpoint and call-home
//! client registries plus their transport settings. The engine only ever
//! talks to it through these calls. Every call is synchronous and either
//! takes effect or returns an error; the engine treats any error as fatal
//! for the batch.

use crate::error::RuntimeResult;
use ncserver_model::{AuthMethodSet, ConnectionType, KeepaliveUpdate, StartWith, TransportKind};
use ncserver_types::{ClientName, EndpointTarget};

pub trait ServerRuntime {
    /// Sets the listener-wide idle timeout, in seconds.
    fn set_idle_timeout(&mut self, seconds: u16) -> RuntimeResult<()>;

    fn add_endpoint(&mut self, target: &EndpointTarget, transport: TransportKind) -> RuntimeResult<()>;
    fn delete_endpoint(&mut self, target: &EndpointTarget, transport: TransportKind) -> RuntimeResult<()>;

    /// Sets the local (listen) or remote (call-home) address.
    fn set_address(&mut self, target: &EndpointTarget, address: &str) -> RuntimeResult<()>;
    /// Sets the local (listen) or remote (call-home) port.
    fn set_port(&mut self, target: &EndpointTarget, port: u16) -> RuntimeResult<()>;

    fn enable_keepalives(&mut self, target: &EndpointTarget, enabled: bool) -> RuntimeResult<()>;
    /// Applies the fields present in `update`; absent fields keep their value.
    fn set_keepalives(&mut self, target: &EndpointTarget, update: KeepaliveUpdate) -> RuntimeResult<()>;

    /// Appends a host key at the tail of the endpoint's list.
    fn add_host_key(&mut self, target: &EndpointTarget, name: &str) -> RuntimeResult<()>;
    fn delete_host_key(&mut self, target: &EndpointTarget, name: &str) -> RuntimeResult<()>;
    /// Moves a host key to just after `after`, or to the head when `after` is None.
    fn move_host_key(&mut self, target: &EndpointTarget, name: &str, after: Option<&str>) -> RuntimeResult<()>;

    fn auth_methods(&self, target: &EndpointTarget) -> RuntimeResult<AuthMethodSet>;
    fn set_auth_methods(&mut self, target: &EndpointTarget, methods: AuthMethodSet) -> RuntimeResult<()>;

    /// Read-modify-write of the endpoint's authentication methods.
    ///
    /// Returns the stored set. Runtimes with their own locking may override
    /// this to make the update atomic.
    fn update_auth_methods(
        &mut self,
        target: &EndpointTarget,
        update: &mut dyn FnMut(&mut AuthMethodSet),
    ) -> RuntimeResult<AuthMethodSet> {
        let mut methods = self.auth_methods(target)?;
        update(&mut methods);
        self.set_auth_methods(target, methods)?;
        Ok(methods)
    }

    /// Sets the SSH authentication timeout, in seconds.
    fn set_auth_timeout(&mut self, target: &EndpointTarget, seconds: u16) -> RuntimeResult<()>;
    fn set_auth_attempts(&mut self, target: &EndpointTarget, attempts: u8) -> RuntimeResult<()>;

    fn add_client(&mut self, client: &ClientName) -> RuntimeResult<()>;
    fn delete_client(&mut self, client: &ClientName) -> RuntimeResult<()>;

    /// Starts an outbound connection attempt for `client` in the background.
    ///
    /// Only an immediate refusal to dispatch is reported; the outcome of the
    /// connection itself is not.
    fn dispatch_call_home(&mut self, client: &ClientName) -> RuntimeResult<()>;

    fn set_connection_type(&mut self, client: &ClientName, kind: ConnectionType) -> RuntimeResult<()>;
    /// Sets the periodic connection period, in minutes.
    fn set_periodic_period(&mut self, client: &ClientName, minutes: u16) -> RuntimeResult<()>;
    /// Sets the periodic connection anchor, in seconds since the Unix epoch.
    fn set_periodic_anchor_time(&mut self, client: &ClientName, epoch_seconds: i64) -> RuntimeResult<()>;
    fn set_periodic_idle_timeout(&mut self, client: &ClientName, seconds: u16) -> RuntimeResult<()>;

    fn set_start_with(&mut self, client: &ClientName, start_with: StartWith) -> RuntimeResult<()>;
    fn set_reconnect_max_attempts(&mut self, client: &ClientName, attempts: u8) -> RuntimeResult<()>;
}
