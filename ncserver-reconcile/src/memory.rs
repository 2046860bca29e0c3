//! In-memory [`ServerRuntime`].
//!
//! Holds the same state a live server keeps for its endpoints and call-home
//! clients, without sockets. Used by the replay CLI and by tests; it also
//! counts mutations and can be told to reject a named operation.

use crate::error::{RuntimeError, RuntimeResult};
use crate::runtime::ServerRuntime;
use ncserver_model::{
    AuthLimits, AuthMethodSet, ConnectionType, HostKeyList, KeepaliveParams, KeepaliveUpdate,
    PeriodicParams, ReconnectStrategy, StartWith, TransportKind, DEFAULT_IDLE_TIMEOUT,
};
use ncserver_types::{ClientName, EndpointName, EndpointTarget};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Runtime state of one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointState {
    pub transport: TransportKind,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub keepalives_enabled: bool,
    pub keepalives: KeepaliveParams,
    pub host_keys: HostKeyList,
    pub auth_methods: AuthMethodSet,
    pub auth_limits: AuthLimits,
}

/// Runtime state of one call-home client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientState {
    pub endpoints: BTreeMap<EndpointName, EndpointState>,
    pub connection_type: ConnectionType,
    pub periodic: PeriodicParams,
    pub reconnect: ReconnectStrategy,
}

/// A server runtime that keeps everything in memory.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryServer {
    idle_timeout: u16,
    endpoints: BTreeMap<EndpointName, EndpointState>,
    clients: BTreeMap<ClientName, ClientState>,
    dispatched: Vec<ClientName>,
    mutations: usize,
    #[serde(skip)]
    initial_auth_methods: AuthMethodSet,
    #[serde(skip)]
    rejected: BTreeSet<String>,
}

impl Default for MemoryServer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            endpoints: BTreeMap::new(),
            clients: BTreeMap::new(),
            dispatched: Vec::new(),
            mutations: 0,
            initial_auth_methods: AuthMethodSet::empty(),
            rejected: BTreeSet::new(),
        }
    }

    /// Gives new endpoints `methods` instead of the empty set, the way some
    /// runtimes enable a default method set on creation.
    #[must_use]
    pub fn with_initial_auth_methods(mut self, methods: AuthMethodSet) -> Self {
        self.initial_auth_methods = methods;
        self
    }

    /// Makes every later call of `operation` (a [`ServerRuntime`] method name)
    /// fail with [`RuntimeError::Rejected`].
    pub fn reject_operation(&mut self, operation: &str) {
        self.rejected.insert(operation.to_string());
    }

    #[must_use]
    pub fn idle_timeout(&self) -> u16 {
        self.idle_timeout
    }

    #[must_use]
    pub fn endpoint(&self, target: &EndpointTarget) -> Option<&EndpointState> {
        match target {
            EndpointTarget::Listen { endpoint } => self.endpoints.get(endpoint),
            EndpointTarget::CallHome { client, endpoint } => {
                self.clients.get(client)?.endpoints.get(endpoint)
            }
        }
    }

    #[must_use]
    pub fn client(&self, client: &ClientName) -> Option<&ClientState> {
        self.clients.get(client)
    }

    /// Clients a call-home connection was dispatched for, in order.
    #[must_use]
    pub fn dispatched(&self) -> &[ClientName] {
        &self.dispatched
    }

    /// Number of mutating calls that succeeded so far.
    #[must_use]
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    fn check(&self, operation: &str) -> RuntimeResult<()> {
        if self.rejected.contains(operation) {
            return Err(RuntimeError::Rejected(operation.to_string()));
        }
        Ok(())
    }

    /// Counts a mutation only once the call has gone through.
    fn counted<T>(&mut self, result: RuntimeResult<T>) -> RuntimeResult<T> {
        if result.is_ok() {
            self.mutations += 1;
        }
        result
    }

    fn endpoint_mut(&mut self, operation: &str, target: &EndpointTarget) -> RuntimeResult<&mut EndpointState> {
        self.check(operation)?;
        let state = match target {
            EndpointTarget::Listen { endpoint } => self.endpoints.get_mut(endpoint),
            EndpointTarget::CallHome { client, endpoint } => self
                .clients
                .get_mut(client)
                .and_then(|c| c.endpoints.get_mut(endpoint)),
        }
        .ok_or_else(|| RuntimeError::UnknownEndpoint(target.clone()))?;
        self.mutations += 1;
        Ok(state)
    }

    fn client_mut(&mut self, operation: &str, client: &ClientName) -> RuntimeResult<&mut ClientState> {
        self.check(operation)?;
        let state = self
            .clients
            .get_mut(client)
            .ok_or_else(|| RuntimeError::UnknownClient(client.clone()))?;
        self.mutations += 1;
        Ok(state)
    }

    fn namespace_mut(
        &mut self,
        target: &EndpointTarget,
    ) -> RuntimeResult<&mut BTreeMap<EndpointName, EndpointState>> {
        match target {
            EndpointTarget::Listen { .. } => Ok(&mut self.endpoints),
            EndpointTarget::CallHome { client, .. } => self
                .clients
                .get_mut(client)
                .map(|c| &mut c.endpoints)
                .ok_or_else(|| RuntimeError::UnknownClient(client.clone())),
        }
    }
}

impl ServerRuntime for MemoryServer {
    fn set_idle_timeout(&mut self, seconds: u16) -> RuntimeResult<()> {
        self.check("set_idle_timeout")?;
        self.idle_timeout = seconds;
        self.mutations += 1;
        Ok(())
    }

    fn add_endpoint(&mut self, target: &EndpointTarget, transport: TransportKind) -> RuntimeResult<()> {
        self.check("add_endpoint")?;
        let auth_methods = self.initial_auth_methods;
        let namespace = self.namespace_mut(target)?;
        if namespace.contains_key(target.endpoint()) {
            return Err(RuntimeError::DuplicateEndpoint(target.clone()));
        }
        namespace.insert(
            target.endpoint().clone(),
            EndpointState {
                transport,
                auth_methods,
                ..EndpointState::default()
            },
        );
        self.mutations += 1;
        Ok(())
    }

    fn delete_endpoint(&mut self, target: &EndpointTarget, _transport: TransportKind) -> RuntimeResult<()> {
        self.check("delete_endpoint")?;
        let removed = self
            .namespace_mut(target)?
            .remove(target.endpoint())
            .map(|_| ())
            .ok_or_else(|| RuntimeError::UnknownEndpoint(target.clone()));
        self.counted(removed)
    }

    fn set_address(&mut self, target: &EndpointTarget, address: &str) -> RuntimeResult<()> {
        self.endpoint_mut("set_address", target)?.address = Some(address.to_string());
        Ok(())
    }

    fn set_port(&mut self, target: &EndpointTarget, port: u16) -> RuntimeResult<()> {
        self.endpoint_mut("set_port", target)?.port = Some(port);
        Ok(())
    }

    fn enable_keepalives(&mut self, target: &EndpointTarget, enabled: bool) -> RuntimeResult<()> {
        self.endpoint_mut("enable_keepalives", target)?.keepalives_enabled = enabled;
        Ok(())
    }

    fn set_keepalives(&mut self, target: &EndpointTarget, update: KeepaliveUpdate) -> RuntimeResult<()> {
        self.endpoint_mut("set_keepalives", target)?.keepalives.apply(update);
        Ok(())
    }

    fn add_host_key(&mut self, target: &EndpointTarget, name: &str) -> RuntimeResult<()> {
        Ok(self.endpoint_mut("add_host_key", target)?.host_keys.append(name)?)
    }

    fn delete_host_key(&mut self, target: &EndpointTarget, name: &str) -> RuntimeResult<()> {
        Ok(self.endpoint_mut("delete_host_key", target)?.host_keys.remove(name)?)
    }

    fn move_host_key(&mut self, target: &EndpointTarget, name: &str, after: Option<&str>) -> RuntimeResult<()> {
        Ok(self
            .endpoint_mut("move_host_key", target)?
            .host_keys
            .move_after(name, after)?)
    }

    fn auth_methods(&self, target: &EndpointTarget) -> RuntimeResult<AuthMethodSet> {
        self.endpoint(target)
            .map(|e| e.auth_methods)
            .ok_or_else(|| RuntimeError::UnknownEndpoint(target.clone()))
    }

    fn set_auth_methods(&mut self, target: &EndpointTarget, methods: AuthMethodSet) -> RuntimeResult<()> {
        self.endpoint_mut("set_auth_methods", target)?.auth_methods = methods;
        Ok(())
    }

    fn set_auth_timeout(&mut self, target: &EndpointTarget, seconds: u16) -> RuntimeResult<()> {
        self.endpoint_mut("set_auth_timeout", target)?.auth_limits.max_wait = seconds;
        Ok(())
    }

    fn set_auth_attempts(&mut self, target: &EndpointTarget, attempts: u8) -> RuntimeResult<()> {
        self.endpoint_mut("set_auth_attempts", target)?.auth_limits.max_attempts = attempts;
        Ok(())
    }

    fn add_client(&mut self, client: &ClientName) -> RuntimeResult<()> {
        self.check("add_client")?;
        if self.clients.contains_key(client) {
            return Err(RuntimeError::DuplicateClient(client.clone()));
        }
        self.clients.insert(client.clone(), ClientState::default());
        self.mutations += 1;
        Ok(())
    }

    fn delete_client(&mut self, client: &ClientName) -> RuntimeResult<()> {
        self.check("delete_client")?;
        let removed = self
            .clients
            .remove(client)
            .map(|_| ())
            .ok_or_else(|| RuntimeError::UnknownClient(client.clone()));
        self.counted(removed)
    }

    fn dispatch_call_home(&mut self, client: &ClientName) -> RuntimeResult<()> {
        self.client_mut("dispatch_call_home", client)?;
        self.dispatched.push(client.clone());
        Ok(())
    }

    fn set_connection_type(&mut self, client: &ClientName, kind: ConnectionType) -> RuntimeResult<()> {
        self.client_mut("set_connection_type", client)?.connection_type = kind;
        Ok(())
    }

    fn set_periodic_period(&mut self, client: &ClientName, minutes: u16) -> RuntimeResult<()> {
        self.client_mut("set_periodic_period", client)?.periodic.period = minutes;
        Ok(())
    }

    fn set_periodic_anchor_time(&mut self, client: &ClientName, epoch_seconds: i64) -> RuntimeResult<()> {
        self.client_mut("set_periodic_anchor_time", client)?.periodic.anchor_time = epoch_seconds;
        Ok(())
    }

    fn set_periodic_idle_timeout(&mut self, client: &ClientName, seconds: u16) -> RuntimeResult<()> {
        self.client_mut("set_periodic_idle_timeout", client)?.periodic.idle_timeout = seconds;
        Ok(())
    }

    fn set_start_with(&mut self, client: &ClientName, start_with: StartWith) -> RuntimeResult<()> {
        self.client_mut("set_start_with", client)?.reconnect.start_with = start_with;
        Ok(())
    }

    fn set_reconnect_max_attempts(&mut self, client: &ClientName, attempts: u8) -> RuntimeResult<()> {
        self.client_mut("set_reconnect_max_attempts", client)?.reconnect.max_attempts = attempts;
        Ok(())
    }
}
