//! Owner resolution for changed nodes.
//!
//! Every registered subtree sits at a fixed depth below the list entry that
//! owns it. A [`PathTemplate`] names that shape once; [`resolve_owner`] walks
//! the recorded number of parent links and reads the entry's `name` key.

use crate::error::{ReconcileError, ReconcileResult};
use ncserver_types::schema::{ENDPOINT, NAME, NETCONF_CLIENT};
use ncserver_types::{ClientName, EndpointTarget, NodeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a changed node sits relative to its owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathTemplate {
    ListenSsh,
    ListenTcpParameter,
    ListenKeepaliveParameter,
    ListenHostKey,
    ListenAuthMethod,
    ListenAuthLimit,
    CallHomeClient,
    CallHomeSsh,
    CallHomeTcpParameter,
    CallHomeKeepaliveParameter,
    CallHomeHostKey,
    CallHomeAuthMethod,
    CallHomeAuthLimit,
    CallHomeConnectionType,
    CallHomePeriodicParameter,
    CallHomeReconnect,
}

/// Parent-link distances from the changed node to its owning list entries.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Listen { endpoint: usize },
    CallHomeEndpoint { endpoint: usize, client: usize },
    Client { client: usize },
}

impl PathTemplate {
    const fn shape(self) -> Shape {
        use Shape::*;
        match self {
            Self::ListenSsh => Listen { endpoint: 1 },
            Self::ListenTcpParameter => Listen { endpoint: 3 },
            Self::ListenKeepaliveParameter => Listen { endpoint: 4 },
            Self::ListenHostKey => Listen { endpoint: 4 },
            Self::ListenAuthMethod => Listen { endpoint: 5 },
            Self::ListenAuthLimit => Listen { endpoint: 4 },
            Self::CallHomeClient => Client { client: 0 },
            Self::CallHomeSsh => CallHomeEndpoint { endpoint: 1, client: 3 },
            Self::CallHomeTcpParameter => CallHomeEndpoint { endpoint: 3, client: 5 },
            Self::CallHomeKeepaliveParameter => CallHomeEndpoint { endpoint: 4, client: 6 },
            Self::CallHomeHostKey => CallHomeEndpoint { endpoint: 4, client: 6 },
            Self::CallHomeAuthMethod => CallHomeEndpoint { endpoint: 5, client: 7 },
            Self::CallHomeAuthLimit => CallHomeEndpoint { endpoint: 4, client: 6 },
            Self::CallHomeConnectionType => Client { client: 2 },
            Self::CallHomePeriodicParameter => Client { client: 3 },
            Self::CallHomeReconnect => Client { client: 2 },
        }
    }

    /// Returns true if the template resolves to an endpoint.
    #[must_use]
    pub fn owns_endpoint(self) -> bool {
        !matches!(self.shape(), Shape::Client { .. })
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The runtime entity a change belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    Endpoint(EndpointTarget),
    Client(ClientName),
}

/// Resolves the owner of `node` according to `template`.
///
/// Fails if an ancestor is missing, has an unexpected schema name, or has no
/// non-empty `name` key as its first child.
pub fn resolve_owner(node: NodeRef<'_>, template: PathTemplate) -> ReconcileResult<Owner> {
    match template.shape() {
        Shape::Listen { endpoint } => {
            let endpoint = entry_key(node, endpoint, ENDPOINT, template)?;
            Ok(Owner::Endpoint(EndpointTarget::listen(endpoint)))
        }
        Shape::CallHomeEndpoint { endpoint, client } => {
            let endpoint = entry_key(node, endpoint, ENDPOINT, template)?;
            let client = entry_key(node, client, NETCONF_CLIENT, template)?;
            Ok(Owner::Endpoint(EndpointTarget::call_home(client, endpoint)))
        }
        Shape::Client { client } => {
            let client = entry_key(node, client, NETCONF_CLIENT, template)?;
            Ok(Owner::Client(ClientName::new(client)))
        }
    }
}

/// Resolves an endpoint-owned node.
pub fn resolve_endpoint(node: NodeRef<'_>, template: PathTemplate) -> ReconcileResult<EndpointTarget> {
    match resolve_owner(node, template)? {
        Owner::Endpoint(target) => Ok(target),
        Owner::Client(_) => Err(identity_error(node, template, "template does not address an endpoint")),
    }
}

/// Resolves a client-owned node.
pub fn resolve_client(node: NodeRef<'_>, template: PathTemplate) -> ReconcileResult<ClientName> {
    match resolve_owner(node, template)? {
        Owner::Client(client) => Ok(client),
        Owner::Endpoint(_) => Err(identity_error(node, template, "template does not address a call-home client")),
    }
}

fn entry_key<'a>(
    node: NodeRef<'a>,
    hops: usize,
    expected: &str,
    template: PathTemplate,
) -> ReconcileResult<&'a str> {
    let entry = node
        .ancestor(hops)
        .ok_or_else(|| identity_error(node, template, &format!("no ancestor {hops} levels up")))?;
    if entry.schema_name() != expected {
        return Err(identity_error(
            node,
            template,
            &format!("expected {expected} {hops} levels up, found {}", entry.schema_name()),
        ));
    }
    match entry.first_child() {
        Some(key) if key.schema_name() == NAME => match key.value().as_str() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(identity_error(node, template, &format!("{expected} has an empty name key"))),
        },
        _ => Err(identity_error(node, template, &format!("{expected} has no name key"))),
    }
}

fn identity_error(node: NodeRef<'_>, template: PathTemplate, reason: &str) -> ReconcileError {
    ReconcileError::Identity {
        path: node.schema_path(),
        template,
        reason: reason.to_string(),
    }
}
