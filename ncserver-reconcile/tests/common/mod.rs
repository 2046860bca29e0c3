//! Shared tree builders and change sources for reconciliation tests.

#![allow(dead_code)]

use ncserver_types::schema::*;
use ncserver_types::{
    ChangeBatch, ChangeSource, ChangeStream, ConfigTree, Error, NodeId, NodeValue, Selector,
};

/// Installs a DEBUG subscriber on the test writer. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Node ids of one endpoint list entry.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub entry: NodeId,
    pub ssh: NodeId,
}

/// A tree with the `netconf-server` root, `listen` and `call-home` containers.
pub struct ServerTree {
    pub tree: ConfigTree,
    pub root: NodeId,
    pub listen: NodeId,
    pub call_home: NodeId,
}

impl ServerTree {
    pub fn new() -> Self {
        let mut tree = ConfigTree::new();
        let root = tree.add_root(NETCONF_SERVER);
        let listen = tree.add_container(root, LISTEN);
        let call_home = tree.add_container(root, CALL_HOME);
        Self {
            tree,
            root,
            listen,
            call_home,
        }
    }

    pub fn leaf(&mut self, parent: NodeId, name: &str, value: NodeValue) -> NodeId {
        self.tree.add_leaf(parent, name, value)
    }

    pub fn container(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.tree.add_container(parent, name)
    }

    /// Adds a list entry whose first child is the `name` key.
    pub fn entry(&mut self, parent: NodeId, list: &str, key: &str) -> NodeId {
        let entry = self.tree.add_container(parent, list);
        self.tree.add_leaf(entry, NAME, NodeValue::String(key.to_string()));
        entry
    }

    pub fn listen_endpoint(&mut self, name: &str) -> Endpoint {
        let entry = self.entry(self.listen, ENDPOINT, name);
        let ssh = self.container(entry, SSH);
        Endpoint { entry, ssh }
    }

    pub fn client(&mut self, name: &str) -> NodeId {
        self.entry(self.call_home, NETCONF_CLIENT, name)
    }

    pub fn call_home_endpoint(&mut self, client: NodeId, name: &str) -> Endpoint {
        let endpoints = self.container(client, ENDPOINTS);
        let entry = self.entry(endpoints, ENDPOINT, name);
        let ssh = self.container(entry, SSH);
        Endpoint { entry, ssh }
    }

    /// `tcp-server-parameters` for listen endpoints, `tcp-client-parameters`
    /// for call-home endpoints.
    pub fn tcp(&mut self, endpoint: Endpoint, call_home: bool) -> NodeId {
        let name = if call_home {
            TCP_CLIENT_PARAMETERS
        } else {
            TCP_SERVER_PARAMETERS
        };
        self.container(endpoint.ssh, name)
    }

    pub fn ssh_server_parameters(&mut self, endpoint: Endpoint) -> NodeId {
        self.container(endpoint.ssh, SSH_SERVER_PARAMETERS)
    }

    pub fn server_identity(&mut self, endpoint: Endpoint) -> NodeId {
        let params = self.ssh_server_parameters(endpoint);
        self.container(params, SERVER_IDENTITY)
    }

    pub fn host_key(&mut self, identity: NodeId, name: &str) -> NodeId {
        self.entry(identity, HOST_KEY, name)
    }

    pub fn auth_methods(&mut self, endpoint: Endpoint) -> NodeId {
        let params = self.ssh_server_parameters(endpoint);
        let auth = self.container(params, CLIENT_AUTHENTICATION);
        self.container(auth, SUPPORTED_AUTHENTICATION_METHODS)
    }

    pub fn auth_limits(&mut self, endpoint: Endpoint) -> NodeId {
        let params = self.ssh_server_parameters(endpoint);
        self.container(params, KEEPALIVES)
    }

    pub fn into_batch(self) -> ChangeBatch {
        ChangeBatch::new(self.tree)
    }
}

/// A change source that fails with an iteration error after `after` events.
pub struct FailAfter {
    pub batch: ChangeBatch,
    pub after: usize,
}

impl ChangeSource for FailAfter {
    fn changes<'a>(&'a self, selector: &Selector) -> ncserver_types::Result<ChangeStream<'a>> {
        let inner = ChangeSource::changes(&self.batch, selector)?;
        let failure = std::iter::once(Err(Error::Iteration("store connection lost".into())));
        Ok(Box::new(inner.take(self.after).chain(failure)))
    }
}

/// A change source whose stream cannot be opened.
pub struct Unavailable;

impl ChangeSource for Unavailable {
    fn changes<'a>(&'a self, selector: &Selector) -> ncserver_types::Result<ChangeStream<'a>> {
        Err(Error::Iteration(format!("no change iterator for {selector}")))
    }
}
