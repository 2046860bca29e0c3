//! Host-key lookup in the configuration snapshot.

use crate::error::{CredentialError, CredentialResult};
use crate::key_algorithm::HostKeyType;
use ncserver_types::schema::{
    ALGORITHM, ENDPOINT, HOST_KEY, LOCAL_DEFINITION, PRIVATE_KEY, PUBLIC_KEY, SERVER_IDENTITY,
};
use ncserver_types::{ConfigTree, NodeRef};
use std::borrow::Cow;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private key material, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// Returns the key data.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey").field(&"[REDACTED]").finish()
    }
}

/// A resolved host key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostKey {
    pub key_type: HostKeyType,
    pub private_key: PrivateKey,
}

/// Read access to the current server configuration.
pub trait ConfigSnapshot {
    /// Returns the configuration as of now.
    fn current(&self) -> CredentialResult<Cow<'_, ConfigTree>>;
}

impl ConfigSnapshot for ConfigTree {
    fn current(&self) -> CredentialResult<Cow<'_, ConfigTree>> {
        Ok(Cow::Borrowed(self))
    }
}

/// A configuration tree stored as JSON, re-read on every lookup.
#[derive(Debug, Clone)]
pub struct TreeFile {
    path: PathBuf,
}

impl TreeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSnapshot for TreeFile {
    fn current(&self) -> CredentialResult<Cow<'_, ConfigTree>> {
        let json =
            std::fs::read_to_string(&self.path).map_err(|e| CredentialError::io(&self.path, e))?;
        let tree: ConfigTree = serde_json::from_str(&json)?;
        tree.check_links()?;
        Ok(Cow::Owned(tree))
    }
}

/// Finds the local definition of host key `name` under any endpoint.
///
/// The first endpoint in tree order that defines the key wins.
pub fn find_host_key(tree: &ConfigTree, name: &str) -> CredentialResult<HostKey> {
    let definition = tree
        .iter()
        .filter(|node| is_endpoint_host_key(*node) && node.key() == Some(name))
        .find_map(|entry| entry.child(PUBLIC_KEY)?.child(LOCAL_DEFINITION))
        .ok_or_else(|| CredentialError::HostKeyNotFound(name.to_string()))?;

    let incomplete = |missing| CredentialError::IncompleteHostKey {
        name: name.to_string(),
        missing,
    };
    let algorithm = definition
        .child(ALGORITHM)
        .and_then(|n| n.value().as_str())
        .ok_or_else(|| incomplete(ALGORITHM))?;
    let private_key = definition
        .child(PRIVATE_KEY)
        .and_then(|n| n.value().as_str())
        .ok_or_else(|| incomplete(PRIVATE_KEY))?;

    let key_type = HostKeyType::from_identity(algorithm)
        .ok_or_else(|| CredentialError::UnknownAlgorithm(algorithm.to_string()))?;
    Ok(HostKey {
        key_type,
        private_key: PrivateKey::new(private_key),
    })
}

/// `…/endpoint/ssh/ssh-server-parameters/server-identity/host-key`
fn is_endpoint_host_key(node: NodeRef<'_>) -> bool {
    node.schema_name() == HOST_KEY
        && node.parent().map(|p| p.schema_name()) == Some(SERVER_IDENTITY)
        && node.ancestor(4).map(|e| e.schema_name()) == Some(ENDPOINT)
}
