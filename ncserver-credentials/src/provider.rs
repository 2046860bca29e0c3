//! The credential callbacks the SSH transport calls into.

use crate::accounts::AccountSource;
use crate::authorized_keys::{AuthorizedKey, PublicKey};
use crate::config::CredentialConfig;
use crate::error::{CredentialError, CredentialResult};
use crate::host_key::{find_host_key, ConfigSnapshot, HostKey};
use std::fs;
use tracing::{debug, error, warn};

/// Result of checking a public-key offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Accept,
    Reject,
}

/// Resolves host keys and checks public-key offers.
#[derive(Debug, Clone)]
pub struct CredentialProvider<A, S> {
    accounts: A,
    snapshot: S,
    config: CredentialConfig,
}

impl<A: AccountSource, S: ConfigSnapshot> CredentialProvider<A, S> {
    pub fn new(accounts: A, snapshot: S, config: CredentialConfig) -> Self {
        Self {
            accounts,
            snapshot,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CredentialConfig {
        &self.config
    }

    /// Looks up host key `name` in the current configuration.
    pub fn resolve_host_key(&self, name: &str) -> CredentialResult<HostKey> {
        let result = self
            .snapshot
            .current()
            .and_then(|tree| find_host_key(&tree, name));
        match &result {
            Ok(key) => debug!("Resolved host key {} ({:?})", name, key.key_type),
            Err(e) => error!("Host key lookup failed: {}", e),
        }
        result
    }

    /// Checks `offered` against the authorized keys of `username`.
    ///
    /// Only the first parseable entry is compared unless
    /// `match_any_authorized_key` is set. Anything that prevents the check
    /// rejects the offer.
    pub fn authenticate_public_key(&self, username: &str, offered: &PublicKey) -> AuthDecision {
        match self.check_offer(username, offered) {
            Ok(true) => {
                debug!("Accepted public key of \"{}\"", username);
                AuthDecision::Accept
            }
            Ok(false) => {
                debug!("Public key of \"{}\" does not match", username);
                AuthDecision::Reject
            }
            Err(e) => {
                warn!("Failed to check authorized keys of \"{}\" ({}).", username, e);
                AuthDecision::Reject
            }
        }
    }

    fn check_offer(&self, username: &str, offered: &PublicKey) -> CredentialResult<bool> {
        let account = self
            .accounts
            .lookup(username)?
            .ok_or_else(|| CredentialError::UnknownAccount(username.to_string()))?;

        let path = self.config.authorized_keys_path(&account.home);
        let contents = fs::read(&path).map_err(|e| CredentialError::io(&path, e))?;
        let text = String::from_utf8_lossy(&contents);
        let mut keys = text
            .lines()
            .filter_map(AuthorizedKey::parse_line)
            .filter_map(|entry| entry.public_key().ok());

        if self.config.match_any_authorized_key {
            Ok(keys.any(|key| key.same_public_key(offered)))
        } else {
            let first = keys
                .next()
                .ok_or_else(|| CredentialError::InvalidKey(format!("no usable key in {}", path.display())))?;
            Ok(first.same_public_key(offered))
        }
    }
}
