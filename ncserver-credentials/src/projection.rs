//! The operational `users` projection.

use crate::accounts::{Account, AccountSource};
use crate::authorized_keys::AuthorizedKey;
use crate::config::CredentialConfig;
use crate::error::{CredentialError, CredentialResult};
use crate::key_algorithm::KeyAlgorithm;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use tracing::{debug, warn};

/// Accounts that have an authorized keys file, with its recognised entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersProjection {
    #[serde(rename = "user", default)]
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    #[serde(rename = "authorized-key", default)]
    pub authorized_keys: Vec<AuthorizedKeyRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedKeyRecord {
    /// `key1`, `key2`, … in file order.
    pub name: String,
    pub algorithm: KeyAlgorithm,
    #[serde(rename = "key-data")]
    pub key_data: String,
}

/// Builds the projection from every account in `accounts`.
///
/// Accounts without an authorized keys file are left out, as are files the
/// process may not read. Any other I/O failure fails the whole projection.
pub fn project_users(
    accounts: &dyn AccountSource,
    config: &CredentialConfig,
) -> CredentialResult<UsersProjection> {
    let mut projection = UsersProjection::default();
    for account in accounts.accounts()? {
        if let Some(user) = project_account(&account?, config)? {
            projection.users.push(user);
        }
    }
    debug!("Projected {} users", projection.users.len());
    Ok(projection)
}

fn project_account(account: &Account, config: &CredentialConfig) -> CredentialResult<Option<UserRecord>> {
    let path = config.authorized_keys_path(&account.home);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            warn!("Skipping unreadable authorized keys file {} ({}).", path.display(), e);
            return Ok(None);
        }
        Err(e) => return Err(CredentialError::io(&path, e)),
    };

    let mut authorized_keys = Vec::new();
    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(|e| CredentialError::io(&path, e))?;
        // Comments may carry any encoding; key tokens are plain ASCII.
        if let Some(key) = AuthorizedKey::parse_line(&String::from_utf8_lossy(&line)) {
            authorized_keys.push(AuthorizedKeyRecord {
                name: format!("key{}", authorized_keys.len() + 1),
                algorithm: key.algorithm,
                key_data: key.key_data,
            });
        }
    }

    Ok(Some(UserRecord {
        name: account.name.clone(),
        authorized_keys,
    }))
}
