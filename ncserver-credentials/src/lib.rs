//! Credential services for the SSH transport.
//!
//! - Host-key lookup by name from the live configuration snapshot
//! - Public-key authentication against an account's `authorized_keys`
//! - The read-only `users` projection of accounts and their authorized keys
//!
//! Every lookup fails closed: a host key that cannot be fully resolved is an
//! error, and an offer that cannot be checked is rejected.

mod accounts;
mod authorized_keys;
mod config;
mod error;
mod host_key;
mod key_algorithm;
mod projection;
mod provider;

pub use accounts::{Account, AccountCursor, AccountSource, PasswdFile};
pub use authorized_keys::{AuthorizedKey, PublicKey};
pub use config::CredentialConfig;
pub use error::{CredentialError, CredentialResult};
pub use host_key::{find_host_key, ConfigSnapshot, HostKey, PrivateKey, TreeFile};
pub use key_algorithm::{HostKeyType, KeyAlgorithm};
pub use projection::{project_users, AuthorizedKeyRecord, UserRecord, UsersProjection};
pub use provider::{AuthDecision, CredentialProvider};
