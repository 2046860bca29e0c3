//! Supported key algorithms.
//!
//! Both tables are explicit. An algorithm that is not listed is unknown,
//! even if its name shares a prefix with one that is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Public-key algorithm tokens accepted in `authorized_keys` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyAlgorithm {
    Dss,
    Rsa,
    EcdsaNistp256,
    EcdsaNistp384,
    EcdsaNistp521,
}

const KEY_ALGORITHMS: [(&str, KeyAlgorithm); 5] = [
    ("ssh-dss", KeyAlgorithm::Dss),
    ("ssh-rsa", KeyAlgorithm::Rsa),
    ("ecdsa-sha2-nistp256", KeyAlgorithm::EcdsaNistp256),
    ("ecdsa-sha2-nistp384", KeyAlgorithm::EcdsaNistp384),
    ("ecdsa-sha2-nistp521", KeyAlgorithm::EcdsaNistp521),
];

impl KeyAlgorithm {
    /// Looks up an `authorized_keys` algorithm token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        KEY_ALGORITHMS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, alg)| *alg)
    }

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        KEY_ALGORITHMS
            .iter()
            .find(|(_, alg)| *alg == self)
            .map_or("", |(name, _)| *name)
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for KeyAlgorithm {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_token(&value).ok_or_else(|| format!("unknown key algorithm \"{value}\""))
    }
}

impl From<KeyAlgorithm> for String {
    fn from(alg: KeyAlgorithm) -> Self {
        alg.as_str().to_string()
    }
}

/// Private key type of a configured host key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKeyType {
    Rsa,
    Ecdsa,
}

const HOST_KEY_ALGORITHMS: [(&str, HostKeyType); 11] = [
    ("rsa1024", HostKeyType::Rsa),
    ("rsa2048", HostKeyType::Rsa),
    ("rsa3072", HostKeyType::Rsa),
    ("rsa4096", HostKeyType::Rsa),
    ("rsa7680", HostKeyType::Rsa),
    ("rsa15360", HostKeyType::Rsa),
    ("secp192r1", HostKeyType::Ecdsa),
    ("secp224r1", HostKeyType::Ecdsa),
    ("secp256r1", HostKeyType::Ecdsa),
    ("secp384r1", HostKeyType::Ecdsa),
    ("secp521r1", HostKeyType::Ecdsa),
];

impl HostKeyType {
    /// Maps an `algorithm` identity to a key type. A module prefix such as
    /// `ietf-crypto-types:` is ignored.
    #[must_use]
    pub fn from_identity(identity: &str) -> Option<Self> {
        let name = identity.rsplit_once(':').map_or(identity, |(_, name)| name);
        HOST_KEY_ALGORITHMS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
    }
}
