//! SSH client authentication methods as a flag set.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One SSH client authentication method the runtime can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    PublicKey,
    Password,
    Interactive,
}

impl AuthMethod {
    /// All methods, in flag order.
    pub const ALL: [AuthMethod; 3] = [Self::PublicKey, Self::Password, Self::Interactive];

    const fn bit(self) -> u8 {
        match self {
            Self::PublicKey => 0x01,
            Self::Password => 0x02,
            Self::Interactive => 0x04,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PublicKey => "publickey",
            Self::Password => "password",
            Self::Interactive => "interactive",
        };
        f.write_str(s)
    }
}

/// A set of enabled authentication methods.
///
/// Entities start with the empty set; configuration events toggle one
/// method at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AuthMethodSet(u8);

impl AuthMethodSet {
    const MASK: u8 = 0x07;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every supported method.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Builds a set from raw flag bits, rejecting unknown bits.
    pub fn from_bits(bits: u8) -> ModelResult<Self> {
        if bits & !Self::MASK != 0 {
            return Err(ModelError::UnknownAuthBits(bits));
        }
        Ok(Self(bits))
    }

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, method: AuthMethod) -> bool {
        self.0 & method.bit() != 0
    }

    /// Enables `method`.
    pub fn insert(&mut self, method: AuthMethod) {
        self.0 |= method.bit();
    }

    /// Disables `method`.
    pub fn remove(&mut self, method: AuthMethod) {
        self.0 &= !method.bit();
    }

    /// Iterates over the enabled methods.
    pub fn iter(self) -> impl Iterator<Item = AuthMethod> {
        AuthMethod::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<AuthMethod> for AuthMethodSet {
    fn from_iter<I: IntoIterator<Item = AuthMethod>>(iter: I) -> Self {
        let mut set = Self::empty();
        for method in iter {
            set.insert(method);
        }
        set
    }
}

impl Serialize for AuthMethodSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AuthMethodSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let methods = Vec::<AuthMethod>::deserialize(deserializer)?;
        Ok(methods.into_iter().collect())
    }
}
