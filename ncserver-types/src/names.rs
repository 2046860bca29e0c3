//! Names of the entities the engine addresses in the runtime.
//!
//! Endpoint names are unique within their namespace (the listener, or one
//! call-home client); client names are unique within the call-home namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a listening or call-home endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointName(String);

impl EndpointName {
    /// Creates an endpoint name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EndpointName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Name of a call-home client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a client name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Fully qualified endpoint: either a listener endpoint or an endpoint
/// scoped under a call-home client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "kebab-case")]
pub enum EndpointTarget {
    /// Endpoint in the local listener namespace.
    Listen { endpoint: EndpointName },
    /// Endpoint owned by a call-home client.
    CallHome {
        client: ClientName,
        endpoint: EndpointName,
    },
}

impl EndpointTarget {
    /// Targets a listener endpoint.
    #[must_use]
    pub fn listen(endpoint: impl Into<String>) -> Self {
        Self::Listen {
            endpoint: EndpointName::new(endpoint),
        }
    }

    /// Targets an endpoint of a call-home client.
    #[must_use]
    pub fn call_home(client: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::CallHome {
            client: ClientName::new(client),
            endpoint: EndpointName::new(endpoint),
        }
    }

    /// Returns the endpoint name.
    #[must_use]
    pub fn endpoint(&self) -> &EndpointName {
        match self {
            Self::Listen { endpoint } | Self::CallHome { endpoint, .. } => endpoint,
        }
    }

    /// Returns the owning call-home client, if any.
    #[must_use]
    pub fn client(&self) -> Option<&ClientName> {
        match self {
            Self::Listen { .. } => None,
            Self::CallHome { client, .. } => Some(client),
        }
    }
}

impl fmt::Display for EndpointTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listen { endpoint } => write!(f, "{endpoint}"),
            Self::CallHome { client, endpoint } => write!(f, "{client}/{endpoint}"),
        }
    }
}
