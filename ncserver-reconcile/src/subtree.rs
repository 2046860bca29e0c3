//! The subtrees the engine registers with the configuration store.

use crate::error::ReconcileResult;
use crate::identity::PathTemplate;
use ncserver_types::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered configuration subtree; the store invokes the engine once
/// per changed subtree per commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subtree {
    IdleTimeout,
    ListenSsh,
    ListenTcp,
    ListenHostKeys,
    ListenAuthMethods,
    ListenAuthLimits,
    CallHomeClients,
    CallHomeSsh,
    CallHomeTcp,
    CallHomeHostKeys,
    CallHomeAuthMethods,
    CallHomeAuthLimits,
    CallHomeConnectionType,
    CallHomeReconnect,
}

/// A second stream a subtree drains after its own, one level deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedStream {
    /// Child container whose leaves are streamed.
    pub container: &'static str,
    pub template: PathTemplate,
}

impl Subtree {
    pub const ALL: [Subtree; 14] = [
        Self::IdleTimeout,
        Self::ListenSsh,
        Self::ListenTcp,
        Self::ListenHostKeys,
        Self::ListenAuthMethods,
        Self::ListenAuthLimits,
        Self::CallHomeClients,
        Self::CallHomeSsh,
        Self::CallHomeTcp,
        Self::CallHomeHostKeys,
        Self::CallHomeAuthMethods,
        Self::CallHomeAuthLimits,
        Self::CallHomeConnectionType,
        Self::CallHomeReconnect,
    ];

    /// Absolute schema path of the registration.
    #[must_use]
    pub const fn registration(self) -> &'static str {
        match self {
            Self::IdleTimeout => "/ietf-netconf-server:netconf-server/listen/idle-timeout",
            Self::ListenSsh => "/ietf-netconf-server:netconf-server/listen/endpoint/ssh",
            Self::ListenTcp => {
                "/ietf-netconf-server:netconf-server/listen/endpoint/ssh/tcp-server-parameters"
            }
            Self::ListenHostKeys => {
                "/ietf-netconf-server:netconf-server/listen/endpoint/ssh/ssh-server-parameters/server-identity/host-key"
            }
            Self::ListenAuthMethods => {
                "/ietf-netconf-server:netconf-server/listen/endpoint/ssh/ssh-server-parameters/client-authentication/supported-authentication-methods"
            }
            Self::ListenAuthLimits => {
                "/ietf-netconf-server:netconf-server/listen/endpoint/ssh/ssh-server-parameters/keepalives"
            }
            Self::CallHomeClients => "/ietf-netconf-server:netconf-server/call-home/netconf-client",
            Self::CallHomeSsh => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/endpoints/endpoint/ssh"
            }
            Self::CallHomeTcp => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/endpoints/endpoint/ssh/tcp-client-parameters"
            }
            Self::CallHomeHostKeys => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/endpoints/endpoint/ssh/ssh-server-parameters/server-identity/host-key"
            }
            Self::CallHomeAuthMethods => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/endpoints/endpoint/ssh/ssh-server-parameters/client-authentication/supported-authentication-methods"
            }
            Self::CallHomeAuthLimits => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/endpoints/endpoint/ssh/ssh-server-parameters/keepalives"
            }
            Self::CallHomeConnectionType => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/connection-type"
            }
            Self::CallHomeReconnect => {
                "/ietf-netconf-server:netconf-server/call-home/netconf-client/reconnect-strategy"
            }
        }
    }

    /// Whether the subtree streams the registered node itself or its children.
    const fn streams_children(self) -> bool {
        matches!(
            self,
            Self::ListenTcp
                | Self::ListenAuthMethods
                | Self::ListenAuthLimits
                | Self::CallHomeTcp
                | Self::CallHomeAuthMethods
                | Self::CallHomeAuthLimits
                | Self::CallHomeConnectionType
                | Self::CallHomeReconnect
        )
    }

    /// Selector of the subtree's change stream.
    pub fn selector(self) -> ReconcileResult<Selector> {
        let selector = Selector::parse(self.registration())?;
        Ok(if self.streams_children() {
            selector.child_wildcard()
        } else {
            selector
        })
    }

    /// Path template of the subtree's own events, or None for listener-wide
    /// settings that have no owner.
    #[must_use]
    pub const fn template(self) -> Option<PathTemplate> {
        match self {
            Self::IdleTimeout => None,
            Self::ListenSsh => Some(PathTemplate::ListenSsh),
            Self::ListenTcp => Some(PathTemplate::ListenTcpParameter),
            Self::ListenHostKeys => Some(PathTemplate::ListenHostKey),
            Self::ListenAuthMethods => Some(PathTemplate::ListenAuthMethod),
            Self::ListenAuthLimits => Some(PathTemplate::ListenAuthLimit),
            Self::CallHomeClients => Some(PathTemplate::CallHomeClient),
            Self::CallHomeSsh => Some(PathTemplate::CallHomeSsh),
            Self::CallHomeTcp => Some(PathTemplate::CallHomeTcpParameter),
            Self::CallHomeHostKeys => Some(PathTemplate::CallHomeHostKey),
            Self::CallHomeAuthMethods => Some(PathTemplate::CallHomeAuthMethod),
            Self::CallHomeAuthLimits => Some(PathTemplate::CallHomeAuthLimit),
            Self::CallHomeConnectionType => Some(PathTemplate::CallHomeConnectionType),
            Self::CallHomeReconnect => Some(PathTemplate::CallHomeReconnect),
        }
    }

    /// The nested stream drained after the subtree's own events, if any.
    #[must_use]
    pub const fn nested(self) -> Option<NestedStream> {
        match self {
            Self::ListenTcp => Some(NestedStream {
                container: "keepalives",
                template: PathTemplate::ListenKeepaliveParameter,
            }),
            Self::CallHomeTcp => Some(NestedStream {
                container: "keepalives",
                template: PathTemplate::CallHomeKeepaliveParameter,
            }),
            Self::CallHomeConnectionType => Some(NestedStream {
                container: "periodic",
                template: PathTemplate::CallHomePeriodicParameter,
            }),
            _ => None,
        }
    }

    /// Selector of the nested stream, if any.
    pub fn nested_selector(self) -> ReconcileResult<Option<Selector>> {
        let Some(nested) = self.nested() else {
            return Ok(None);
        };
        let selector = Selector::parse(self.registration())?.join(nested.container)?;
        Ok(Some(selector.child_wildcard()))
    }
}

impl fmt::Display for Subtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registration())
    }
}
