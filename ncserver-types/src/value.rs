//! Typed scalar values carried by configuration tree nodes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The value of a schema node.
///
/// Interior nodes (containers, list entries, presence containers) carry
/// [`NodeValue::Empty`]. Leaves carry the type their schema declares.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum NodeValue {
    /// No value (interior node).
    #[default]
    Empty,
    /// A string leaf (names, addresses).
    String(String),
    /// An 8-bit unsigned leaf.
    Uint8(u8),
    /// A 16-bit unsigned leaf.
    Uint16(u16),
    /// An enumeration leaf, by enum name.
    Enumeration(String),
    /// An identityref leaf, possibly module-prefixed (`module:identity`).
    Identityref(String),
    /// A `date-and-time` leaf in RFC 3339 form.
    DateTime(String),
    /// A binary leaf in its base64 canonical form.
    Binary(String),
}

impl NodeValue {
    /// Returns the value for string-like types.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s)
            | Self::Enumeration(s)
            | Self::Identityref(s)
            | Self::DateTime(s)
            | Self::Binary(s) => Some(s),
            Self::Empty | Self::Uint8(_) | Self::Uint16(_) => None,
        }
    }

    /// Returns the value of a `uint8` leaf.
    #[must_use]
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::Uint8(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value of a `uint16` leaf.
    #[must_use]
    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::Uint16(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the canonical string form of the value, or None for interior nodes.
    #[must_use]
    pub fn canonical(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Uint8(v) => Some(Cow::Owned(v.to_string())),
            Self::Uint16(v) => Some(Cow::Owned(v.to_string())),
            other => other.as_str().map(Cow::Borrowed),
        }
    }

    /// Returns the schema type name, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::String(_) => "string",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Enumeration(_) => "enumeration",
            Self::Identityref(_) => "identityref",
            Self::DateTime(_) => "date-and-time",
            Self::Binary(_) => "binary",
        }
    }
}
