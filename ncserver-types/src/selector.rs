//! Subtree selectors: schema paths with optional `*` wildcards.

use crate::tree::NodeRef;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Name(String),
    Any,
}

/// A path selecting schema nodes, e.g. `/mod:root/listen/endpoint/ssh/*`.
///
/// A node matches when its schema path has exactly as many segments as the
/// selector and every non-wildcard segment equals the node name at that depth.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    raw: String,
    segments: Vec<Segment>,
}

impl Selector {
    /// Parses an absolute selector.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(Error::InvalidSelector(format!("{raw}: must start with '/'")));
        };
        if rest.is_empty() {
            return Err(Error::InvalidSelector(format!("{raw}: empty path")));
        }
        let segments = rest
            .split('/')
            .map(|s| match s {
                "" => Err(Error::InvalidSelector(format!("{raw}: empty segment"))),
                "*" => Ok(Segment::Any),
                name => Ok(Segment::Name(name.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns a selector one level deeper, naming `name`.
    pub fn join(&self, name: &str) -> Result<Self> {
        Self::parse(&format!("{}/{name}", self.raw))
    }

    /// Returns a selector matching every child of this path.
    #[must_use]
    pub fn child_wildcard(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Any);
        Self {
            raw: format!("{}/*", self.raw),
            segments,
        }
    }

    /// Returns the selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if `node` lies on this path.
    #[must_use]
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        let mut current = Some(node);
        for segment in self.segments.iter().rev() {
            let Some(n) = current else {
                return false;
            };
            if let Segment::Name(name) = segment {
                if n.schema_name() != name {
                    return false;
                }
            }
            current = n.parent();
        }
        current.is_none()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Selector {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.raw
    }
}
