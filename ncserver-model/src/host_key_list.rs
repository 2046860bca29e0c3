//! Ordered host-key names of one endpoint.
//!
//! The runtime offers host keys in list order; the first one the client
//! accepts wins. The list is a total order without duplicates.

use crate::error::ListError;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of host-key names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostKeyList(Vec<String>);

impl HostKeyList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `name` at the tail.
    pub fn append(&mut self, name: &str) -> Result<(), ListError> {
        if self.contains(name) {
            return Err(ListError::Duplicate(name.to_string()));
        }
        self.0.push(name.to_string());
        Ok(())
    }

    /// Removes `name`, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Result<(), ListError> {
        let index = self.position(name)?;
        self.0.remove(index);
        Ok(())
    }

    /// Moves `name` to just after `anchor`, or to the head when `anchor` is None.
    ///
    /// Anchoring to the current predecessor leaves the order unchanged;
    /// anchoring to the current successor swaps the two.
    pub fn move_after(&mut self, name: &str, anchor: Option<&str>) -> Result<(), ListError> {
        if anchor == Some(name) {
            return Err(ListError::SelfAnchor(name.to_string()));
        }
        let from = self.position(name)?;
        if let Some(anchor) = anchor {
            if !self.contains(anchor) {
                return Err(ListError::AnchorNotFound(anchor.to_string()));
            }
        }

        let entry = self.0.remove(from);
        let to = match anchor {
            None => 0,
            Some(anchor) => self.position(anchor)? + 1,
        };
        self.0.insert(to, entry);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the names in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn position(&self, name: &str) -> Result<usize, ListError> {
        self.0
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ListError::NotFound(name.to_string()))
    }
}
