//! Change events and the change-stream contract.

use crate::selector::Selector;
use crate::tree::NodeRef;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of change a store reports for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperation {
    Created,
    Modified,
    Deleted,
    Moved,
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Moved => "moved",
        };
        f.write_str(s)
    }
}

/// One node-level change.
///
/// For `Created` and `Modified` the node carries the new value. For `Deleted`
/// it carries the value that was removed. For `Moved` the node is the moved
/// list entry and `previous_list_anchor` names the entry it now follows.
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub operation: ChangeOperation,
    pub node: NodeRef<'a>,
    pub previous_value: Option<&'a str>,
    pub previous_list_anchor: Option<&'a str>,
    pub previous_was_default: bool,
}

impl<'a> ChangeEvent<'a> {
    /// Returns the list anchor of a move, or None when the entry moved to
    /// the head of the list.
    #[must_use]
    pub fn list_anchor(&self) -> Option<&'a str> {
        self.previous_list_anchor.filter(|a| !a.is_empty())
    }
}

/// A lazily produced sequence of change events.
///
/// `None` means the stream is exhausted. `Some(Err(_))` is an iteration
/// failure, distinct from exhaustion.
pub type ChangeStream<'a> = Box<dyn Iterator<Item = Result<ChangeEvent<'a>>> + 'a>;

/// Anything that can hand out the pending changes under a selector.
pub trait ChangeSource {
    /// Opens a stream of the changes whose nodes match `selector`.
    fn changes<'a>(&'a self, selector: &Selector) -> Result<ChangeStream<'a>>;
}
