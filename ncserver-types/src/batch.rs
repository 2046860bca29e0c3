//! Recorded change batches.
//!
//! A [`ChangeBatch`] pairs a configuration tree with the ordered list of
//! changes a commit produced against it. It implements [`ChangeSource`], so
//! the reconciliation engine can run against it exactly as it would against
//! a live store. Batches round-trip through JSON for replay files.

use crate::change::{ChangeEvent, ChangeOperation, ChangeSource, ChangeStream};
use crate::selector::Selector;
use crate::tree::{ConfigTree, NodeId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One change recorded against a node of the batch tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedChange {
    pub operation: ChangeOperation,
    pub node: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_list_anchor: Option<String>,
    #[serde(default)]
    pub previous_was_default: bool,
}

impl RecordedChange {
    /// Records an operation with no previous-state metadata.
    #[must_use]
    pub fn new(operation: ChangeOperation, node: NodeId) -> Self {
        Self {
            operation,
            node,
            previous_value: None,
            previous_list_anchor: None,
            previous_was_default: false,
        }
    }
}

/// A configuration tree and the ordered changes made to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBatch {
    tree: ConfigTree,
    #[serde(default)]
    changes: Vec<RecordedChange>,
}

impl ChangeBatch {
    /// Creates a batch over `tree` with no changes.
    #[must_use]
    pub fn new(tree: ConfigTree) -> Self {
        Self {
            tree,
            changes: Vec::new(),
        }
    }

    /// Returns the batch tree.
    #[must_use]
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Returns the batch tree for further construction.
    pub fn tree_mut(&mut self) -> &mut ConfigTree {
        &mut self.tree
    }

    /// Returns the recorded changes in order.
    #[must_use]
    pub fn changes(&self) -> &[RecordedChange] {
        &self.changes
    }

    /// Appends a recorded change.
    pub fn push(&mut self, change: RecordedChange) -> &mut Self {
        self.changes.push(change);
        self
    }

    /// Records a creation of `node`.
    pub fn created(&mut self, node: NodeId) -> &mut Self {
        self.push(RecordedChange::new(ChangeOperation::Created, node))
    }

    /// Records a modification of `node`.
    pub fn modified(&mut self, node: NodeId) -> &mut Self {
        self.push(RecordedChange::new(ChangeOperation::Modified, node))
    }

    /// Records a deletion of `node`. The node keeps the value that was removed.
    pub fn deleted(&mut self, node: NodeId) -> &mut Self {
        self.push(RecordedChange::new(ChangeOperation::Deleted, node))
    }

    /// Records a move of list entry `node` to just after `anchor`
    /// (empty string for the head of the list).
    pub fn moved(&mut self, node: NodeId, anchor: impl Into<String>) -> &mut Self {
        let mut change = RecordedChange::new(ChangeOperation::Moved, node);
        change.previous_list_anchor = Some(anchor.into());
        self.push(change)
    }

    /// Parses a batch from JSON and verifies the tree links.
    pub fn from_json(json: &str) -> Result<Self> {
        let batch: Self = serde_json::from_str(json)?;
        batch.tree.check_links()?;
        Ok(batch)
    }

    /// Serializes the batch to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ChangeSource for ChangeBatch {
    fn changes<'a>(&'a self, selector: &Selector) -> Result<ChangeStream<'a>> {
        let selector = selector.clone();
        let tree = &self.tree;
        let stream = self.changes.iter().filter_map(move |change| {
            let Some(node) = tree.node(change.node) else {
                return Some(Err(Error::Iteration(format!(
                    "recorded change refers to missing node {}",
                    change.node.0
                ))));
            };
            selector.matches(node).then(|| {
                Ok(ChangeEvent {
                    operation: change.operation,
                    node,
                    previous_value: change.previous_value.as_deref(),
                    previous_list_anchor: change.previous_list_anchor.as_deref(),
                    previous_was_default: change.previous_was_default,
                })
            })
        });
        Ok(Box::new(stream))
    }
}
