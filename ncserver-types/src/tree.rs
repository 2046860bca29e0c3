//! Arena-backed configuration data tree.
//!
//! Nodes are addressed by [`NodeId`] and navigated through [`NodeRef`]
//! handles. Navigation never panics: an id that does not belong to the tree
//! yields `None`.

use crate::value::NodeValue;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Index of a node inside a [`ConfigTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct NodeData {
    name: String,
    #[serde(default)]
    value: NodeValue,
    #[serde(default)]
    parent: Option<NodeId>,
    #[serde(default)]
    children: Vec<NodeId>,
}

/// A configuration data tree.
///
/// Built top-down: roots first, then containers and leaves under an existing
/// parent. Child order is insertion order, which is also the order the store
/// uses for list keys (the key leaf is always a list entry's first child).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTree {
    nodes: Vec<NodeData>,
}

impl ConfigTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level node.
    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        self.push(None, name.into(), NodeValue::Empty)
    }

    /// Adds an interior node (container or list entry) under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_container(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        self.push(Some(parent), name.into(), NodeValue::Empty)
    }

    /// Adds a leaf with a typed value under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_leaf(&mut self, parent: NodeId, name: impl Into<String>, value: NodeValue) -> NodeId {
        self.push(Some(parent), name.into(), value)
    }

    fn push(&mut self, parent: Option<NodeId>, name: String, value: NodeValue) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(NodeData {
            name,
            value,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Returns a navigation handle for `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Iterates over the top-level nodes.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeRef {
                tree: self,
                id: NodeId(i),
            })
    }

    /// Iterates over every node in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Verifies parent/child links, for trees that were deserialized rather
    /// than built through the `add_*` methods.
    pub fn check_links(&self) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                let Some(parent_data) = self.nodes.get(parent.0) else {
                    return Err(Error::MalformedTree(format!(
                        "node {index} ({}) points at missing parent {}",
                        node.name, parent.0
                    )));
                };
                if !parent_data.children.contains(&NodeId(index)) {
                    return Err(Error::MalformedTree(format!(
                        "node {index} ({}) is not listed under its parent {}",
                        node.name, parent.0
                    )));
                }
            }
            for child in &node.children {
                match self.nodes.get(child.0) {
                    Some(c) if c.parent == Some(NodeId(index)) => {}
                    _ => {
                        return Err(Error::MalformedTree(format!(
                            "node {index} ({}) lists child {} that does not point back",
                            node.name, child.0
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }
}

/// A borrowed handle to one node of a [`ConfigTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ConfigTree,
    id: NodeId,
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("path", &self.schema_path())
            .finish()
    }
}

impl<'a> NodeRef<'a> {
    /// Returns the node id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'a ConfigTree {
        self.tree
    }

    /// Returns the schema node name.
    #[must_use]
    pub fn schema_name(&self) -> &'a str {
        self.tree.data(self.id).map_or("", |n| n.name.as_str())
    }

    /// Returns the node value.
    #[must_use]
    pub fn value(&self) -> &'a NodeValue {
        static EMPTY: NodeValue = NodeValue::Empty;
        self.tree.data(self.id).map_or(&EMPTY, |n| &n.value)
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.tree.data(self.id)?.parent?;
        self.tree.node(parent)
    }

    /// Iterates over the children in order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |id| tree.node(*id))
    }

    /// Returns the first child.
    #[must_use]
    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.children().next()
    }

    /// Returns the first child with the given schema name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.schema_name() == name)
    }

    /// Walks `hops` parent links up. Zero hops returns the node itself.
    #[must_use]
    pub fn ancestor(&self, hops: usize) -> Option<NodeRef<'a>> {
        let mut current = *self;
        for _ in 0..hops {
            current = current.parent()?;
        }
        Some(current)
    }

    /// Returns the key of a list entry: the string value of its first child.
    #[must_use]
    pub fn key(&self) -> Option<&'a str> {
        self.first_child().and_then(|c| c.value().as_str())
    }

    /// Returns the schema path from the root, e.g. `/a/b/c`.
    #[must_use]
    pub fn schema_path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(*self);
        while let Some(node) = current {
            names.push(node.schema_name());
            current = node.parent();
            if names.len() > self.tree.len() {
                break;
            }
        }
        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('/');
            path.push_str(name);
            path
        })
    }
}
