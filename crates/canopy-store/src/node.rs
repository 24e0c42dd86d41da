use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use canopy_types::{path, RevisionId};

/// Immutable snapshot of one document node at a revision.
///
/// Properties map names to raw JSON values; children are name-keyed owned
/// subtrees iterated in name order. A node never borrows into another tree,
/// so substituting a rebuilt child leaves its siblings untouched. Snapshots
/// handed out by a store are never mutated; the mutators below exist for
/// assembling new trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    path: String,
    revision_id: RevisionId,
    properties: BTreeMap<String, Value>,
    children: BTreeMap<String, Node>,
}

impl Node {
    /// Create an empty node at `path` as of `revision_id`.
    pub fn new(path: impl Into<String>, revision_id: RevisionId) -> Self {
        Self {
            path: path.into(),
            revision_id,
            properties: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    /// The path this snapshot was taken at.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The revision this snapshot was taken at.
    pub fn revision_id(&self) -> RevisionId {
        self.revision_id
    }

    /// All properties, in name order.
    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    /// All child nodes, in name order.
    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.children
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Look up a child node by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Set a property, replacing any previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// Remove a property. Returns the previous value if one existed.
    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    /// Install a child node under `name`, replacing any previous child.
    pub fn insert_child(&mut self, name: impl Into<String>, child: Node) {
        self.children.insert(name.into(), child);
    }

    /// Remove a child node. Returns the removed subtree if one existed.
    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        self.children.remove(name)
    }

    /// Builder-style [`set_property`](Self::set_property).
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set_property(name, value);
        self
    }

    /// Builder-style child installation; the child is placed at this node's
    /// path extended by `name`.
    pub fn with_child(mut self, name: impl Into<String>, mut child: Node) -> Self {
        let name = name.into();
        child.path = path::concat(&self.path, &name);
        self.insert_child(name, child);
        self
    }

    /// Structural content equality.
    ///
    /// Two snapshots have the same content when their properties and their
    /// entire descendant trees match; `path` and `revision_id` bookkeeping is
    /// ignored. A difference anywhere below a child makes that child differ.
    pub fn same_content(&self, other: &Node) -> bool {
        self.properties == other.properties
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|((name, child), (other_name, other_child))| {
                    name == other_name && child.same_content(other_child)
                })
    }
}
