//! Classification of overlapping entries between two deltas.

use std::collections::BTreeMap;

use crate::delta::NodeDelta;

/// The ways two deltas computed against the same base can collide on a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    /// Both sides set the same property to different resulting values.
    PropertyValue,
    /// Both sides touched the same child subtree: either both changed it, or
    /// both created it with differing content.
    NodeContent,
    /// One side wrote a property the other side removed.
    RemovedDirtyProperty,
    /// One side changed a child node the other side removed.
    RemovedDirtyNode,
}

/// One conflicting entry, keyed by name within the node the deltas cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub kind: ConflictKind,
}

/// List the conflicts between two deltas computed against the same base.
///
/// The result carries exactly one entry per affected name; callers treat it
/// as a name-keyed set and must not rely on any particular order.
pub fn list_conflicts(theirs: &NodeDelta, ours: &NodeDelta) -> Vec<Conflict> {
    let mut found: BTreeMap<String, ConflictKind> = BTreeMap::new();

    // Properties both sides created.
    for (name, value) in &ours.added_properties {
        if let Some(their_value) = theirs.added_properties.get(name) {
            if their_value != value {
                found.insert(name.clone(), ConflictKind::PropertyValue);
            }
        }
    }
    // Properties both sides changed, or one changed and the other removed.
    for (name, value) in &ours.changed_properties {
        if let Some(their_value) = theirs.changed_properties.get(name) {
            if their_value != value {
                found.insert(name.clone(), ConflictKind::PropertyValue);
            }
        }
        if theirs.removed_properties.contains_key(name) {
            found.insert(name.clone(), ConflictKind::RemovedDirtyProperty);
        }
    }
    for name in ours.removed_properties.keys() {
        if theirs.changed_properties.contains_key(name) {
            found.insert(name.clone(), ConflictKind::RemovedDirtyProperty);
        }
    }

    // Children both sides created.
    for (name, child) in &ours.added_child_nodes {
        if let Some(their_child) = theirs.added_child_nodes.get(name) {
            if !child.same_content(their_child) {
                found.insert(name.clone(), ConflictKind::NodeContent);
            }
        }
    }
    // Children both sides changed, or one changed and the other removed.
    for name in ours.changed_child_nodes.keys() {
        if theirs.changed_child_nodes.contains_key(name) {
            found.insert(name.clone(), ConflictKind::NodeContent);
        }
        if theirs.removed_child_nodes.contains_key(name) {
            found.insert(name.clone(), ConflictKind::RemovedDirtyNode);
        }
    }
    for name in ours.removed_child_nodes.keys() {
        if theirs.changed_child_nodes.contains_key(name) {
            found.insert(name.clone(), ConflictKind::RemovedDirtyNode);
        }
    }

    found
        .into_iter()
        .map(|(name, kind)| Conflict { name, kind })
        .collect()
}
