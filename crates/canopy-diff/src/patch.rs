//! Serialization of a snapshot pair to patch operations.
//!
//! Walks the delta between two snapshots recursively and flattens it into
//! the patch grammar: property writes as `^` (removal as a null set), node
//! additions as `+` with an empty payload followed by the subtree's property
//! sets and child additions, node removals as `-`, and subtree changes by
//! recursing into the changed child.

use canopy_jsop::{encode, PatchOp};
use canopy_store::Node;
use canopy_types::path;

use crate::delta::NodeDelta;

/// Compute the operations that transform `base` into `other`, rooted at
/// `parent_path`.
pub fn diff_ops(base: &Node, other: &Node, parent_path: &str) -> Vec<PatchOp> {
    let mut ops = Vec::new();
    collect(base, other, parent_path, &mut ops);
    ops
}

/// Patch text transforming `base` into `other`, rooted at `parent_path`.
pub fn diff_text(base: &Node, other: &Node, parent_path: &str) -> String {
    encode(&diff_ops(base, other, parent_path))
}

fn collect(base: &Node, other: &Node, parent_path: &str, ops: &mut Vec<PatchOp>) {
    let delta = NodeDelta::compute(base, other);

    for (name, value) in &delta.added_properties {
        ops.push(PatchOp::set_property(path::concat(parent_path, name), value));
    }
    for (name, value) in &delta.changed_properties {
        ops.push(PatchOp::set_property(path::concat(parent_path, name), value));
    }
    for name in delta.removed_properties.keys() {
        ops.push(PatchOp::remove_property(path::concat(parent_path, name)));
    }

    for (name, child) in &delta.added_child_nodes {
        add_subtree(child, &path::concat(parent_path, name), ops);
    }
    for (name, child) in &delta.changed_child_nodes {
        // Changed implies the name exists in base.
        if let Some(base_child) = base.child(name) {
            collect(base_child, child, &path::concat(parent_path, name), ops);
        }
    }
    for name in delta.removed_child_nodes.keys() {
        ops.push(PatchOp::remove_node(path::concat(parent_path, name)));
    }
}

fn add_subtree(node: &Node, node_path: &str, ops: &mut Vec<PatchOp>) {
    ops.push(PatchOp::add_node(node_path));
    for (name, value) in node.properties() {
        ops.push(PatchOp::set_property(path::concat(node_path, name), value));
    }
    for (name, child) in node.children() {
        add_subtree(child, &path::concat(node_path, name), ops);
    }
}
