//! Recursive three-way tree merge.

use serde_json::Value;

use canopy_diff::{list_conflicts, ConflictKind, NodeDelta};
use canopy_store::Node;
use canopy_types::path;

use crate::error::{MergeError, MergeResult};

/// Merge the changes two sides made to the same subtree since `base`.
///
/// `theirs` seeds the staged result: trunk content is the authoritative
/// baseline for everything the branch did not touch. Our delta is overlaid,
/// then each conflict is resolved by fixed precedence; subtrees both sides
/// modified are merged bottom-up and folded into the parent, so the returned
/// tree is an owned value sharing no structure with either input.
pub fn merge_node(base: &Node, ours: &Node, theirs: &Node, node_path: &str) -> MergeResult<Node> {
    let their_delta = NodeDelta::compute(base, theirs);
    let our_delta = NodeDelta::compute(base, ours);

    let mut staged = theirs.clone();

    // Overlay our side.
    for (name, value) in &our_delta.added_properties {
        staged.set_property(name.clone(), value.clone());
    }
    for (name, value) in &our_delta.changed_properties {
        staged.set_property(name.clone(), value.clone());
    }
    for name in our_delta.removed_properties.keys() {
        staged.remove_property(name);
    }

    for (name, child) in &our_delta.added_child_nodes {
        staged.insert_child(name.clone(), child.clone());
    }
    for (name, child) in &our_delta.changed_child_nodes {
        // Subtrees their side also changed are settled during conflict
        // resolution, not here.
        if !their_delta.changed_child_nodes.contains_key(name) {
            staged.insert_child(name.clone(), child.clone());
        }
    }
    for name in our_delta.removed_child_nodes.keys() {
        staged.remove_child(name);
    }

    for conflict in list_conflicts(&their_delta, &our_delta) {
        let conflict_path = path::concat(node_path, &conflict.name);
        match conflict.kind {
            ConflictKind::PropertyValue => {
                return Err(MergeError::PropertyValueConflict {
                    path: conflict_path,
                    ours: render(ours.property(&conflict.name)),
                    theirs: render(theirs.property(&conflict.name)),
                });
            }
            ConflictKind::NodeContent => {
                match (
                    base.child(&conflict.name),
                    our_delta.changed_child_nodes.get(&conflict.name),
                    their_delta.changed_child_nodes.get(&conflict.name),
                ) {
                    (Some(base_child), Some(our_child), Some(their_child)) => {
                        let merged = merge_node(base_child, our_child, their_child, &conflict_path)?;
                        staged.insert_child(conflict.name.clone(), merged);
                    }
                    // The name is absent from base on at least one side:
                    // a create/create collision, which has no resolution.
                    _ => return Err(MergeError::NodeCollision(conflict_path)),
                }
            }
            ConflictKind::RemovedDirtyProperty => {
                // The removal wins; our write was overlaid above.
                staged.remove_property(&conflict.name);
            }
            ConflictKind::RemovedDirtyNode => {
                // The removal wins over the surviving modification.
                staged.remove_child(&conflict.name);
            }
        }
    }

    Ok(staged)
}

fn render(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_else(|| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_types::RevisionId;
    use serde_json::json;

    fn node(rev: u64) -> Node {
        Node::new("/", RevisionId::new(rev))
    }

    // -----------------------------------------------------------------------
    // Clean merges
    // -----------------------------------------------------------------------

    #[test]
    fn disjoint_property_edits_merge_cleanly() {
        let base = node(1).with_child("a", node(1).with_property("x", json!(1)));
        let ours = node(2).with_child("a", node(2).with_property("x", json!(2)));
        let theirs = node(3).with_child(
            "a",
            node(3).with_property("x", json!(1)).with_property("y", json!(5)),
        );

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        let a = merged.child("a").unwrap();
        assert_eq!(a.property("x"), Some(&json!(2)));
        assert_eq!(a.property("y"), Some(&json!(5)));
    }

    #[test]
    fn untouched_trunk_content_survives() {
        let base = node(1).with_property("keep", json!("t"));
        let ours = node(2).with_property("keep", json!("t"));
        let theirs = node(3)
            .with_property("keep", json!("t"))
            .with_child("new", node(3).with_property("n", json!(1)));

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert_eq!(merged.property("keep"), Some(&json!("t")));
        assert!(merged.child("new").is_some());
    }

    #[test]
    fn our_additions_and_removals_apply() {
        let base = node(1)
            .with_property("drop", json!(1))
            .with_child("gone", node(1));
        let ours = node(2)
            .with_property("added", json!("v"))
            .with_child("fresh", node(2).with_property("f", json!(1)));
        let theirs = base.clone();

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert_eq!(merged.property("drop"), None);
        assert_eq!(merged.property("added"), Some(&json!("v")));
        assert!(merged.child("gone").is_none());
        assert!(merged.child("fresh").is_some());
    }

    #[test]
    fn recursive_merge_of_shared_child() {
        let base = node(1).with_child("a", node(1).with_child("c", node(1).with_property("p", json!(1))));
        let ours = node(2).with_child("a", node(2).with_child("c", node(2).with_property("p", json!(2))));
        let theirs = node(3).with_child(
            "a",
            node(3).with_child(
                "c",
                node(3).with_property("p", json!(1)).with_property("q", json!(9)),
            ),
        );

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        let c = merged.child("a").unwrap().child("c").unwrap();
        assert_eq!(c.property("p"), Some(&json!(2)));
        assert_eq!(c.property("q"), Some(&json!(9)));
    }

    #[test]
    fn merged_tree_is_detached_from_inputs() {
        let base = node(1).with_child("a", node(1).with_property("p", json!(1)));
        let ours = node(2).with_child("a", node(2).with_property("p", json!(2)));
        let theirs = node(3).with_child(
            "a",
            node(3).with_property("p", json!(1)).with_property("q", json!(1)),
        );

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        // The inputs still carry their original content.
        assert_eq!(ours.child("a").unwrap().property("q"), None);
        assert_eq!(theirs.child("a").unwrap().property("p"), Some(&json!(1)));
        assert_eq!(merged.child("a").unwrap().property("p"), Some(&json!(2)));
    }

    // -----------------------------------------------------------------------
    // Conflict resolution precedence
    // -----------------------------------------------------------------------

    #[test]
    fn property_value_conflict_is_fatal() {
        let base = node(1).with_child("a", node(1).with_property("x", json!(1)));
        let ours = node(2).with_child("a", node(2).with_property("x", json!(2)));
        let theirs = node(3).with_child("a", node(3).with_property("x", json!(3)));

        let err = merge_node(&base, &ours, &theirs, "/").unwrap_err();
        match err {
            MergeError::PropertyValueConflict { path, ours, theirs } => {
                assert_eq!(path, "/a/x");
                assert_eq!(ours, "2");
                assert_eq!(theirs, "3");
            }
            other => panic!("expected PropertyValueConflict, got {other:?}"),
        }
    }

    #[test]
    fn colliding_node_creation_is_fatal() {
        let base = node(1);
        let ours = node(2).with_child("c", node(2).with_property("p", json!(1)));
        let theirs = node(3).with_child("c", node(3).with_property("p", json!(2)));

        let err = merge_node(&base, &ours, &theirs, "/").unwrap_err();
        assert!(matches!(err, MergeError::NodeCollision(path) if path == "/c"));
    }

    #[test]
    fn their_removal_wins_over_our_property_write() {
        let base = node(1).with_child("b", node(1).with_property("p", json!(1)));
        let ours = node(2).with_child("b", node(2).with_property("p", json!(2)));
        let theirs = node(3);

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert!(merged.child("b").is_none());
    }

    #[test]
    fn removal_wins_when_ours_removed_and_theirs_changed() {
        let base = node(1).with_child("b", node(1).with_property("p", json!(1)));
        let ours = node(2);
        let theirs = node(3).with_child("b", node(3).with_property("p", json!(2)));

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert!(merged.child("b").is_none());
    }

    #[test]
    fn removed_dirty_property_discards_our_write() {
        let base = node(1).with_property("x", json!(1)).with_property("y", json!(1));
        let ours = node(2).with_property("x", json!(2)).with_property("y", json!(1));
        let theirs = node(3).with_property("y", json!(1));

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert_eq!(merged.property("x"), None);
        assert_eq!(merged.property("y"), Some(&json!(1)));
    }

    #[test]
    fn removed_dirty_property_wins_in_the_other_direction() {
        let base = node(1).with_property("x", json!(1));
        let ours = node(2);
        let theirs = node(3).with_property("x", json!(2));

        let merged = merge_node(&base, &ours, &theirs, "/").unwrap();
        assert_eq!(merged.property("x"), None);
    }

    #[test]
    fn conflict_deep_in_a_shared_subtree_is_found() {
        let deep = |p: i64, rev: u64| {
            node(rev).with_child(
                "a",
                node(rev).with_child("b", node(rev).with_property("p", json!(p))),
            )
        };
        let base = deep(1, 1);
        let ours = deep(2, 2);
        let theirs = deep(3, 3);

        let err = merge_node(&base, &ours, &theirs, "/").unwrap_err();
        assert!(matches!(
            err,
            MergeError::PropertyValueConflict { path, .. } if path == "/a/b/p"
        ));
    }
}
