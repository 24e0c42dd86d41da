//! Structured delta between two node snapshots.

use std::collections::BTreeMap;

use serde_json::Value;

use canopy_store::Node;

/// The changes that turn one node snapshot into another.
///
/// A delta is computed against exactly one `(base, other)` pair and is
/// immutable once built; it is never persisted. Child snapshots are compared
/// by whole-subtree content, so a difference anywhere below a child
/// classifies that child as changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDelta {
    /// Properties present in `other` but not in `base`.
    pub added_properties: BTreeMap<String, Value>,
    /// Properties present in both with differing values, at their `other` value.
    pub changed_properties: BTreeMap<String, Value>,
    /// Properties present in `base` but not in `other`, at their `base` value.
    pub removed_properties: BTreeMap<String, Value>,
    /// Children present in `other` but not in `base`.
    pub added_child_nodes: BTreeMap<String, Node>,
    /// Children present in both with differing subtree content, as of `other`.
    pub changed_child_nodes: BTreeMap<String, Node>,
    /// Children present in `base` but not in `other`, as of `base`.
    pub removed_child_nodes: BTreeMap<String, Node>,
}

impl NodeDelta {
    /// Compute the delta from `base` to `other`, both snapshots of the same
    /// path.
    pub fn compute(base: &Node, other: &Node) -> Self {
        let mut delta = Self::default();

        for (name, base_value) in base.properties() {
            match other.property(name) {
                Some(value) if value != base_value => {
                    delta.changed_properties.insert(name.clone(), value.clone());
                }
                Some(_) => {}
                None => {
                    delta
                        .removed_properties
                        .insert(name.clone(), base_value.clone());
                }
            }
        }
        for (name, value) in other.properties() {
            if base.property(name).is_none() {
                delta.added_properties.insert(name.clone(), value.clone());
            }
        }

        for (name, base_child) in base.children() {
            match other.child(name) {
                Some(child) if !child.same_content(base_child) => {
                    delta.changed_child_nodes.insert(name.clone(), child.clone());
                }
                Some(_) => {}
                None => {
                    delta
                        .removed_child_nodes
                        .insert(name.clone(), base_child.clone());
                }
            }
        }
        for (name, child) in other.children() {
            if base.child(name).is_none() {
                delta.added_child_nodes.insert(name.clone(), child.clone());
            }
        }

        delta
    }

    /// Returns `true` if the two snapshots have the same content.
    pub fn is_empty(&self) -> bool {
        self.added_properties.is_empty()
            && self.changed_properties.is_empty()
            && self.removed_properties.is_empty()
            && self.added_child_nodes.is_empty()
            && self.changed_child_nodes.is_empty()
            && self.removed_child_nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_types::RevisionId;
    use serde_json::json;

    fn node(rev: u64) -> Node {
        Node::new("/", RevisionId::new(rev))
    }

    #[test]
    fn identical_snapshots_yield_empty_delta() {
        let base = node(1).with_property("x", json!(1));
        let other = node(2).with_property("x", json!(1));
        let delta = NodeDelta::compute(&base, &other);
        assert!(delta.is_empty());
    }

    #[test]
    fn property_classification() {
        let base = node(1)
            .with_property("keep", json!(true))
            .with_property("change", json!("old"))
            .with_property("drop", json!(9));
        let other = node(2)
            .with_property("keep", json!(true))
            .with_property("change", json!("new"))
            .with_property("add", json!([1, 2]));

        let delta = NodeDelta::compute(&base, &other);
        assert_eq!(delta.added_properties.get("add"), Some(&json!([1, 2])));
        assert_eq!(delta.changed_properties.get("change"), Some(&json!("new")));
        assert_eq!(delta.removed_properties.get("drop"), Some(&json!(9)));
        assert_eq!(delta.added_properties.len(), 1);
        assert_eq!(delta.changed_properties.len(), 1);
        assert_eq!(delta.removed_properties.len(), 1);
    }

    #[test]
    fn child_classification_by_name_join() {
        let base = node(1)
            .with_child("keep", node(1).with_property("p", json!(1)))
            .with_child("change", node(1).with_property("p", json!(1)))
            .with_child("drop", node(1));
        let other = node(2)
            .with_child("keep", node(2).with_property("p", json!(1)))
            .with_child("change", node(2).with_property("p", json!(2)))
            .with_child("add", node(2));

        let delta = NodeDelta::compute(&base, &other);
        assert!(delta.added_child_nodes.contains_key("add"));
        assert!(delta.changed_child_nodes.contains_key("change"));
        assert!(delta.removed_child_nodes.contains_key("drop"));
        assert!(!delta.changed_child_nodes.contains_key("keep"));
    }

    #[test]
    fn descendant_difference_marks_child_changed() {
        let base = node(1).with_child(
            "a",
            node(1).with_child("deep", node(1).with_property("p", json!(1))),
        );
        let other = node(2).with_child(
            "a",
            node(2).with_child("deep", node(2).with_property("p", json!(2))),
        );

        let delta = NodeDelta::compute(&base, &other);
        // "a"'s own properties are identical; only a descendant differs.
        assert!(delta.changed_child_nodes.contains_key("a"));
    }

    #[test]
    fn changed_child_is_recorded_at_its_other_state() {
        let base = node(1).with_child("a", node(1).with_property("p", json!(1)));
        let other = node(2).with_child("a", node(2).with_property("p", json!(2)));

        let delta = NodeDelta::compute(&base, &other);
        let recorded = delta.changed_child_nodes.get("a").unwrap();
        assert_eq!(recorded.property("p"), Some(&json!(2)));
    }

    #[test]
    fn revision_bookkeeping_does_not_count_as_change() {
        let base = node(1).with_child("a", node(1));
        let other = node(5).with_child("a", node(5));
        assert!(NodeDelta::compute(&base, &other).is_empty());
    }
}
