use serde_json::Value;

/// One operation of the patch grammar.
///
/// Node payloads and property scalars are raw JSON text, carried verbatim so
/// that re-encoding a parsed patch reproduces the recorded bytes. The raw
/// text is reachable only through [`raw_value`](Self::raw_value); nothing
/// ever reinterprets it as another representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOp {
    /// `+"<path>":{…}` — add a node.
    AddNode {
        path: String,
        /// Raw JSON object text; `{}` for merge-produced adds.
        payload: String,
    },
    /// `-"<path>"` — remove a node.
    RemoveNode { path: String },
    /// `^"<path>":<scalar>` — set a property; a `null` scalar removes it.
    SetProperty {
        path: String,
        /// Raw JSON scalar text.
        value: String,
    },
    /// `>"<old>":"<new>"` — move a node.
    MoveNode { old_path: String, new_path: String },
    /// `*"<old>":"<new>"` — copy a node.
    CopyNode { old_path: String, new_path: String },
}

impl PatchOp {
    /// Add-node operation with the empty payload produced by merges.
    pub fn add_node(path: impl Into<String>) -> Self {
        Self::AddNode {
            path: path.into(),
            payload: "{}".to_string(),
        }
    }

    /// Remove-node operation.
    pub fn remove_node(path: impl Into<String>) -> Self {
        Self::RemoveNode { path: path.into() }
    }

    /// Set-property operation; the value is rendered as compact JSON.
    pub fn set_property(path: impl Into<String>, value: &Value) -> Self {
        Self::SetProperty {
            path: path.into(),
            value: value.to_string(),
        }
    }

    /// Remove-property operation, expressed as a null set.
    pub fn remove_property(path: impl Into<String>) -> Self {
        Self::SetProperty {
            path: path.into(),
            value: "null".to_string(),
        }
    }

    /// The raw JSON text carried by this operation, if any.
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            Self::AddNode { payload, .. } => Some(payload),
            Self::SetProperty { value, .. } => Some(value),
            Self::RemoveNode { .. } | Self::MoveNode { .. } | Self::CopyNode { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_node_carries_empty_payload() {
        let op = PatchOp::add_node("/a");
        assert_eq!(op.raw_value(), Some("{}"));
    }

    #[test]
    fn set_property_renders_compact_json() {
        assert_eq!(
            PatchOp::set_property("/a/x", &json!("hi")).raw_value(),
            Some("\"hi\"")
        );
        assert_eq!(PatchOp::set_property("/a/x", &json!(1.5)).raw_value(), Some("1.5"));
    }

    #[test]
    fn remove_property_is_a_null_set() {
        let op = PatchOp::remove_property("/a/x");
        assert_eq!(op, PatchOp::set_property("/a/x", &Value::Null));
    }

    #[test]
    fn structural_ops_carry_no_value() {
        assert_eq!(PatchOp::remove_node("/a").raw_value(), None);
        let mv = PatchOp::MoveNode {
            old_path: "/a".into(),
            new_path: "/b".into(),
        };
        assert_eq!(mv.raw_value(), None);
    }
}
