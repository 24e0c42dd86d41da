use canopy_types::path;

use crate::builder::encode;
use crate::error::JsopResult;
use crate::op::PatchOp;
use crate::parser::parse;

/// Rewrite a recorded patch so every path token is rooted under `prefix`.
///
/// Operator order and raw payload/scalar text are carried through untouched;
/// only path tokens change. Both tokens of move and copy operations are
/// prefixed. An empty prefix leaves the operations on their original paths,
/// introducing no leading slash.
pub fn reroot(patch: &str, prefix: &str) -> JsopResult<String> {
    let rebased: Vec<PatchOp> = parse(patch)?
        .into_iter()
        .map(|op| match op {
            PatchOp::AddNode { path, payload } => PatchOp::AddNode {
                path: path::concat(prefix, &path),
                payload,
            },
            PatchOp::RemoveNode { path } => PatchOp::RemoveNode {
                path: path::concat(prefix, &path),
            },
            PatchOp::SetProperty { path, value } => PatchOp::SetProperty {
                path: path::concat(prefix, &path),
                value,
            },
            PatchOp::MoveNode { old_path, new_path } => PatchOp::MoveNode {
                old_path: path::concat(prefix, &old_path),
                new_path: path::concat(prefix, &new_path),
            },
            PatchOp::CopyNode { old_path, new_path } => PatchOp::CopyNode {
                old_path: path::concat(prefix, &old_path),
                new_path: path::concat(prefix, &new_path),
            },
        })
        .collect();
    Ok(encode(&rebased))
}
