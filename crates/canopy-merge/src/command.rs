//! Merge orchestration: path selection and commit assembly.
//!
//! Fetches the branch commit and the current head, then either fast-forwards
//! (no trunk commits since branch creation: gather, re-root, and concatenate
//! the branch line's recorded patches) or runs the three-way tree merge and
//! serializes the merged root against the trunk head. Either way the result
//! is submitted through the store's commit-apply interface; stale-base
//! detection is that interface's concern, not ours.

use tracing::{debug, info};

use canopy_diff::patch;
use canopy_jsop::reroot;
use canopy_store::{Node, NodeStore};
use canopy_types::{BranchId, RevisionId};

use crate::engine::merge_node;
use crate::error::{MergeError, MergeResult};

const ROOT_PATH: &str = "/";

/// Result of merging a branch back into trunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Trunk head after the merge.
    pub revision: RevisionId,
    /// Whether a commit was written. A branch whose changes are already
    /// contained in trunk merges as a no-op and writes nothing.
    pub committed: bool,
}

/// Merge the branch whose tip commit sits at `branch_tip` back into trunk.
pub fn merge_branch(
    store: &dyn NodeStore,
    branch_tip: RevisionId,
    message: &str,
) -> MergeResult<MergeOutcome> {
    let commit = store
        .fetch_commit(branch_tip)?
        .ok_or(MergeError::CommitNotFound(branch_tip))?;
    let branch_id = commit
        .branch_id
        .clone()
        .ok_or(MergeError::NotABranchCommit(branch_tip))?;

    let head = store.head_revision()?;
    let branch_root = branch_id.root();

    if head <= branch_root {
        fast_forward(store, &branch_id, commit.revision_id, head, message)
    } else {
        three_way(store, &branch_id, commit.revision_id, head, message)
    }
}

/// No trunk commits since branch creation: the branch line's patches apply to
/// the head as-is once re-rooted, in revision order.
fn fast_forward(
    store: &dyn NodeStore,
    branch_id: &BranchId,
    branch_tip: RevisionId,
    head: RevisionId,
    message: &str,
) -> MergeResult<MergeOutcome> {
    debug!(branch = %branch_id, %head, "trunk unchanged since branch creation, fast-forwarding");

    let mut patch = String::new();
    let mut revision = branch_id.root().next();
    while revision <= branch_tip {
        // Commits of other lines interleave in the shared numbering space;
        // a missing record or a foreign branch id is skipped here, while a
        // store failure still aborts the scan.
        if let Some(commit) = store.fetch_commit(revision)? {
            if commit.branch_id.as_ref() == Some(branch_id) {
                patch.push_str(&reroot(&commit.patch, &commit.path)?);
            }
        }
        revision = revision.next();
    }

    if patch.is_empty() {
        debug!(branch = %branch_id, %head, "branch recorded no mutations, keeping current head");
        return Ok(MergeOutcome {
            revision: head,
            committed: false,
        });
    }

    let revision = store.commit(&patch, head, message)?;
    info!(branch = %branch_id, %revision, "branch fast-forwarded into trunk");
    Ok(MergeOutcome {
        revision,
        committed: true,
    })
}

/// Trunk moved on: reconcile both histories through the tree merge and
/// commit the merged root's diff against the current head.
fn three_way(
    store: &dyn NodeStore,
    branch_id: &BranchId,
    branch_tip: RevisionId,
    head: RevisionId,
    message: &str,
) -> MergeResult<MergeOutcome> {
    let base = fetch_required(store, branch_id.root(), None)?;
    let ours = fetch_required(store, branch_tip, Some(branch_id))?;
    let theirs = fetch_required(store, head, None)?;

    let merged = merge_node(&base, &ours, &theirs, ROOT_PATH)?;

    let patch = patch::diff_text(&theirs, &merged, ROOT_PATH);
    if patch.is_empty() {
        debug!(branch = %branch_id, %head, "merge produced an empty patch, keeping current head");
        return Ok(MergeOutcome {
            revision: head,
            committed: false,
        });
    }

    let revision = store.commit(&patch, head, message)?;
    info!(branch = %branch_id, %revision, "branch merged into trunk");
    Ok(MergeOutcome {
        revision,
        committed: true,
    })
}

fn fetch_required(
    store: &dyn NodeStore,
    revision: RevisionId,
    branch: Option<&BranchId>,
) -> MergeResult<Node> {
    store
        .fetch_node(ROOT_PATH, revision, branch)?
        .ok_or_else(|| MergeError::NodeNotFound {
            path: ROOT_PATH.to_string(),
            revision,
        })
}
