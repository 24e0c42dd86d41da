use canopy_types::{BranchId, Commit, RevisionId};

use crate::error::StoreResult;
use crate::node::Node;

/// Query interface onto the revision store.
///
/// All implementations must satisfy these invariants:
/// - Commit records and node snapshots are immutable once handed out.
/// - `Ok(None)` is the typed not-found outcome; `Err` is reserved for
///   genuine store failures and must never stand in for "does not exist".
/// - `commit` appends atomically and may reject a base revision that no
///   longer matches the trunk head.
/// - Fetches are synchronous blocking calls; callers own any parallelism.
pub trait NodeStore: Send + Sync {
    /// Fetch the commit record accepted at `revision`.
    ///
    /// Returns `Ok(None)` if no commit exists at that revision.
    fn fetch_commit(&self, revision: RevisionId) -> StoreResult<Option<Commit>>;

    /// The current trunk head revision.
    fn head_revision(&self) -> StoreResult<RevisionId>;

    /// Fetch the node snapshot at `path` as of `revision`.
    ///
    /// With a branch given, the snapshot reflects that branch line's view of
    /// the tree; without one, the trunk view. Returns `Ok(None)` if the node
    /// does not exist at that revision.
    fn fetch_node(
        &self,
        path: &str,
        revision: RevisionId,
        branch: Option<&BranchId>,
    ) -> StoreResult<Option<Node>>;

    /// Append a trunk commit built from `patch` against `base`.
    ///
    /// Returns the revision assigned to the new commit. Fails with
    /// [`StoreError::StaleBase`](crate::StoreError::StaleBase) when `base`
    /// is no longer the trunk head.
    fn commit(&self, patch: &str, base: RevisionId, message: &str) -> StoreResult<RevisionId>;
}
