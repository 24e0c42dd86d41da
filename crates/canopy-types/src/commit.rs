use serde::{Deserialize, Serialize};

use crate::branch::BranchId;
use crate::revision::RevisionId;

/// An accepted commit record.
///
/// Commits are immutable once accepted by the store. A commit made on a
/// private branch carries the id of its branch line; trunk commits carry
/// none. The patch text is rooted at `path` and expressed in the patch
/// grammar of `canopy-jsop`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Revision assigned to this commit.
    pub revision_id: RevisionId,
    /// Branch line this commit belongs to, if any.
    pub branch_id: Option<BranchId>,
    /// Revision the patch was computed against.
    pub base_revision_id: RevisionId,
    /// Path the patch is rooted at.
    pub path: String,
    /// Recorded patch text.
    pub patch: String,
    /// Commit message.
    pub message: String,
}

impl Commit {
    /// Create a trunk commit record.
    pub fn new(
        revision_id: RevisionId,
        base_revision_id: RevisionId,
        path: impl Into<String>,
        patch: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            revision_id,
            branch_id: None,
            base_revision_id,
            path: path.into(),
            patch: patch.into(),
            message: message.into(),
        }
    }

    /// Associate this commit with a branch line.
    pub fn with_branch(mut self, branch_id: BranchId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Returns `true` if this commit was made on a private branch.
    pub fn is_branch_commit(&self) -> bool {
        self.branch_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_commit_is_on_trunk() {
        let c = Commit::new(
            RevisionId::new(5),
            RevisionId::new(4),
            "/",
            "+\"a\":{}",
            "add a",
        );
        assert!(!c.is_branch_commit());
        assert_eq!(c.revision_id, RevisionId::new(5));
        assert_eq!(c.base_revision_id, RevisionId::new(4));
    }

    #[test]
    fn with_branch_sets_association() {
        let branch = BranchId::new(RevisionId::new(4), "x1");
        let c = Commit::new(RevisionId::new(5), RevisionId::new(4), "/", "", "m")
            .with_branch(branch.clone());
        assert!(c.is_branch_commit());
        assert_eq!(c.branch_id, Some(branch));
    }

    #[test]
    fn serde_roundtrip() {
        let c = Commit::new(RevisionId::new(2), RevisionId::new(1), "/a", "-\"b\"", "rm")
            .with_branch(BranchId::new(RevisionId::new(1), "fe"));
        let json = serde_json::to_string(&c).unwrap();
        let parsed: Commit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
