//! Error types for the merge crate.

use canopy_jsop::JsopError;
use canopy_store::StoreError;
use canopy_types::RevisionId;

/// Errors that abort a merge.
///
/// A merge either completes (possibly as a no-op) or fails with one of these
/// before anything is written; there is no partial commit.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No commit record exists at the requested branch tip revision.
    #[error("no commit found at revision {0}")]
    CommitNotFound(RevisionId),

    /// The commit to merge carries no branch association.
    #[error("commit {0} is not a private branch commit")]
    NotABranchCommit(RevisionId),

    /// A snapshot required for the three-way merge is missing.
    #[error("node {path} not found at revision {revision}")]
    NodeNotFound { path: String, revision: RevisionId },

    /// Both sides set the same property to different values.
    #[error(
        "concurrent modification of property {path} with conflicting values: {ours}, {theirs}"
    )]
    PropertyValueConflict {
        path: String,
        ours: String,
        theirs: String,
    },

    /// Both sides created a node with the same name and differing content.
    #[error("colliding concurrent node creation: {0}")]
    NodeCollision(String),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A recorded patch could not be parsed during re-rooting.
    #[error("patch codec error: {0}")]
    Codec(#[from] JsopError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
