//! Error types for the store crate.

use canopy_types::RevisionId;

/// Errors that can occur while talking to the node store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The base revision no longer matches the trunk head at append time.
    #[error("stale base revision {base}: trunk head is {head}")]
    StaleBase {
        base: RevisionId,
        head: RevisionId,
    },

    /// Backend failure while reading or writing records.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
