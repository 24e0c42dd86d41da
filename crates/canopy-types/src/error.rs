//! Error types for the foundation crate.

/// Errors raised while parsing foundation types from their text forms.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The text is not a valid revision number.
    #[error("invalid revision id: {0:?}")]
    InvalidRevision(String),

    /// The text is not of the canonical `<rootRevision>-<suffix>` form.
    #[error("invalid branch id: {0:?}")]
    InvalidBranchId(String),
}
