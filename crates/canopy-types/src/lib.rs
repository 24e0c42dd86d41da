//! Foundation types for the canopy tree store.
//!
//! This crate provides the revision, branch, and commit record types used
//! throughout the canopy system. Every other canopy crate depends on
//! `canopy-types`.
//!
//! # Key Types
//!
//! - [`RevisionId`] — Monotonically increasing trunk revision number
//! - [`BranchId`] — Identity of a private branch line, rooted at a trunk revision
//! - [`Commit`] — An accepted, immutable commit record
//! - [`path`] — Joining of document tree path segments

pub mod branch;
pub mod commit;
pub mod error;
pub mod path;
pub mod revision;

pub use branch::BranchId;
pub use commit::Commit;
pub use error::TypeError;
pub use revision::RevisionId;
