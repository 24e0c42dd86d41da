use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::revision::RevisionId;

/// Identity of a private branch line.
///
/// A branch id couples the trunk revision the branch was created at with a
/// distinguishing suffix assigned by the store. All commits carrying the same
/// branch id form one branch line. The canonical text form is
/// `<rootRevision>-<suffix>`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BranchId {
    root: RevisionId,
    suffix: String,
}

impl BranchId {
    /// Create a branch id rooted at `root` with the given suffix.
    pub fn new(root: RevisionId, suffix: impl Into<String>) -> Self {
        Self {
            root,
            suffix: suffix.into(),
        }
    }

    /// The trunk revision the branch was created at.
    ///
    /// Fixed for the lifetime of the branch.
    pub fn root(&self) -> RevisionId {
        self.root
    }

    /// The distinguishing suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Debug for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BranchId({self})")
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.root, self.suffix)
    }
}

impl FromStr for BranchId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (root, suffix) = s
            .split_once('-')
            .ok_or_else(|| TypeError::InvalidBranchId(s.to_string()))?;
        if suffix.is_empty() {
            return Err(TypeError::InvalidBranchId(s.to_string()));
        }
        let root = root
            .parse::<RevisionId>()
            .map_err(|_| TypeError::InvalidBranchId(s.to_string()))?;
        Ok(Self::new(root, suffix))
    }
}
