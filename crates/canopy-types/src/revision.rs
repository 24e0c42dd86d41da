use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a commit in the store.
///
/// Trunk revisions form a strictly increasing sequence. Branch commits draw
/// their numbers from the same sequence, so unrelated revisions interleave
/// with a branch's own commits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(u64);

impl RevisionId {
    /// Wrap a raw revision number.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw revision number.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The revision directly after this one in the shared numbering space.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevisionId({})", self.0)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RevisionId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidRevision(s.to_string()))
    }
}

impl From<u64> for RevisionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<RevisionId> for u64 {
    fn from(id: RevisionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_value() {
        assert!(RevisionId::new(1) < RevisionId::new(2));
        assert!(RevisionId::new(7) <= RevisionId::new(7));
    }

    #[test]
    fn next_increments() {
        assert_eq!(RevisionId::new(3).next(), RevisionId::new(4));
    }

    #[test]
    fn display_and_parse_roundtrip() {
        let rev = RevisionId::new(42);
        let parsed: RevisionId = rev.to_string().parse().unwrap();
        assert_eq!(parsed, rev);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-number".parse::<RevisionId>().unwrap_err();
        assert!(matches!(err, TypeError::InvalidRevision(_)));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&RevisionId::new(9)).unwrap();
        assert_eq!(json, "9");
        let parsed: RevisionId = serde_json::from_str("9").unwrap();
        assert_eq!(parsed, RevisionId::new(9));
    }
}
