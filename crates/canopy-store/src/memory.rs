use std::collections::BTreeMap;
use std::sync::RwLock;

use canopy_types::{BranchId, Commit, RevisionId};

use crate::error::{StoreError, StoreResult};
use crate::node::Node;
use crate::traits::NodeStore;

/// In-memory node store for tests and embedding.
///
/// Snapshots are registered directly per revision (and optionally per branch
/// line); fetches navigate from the registered root by path. `commit` records
/// the patch, advances the head, and assigns the next revision — it does not
/// materialize a snapshot for the new revision, callers register those
/// themselves. All state sits behind a `RwLock` for safe concurrent access.
pub struct InMemoryNodeStore {
    inner: RwLock<Inner>,
}

struct Inner {
    commits: BTreeMap<RevisionId, Commit>,
    trunk_roots: BTreeMap<RevisionId, Node>,
    branch_roots: BTreeMap<(BranchId, RevisionId), Node>,
    head: RevisionId,
}

impl InMemoryNodeStore {
    /// Create an empty store with the head at revision 0.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                commits: BTreeMap::new(),
                trunk_roots: BTreeMap::new(),
                branch_roots: BTreeMap::new(),
                head: RevisionId::new(0),
            }),
        }
    }

    /// Move the trunk head to `revision`.
    pub fn set_head(&self, revision: RevisionId) {
        self.inner.write().expect("lock poisoned").head = revision;
    }

    /// Register a commit record under its own revision.
    pub fn put_commit(&self, commit: Commit) {
        self.inner
            .write()
            .expect("lock poisoned")
            .commits
            .insert(commit.revision_id, commit);
    }

    /// Register the trunk root snapshot for `revision`.
    pub fn put_trunk_root(&self, revision: RevisionId, root: Node) {
        self.inner
            .write()
            .expect("lock poisoned")
            .trunk_roots
            .insert(revision, root);
    }

    /// Register a branch line's root snapshot for `revision`.
    pub fn put_branch_root(&self, branch: BranchId, revision: RevisionId, root: Node) {
        self.inner
            .write()
            .expect("lock poisoned")
            .branch_roots
            .insert((branch, revision), root);
    }

    /// Number of commit records held.
    pub fn commit_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").commits.len()
    }
}

impl Default for InMemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigate from a registered root to the node at `path`.
fn descend<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    if path == root.path() {
        return Some(root);
    }
    let rel = path.strip_prefix(root.path())?;
    // Reject sibling prefixes such as "/ab" under a root at "/a".
    let rel = if root.path().ends_with('/') {
        rel
    } else {
        rel.strip_prefix('/')?
    };
    let mut node = root;
    for segment in rel.split('/').filter(|s| !s.is_empty()) {
        node = node.child(segment)?;
    }
    Some(node)
}

impl NodeStore for InMemoryNodeStore {
    fn fetch_commit(&self, revision: RevisionId) -> StoreResult<Option<Commit>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.commits.get(&revision).cloned())
    }

    fn head_revision(&self) -> StoreResult<RevisionId> {
        Ok(self.inner.read().expect("lock poisoned").head)
    }

    fn fetch_node(
        &self,
        path: &str,
        revision: RevisionId,
        branch: Option<&BranchId>,
    ) -> StoreResult<Option<Node>> {
        let inner = self.inner.read().expect("lock poisoned");
        let root = match branch {
            Some(branch) => inner.branch_roots.get(&(branch.clone(), revision)),
            None => inner.trunk_roots.get(&revision),
        };
        Ok(root.and_then(|root| descend(root, path)).cloned())
    }

    fn commit(&self, patch: &str, base: RevisionId, message: &str) -> StoreResult<RevisionId> {
        let mut inner = self.inner.write().expect("lock poisoned");
        if base != inner.head {
            return Err(StoreError::StaleBase {
                base,
                head: inner.head,
            });
        }
        // Revisions come from the shared numbering space: branch commits may
        // already occupy numbers above the trunk head.
        let highest = inner
            .commits
            .keys()
            .next_back()
            .copied()
            .unwrap_or(inner.head)
            .max(inner.head);
        let revision = highest.next();
        inner
            .commits
            .insert(revision, Commit::new(revision, base, "", patch, message));
        inner.head = revision;
        Ok(revision)
    }
}

impl std::fmt::Debug for InMemoryNodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryNodeStore")
            .field("head", &inner.head)
            .field("commit_count", &inner.commits.len())
            .finish()
    }
}
