//! Ordered candidate list for recursive best-first search.
//!
//! Each entry is a branch: the successor node itself, plus the node whose
//! factor currently ranks it. A fresh branch ranks by its own factor; once
//! its subtree backs up, it ranks by the backed-up node while the branch
//! node stays in place, so the subtree can be expanded again later.
//!
//! Entries are kept sorted by rank. Sorting is stable, so branches with
//! equal ranks keep their expansion order.

use std::cmp::Ordering;

use lodestar_kernel::NodeId;

/// One successor and the node that ranks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Successor to descend into.
    pub node: NodeId,
    /// Node whose factor ranks the branch. Equal to `node` until the
    /// branch backs up.
    pub rank: NodeId,
}

impl Branch {
    #[must_use]
    pub fn fresh(node: NodeId) -> Self {
        Self { node, rank: node }
    }

    /// Whether the branch has been explored and backed up at least once.
    #[must_use]
    pub fn is_backed_up(&self) -> bool {
        self.node != self.rank
    }
}

/// Successors of one node, best first.
#[derive(Debug, Clone, Default)]
pub struct SuccessorList {
    entries: Vec<Branch>,
}

impl SuccessorList {
    /// Wrap successors already sorted by their own factors.
    #[must_use]
    pub fn new(sorted: Vec<NodeId>) -> Self {
        Self {
            entries: sorted.into_iter().map(Branch::fresh).collect(),
        }
    }

    /// Best remaining branch.
    #[must_use]
    pub fn best(&self) -> Option<Branch> {
        self.entries.first().copied()
    }

    /// Runner-up, used to tighten the local bound.
    #[must_use]
    pub fn second(&self) -> Option<Branch> {
        self.entries.get(1).copied()
    }

    /// Re-rank the best branch by `backed_up` and move it into place.
    ///
    /// The branch goes after every entry whose rank is not worse, so a
    /// branch tied with a sibling yields to that sibling.
    pub fn back_up(&mut self, backed_up: NodeId, compare: impl Fn(NodeId, NodeId) -> Ordering) {
        if self.entries.is_empty() {
            return;
        }
        let mut branch = self.entries.remove(0);
        branch.rank = backed_up;
        let at = self
            .entries
            .partition_point(|e| compare(e.rank, backed_up) != Ordering::Greater);
        self.entries.insert(at, branch);
    }

    /// Remove the best branch for good.
    pub fn drop_best(&mut self) {
        if !self.entries.is_empty() {
            self.entries.remove(0);
        }
    }

    /// Number of remaining branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no branch remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining branches, best first.
    #[must_use]
    pub fn as_slice(&self) -> &[Branch] {
        &self.entries
    }
}
