//! Tri-state result of one recursive search call.

use lodestar_kernel::NodeId;

/// Outcome a recursive search call hands back to its caller.
///
/// Recursion never unwinds for control flow: every call returns one of
/// these, and the caller decides whether to short-circuit, re-rank, or drop
/// the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recursion {
    /// A goal node was reached. Callers propagate it unchanged.
    Found(NodeId),
    /// The subtree overflowed its bound; the node is the best backed-up
    /// candidate for the next bound.
    InProgress(NodeId),
    /// The subtree holds no goal and nothing left to explore.
    NotFound,
}

impl Recursion {
    /// Node carried by `Found` or `InProgress`.
    #[must_use]
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Found(id) | Self::InProgress(id) => Some(id),
            Self::NotFound => None,
        }
    }

    /// Whether this is `Found`.
    #[must_use]
    pub fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Stable lowercase name for traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::InProgress(_) => "in_progress",
            Self::NotFound => "not_found",
        }
    }
}
