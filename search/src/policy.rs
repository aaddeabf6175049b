//! Search policy types.

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY};

use crate::error::SearchError;

/// Default bound-escalation ceiling for iterative deepening.
pub const DEFAULT_IDA_MAX_ITERATIONS: u32 = 1024;

/// Default bound-widening ceiling for recursive best-first search.
pub const DEFAULT_RBFS_MAX_ITERATIONS: u32 = 128;

/// Budget and visited-set configuration for one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Maximum number of times the top-level bound may be raised after the
    /// first pass. Exceeding it ends the search with
    /// `IterationBudgetExceeded`.
    pub max_iterations: u32,
    /// Hard cap on node expansions across all passes (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// How long a step stays in the visited set.
    pub visited_scope: VisitedScope,
}

impl SearchPolicy {
    /// Defaults for iterative deepening A*: 1024 escalations, path scope.
    ///
    /// Path scope gives up the once-per-pass expansion guarantee of
    /// [`VisitedScope::Search`]: a step reached by two routes is expanded
    /// once per route. In exchange the first goal reached under an
    /// admissible, consistent factor is optimal. Use
    /// [`with_visited_scope`](Self::with_visited_scope) to opt back into
    /// search scope.
    #[must_use]
    pub fn iterative_deepening() -> Self {
        Self {
            max_iterations: DEFAULT_IDA_MAX_ITERATIONS,
            max_expansions: None,
            visited_scope: VisitedScope::Path,
        }
    }

    /// Defaults for recursive best-first search: 128 widenings, search scope.
    #[must_use]
    pub fn recursive_best_first() -> Self {
        Self {
            max_iterations: DEFAULT_RBFS_MAX_ITERATIONS,
            max_expansions: None,
            visited_scope: VisitedScope::Search,
        }
    }

    /// Same policy with a different iteration ceiling.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Same policy with an expansion budget.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Same policy with a different visited scope.
    #[must_use]
    pub fn with_visited_scope(mut self, visited_scope: VisitedScope) -> Self {
        self.visited_scope = visited_scope;
        self
    }

    /// Reject budgets that would stop a search before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_iterations` is zero or
    /// `max_expansions` is `Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_iterations == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_iterations must be at least 1".into(),
            });
        }
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1 when set".into(),
            });
        }
        Ok(())
    }

    /// JSON form recorded in traces and reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "max_iterations": self.max_iterations,
            "visited_scope": self.visited_scope.as_str(),
        })
    }

    /// Content hash of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &bytes))
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self::iterative_deepening()
    }
}

/// Lifetime of a step in the visited set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitedScope {
    /// One set per pass. A held step is never admitted twice, so a branch
    /// that reaches it late loses it. Recursive best-first search hands back
    /// the steps of a subtree it sets aside, so that subtree can be expanded
    /// again when it is resumed.
    Search,
    /// Membership is the active path plus the current expansion batch.
    /// Steps are released on backtrack, so a cheaper route found later is
    /// still explored. Cycles along the path are still excluded.
    Path,
}

impl VisitedScope {
    /// Stable lowercase name for traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Path => "path",
        }
    }
}
