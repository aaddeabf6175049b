//! Search specification and its builder.

use std::fmt;
use std::hash::Hash;

use lodestar_kernel::{NodeComparer, StepEquality};

use crate::cancel::CancelToken;
use crate::contract::Expand;
use crate::error::SearchError;
use crate::search::{search, Algorithm, SearchResult};

/// Everything a search needs: where to start, what to reach, how to rank
/// candidates, how to identify steps, and how to expand them.
///
/// A specification is immutable once built and holds no per-search state,
/// so it can be searched repeatedly and from several threads.
pub struct SearchSpec<S, F, K> {
    start: S,
    goal: S,
    goal_key: K,
    equality: StepEquality<S, K>,
    comparer: NodeComparer<F>,
    expander: Box<dyn Expand<S, F> + Send + Sync>,
}

impl<S, F, K: Eq + Hash> SearchSpec<S, F, K> {
    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> SearchSpecBuilder<S, F, K> {
        SearchSpecBuilder::default()
    }

    #[must_use]
    pub fn start(&self) -> &S {
        &self.start
    }

    #[must_use]
    pub fn goal(&self) -> &S {
        &self.goal
    }

    #[must_use]
    pub fn equality(&self) -> &StepEquality<S, K> {
        &self.equality
    }

    #[must_use]
    pub fn comparer(&self) -> &NodeComparer<F> {
        &self.comparer
    }

    #[must_use]
    pub fn expander(&self) -> &(dyn Expand<S, F> + Send + Sync) {
        self.expander.as_ref()
    }

    /// Whether `step` is the goal under the step equality.
    pub fn is_goal(&self, step: &S) -> bool {
        self.equality.key(step) == self.goal_key
    }
}

impl<S, F, K: Eq + Hash + Clone> SearchSpec<S, F, K> {
    /// Search with the algorithm's default policy and no cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] only if the default policy fails validation,
    /// which it never does for the built-in algorithms.
    pub fn run(&self, algorithm: Algorithm) -> Result<SearchResult<F, S>, SearchError> {
        search(self, algorithm, &algorithm.default_policy(), &CancelToken::new())
    }
}

impl<S: fmt::Debug, F, K> fmt::Debug for SearchSpec<S, F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSpec")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("comparer", &self.comparer)
            .finish_non_exhaustive()
    }
}

/// Incremental constructor for [`SearchSpec`].
///
/// Every part is required; [`SearchSpecBuilder::build`] reports the first
/// one missing.
pub struct SearchSpecBuilder<S, F, K> {
    start: Option<S>,
    goal: Option<S>,
    equality: Option<StepEquality<S, K>>,
    comparer: Option<NodeComparer<F>>,
    expander: Option<Box<dyn Expand<S, F> + Send + Sync>>,
}

impl<S, F, K> Default for SearchSpecBuilder<S, F, K> {
    fn default() -> Self {
        Self {
            start: None,
            goal: None,
            equality: None,
            comparer: None,
            expander: None,
        }
    }
}

impl<S, F, K: Eq + Hash> SearchSpecBuilder<S, F, K> {
    #[must_use]
    pub fn start(mut self, start: S) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn goal(mut self, goal: S) -> Self {
        self.goal = Some(goal);
        self
    }

    #[must_use]
    pub fn equality(mut self, equality: StepEquality<S, K>) -> Self {
        self.equality = Some(equality);
        self
    }

    #[must_use]
    pub fn comparer(mut self, comparer: NodeComparer<F>) -> Self {
        self.comparer = Some(comparer);
        self
    }

    #[must_use]
    pub fn expander<E>(mut self, expander: E) -> Self
    where
        E: Expand<S, F> + Send + Sync + 'static,
    {
        self.expander = Some(Box::new(expander));
        self
    }

    /// Validate and freeze the specification.
    ///
    /// # Errors
    ///
    /// Returns the `Missing*` [`SearchError`] for the first absent part, in
    /// the order start, goal, equality, comparer, expander.
    pub fn build(self) -> Result<SearchSpec<S, F, K>, SearchError> {
        let start = self.start.ok_or(SearchError::MissingStart)?;
        let goal = self.goal.ok_or(SearchError::MissingGoal)?;
        let equality = self.equality.ok_or(SearchError::MissingEquality)?;
        let comparer = self.comparer.ok_or(SearchError::MissingComparer)?;
        let expander = self.expander.ok_or(SearchError::MissingExpander)?;
        let goal_key = equality.key(&goal);
        Ok(SearchSpec {
            start,
            goal,
            goal_key,
            equality,
            comparer,
            expander,
        })
    }
}
