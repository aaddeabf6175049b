//! Declarative pipeline builder.
//!
//! A [`Query`] names the start, the goal, and how to reach neighbours.
//! Selecting a factor turns it into a [`Pipeline`], which can be filtered,
//! restricted to or away from step sets, ordered, and reversed before it
//! compiles down to a single [`Expand`] implementation inside a
//! [`SearchSpec`].
//!
//! # Compiled expansion order
//!
//! ```text
//! neighbors(step) → inclusion / exclusion sets → level += step cost
//!   → factors(next, level) → filters → is_new(next) → nodes
//! ```
//!
//! `is_new` is asked at most once per neighbour, and only after its
//! factors survived the filters, so rejected steps are never marked seen.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use lodestar_kernel::{Level, Node, NodeComparer, StepEquality};
use lodestar_search::{Expand, SearchError, SearchSpec};

type NeighborFn<S> = dyn Fn(&S) -> Vec<S> + Send + Sync;
type CostFn<S> = dyn Fn(&S, &S) -> Level + Send + Sync;
type FactorFn<S, F> = dyn Fn(&S, Level) -> Vec<F> + Send + Sync;
type FilterFn<F> = dyn Fn(&F, Level) -> bool + Send + Sync;

/// Start, goal, and neighbour relation of a search.
pub struct Query<S> {
    start: S,
    goal: S,
    neighbors: Arc<NeighborFn<S>>,
    step_cost: Arc<CostFn<S>>,
}

impl<S> Query<S>
where
    S: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Every move costs one level.
    pub fn new<N>(start: S, goal: S, neighbors: N) -> Self
    where
        N: Fn(&S) -> Vec<S> + Send + Sync + 'static,
    {
        Self {
            start,
            goal,
            neighbors: Arc::new(neighbors),
            step_cost: Arc::new(|_: &S, _: &S| -> Level { 1 }),
        }
    }

    /// Level added by moving from the first step to the second.
    ///
    /// Costs below one are raised to one so levels always grow.
    #[must_use]
    pub fn with_step_cost<C>(mut self, cost: C) -> Self
    where
        C: Fn(&S, &S) -> Level + Send + Sync + 'static,
    {
        self.step_cost = Arc::new(cost);
        self
    }

    /// One factor per step.
    pub fn select<F, M>(self, factor: M) -> Pipeline<S, F>
    where
        F: 'static,
        M: Fn(&S, Level) -> F + Send + Sync + 'static,
    {
        Pipeline::new(self, Arc::new(move |s: &S, level| vec![factor(s, level)]))
    }

    /// Any number of factors per step; each becomes its own candidate node.
    pub fn select_many<F, I, M>(self, factors: M) -> Pipeline<S, F>
    where
        F: 'static,
        I: IntoIterator<Item = F>,
        M: Fn(&S, Level) -> I + Send + Sync + 'static,
    {
        Pipeline::new(
            self,
            Arc::new(move |s: &S, level| factors(s, level).into_iter().collect::<Vec<F>>()),
        )
    }
}

/// A query with factors attached, ready to be refined and built.
pub struct Pipeline<S, F> {
    query: Query<S>,
    factors: Arc<FactorFn<S, F>>,
    filters: Vec<Arc<FilterFn<F>>>,
    excluded: HashSet<S>,
    included: Option<HashSet<S>>,
    comparer: Option<NodeComparer<F>>,
    reversed: bool,
}

impl<S, F> Pipeline<S, F>
where
    S: Clone + Eq + Hash + Send + Sync + 'static,
    F: 'static,
{
    fn new(query: Query<S>, factors: Arc<FactorFn<S, F>>) -> Self {
        Self {
            query,
            factors,
            filters: Vec::new(),
            excluded: HashSet::new(),
            included: None,
            comparer: None,
            reversed: false,
        }
    }

    /// Keep only candidates whose factor and level satisfy `predicate`.
    /// Filters stack; a candidate must pass all of them.
    #[must_use]
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&F, Level) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(predicate));
        self
    }

    /// Never move onto any of `steps`.
    #[must_use]
    pub fn except(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.excluded.extend(steps);
        self
    }

    /// Only move onto steps in `steps`. Repeated calls widen the set.
    #[must_use]
    pub fn contains(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.included.get_or_insert_with(HashSet::new).extend(steps);
        self
    }

    /// Rank with `compare`, smallest first.
    #[must_use]
    pub fn order_by<C>(mut self, compare: C) -> Self
    where
        C: Fn(&F, &F) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        self.comparer = Some(NodeComparer::by(compare));
        self
    }

    /// Flip the ranking direction. Two calls cancel out.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }

    /// Compile into a search specification keyed by step value.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingComparer`] if no ordering was chosen.
    pub fn build(self) -> Result<SearchSpec<S, F, S>, SearchError> {
        let comparer = self.comparer.ok_or(SearchError::MissingComparer)?;
        let comparer = if self.reversed {
            comparer.reversed()
        } else {
            comparer
        };
        let expander = PipelineExpander {
            neighbors: self.query.neighbors,
            step_cost: self.query.step_cost,
            factors: self.factors,
            filters: self.filters,
            excluded: self.excluded,
            included: self.included,
        };
        SearchSpec::builder()
            .start(self.query.start)
            .goal(self.query.goal)
            .equality(StepEquality::value())
            .comparer(comparer)
            .expander(expander)
            .build()
    }
}

impl<S, F> Pipeline<S, F>
where
    S: Clone + Eq + Hash + Send + Sync + 'static,
    F: Ord + 'static,
{
    /// Rank by the factor's own `Ord`, smallest first.
    #[must_use]
    pub fn order_by_natural(mut self) -> Self {
        self.comparer = Some(NodeComparer::natural());
        self
    }
}

/// The compiled form of a [`Pipeline`].
struct PipelineExpander<S, F> {
    neighbors: Arc<NeighborFn<S>>,
    step_cost: Arc<CostFn<S>>,
    factors: Arc<FactorFn<S, F>>,
    filters: Vec<Arc<FilterFn<F>>>,
    excluded: HashSet<S>,
    included: Option<HashSet<S>>,
}

impl<S: Eq + Hash, F> PipelineExpander<S, F> {
    fn admits(&self, step: &S) -> bool {
        if self.excluded.contains(step) {
            return false;
        }
        match &self.included {
            Some(set) => set.contains(step),
            None => true,
        }
    }

    fn surviving_factors(&self, step: &S, level: Level) -> Vec<F> {
        (self.factors)(step, level)
            .into_iter()
            .filter(|f| self.filters.iter().all(|keep| keep(f, level)))
            .collect()
    }
}

impl<S: Clone + Eq + Hash, F> Expand<S, F> for PipelineExpander<S, F> {
    fn seed(&self, start: &S) -> Vec<Node<F, S>> {
        self.surviving_factors(start, 0)
            .into_iter()
            .map(|f| Node::new(start.clone(), f, 0))
            .collect()
    }

    fn expand(
        &self,
        step: &S,
        level: Level,
        is_new: &mut dyn FnMut(&S) -> bool,
    ) -> Vec<Node<F, S>> {
        let mut nodes = Vec::new();
        for next in (self.neighbors)(step) {
            if !self.admits(&next) {
                continue;
            }
            let reached = level.saturating_add((self.step_cost)(step, &next).max(1));
            let factors = self.surviving_factors(&next, reached);
            if factors.is_empty() || !is_new(&next) {
                continue;
            }
            nodes.extend(factors.into_iter().map(|f| Node::new(next.clone(), f, reached)));
        }
        nodes
    }
}
