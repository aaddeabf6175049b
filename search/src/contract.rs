//! Successor expansion contract.
//!
//! The search core never computes factors or neighbours itself. An
//! [`Expand`] implementation turns a step into candidate nodes; the core
//! owns ordering, bounds, and visited tracking.

use lodestar_kernel::node::{Level, Node};

/// Producer of candidate nodes for a search.
///
/// # Contract
///
/// - `seed` returns the candidate node(s) for the start step at level 0.
///   A pipeline that maps one step to several factors may return several.
/// - `expand` returns successor nodes of `step`, each with a level of at
///   least `level + 1` domain unit.
/// - `expand` must consult `is_new` for every successor step it intends to
///   return and drop the step when `is_new` answers `false`. `is_new`
///   records membership as a side effect: ask once per step.
/// - Both methods must be deterministic for a given input, and reentrant
///   when the same specification is searched from several threads.
pub trait Expand<S, F> {
    /// Candidate nodes for the start step.
    fn seed(&self, start: &S) -> Vec<Node<F, S>>;

    /// Candidate successor nodes for `step`, already filtered by `is_new`.
    fn expand(
        &self,
        step: &S,
        level: Level,
        is_new: &mut dyn FnMut(&S) -> bool,
    ) -> Vec<Node<F, S>>;
}

/// [`Expand`] built from a pair of closures.
pub struct FnExpander<Sd, Ex> {
    seed: Sd,
    expand: Ex,
}

impl<Sd, Ex> FnExpander<Sd, Ex> {
    /// Wrap a seed closure and an expand closure.
    pub fn new(seed: Sd, expand: Ex) -> Self {
        Self { seed, expand }
    }
}

impl<S, F, Sd, Ex> Expand<S, F> for FnExpander<Sd, Ex>
where
    Sd: Fn(&S) -> Vec<Node<F, S>>,
    Ex: Fn(&S, Level, &mut dyn FnMut(&S) -> bool) -> Vec<Node<F, S>>,
{
    fn seed(&self, start: &S) -> Vec<Node<F, S>> {
        (self.seed)(start)
    }

    fn expand(
        &self,
        step: &S,
        level: Level,
        is_new: &mut dyn FnMut(&S) -> bool,
    ) -> Vec<Node<F, S>> {
        (self.expand)(step, level, is_new)
    }
}
