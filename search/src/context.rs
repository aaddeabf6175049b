//! State owned by one search invocation.
//!
//! Both algorithms drive the same context: it owns the node arena, the
//! visited set, the trace recorder, and the budget counters. Nothing in
//! here is shared between invocations, so one [`SearchSpec`] can be
//! searched from several threads at once.

use std::cmp::Ordering;
use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};

use lodestar_kernel::{NodeArena, NodeId};

use crate::cancel::CancelToken;
use crate::policy::SearchPolicy;
use crate::spec::SearchSpec;
use crate::trace::{
    IterationOutcome, PanicStage, SearchTrace, TerminationReason, TraceHeader, TraceRecorder,
};
use crate::visited::{PathMark, VisitedSet};

/// Why a search stopped before reaching a natural end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    Cancelled,
    ExpansionBudgetExceeded,
    ExpanderPanicked(PanicStage),
}

/// How an algorithm's outer loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Finish {
    Goal(NodeId),
    Exhausted,
    IterationBudgetExceeded,
    Halted(Halt),
}

impl Finish {
    pub(crate) fn termination_reason(self) -> TerminationReason {
        match self {
            Self::Goal(id) => TerminationReason::GoalReached {
                node_id: id.as_u64(),
            },
            Self::Exhausted => TerminationReason::Exhausted,
            Self::IterationBudgetExceeded => TerminationReason::IterationBudgetExceeded,
            Self::Halted(Halt::Cancelled) => TerminationReason::Cancelled,
            Self::Halted(Halt::ExpansionBudgetExceeded) => {
                TerminationReason::ExpansionBudgetExceeded
            }
            Self::Halted(Halt::ExpanderPanicked(stage)) => {
                TerminationReason::ExpanderPanicked { stage }
            }
        }
    }
}

pub(crate) struct SearchContext<'a, S, F, K> {
    spec: &'a SearchSpec<S, F, K>,
    policy: &'a SearchPolicy,
    cancel: &'a CancelToken,
    arena: NodeArena<F, S>,
    visited: VisitedSet<K>,
    recorder: TraceRecorder,
}

impl<'a, S, F, K: Eq + Hash + Clone> SearchContext<'a, S, F, K> {
    pub(crate) fn new(
        spec: &'a SearchSpec<S, F, K>,
        policy: &'a SearchPolicy,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            spec,
            policy,
            cancel,
            arena: NodeArena::new(),
            visited: VisitedSet::new(policy.visited_scope),
            recorder: TraceRecorder::default(),
        }
    }

    pub(crate) fn policy(&self) -> &SearchPolicy {
        self.policy
    }

    /// Allocate the start candidates, best first.
    pub(crate) fn seed(&mut self) -> Result<Vec<NodeId>, Halt> {
        let spec = self.spec;
        let seeds = catch_unwind(AssertUnwindSafe(|| spec.expander().seed(spec.start())))
            .map_err(|_| Halt::ExpanderPanicked(PanicStage::Seed))?;
        let mut ids: Vec<NodeId> = seeds.into_iter().map(|n| self.arena.alloc(n)).collect();
        self.sort(&mut ids);
        Ok(ids)
    }

    /// Start a pass from `root` with `bound` as its threshold.
    pub(crate) fn begin_iteration(&mut self, root: NodeId, bound: NodeId) {
        let key = self.spec.equality().key(&self.arena.get(root).step);
        self.visited.reset(key);
        self.recorder.begin_iteration(bound);
        log::debug!(
            "pass {} started from {root} with bound {bound}",
            self.recorder.iteration()
        );
    }

    pub(crate) fn end_iteration(&mut self, outcome: IterationOutcome) {
        log::debug!(
            "pass {} ended: {outcome:?} after {} expansions",
            self.recorder.iteration(),
            self.recorder.expansion_count()
        );
        self.recorder.end_iteration(outcome);
    }

    pub(crate) fn is_goal(&self, id: NodeId) -> bool {
        self.spec.is_goal(&self.arena.get(id).step)
    }

    pub(crate) fn compare(&self, a: NodeId, b: NodeId) -> Ordering {
        self.spec
            .comparer()
            .compare_nodes(self.arena.get(a), self.arena.get(b))
    }

    /// Whichever of `a` and `b` ranks first; `a` on ties.
    pub(crate) fn min(&self, a: NodeId, b: NodeId) -> NodeId {
        if self.compare(a, b) == Ordering::Greater {
            b
        } else {
            a
        }
    }

    /// Expand `id`: children linked under it, filtered by the visited set,
    /// sorted best first.
    pub(crate) fn expand(&mut self, id: NodeId) -> Result<Vec<NodeId>, Halt> {
        if self.cancel.is_cancelled() {
            return Err(Halt::Cancelled);
        }
        if let Some(max) = self.policy.max_expansions {
            if self.recorder.expansion_count() >= max {
                return Err(Halt::ExpansionBudgetExceeded);
            }
        }

        let spec = self.spec;
        let equality = spec.equality();
        let visited = &mut self.visited;
        let node = self.arena.get(id);
        let level = node.level;
        let mut duplicates: u64 = 0;

        visited.begin_batch();
        let produced = catch_unwind(AssertUnwindSafe(|| {
            spec.expander().expand(&node.step, level, &mut |step: &S| {
                let fresh = visited.is_new(equality.key(step));
                if !fresh {
                    duplicates += 1;
                }
                fresh
            })
        }))
        .map_err(|_| Halt::ExpanderPanicked(PanicStage::Expand))?;

        let mut children: Vec<NodeId> = produced
            .into_iter()
            .map(|child| self.arena.alloc_child(id, child))
            .collect();
        self.sort(&mut children);

        for child in &children {
            log::trace!(
                "node {id} ({level}) -> node {child} ({})",
                self.arena.get(*child).level
            );
        }
        self.recorder.record_expansion(id, level, &children, duplicates);
        Ok(children)
    }

    /// Put `id` on the active path.
    pub(crate) fn enter(&mut self, id: NodeId) -> PathMark {
        let key = self.spec.equality().key(&self.arena.get(id).step);
        self.visited.enter(key)
    }

    /// Journal position to hand to [`SearchContext::release`].
    pub(crate) fn checkpoint(&self) -> PathMark {
        self.visited.checkpoint()
    }

    /// Let steps admitted since `mark` be generated again.
    pub(crate) fn release(&mut self, mark: PathMark) {
        self.visited.release(mark);
    }

    pub(crate) fn leave(&mut self, mark: PathMark) {
        self.visited.leave(mark);
    }

    /// Close the trace and hand back everything the search produced.
    pub(crate) fn finish(
        self,
        header: TraceHeader,
        finish: Finish,
    ) -> (NodeArena<F, S>, SearchTrace) {
        let reason = finish.termination_reason();
        log::debug!(
            "search finished: {} after {} expansions",
            reason.as_str(),
            self.recorder.expansion_count()
        );
        let spec = self.spec;
        let trace = self
            .recorder
            .finish(&self.arena, |step| spec.is_goal(step), header, reason);
        (self.arena, trace)
    }

    fn sort(&self, ids: &mut [NodeId]) {
        let comparer = self.spec.comparer();
        let arena = &self.arena;
        ids.sort_by(|a, b| comparer.compare_nodes(arena.get(*a), arena.get(*b)));
    }
}
