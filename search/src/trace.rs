//! `SearchTrace`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of [`ExpandEvent`]
//! entries. Iteration events record each bound escalation; node summaries
//! are a derived index for path reconstruction.

use std::collections::HashMap;

use lodestar_kernel::order::Direction;
use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};
use lodestar_kernel::{Level, NodeArena, NodeId};

use crate::policy::VisitedScope;
use crate::search::Algorithm;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchTrace {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEvent>,
    /// One entry per pass, in order.
    pub iterations: Vec<IterationEvent>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<NodeSummary>,
    /// Aggregate counters and configuration echo.
    pub metadata: TraceMetadata,
}

/// One node expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEvent {
    /// Total order of expansions across all passes.
    pub expansion_order: u64,
    /// Pass the expansion belongs to (1-based).
    pub iteration: u32,
    /// The node being expanded.
    pub node_id: u64,
    /// Level of the expanded node.
    pub level: Level,
    /// Generated child ids, in comparer order.
    pub children: Vec<u64>,
    /// Successor steps rejected by the visited set.
    pub duplicates_suppressed: u64,
}

impl ExpandEvent {
    /// True if the expansion produced no children.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.children.is_empty()
    }
}

/// One pass of the outer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationEvent {
    /// Pass number (1-based).
    pub iteration: u32,
    /// Node whose factor served as the bound.
    pub bound_node_id: u64,
    /// Expansions performed during this pass.
    pub expansions: u64,
    /// How the pass ended.
    pub outcome: IterationOutcome,
}

/// How one pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A goal was reached.
    Found { node_id: u64 },
    /// The bound overflowed; `next_bound` is the backed-up candidate.
    InProgress { next_bound: u64 },
    /// Nothing left to explore.
    NotFound,
    /// Stopped by cancellation, budget, or an expander panic.
    Halted,
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub level: Level,
    pub depth: u64,
    pub is_goal: bool,
    /// First expansion of this node, if it was ever expanded.
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMetadata {
    pub algorithm: Algorithm,
    pub direction: Direction,
    pub visited_scope: VisitedScope,
    pub policy_digest: String,

    // Counters
    pub total_expansions: u64,
    pub total_nodes: u64,
    pub total_duplicates_suppressed: u64,
    pub total_dead_ends: u64,
    pub iterations: u32,
    pub max_depth: u64,
    pub termination_reason: TerminationReason,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A goal node was reached.
    GoalReached { node_id: u64 },
    /// Every reachable step was explored without reaching the goal.
    Exhausted,
    /// The bound escalation ceiling was hit.
    IterationBudgetExceeded,
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
    /// The cancel token was triggered.
    Cancelled,
    /// The expander panicked; the panic was caught.
    ExpanderPanicked { stage: PanicStage },
}

impl TerminationReason {
    /// Stable lowercase name for traces and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::Exhausted => "exhausted",
            Self::IterationBudgetExceeded => "iteration_budget_exceeded",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::Cancelled => "cancelled",
            Self::ExpanderPanicked { .. } => "expander_panicked",
        }
    }
}

/// Expander callback that panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStage {
    /// `Expand::seed`.
    Seed,
    /// `Expand::expand`.
    Expand,
}

impl PanicStage {
    /// Stable lowercase name for traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Expand => "expand",
        }
    }
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// Accumulates events while a search runs.
#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    expansions: Vec<ExpandEvent>,
    iterations: Vec<IterationEvent>,
    first_expansion: HashMap<NodeId, u64>,
    pass_start: u64,
    bound: Option<NodeId>,
    duplicates: u64,
}

impl TraceRecorder {
    pub(crate) fn expansion_count(&self) -> u64 {
        self.expansions.len() as u64
    }

    pub(crate) fn iteration(&self) -> u32 {
        u32::try_from(self.iterations.len()).unwrap_or(u32::MAX) + 1
    }

    pub(crate) fn begin_iteration(&mut self, bound: NodeId) {
        self.pass_start = self.expansion_count();
        self.bound = Some(bound);
    }

    pub(crate) fn end_iteration(&mut self, outcome: IterationOutcome) {
        let Some(bound) = self.bound.take() else {
            return;
        };
        self.iterations.push(IterationEvent {
            iteration: self.iteration(),
            bound_node_id: bound.as_u64(),
            expansions: self.expansion_count() - self.pass_start,
            outcome,
        });
    }

    pub(crate) fn record_expansion(
        &mut self,
        node: NodeId,
        level: Level,
        children: &[NodeId],
        duplicates_suppressed: u64,
    ) {
        let expansion_order = self.expansion_count();
        self.first_expansion.entry(node).or_insert(expansion_order);
        self.duplicates += duplicates_suppressed;
        self.expansions.push(ExpandEvent {
            expansion_order,
            iteration: self.iteration(),
            node_id: node.as_u64(),
            level,
            children: children.iter().map(|c| c.as_u64()).collect(),
            duplicates_suppressed,
        });
    }

    /// Seal the log into a trace.
    pub(crate) fn finish<F, S>(
        self,
        arena: &NodeArena<F, S>,
        is_goal: impl Fn(&S) -> bool,
        header: TraceHeader,
        termination_reason: TerminationReason,
    ) -> SearchTrace {
        let mut depths: Vec<u64> = Vec::with_capacity(arena.len());
        let mut node_summaries = Vec::with_capacity(arena.len());
        for (id, node) in arena.iter() {
            // Parents are always allocated before their children.
            let depth = node
                .previous()
                .and_then(|p| depths.get(p.index()))
                .map_or(0, |d| d + 1);
            depths.push(depth);
            node_summaries.push(NodeSummary {
                node_id: id.as_u64(),
                parent_id: node.previous().map(NodeId::as_u64),
                level: node.level,
                depth,
                is_goal: is_goal(&node.step),
                expansion_order: self.first_expansion.get(&id).copied(),
            });
        }

        let metadata = TraceMetadata {
            algorithm: header.algorithm,
            direction: header.direction,
            visited_scope: header.visited_scope,
            policy_digest: header.policy_digest,
            total_expansions: self.expansion_count(),
            total_nodes: arena.len() as u64,
            total_duplicates_suppressed: self.duplicates,
            total_dead_ends: self.expansions.iter().filter(|e| e.is_dead_end()).count() as u64,
            iterations: u32::try_from(self.iterations.len()).unwrap_or(u32::MAX),
            max_depth: depths.iter().copied().max().unwrap_or(0),
            termination_reason,
        };

        SearchTrace {
            expansions: self.expansions,
            iterations: self.iterations,
            node_summaries,
            metadata,
        }
    }
}

/// Configuration echo carried into the trace metadata.
#[derive(Debug, Clone)]
pub(crate) struct TraceHeader {
    pub(crate) algorithm: Algorithm,
    pub(crate) direction: Direction,
    pub(crate) visited_scope: VisitedScope,
    pub(crate) policy_digest: String,
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchTrace {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "iterations": self.iterations.iter().map(iteration_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "children": e.children,
        "dead_end": e.is_dead_end(),
        "duplicates_suppressed": e.duplicates_suppressed,
        "expansion_order": e.expansion_order,
        "iteration": e.iteration,
        "level": e.level,
        "node_id": e.node_id,
    })
}

fn iteration_event_to_json(e: &IterationEvent) -> serde_json::Value {
    serde_json::json!({
        "bound_node_id": e.bound_node_id,
        "expansions": e.expansions,
        "iteration": e.iteration,
        "outcome": iteration_outcome_to_json(e.outcome),
    })
}

fn iteration_outcome_to_json(o: IterationOutcome) -> serde_json::Value {
    match o {
        IterationOutcome::Found { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "found"})
        }
        IterationOutcome::InProgress { next_bound } => {
            serde_json::json!({"next_bound": next_bound, "type": "in_progress"})
        }
        IterationOutcome::NotFound => serde_json::json!({"type": "not_found"}),
        IterationOutcome::Halted => serde_json::json!({"type": "halted"}),
    }
}

fn node_summary_to_json(n: &NodeSummary) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "is_goal": n.is_goal,
        "level": n.level,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
    })
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "algorithm": m.algorithm.as_str(),
        "direction": m.direction.as_str(),
        "iterations": m.iterations,
        "max_depth": m.max_depth,
        "policy_digest": m.policy_digest,
        "termination_reason": termination_reason_to_json(m.termination_reason),
        "total_dead_ends": m.total_dead_ends,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_nodes": m.total_nodes,
        "visited_scope": m.visited_scope.as_str(),
    })
}

fn termination_reason_to_json(r: TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": r.as_str()})
        }
        TerminationReason::ExpanderPanicked { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": r.as_str()})
        }
        TerminationReason::Exhausted
        | TerminationReason::IterationBudgetExceeded
        | TerminationReason::ExpansionBudgetExceeded
        | TerminationReason::Cancelled => serde_json::json!({"type": r.as_str()}),
    }
}
