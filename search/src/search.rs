//! Search entry point and result.

use std::hash::Hash;

use lodestar_kernel::{Node, NodeArena, NodeId};

use crate::cancel::CancelToken;
use crate::context::{Finish, SearchContext};
use crate::error::SearchError;
use crate::policy::SearchPolicy;
use crate::spec::SearchSpec;
use crate::trace::{SearchTrace, TerminationReason, TraceHeader};
use crate::{ida, rbfs};

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Iterative deepening A*: bounded depth-first passes, optimal under an
    /// admissible, consistent factor.
    IterativeDeepening,
    /// Recursive best-first search: best-first order in linear memory.
    RecursiveBestFirst,
}

impl Algorithm {
    /// Both algorithms, in a stable order.
    pub const ALL: [Self; 2] = [Self::IterativeDeepening, Self::RecursiveBestFirst];

    /// Stable lowercase name for traces and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IterativeDeepening => "ida_star",
            Self::RecursiveBestFirst => "rbfs",
        }
    }

    /// Parse the name produced by [`Algorithm::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// Policy used when the caller does not supply one.
    #[must_use]
    pub fn default_policy(self) -> SearchPolicy {
        match self {
            Self::IterativeDeepening => SearchPolicy::iterative_deepening(),
            Self::RecursiveBestFirst => SearchPolicy::recursive_best_first(),
        }
    }
}

/// Result of a search execution.
///
/// Always contains a complete [`SearchTrace`] regardless of how the search
/// terminated. A missing path is not an error: [`SearchResult::path`] is
/// empty and the termination reason says why.
#[derive(Debug)]
pub struct SearchResult<F, S> {
    /// The goal node (if found).
    pub goal: Option<NodeId>,
    /// All nodes created during search.
    pub nodes: NodeArena<F, S>,
    /// The complete audit trail.
    pub trace: SearchTrace,
}

impl<F, S> SearchResult<F, S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.goal.is_some()
    }

    /// The terminal goal node, if any.
    #[must_use]
    pub fn goal_node(&self) -> Option<&Node<F, S>> {
        self.goal.map(|id| self.nodes.get(id))
    }

    /// Why the search stopped.
    #[must_use]
    pub fn termination_reason(&self) -> TerminationReason {
        self.trace.metadata.termination_reason
    }

    /// Expansions performed across all passes.
    #[must_use]
    pub fn expansions(&self) -> u64 {
        self.trace.metadata.total_expansions
    }
}

impl<F: Clone, S> SearchResult<F, S> {
    /// Factors from start to goal; empty when no goal was reached.
    #[must_use]
    pub fn path(&self) -> Vec<F> {
        self.goal
            .map(|id| self.nodes.trace_back(id))
            .unwrap_or_default()
    }
}

impl<F, S: Clone> SearchResult<F, S> {
    /// Steps from start to goal; empty when no goal was reached.
    #[must_use]
    pub fn steps(&self) -> Vec<S> {
        self.goal
            .map(|id| self.nodes.trace_steps(id))
            .unwrap_or_default()
    }

    /// Steps of expanded nodes, in expansion order.
    #[must_use]
    pub fn expanded_steps(&self) -> Vec<S> {
        self.trace
            .expansions
            .iter()
            .filter_map(|e| self.nodes.find(e.node_id))
            .map(|(_, node)| node.step.clone())
            .collect()
    }
}

/// Run `algorithm` over `spec`.
///
/// Every runtime termination (goal, exhaustion, budgets, cancellation, a
/// caught expander panic) returns `Ok` with the trace preserved.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] when `policy` fails validation or
/// cannot be digested. No trace is produced in that case because no search
/// step was taken.
pub fn search<S, F, K>(
    spec: &SearchSpec<S, F, K>,
    algorithm: Algorithm,
    policy: &SearchPolicy,
    cancel: &CancelToken,
) -> Result<SearchResult<F, S>, SearchError>
where
    K: Eq + Hash + Clone,
{
    policy.validate()?;
    let policy_digest = policy
        .digest()
        .map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })?;

    log::debug!(
        "{} search started ({} visited scope, max_iterations {})",
        algorithm.as_str(),
        policy.visited_scope.as_str(),
        policy.max_iterations
    );

    let mut ctx = SearchContext::new(spec, policy, cancel);
    let finish = match algorithm {
        Algorithm::IterativeDeepening => ida::run(&mut ctx),
        Algorithm::RecursiveBestFirst => rbfs::run(&mut ctx),
    };

    let header = TraceHeader {
        algorithm,
        direction: spec.comparer().direction(),
        visited_scope: policy.visited_scope,
        policy_digest: policy_digest.as_str().to_string(),
    };
    let (nodes, trace) = ctx.finish(header, finish);
    let goal = match finish {
        Finish::Goal(id) => Some(id),
        _ => None,
    };
    Ok(SearchResult { goal, nodes, trace })
}
