//! Iterative deepening A*.
//!
//! Depth-first passes under a bound node. A pass returns `InProgress` with
//! the smallest node that overflowed the bound; that node becomes the bound
//! of the next pass. With an admissible, consistent factor and path-scoped
//! visited tracking, the first goal reached is optimal.

use std::cmp::Ordering;
use std::hash::Hash;

use lodestar_kernel::NodeId;

use crate::context::{Finish, Halt, SearchContext};
use crate::recursion::Recursion;
use crate::trace::IterationOutcome;

/// Run passes until a goal is found, the graph is exhausted, or the
/// escalation ceiling is hit.
pub(crate) fn run<S, F, K: Eq + Hash + Clone>(ctx: &mut SearchContext<'_, S, F, K>) -> Finish {
    let root = match ctx.seed() {
        Ok(seeds) => match seeds.first() {
            Some(&root) => root,
            None => return Finish::Exhausted,
        },
        Err(halt) => return Finish::Halted(halt),
    };

    let mut bound = root;
    let mut escalations: u32 = 0;
    loop {
        ctx.begin_iteration(root, bound);
        let mut path = vec![root];
        let outcome = search(ctx, &mut path, bound);
        match outcome {
            Err(halt) => {
                ctx.end_iteration(IterationOutcome::Halted);
                return Finish::Halted(halt);
            }
            Ok(Recursion::Found(goal)) => {
                ctx.end_iteration(IterationOutcome::Found {
                    node_id: goal.as_u64(),
                });
                return Finish::Goal(goal);
            }
            Ok(Recursion::NotFound) => {
                ctx.end_iteration(IterationOutcome::NotFound);
                return Finish::Exhausted;
            }
            Ok(Recursion::InProgress(next)) => {
                ctx.end_iteration(IterationOutcome::InProgress {
                    next_bound: next.as_u64(),
                });
                if escalations >= ctx.policy().max_iterations {
                    return Finish::IterationBudgetExceeded;
                }
                escalations += 1;
                log::debug!("bound escalated to {next} (escalation {escalations})");
                bound = next;
            }
        }
    }
}

/// Bounded depth-first search below the top of `path`.
fn search<S, F, K: Eq + Hash + Clone>(
    ctx: &mut SearchContext<'_, S, F, K>,
    path: &mut Vec<NodeId>,
    bound: NodeId,
) -> Result<Recursion, Halt> {
    let Some(&current) = path.last() else {
        return Ok(Recursion::NotFound);
    };
    if ctx.compare(current, bound) == Ordering::Greater {
        return Ok(Recursion::InProgress(current));
    }
    if ctx.is_goal(current) {
        return Ok(Recursion::Found(current));
    }

    let mut minimum: Option<NodeId> = None;
    for child in ctx.expand(current)? {
        path.push(child);
        let mark = ctx.enter(child);
        let outcome = search(ctx, path, bound);
        ctx.leave(mark);
        path.pop();

        match outcome? {
            Recursion::Found(goal) => return Ok(Recursion::Found(goal)),
            Recursion::InProgress(overflow) => match minimum {
                Some(m) if ctx.compare(overflow, m) != Ordering::Less => {}
                _ => minimum = Some(overflow),
            },
            Recursion::NotFound => {}
        }
    }
    Ok(minimum.map_or(Recursion::NotFound, Recursion::InProgress))
}
