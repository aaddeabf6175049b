//! Recursive best-first search.
//!
//! Each call keeps its successors ranked and descends into the best one
//! under a local bound: the tighter of the runner-up and the inherited
//! bound. A branch that overflows comes back `InProgress` with its
//! backed-up node. The branch stays in the list, now ranked by that node,
//! and its subtree's visited steps are released so a later descent
//! regenerates them.
//!
//! When the top-level call itself backs up, the backed-up node widens the
//! bound and the search restarts from the root, at most
//! `max_iterations` times.

use std::cmp::Ordering;
use std::hash::Hash;

use lodestar_kernel::NodeId;

use crate::context::{Finish, Halt, SearchContext};
use crate::recursion::Recursion;
use crate::successors::SuccessorList;
use crate::trace::IterationOutcome;

pub(crate) fn run<S, F, K: Eq + Hash + Clone>(ctx: &mut SearchContext<'_, S, F, K>) -> Finish {
    let root = match ctx.seed() {
        Ok(seeds) => match seeds.first() {
            Some(&root) => root,
            None => return Finish::Exhausted,
        },
        Err(halt) => return Finish::Halted(halt),
    };

    let mut bound = root;
    let mut widenings: u32 = 0;
    loop {
        ctx.begin_iteration(root, bound);
        match search(ctx, root, bound) {
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
                if widenings >= ctx.policy().max_iterations {
                    return Finish::IterationBudgetExceeded;
                }
                widenings += 1;
                log::debug!("bound widened to {next} (widening {widenings})");
                bound = next;
            }
        }
    }
}

fn search<S, F, K: Eq + Hash + Clone>(
    ctx: &mut SearchContext<'_, S, F, K>,
    current: NodeId,
    bound: NodeId,
) -> Result<Recursion, Halt> {
    if ctx.compare(current, bound) == Ordering::Greater {
        return Ok(Recursion::InProgress(current));
    }
    if ctx.is_goal(current) {
        return Ok(Recursion::Found(current));
    }

    let children = ctx.expand(current)?;
    if children.is_empty() {
        return Ok(Recursion::NotFound);
    }

    let mut successors = SuccessorList::new(children);
    // `<=`, not `<`: a branch tied with the bound is still explored.
    while let Some(best) = successors.best() {
        if ctx.compare(best.rank, bound) == Ordering::Greater {
            return Ok(Recursion::InProgress(best.rank));
        }
        let local = successors
            .second()
            .map_or(bound, |second| ctx.min(second.rank, bound));

        let checkpoint = ctx.checkpoint();
        let mark = ctx.enter(best.node);
        let outcome = search(ctx, best.node, local);
        ctx.leave(mark);

        match outcome? {
            Recursion::Found(goal) => return Ok(Recursion::Found(goal)),
            Recursion::InProgress(backed_up) => {
                ctx.release(checkpoint);
                successors.back_up(backed_up, |a, b| ctx.compare(a, b));
            }
            Recursion::NotFound => successors.drop_best(),
        }
    }
    Ok(Recursion::NotFound)
}
