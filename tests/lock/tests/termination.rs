//! Termination lock tests: every way a search can stop returns `Ok` with a
//! trace, and concurrent searches over one specification do not interfere.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lock_tests::fixtures::{optimality_graph, weighted};
use lodestar_kernel::{Level, Node, NodeComparer, StepEquality};
use lodestar_search::trace::PanicStage;
use lodestar_search::{
    search, Algorithm, CancelToken, FnExpander, SearchPolicy, SearchSpec, TerminationReason,
};

/// Unbounded counter line 0 → 1 → 2 → …; factor is the step.
fn counter_line(
    on_expand: impl Fn(u32) + Send + Sync + 'static,
) -> SearchSpec<u32, u32, u32> {
    SearchSpec::builder()
        .start(0)
        .goal(u32::MAX)
        .equality(StepEquality::value())
        .comparer(NodeComparer::natural())
        .expander(FnExpander::new(
            |s: &u32| vec![Node::new(*s, *s, 0)],
            move |s: &u32, level: Level, is_new: &mut dyn FnMut(&u32) -> bool| -> Vec<Node<u32, u32>> {
                on_expand(*s);
                let next = s + 1;
                if is_new(&next) {
                    vec![Node::new(next, next, level + 1)]
                } else {
                    Vec::new()
                }
            },
        ))
        .build()
        .unwrap()
}

#[test]
fn disconnected_goal_is_exhausted() {
    let spec = weighted('S', 'Z', &[('S', 'A', 1), ('A', 'B', 1)], &[]);
    for algorithm in Algorithm::ALL {
        let result = spec.run(algorithm).unwrap();
        assert_eq!(result.termination_reason(), TerminationReason::Exhausted, "{algorithm:?}");
        assert!(result.goal.is_none());
        assert!(result.expansions() > 0);
    }
}

#[test]
fn empty_seed_is_exhausted_without_expanding() {
    let spec: SearchSpec<u8, u8, u8> = SearchSpec::builder()
        .start(0)
        .goal(1)
        .equality(StepEquality::value())
        .comparer(NodeComparer::natural())
        .expander(FnExpander::new(
            |_: &u8| Vec::new(),
            |_: &u8, _: Level, _: &mut dyn FnMut(&u8) -> bool| -> Vec<Node<u8, u8>> { Vec::new() },
        ))
        .build()
        .unwrap();
    for algorithm in Algorithm::ALL {
        let result = spec.run(algorithm).unwrap();
        assert_eq!(result.termination_reason(), TerminationReason::Exhausted);
        assert_eq!(result.expansions(), 0);
        assert!(result.trace.iterations.is_empty());
    }
}

#[test]
fn iteration_budget_stops_an_unbounded_line() {
    let spec = counter_line(|_| {});
    for algorithm in Algorithm::ALL {
        let policy = algorithm.default_policy().with_max_iterations(3);
        let result = search(&spec, algorithm, &policy, &CancelToken::new()).unwrap();
        assert_eq!(
            result.termination_reason(),
            TerminationReason::IterationBudgetExceeded,
            "{algorithm:?}"
        );
        assert_eq!(result.trace.iterations.len(), 4);
    }
}

#[test]
fn expansion_budget_caps_total_work() {
    let spec = counter_line(|_| {});
    for algorithm in Algorithm::ALL {
        let policy = algorithm.default_policy().with_max_expansions(10);
        let result = search(&spec, algorithm, &policy, &CancelToken::new()).unwrap();
        assert_eq!(
            result.termination_reason(),
            TerminationReason::ExpansionBudgetExceeded,
            "{algorithm:?}"
        );
        assert_eq!(result.expansions(), 10);
    }
}

#[test]
fn cancellation_mid_search_is_observed_at_the_next_expansion() {
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let calls = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&calls);
    let spec = counter_line(move |_| {
        if seen.fetch_add(1, Ordering::SeqCst) + 1 == 5 {
            trigger.cancel();
        }
    });
    let result = search(
        &spec,
        Algorithm::IterativeDeepening,
        &SearchPolicy::iterative_deepening(),
        &cancel,
    )
    .unwrap();
    assert_eq!(result.termination_reason(), TerminationReason::Cancelled);
    assert_eq!(result.expansions(), 5);
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn panicking_expander_is_contained() {
    let spec = counter_line(|s| assert!(s < 2, "expander failure at {s}"));
    for algorithm in Algorithm::ALL {
        let result = spec.run(algorithm).unwrap();
        assert_eq!(
            result.termination_reason(),
            TerminationReason::ExpanderPanicked {
                stage: PanicStage::Expand
            },
            "{algorithm:?}"
        );
    }
}

#[test]
fn panicking_seed_is_contained() {
    let spec: SearchSpec<u8, u8, u8> = SearchSpec::builder()
        .start(0)
        .goal(1)
        .equality(StepEquality::value())
        .comparer(NodeComparer::natural())
        .expander(FnExpander::new(
            |_: &u8| -> Vec<Node<u8, u8>> { panic!("seed failure") },
            |_: &u8, _: Level, _: &mut dyn FnMut(&u8) -> bool| -> Vec<Node<u8, u8>> { Vec::new() },
        ))
        .build()
        .unwrap();
    let result = spec.run(Algorithm::RecursiveBestFirst).unwrap();
    assert_eq!(
        result.termination_reason(),
        TerminationReason::ExpanderPanicked {
            stage: PanicStage::Seed
        }
    );
    assert_eq!(result.expansions(), 0);
}

#[test]
fn concurrent_searches_share_one_spec() {
    let spec = optimality_graph();
    let baseline = spec
        .run(Algorithm::IterativeDeepening)
        .unwrap()
        .trace
        .digest()
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    spec.run(Algorithm::IterativeDeepening)
                        .unwrap()
                        .trace
                        .digest()
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), baseline);
        }
    });
}
