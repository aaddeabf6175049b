//! Visited-set lock tests: cycles are cut under both scopes, and the scope
//! decides whether a step reached by two routes is expanded twice.

use lodestar_harness::query::Query;
use lodestar_search::{search, Algorithm, CancelToken, SearchPolicy, SearchSpec, VisitedScope};

/// Every step has factor 0, so each search is a single unbounded pass.
fn flat(edges: &'static [(char, char)]) -> SearchSpec<char, u32, char> {
    Query::new('S', 'Z', move |s: &char| {
        edges
            .iter()
            .filter(|(from, _)| from == s)
            .map(|&(_, to)| to)
            .collect()
    })
    .select(|_: &char, _| 0_u32)
    .order_by_natural()
    .build()
    .unwrap()
}

fn expanded(spec: &SearchSpec<char, u32, char>, algorithm: Algorithm, scope: VisitedScope) -> Vec<char> {
    let policy = algorithm.default_policy().with_visited_scope(scope);
    let result = search(spec, algorithm, &policy, &CancelToken::new()).unwrap();
    assert!(!result.is_goal_reached());
    result.expanded_steps()
}

#[test]
fn cycle_back_to_start_is_cut() {
    let spec = flat(&[('S', 'B'), ('B', 'S'), ('B', 'C'), ('C', 'B')]);
    for algorithm in Algorithm::ALL {
        for scope in [VisitedScope::Search, VisitedScope::Path] {
            assert_eq!(
                expanded(&spec, algorithm, scope),
                vec!['S', 'B', 'C'],
                "{algorithm:?} {scope:?}"
            );
        }
    }
}

#[test]
fn search_scope_expands_a_shared_step_once() {
    let spec = flat(&[('S', 'A'), ('S', 'B'), ('A', 'D'), ('B', 'D')]);
    for algorithm in Algorithm::ALL {
        assert_eq!(
            expanded(&spec, algorithm, VisitedScope::Search),
            vec!['S', 'A', 'D', 'B'],
            "{algorithm:?}"
        );
    }
}

#[test]
fn path_scope_expands_a_shared_step_per_route() {
    let spec = flat(&[('S', 'A'), ('S', 'B'), ('A', 'D'), ('B', 'D')]);
    let steps = expanded(&spec, Algorithm::IterativeDeepening, VisitedScope::Path);
    assert_eq!(steps, vec!['S', 'A', 'D', 'B', 'D']);
}

#[test]
fn suppressed_duplicates_are_counted() {
    let spec = flat(&[('S', 'A'), ('S', 'B'), ('A', 'D'), ('B', 'D')]);
    let policy = SearchPolicy::iterative_deepening().with_visited_scope(VisitedScope::Search);
    let result = search(&spec, Algorithm::IterativeDeepening, &policy, &CancelToken::new()).unwrap();
    assert_eq!(result.trace.metadata.total_duplicates_suppressed, 1);
    let from_b = result
        .trace
        .expansions
        .iter()
        .find(|e| e.duplicates_suppressed == 1)
        .unwrap();
    assert!(from_b.is_dead_end());
}

#[test]
fn repeated_successor_in_one_expansion_is_suppressed() {
    let spec = flat(&[('S', 'A'), ('S', 'A')]);
    for scope in [VisitedScope::Search, VisitedScope::Path] {
        let policy = SearchPolicy::iterative_deepening().with_visited_scope(scope);
        let result = search(&spec, Algorithm::IterativeDeepening, &policy, &CancelToken::new()).unwrap();
        assert_eq!(result.trace.expansions[0].children.len(), 1, "{scope:?}");
        assert_eq!(result.trace.expansions[0].duplicates_suppressed, 1);
    }
}
