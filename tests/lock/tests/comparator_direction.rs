//! Comparator lock tests: the direction flips which successor is explored
//! first and which side of the bound counts as "within".

use lock_tests::fixtures::fixed_factor;
use lodestar_harness::query::Query;
use lodestar_kernel::order::Direction;
use lodestar_kernel::NodeComparer;
use lodestar_search::{Algorithm, SearchSpec};

/// S(5) → {A(3), B(7)} → G(5). Factors are per step, not per level.
fn fork(comparer: NodeComparer<u32>) -> SearchSpec<char, u32, char> {
    fixed_factor(
        'S',
        'G',
        &[('S', 'A'), ('S', 'B'), ('A', 'G'), ('B', 'G')],
        &[('S', 5), ('A', 3), ('B', 7), ('G', 5)],
        comparer,
    )
}

#[test]
fn ascending_prefers_the_smaller_factor() {
    let spec = fork(NodeComparer::natural());
    for algorithm in Algorithm::ALL {
        let result = spec.run(algorithm).unwrap();
        assert_eq!(result.steps(), vec!['S', 'A', 'G'], "{algorithm:?}");
    }
}

#[test]
fn descending_prefers_the_larger_factor() {
    let spec = fork(NodeComparer::natural().with_direction(Direction::Descending));
    for algorithm in Algorithm::ALL {
        let result = spec.run(algorithm).unwrap();
        assert_eq!(result.steps(), vec!['S', 'B', 'G'], "{algorithm:?}");
    }
}

#[test]
fn reversed_comparer_matches_explicit_descending() {
    let explicit = fork(NodeComparer::natural().with_direction(Direction::Descending));
    let reversed = fork(NodeComparer::natural().reversed());
    for algorithm in Algorithm::ALL {
        let a = explicit.run(algorithm).unwrap();
        let b = reversed.run(algorithm).unwrap();
        assert_eq!(
            a.trace.to_canonical_json_bytes().unwrap(),
            b.trace.to_canonical_json_bytes().unwrap()
        );
    }
}

#[test]
fn direction_is_echoed_in_the_trace() {
    let spec = fork(NodeComparer::natural().reversed());
    let result = spec.run(Algorithm::RecursiveBestFirst).unwrap();
    assert_eq!(result.trace.metadata.direction, Direction::Descending);
    assert_eq!(
        result.trace.to_json_value()["metadata"]["direction"],
        "descending"
    );
}

#[test]
fn custom_comparison_ranks_by_key() {
    // Rank by distance from 10, nearest first.
    let spec = Query::new(0_u32, 10, |s: &u32| if *s == 0 { vec![4, 12] } else { vec![10] })
        .select(|s: &u32, _| *s)
        .order_by(|a: &u32, b: &u32| a.abs_diff(10).cmp(&b.abs_diff(10)))
        .build()
        .unwrap();
    let result = spec.run(Algorithm::RecursiveBestFirst).unwrap();
    assert_eq!(result.steps(), vec![0, 12, 10]);
}
