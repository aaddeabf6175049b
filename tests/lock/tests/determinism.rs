//! In-process determinism: repeated runs over freshly built specifications
//! produce byte-identical traces and reports.

use lodestar_harness::contract::SearchWorld;
use lodestar_harness::runner::run_world_default;
use lodestar_harness::worlds::graph::WeightedGraph;
use lodestar_harness::worlds::grid::{GridWorld, Moves};
use lodestar_harness::worlds::sliding_tile::SlidingTile;
use lodestar_kernel::proof::hash::{canonical_hash, DOMAIN_SEARCH_TRACE};
use lodestar_search::Algorithm;

const RUNS: usize = 10;

fn assert_stable<W: SearchWorld>(world: &W) {
    for algorithm in Algorithm::ALL {
        let first = world.spec().unwrap().run(algorithm).unwrap();
        let first_bytes = first.trace.to_canonical_json_bytes().unwrap();
        for _ in 1..RUNS {
            let again = world.spec().unwrap().run(algorithm).unwrap();
            assert_eq!(
                again.trace.to_canonical_json_bytes().unwrap(),
                first_bytes,
                "{} {algorithm:?} diverged",
                world.world_id()
            );
        }
    }
}

#[test]
fn grid_traces_are_stable() {
    assert_stable(&GridWorld::open(5, 5).with_walls([(1, 1), (2, 1), (3, 1)]));
    assert_stable(&GridWorld::open(4, 4).with_moves(Moves::Eight));
}

#[test]
fn graph_traces_are_stable() {
    assert_stable(&WeightedGraph::romania());
}

#[test]
fn sliding_tile_traces_are_stable() {
    assert_stable(&SlidingTile::new([1, 2, 3, 0, 4, 6, 7, 5, 8]));
}

#[test]
fn trace_digest_is_taken_over_canonical_bytes() {
    let result = WeightedGraph::romania()
        .spec()
        .unwrap()
        .run(Algorithm::RecursiveBestFirst)
        .unwrap();
    let bytes = result.trace.to_canonical_json_bytes().unwrap();
    assert_eq!(
        result.trace.digest().unwrap(),
        canonical_hash(DOMAIN_SEARCH_TRACE, &bytes)
    );
}

#[test]
fn report_digest_is_stable() {
    let world = WeightedGraph::romania();
    let first = run_world_default(&world, Algorithm::IterativeDeepening)
        .unwrap()
        .digest()
        .unwrap();
    for _ in 1..RUNS {
        let again = run_world_default(&world, Algorithm::IterativeDeepening)
            .unwrap()
            .digest()
            .unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn canonical_bytes_parse_back_to_the_trace_value() {
    for algorithm in Algorithm::ALL {
        let result = SlidingTile::new([1, 2, 3, 0, 4, 6, 7, 5, 8])
            .spec()
            .unwrap()
            .run(algorithm)
            .unwrap();
        let bytes = result.trace.to_canonical_json_bytes().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, result.trace.to_json_value(), "{algorithm:?}");
        assert!(!bytes.contains(&b' ') && !bytes.contains(&b'\n'));
    }
}
