//! Shared workloads for lodestar benchmark suites.

use lodestar_harness::contract::SearchWorld;
use lodestar_harness::worlds::grid::{Cell, GridWorld};
use lodestar_harness::worlds::sliding_tile::{Board, SlidingTile, SOLVED};
use lodestar_search::{Algorithm, SearchResult};

/// `size` × `size` grid with a wall on every odd column, open alternately
/// at the bottom and at the top, so the only route snakes across.
#[must_use]
pub fn serpentine(size: i32) -> GridWorld {
    let walls: Vec<Cell> = (1..size - 1)
        .step_by(2)
        .enumerate()
        .flat_map(|(i, x)| {
            let gap = if i % 2 == 0 { size - 1 } else { 0 };
            (0..size).filter(move |&y| y != gap).map(move |y| (x, y))
        })
        .collect();
    GridWorld::open(size, size).with_walls(walls)
}

/// The solved board after `depth` blank moves, each the first legal move
/// that does not undo the previous one.
#[must_use]
pub fn scrambled(depth: usize) -> SlidingTile {
    let mut board: Board = SOLVED;
    let mut previous: Option<Board> = None;
    for step in 0..depth {
        let moves = SlidingTile::moves(&board);
        let candidates: Vec<Board> = moves.into_iter().filter(|m| Some(*m) != previous).collect();
        let Some(&next) = candidates.get(step % candidates.len().max(1)) else {
            break;
        };
        previous = Some(board);
        board = next;
    }
    SlidingTile::new(board)
}

/// Search `world` with the algorithm's default policy.
///
/// # Panics
///
/// Panics if the world's spec is incomplete. Benchmark setup failures are
/// fatal.
pub fn solve<W: SearchWorld>(world: &W, algorithm: Algorithm) -> SearchResult<W::Factor, W::Step> {
    world
        .spec()
        .expect("world spec")
        .run(algorithm)
        .expect("default policy is valid")
}
