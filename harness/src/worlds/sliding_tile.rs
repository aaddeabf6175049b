//! `SlidingTile`: the 3×3 eight-puzzle.
//!
//! A board lists tiles row by row with `0` for the blank. Moving the blank
//! costs one level; the factor is `level + h` with `h` the summed Manhattan
//! distance of every tile from its goal cell.

use lodestar_kernel::Level;
use lodestar_search::{SearchError, SearchSpec};

use crate::contract::SearchWorld;
use crate::metric::manhattan;
use crate::query::Query;

pub const SIDE: usize = 3;

/// Tiles in row-major order, `0` is the blank.
pub type Board = [u8; SIDE * SIDE];

/// Tiles ascending, blank last.
pub const SOLVED: Board = [1, 2, 3, 4, 5, 6, 7, 8, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingTile {
    start: Board,
    goal: Board,
}

impl SlidingTile {
    #[must_use]
    pub fn new(start: Board) -> Self {
        Self {
            start,
            goal: SOLVED,
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: Board) -> Self {
        self.goal = goal;
        self
    }

    /// Whether `goal` is reachable from `start` at all.
    ///
    /// On an odd-width board a move never changes the parity of the
    /// inversion count, so both boards must agree on it.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        inversions(&self.start) % 2 == inversions(&self.goal) % 2
    }

    /// Summed Manhattan distance of every tile from its cell in `goal`.
    #[must_use]
    pub fn estimate(board: &Board, goal: &Board) -> Level {
        let mut home = [(0_i32, 0_i32); SIDE * SIDE];
        for (cell, &tile) in cells().zip(goal.iter()) {
            home[usize::from(tile)] = cell;
        }
        let total: i32 = cells()
            .zip(board.iter())
            .filter(|&(_, &tile)| tile != 0)
            .map(|(cell, &tile)| manhattan(cell, home[usize::from(tile)]))
            .sum();
        total.unsigned_abs()
    }

    /// Boards one blank move away, in up, down, left, right order.
    #[must_use]
    pub fn moves(board: &Board) -> Vec<Board> {
        let Some(blank) = board.iter().position(|&t| t == 0) else {
            return Vec::new();
        };
        let (row, col) = (blank / SIDE, blank % SIDE);
        let mut targets = Vec::with_capacity(4);
        if row > 0 {
            targets.push(blank - SIDE);
        }
        if row + 1 < SIDE {
            targets.push(blank + SIDE);
        }
        if col > 0 {
            targets.push(blank - 1);
        }
        if col + 1 < SIDE {
            targets.push(blank + 1);
        }
        targets
            .into_iter()
            .map(|target| {
                let mut next = *board;
                next.swap(blank, target);
                next
            })
            .collect()
    }
}

/// `(row, col)` of each index, row-major.
fn cells() -> impl Iterator<Item = (i32, i32)> {
    (0_i32..3).flat_map(|row| (0_i32..3).map(move |col| (row, col)))
}

fn inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board.iter().copied().filter(|&t| t != 0).collect();
    tiles
        .iter()
        .enumerate()
        .map(|(i, a)| tiles[i + 1..].iter().filter(|b| *b < a).count())
        .sum()
}

impl SearchWorld for SlidingTile {
    type Step = Board;
    type Factor = Level;
    type Key = Board;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "sliding_tile"
    }

    fn spec(&self) -> Result<SearchSpec<Board, Level, Board>, SearchError> {
        let goal = self.goal;
        Query::new(self.start, goal, Self::moves)
            .select(move |board: &Board, level: Level| {
                level.saturating_add(Self::estimate(board, &goal))
            })
            .order_by_natural()
            .build()
    }

    fn describe_step(&self, step: &Board) -> serde_json::Value {
        serde_json::json!(step.to_vec())
    }
}
