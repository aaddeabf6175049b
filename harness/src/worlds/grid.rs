//! `GridWorld`: path finding on a bounded grid with walls.
//!
//! Steps are `(x, y)` cells, factors are `i64` estimates. The distance
//! estimate matches the move set: Manhattan for 4-connected moves,
//! Chebyshev for 8-connected ones, so both stay admissible at unit cost.

use lodestar_kernel::Level;
use lodestar_search::{SearchError, SearchSpec};

use crate::contract::SearchWorld;
use crate::metric::{chebyshev, manhattan};
use crate::query::Query;

/// A grid cell.
pub type Cell = (i32, i32);

/// Neighbourhood of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moves {
    /// Right, down, left, up.
    Four,
    /// `Four` plus the diagonals.
    Eight,
}

impl Moves {
    fn offsets(self) -> &'static [Cell] {
        match self {
            Self::Four => &[(1, 0), (0, 1), (-1, 0), (0, -1)],
            Self::Eight => &[
                (1, 0),
                (0, 1),
                (-1, 0),
                (0, -1),
                (1, 1),
                (-1, 1),
                (-1, -1),
                (1, -1),
            ],
        }
    }

    /// Admissible unit-cost distance for this neighbourhood.
    #[must_use]
    pub fn distance(self, a: Cell, b: Cell) -> i64 {
        let a = (i64::from(a.0), i64::from(a.1));
        let b = (i64::from(b.0), i64::from(b.1));
        match self {
            Self::Four => manhattan(a, b),
            Self::Eight => chebyshev(a, b),
        }
    }
}

/// How a cell's factor is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Distance to goal only.
    Greedy,
    /// Level plus distance to goal.
    AStar,
}

/// Bounded grid with optional walls.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    start: Cell,
    goal: Cell,
    walls: Vec<Cell>,
    moves: Moves,
    heuristic: Heuristic,
}

impl GridWorld {
    /// Empty `width` × `height` grid from the top-left to the bottom-right
    /// corner, 4-connected, A* factor.
    #[must_use]
    pub fn open(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            start: (0, 0),
            goal: (width - 1, height - 1),
            walls: Vec::new(),
            moves: Moves::Four,
            heuristic: Heuristic::AStar,
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_goal(mut self, goal: Cell) -> Self {
        self.goal = goal;
        self
    }

    #[must_use]
    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Cell>) -> Self {
        self.walls.extend(walls);
        self
    }

    #[must_use]
    pub fn with_moves(mut self, moves: Moves) -> Self {
        self.moves = moves;
        self
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Whether `cell` lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.0) && (0..self.height).contains(&cell.1)
    }
}

impl SearchWorld for GridWorld {
    type Step = Cell;
    type Factor = i64;
    type Key = Cell;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid"
    }

    fn spec(&self) -> Result<SearchSpec<Cell, i64, Cell>, SearchError> {
        let bounds = self.clone();
        let moves = self.moves;
        let heuristic = self.heuristic;
        let goal = self.goal;

        Query::new(self.start, goal, move |&(x, y): &Cell| {
            moves
                .offsets()
                .iter()
                .map(|&(dx, dy)| (x + dx, y + dy))
                .filter(|&c| bounds.contains(c))
                .collect()
        })
        .select(move |c: &Cell, level: Level| {
            let h = moves.distance(*c, goal);
            match heuristic {
                Heuristic::Greedy => h,
                Heuristic::AStar => i64::from(level) + h,
            }
        })
        .except(self.walls.iter().copied())
        .order_by_natural()
        .build()
    }

    fn describe_step(&self, step: &Cell) -> serde_json::Value {
        serde_json::json!([step.0, step.1])
    }
}
