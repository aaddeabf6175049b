//! World contract: the minimal trait a world must implement.
//!
//! Worlds provide domain data only: a start, a goal, a neighbour relation,
//! and a factor. Worlds may NOT implement search, tracing, or report
//! writing (those are search-crate and runner concerns).

use std::hash::Hash;

use lodestar_search::{SearchError, SearchSpec};

/// The contract a world must implement to be run by the harness runner.
pub trait SearchWorld {
    /// Domain state.
    type Step: Clone;
    /// Ranking value.
    type Factor: Clone;
    /// Identity key for goal test and visited tracking.
    type Key: Eq + Hash + Clone;

    /// Unique world identifier (e.g., `"grid"`).
    fn world_id(&self) -> &str;

    /// Compile the world into a search specification.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the specification is incomplete.
    fn spec(&self) -> Result<SearchSpec<Self::Step, Self::Factor, Self::Key>, SearchError>;

    /// Canonical-JSON-safe rendering of a step for reports (integers and
    /// strings only).
    fn describe_step(&self, step: &Self::Step) -> serde_json::Value;
}
