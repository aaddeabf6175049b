//! World implementations for the harness runner.

pub mod graph;
pub mod grid;
pub mod sliding_tile;
