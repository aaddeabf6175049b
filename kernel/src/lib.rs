//! Lodestar Kernel: the node model and ordering primitives shared by every
//! search algorithm.
//!
//! # API Surface
//!
//! - [`node`] -- nodes, the node arena, and path trace-back
//! - [`order`] -- factor comparer with direction, step equality
//! - [`proof`] -- canonical JSON bytes and domain-separated content hashes
//!
//! # Module Dependency Direction
//!
//! `node` ← `order`; `proof` stands alone.
//!
//! One-way only. No cycles. Nothing here knows about search algorithms.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod node;
pub mod order;
pub mod proof;

pub use node::{Level, Node, NodeArena, NodeId};
pub use order::{Direction, NodeComparer, StepEquality};
