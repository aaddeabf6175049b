//! Lodestar Search: recursive heuristic search over caller-defined state graphs.
//!
//! This crate provides the algorithm layer. It depends only on
//! `lodestar_kernel`; it does NOT depend on `lodestar_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (nodes, order)      (IDA*, RBFS, trace)  (pipeline, worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchSpec`] -- start, goal, step equality, node comparer, expander
//! - [`Expand`] -- the successor expansion contract
//! - [`Recursion`] -- tri-state result of one recursive call
//! - [`SearchPolicy`] -- escalation ceiling, expansion budget, visited scope
//! - [`SearchTrace`] -- expansion-event audit log
//! - [`search()`] / [`SearchResult`] -- entry point and outcome

#![forbid(unsafe_code)]

mod context;
mod ida;
mod rbfs;

pub mod cancel;
pub mod contract;
pub mod error;
pub mod policy;
pub mod recursion;
pub mod search;
pub mod spec;
pub mod successors;
pub mod trace;
pub mod visited;

pub use cancel::CancelToken;
pub use contract::{Expand, FnExpander};
pub use error::SearchError;
pub use policy::{SearchPolicy, VisitedScope};
pub use recursion::Recursion;
pub use search::{search, Algorithm, SearchResult};
pub use spec::{SearchSpec, SearchSpecBuilder};
pub use trace::{SearchTrace, TerminationReason};
