//! Lodestar Harness: front end and world-level orchestration for search.
//!
//! The harness composes search specifications declaratively
//! ([`query::Query`] → [`query::Pipeline`] → `SearchSpec`), provides a
//! handful of concrete worlds, and packages a run as a report directory.
//!
//! The harness does NOT implement search logic; it delegates to
//! `lodestar_search`. Worlds provide domain data only; the runner owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod metric;
pub mod query;
pub mod runner;
pub mod worlds;
