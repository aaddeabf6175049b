//! Harness runner: drives a world through one search and summarizes the
//! outcome as a [`RunReport`].
//!
//! The runner uses ONLY public search APIs: `SearchWorld::spec`, `search`,
//! and the trace's canonical bytes. It implements no search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! world.spec() → search() → trace bytes → trace digest → RunReport
//! ```

use lodestar_kernel::proof::canon::{canonical_json_bytes, CanonError};
use lodestar_kernel::proof::hash::{
    canonical_hash, ContentHash, DOMAIN_RUN_REPORT, DOMAIN_SEARCH_TRACE,
};
use lodestar_kernel::Level;
use lodestar_search::{
    search, Algorithm, CancelToken, SearchError, SearchPolicy, TerminationReason,
};
use thiserror::Error;

use crate::contract::SearchWorld;

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The world could not be compiled or searched.
    #[error("world `{world_id}`: {source}")]
    Search {
        world_id: String,
        #[source]
        source: SearchError,
    },

    /// Canonical serialization failed.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Outcome of one world run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub world_id: String,
    pub algorithm: Algorithm,
    pub termination: TerminationReason,
    /// Steps from start to goal, rendered by the world.
    pub path: Vec<serde_json::Value>,
    pub goal_level: Option<Level>,
    pub expansions: u64,
    pub iterations: u32,
    pub policy_digest: String,
    pub trace_digest: ContentHash,
    trace_bytes: Vec<u8>,
}

impl RunReport {
    /// Canonical bytes of the search trace this report summarizes.
    #[must_use]
    pub fn trace_bytes(&self) -> &[u8] {
        &self.trace_bytes
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": self.algorithm.as_str(),
            "expansions": self.expansions,
            "goal_level": self.goal_level,
            "iterations": self.iterations,
            "path": self.path,
            "policy_digest": self.policy_digest,
            "termination": self.termination.as_str(),
            "trace_digest": self.trace_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// Content hash of the canonical report.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a rendered step is not canonical-JSON-safe.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &bytes))
    }
}

/// Run `world` under `algorithm` with an explicit policy and cancel token.
///
/// Budgets, cancellation, and expander panics are outcomes, not errors:
/// they come back as a report whose `termination` says so.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the world's spec is incomplete or the
/// policy is invalid, [`RunError::Canon`] if the trace cannot be encoded.
pub fn run_world<W: SearchWorld>(
    world: &W,
    algorithm: Algorithm,
    policy: &SearchPolicy,
    cancel: &CancelToken,
) -> Result<RunReport, RunError> {
    let world_id = world.world_id().to_owned();
    let wrap = |source: SearchError| RunError::Search {
        world_id: world_id.clone(),
        source,
    };

    let spec = world.spec().map_err(wrap)?;
    let result = search(&spec, algorithm, policy, cancel).map_err(wrap)?;

    let trace_bytes = result.trace.to_canonical_json_bytes()?;
    let trace_digest = canonical_hash(DOMAIN_SEARCH_TRACE, &trace_bytes);
    let metadata = &result.trace.metadata;
    let path = result
        .steps()
        .iter()
        .map(|step| world.describe_step(step))
        .collect();

    log::info!(
        "{world_id}: {} {} after {} expansions",
        algorithm.as_str(),
        metadata.termination_reason.as_str(),
        metadata.total_expansions,
    );

    Ok(RunReport {
        algorithm,
        termination: metadata.termination_reason,
        path,
        goal_level: result.goal_node().map(|n| n.level),
        expansions: metadata.total_expansions,
        iterations: metadata.iterations,
        policy_digest: metadata.policy_digest.clone(),
        trace_digest,
        trace_bytes,
        world_id,
    })
}

/// [`run_world`] with the algorithm's default policy and no cancellation.
///
/// # Errors
///
/// Same as [`run_world`].
pub fn run_world_default<W: SearchWorld>(
    world: &W,
    algorithm: Algorithm,
) -> Result<RunReport, RunError> {
    run_world(world, algorithm, &algorithm.default_policy(), &CancelToken::new())
}
