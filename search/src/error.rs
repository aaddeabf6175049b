//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only: an incomplete
//! specification or an unusable policy. Runtime terminations (goal found,
//! exhaustion, budgets, cancellation, expander panics) are expressed via
//! [`crate::trace::TerminationReason`] and always produce a trace.

use thiserror::Error;

/// Typed failure for specification building and policy validation.
///
/// Returned before any expansion happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No start step was supplied.
    #[error("search specification has no start step")]
    MissingStart,

    /// No goal step was supplied.
    #[error("search specification has no goal step")]
    MissingGoal,

    /// No expander was supplied.
    #[error("search specification has no expander")]
    MissingExpander,

    /// No factor comparer was supplied.
    #[error("search specification has no node comparer")]
    MissingComparer,

    /// No step equality was supplied.
    #[error("search specification has no step equality")]
    MissingEquality,

    /// A policy field is out of range.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
