//! Top-level error type for trip planning.

use thiserror::Error;

use crate::services::routing::RoutingError;

/// Errors surfaced by [`crate::RoutePlanner`].
///
/// Retry, circuit-breaking and caching are the caller's concern; the planner
/// never retries silently and never returns a partial plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The routing adapter could not supply one of the trip legs.
    #[error("routing unavailable: {0}")]
    RoutingUnavailable(#[from] RoutingError),

    /// Caller-supplied input failed validation before any adapter call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A post-condition check on the emitted plan failed. This is a bug in
    /// the planner, not a user error.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
