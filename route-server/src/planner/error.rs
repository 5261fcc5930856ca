//! Route finder error types.

use crate::domain::{InvalidMetric, StationId};
use crate::network::UnknownStation;

/// Error from a route query.
///
/// Each variant is a distinct, per-request failure; none of them is
/// transient, so callers should not retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The optimization metric is not time, cost or distance
    #[error(transparent)]
    InvalidMetric(#[from] InvalidMetric),

    /// The start or end station is not in the network
    #[error(transparent)]
    StationNotFound(#[from] UnknownStation),

    /// Both stations exist but no route connects them
    #[error("no path from {from} to {to}")]
    NoPath { from: StationId, to: StationId },
}
