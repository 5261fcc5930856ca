//! Network model error types.

use std::path::PathBuf;

use crate::domain::{Metric, StationId};

/// Malformed network data, detected while loading.
///
/// Any of these is fatal to startup: a network that fails validation is
/// never constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// Two stations share an id
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// A connection references a station that was not loaded
    #[error("connection #{index} ({from} -> {to}): unknown endpoint {missing}")]
    UnknownEndpoint {
        index: usize,
        from: StationId,
        to: StationId,
        missing: StationId,
    },

    /// A connection carries a negative weight
    #[error("connection #{index} ({from} -> {to}): negative {metric} weight {value}")]
    NegativeWeight {
        index: usize,
        from: StationId,
        to: StationId,
        metric: Metric,
        value: f64,
    },

    /// A connection carries a NaN or infinite weight
    #[error("connection #{index} ({from} -> {to}): {metric} weight is not a finite number")]
    NonFiniteWeight {
        index: usize,
        from: StationId,
        to: StationId,
        metric: Metric,
    },
}

/// A station id that is not part of the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station {0:?}")]
pub struct UnknownStation(pub String);

/// Errors reading a network data feed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The feed file could not be read
    #[error("failed to read network data from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The feed is not valid JSON for the expected shape
    #[error("failed to parse network data: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed parsed but violates a network invariant
    #[error("invalid network data: {0}")]
    Data(#[from] DataError),
}
