//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Metric, StationId};
use crate::network::{Network, Station, StationRecord};
use crate::planner::{PathResult, Segment};

/// Request to find a route.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindPathRequest {
    /// Start station id
    #[serde(default)]
    pub start: Option<String>,

    /// End station id
    #[serde(default)]
    pub end: Option<String>,

    /// `"time"`, `"cost"` or `"distance"`; defaults to time
    #[serde(default)]
    pub optimization_type: Option<String>,
}

impl FindPathRequest {
    /// Start and end ids, if both are present and non-blank.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let start = self.start.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let end = self.end.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((start, end))
    }

    /// The requested metric name, defaulting to time.
    pub fn metric_name(&self) -> &str {
        self.optimization_type
            .as_deref()
            .unwrap_or(Metric::default().as_str())
    }
}

/// A found route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindPathResponse {
    /// Sum of the optimized metric
    pub total_weight: f64,

    /// One entry per traversed connection, in travel order
    pub path_details: Vec<Segment>,

    /// Visited station ids, start first
    pub path: Vec<StationId>,

    /// Visited stations, start first
    pub stations: Vec<Station>,

    /// The metric the route was optimized for
    pub optimization_type: Metric,
}

impl FindPathResponse {
    /// Create from a route finder result.
    pub fn from_result(network: &Network, result: PathResult) -> Self {
        let path: Vec<StationId> = result.station_ids().into_iter().cloned().collect();
        let stations = path
            .iter()
            .filter_map(|id| network.station(id.as_str()).cloned())
            .collect();

        Self {
            total_weight: result.total_weight,
            optimization_type: result.metric,
            path_details: result.path_details,
            path,
            stations,
        }
    }
}

/// All stations, keyed by id.
pub type StationsResponse = BTreeMap<StationId, StationRecord>;

/// Build the station listing for a network.
pub fn stations_response(network: &Network) -> StationsResponse {
    network
        .stations()
        .map(|s| {
            (
                s.id.clone(),
                StationRecord {
                    name: s.name.clone(),
                    coordinates: s.coordinates,
                },
            )
        })
        .collect()
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
