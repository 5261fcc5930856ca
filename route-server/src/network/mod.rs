//! Network model: stations and weighted connections.
//!
//! A [`Network`] is built once from static data and is read-only afterwards.
//! Loading validates every invariant the route finder relies on (known
//! endpoints, finite non-negative weights), so code holding a `Network` can
//! trust it without re-checking.

mod data;
mod error;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Metric, StationId, Weights};

pub use data::{NetworkData, StationRecord};
pub use error::{DataError, LoadError, UnknownStation};

/// A node in the transit graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Latitude and longitude, if known. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates: None,
        }
    }

    /// Attach a latitude and longitude.
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Some([lat, lon]);
        self
    }
}

/// A directed weighted edge between two stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    #[serde(flatten)]
    pub weights: Weights,
}

impl Connection {
    pub fn new(from: StationId, to: StationId, weights: Weights) -> Self {
        Self { from, to, weights }
    }

    /// The same connection travelled in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            weights: self.weights,
        }
    }
}

/// An outgoing connection with its target resolved to a station index.
#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub(crate) to: usize,
    pub(crate) connection: Connection,
}

/// The immutable station graph.
///
/// Stations keep their load order; each station's outgoing connections keep
/// their insertion order. Both orders are visible to the route finder, which
/// is what makes its tie-breaking reproducible.
#[derive(Debug, Clone)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
    adjacency: Vec<Vec<Edge>>,
    connection_count: usize,
}

impl Network {
    /// Build a network of directed connections.
    ///
    /// Fails with [`DataError`] on duplicate station ids, on a connection
    /// whose endpoint is not a loaded station, or on a weight that is
    /// negative or not finite. Nothing is constructed on failure.
    pub fn load(stations: Vec<Station>, connections: Vec<Connection>) -> Result<Self, DataError> {
        Self::build(stations, connections, false)
    }

    /// Build a network where every connection can be travelled both ways.
    ///
    /// Each connection is validated as given, then mirrored: the reverse
    /// edge is appended to the target station's adjacency list at the same
    /// point the original is appended to its source's. Error indices refer
    /// to the connections as passed in.
    pub fn load_bidirectional(
        stations: Vec<Station>,
        connections: Vec<Connection>,
    ) -> Result<Self, DataError> {
        Self::build(stations, connections, true)
    }

    fn build(
        stations: Vec<Station>,
        connections: Vec<Connection>,
        mirror: bool,
    ) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if index.insert(station.id.clone(), i).is_some() {
                return Err(DataError::DuplicateStation(station.id.clone()));
            }
        }

        for (i, connection) in connections.iter().enumerate() {
            validate_connection(i, connection, &index)?;
        }

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); stations.len()];
        let mut connection_count = 0;
        for connection in connections {
            let from = index[&connection.from];
            let to = index[&connection.to];

            if mirror {
                adjacency[to].push(Edge {
                    to: from,
                    connection: connection.reversed(),
                });
                connection_count += 1;
            }
            adjacency[from].push(Edge { to, connection });
            connection_count += 1;
        }

        info!(
            stations = stations.len(),
            connections = connection_count,
            bidirectional = mirror,
            "Loaded network"
        );

        Ok(Self {
            stations,
            index,
            adjacency,
            connection_count,
        })
    }

    /// Returns true if `id` names a station in this network.
    pub fn station_exists(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a station by id.
    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&i| &self.stations[i])
    }

    /// All stations, in load order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Outgoing connections from a station, each paired with its target.
    ///
    /// A station with no outgoing connections yields an empty iterator;
    /// an unknown station id is an error.
    pub fn neighbors<'a>(
        &'a self,
        id: &str,
    ) -> Result<impl Iterator<Item = (&'a Connection, &'a Station)> + use<'a>, UnknownStation> {
        let i = self
            .index_of(id)
            .ok_or_else(|| UnknownStation(id.to_string()))?;
        Ok(self.adjacency[i]
            .iter()
            .map(|edge| (&edge.connection, &self.stations[edge.to])))
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of directed connections, counting mirrored edges separately.
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn station_at(&self, i: usize) -> &Station {
        &self.stations[i]
    }

    pub(crate) fn edges_from(&self, i: usize) -> &[Edge] {
        &self.adjacency[i]
    }
}

/// Check one connection against the station index.
fn validate_connection(
    i: usize,
    connection: &Connection,
    index: &HashMap<StationId, usize>,
) -> Result<(), DataError> {
    for endpoint in [&connection.from, &connection.to] {
        if !index.contains_key(endpoint) {
            return Err(DataError::UnknownEndpoint {
                index: i,
                from: connection.from.clone(),
                to: connection.to.clone(),
                missing: endpoint.clone(),
            });
        }
    }

    if let Some((metric, value)) = connection.weights.first_invalid() {
        return Err(weight_error(i, connection, metric, value));
    }

    Ok(())
}

fn weight_error(i: usize, connection: &Connection, metric: Metric, value: f64) -> DataError {
    if value.is_finite() {
        DataError::NegativeWeight {
            index: i,
            from: connection.from.clone(),
            to: connection.to.clone(),
            metric,
            value,
        }
    } else {
        DataError::NonFiniteWeight {
            index: i,
            from: connection.from.clone(),
            to: connection.to.clone(),
            metric,
        }
    }
}
