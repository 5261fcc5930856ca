//! Static network data feed.
//!
//! The feed is a JSON document of the shape
//!
//! ```json
//! {
//!   "bidirectional": true,
//!   "stations": { "A": { "name": "Central Station", "coordinates": [40.71, -74.00] } },
//!   "connections": [ { "from": "A", "to": "B", "time": 5, "cost": 2.0, "distance": 1.2 } ]
//! }
//! ```
//!
//! It is read once at startup and turned into a [`Network`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::LoadError;
use super::{Connection, Network, Station};
use crate::domain::StationId;

/// The seven-station demo metro shipped with the server.
const DEMO_NETWORK: &str = include_str!("../../data/metro.json");

/// Per-station record as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

/// Parsed, not yet validated network data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    /// Mirror every connection so it can be travelled both ways.
    #[serde(default)]
    pub bidirectional: bool,
    /// Stations keyed by id, in feed order. Repeated ids are kept so that
    /// loading can reject them.
    #[serde(with = "station_entries")]
    pub stations: Vec<(StationId, StationRecord)>,
    pub connections: Vec<Connection>,
}

impl NetworkData {
    /// Parse a feed from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a feed file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading network data");
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// The built-in demo network.
    pub fn demo() -> Result<Self, LoadError> {
        Self::from_json(DEMO_NETWORK)
    }

    /// Validate the data and build the network.
    ///
    /// Stations are loaded sorted by id, so load order does not depend on
    /// the feed's key order.
    pub fn into_network(mut self) -> Result<Network, LoadError> {
        // Stable, so repeated ids stay adjacent for the duplicate check
        self.stations.sort_by(|(a, _), (b, _)| a.cmp(b));

        let stations = self
            .stations
            .into_iter()
            .map(|(id, record)| Station {
                id,
                name: record.name,
                coordinates: record.coordinates,
            })
            .collect();

        let network = if self.bidirectional {
            Network::load_bidirectional(stations, self.connections)?
        } else {
            Network::load(stations, self.connections)?
        };
        Ok(network)
    }
}

/// The `stations` object as a list of entries.
///
/// A map type would silently keep only the last of two equal keys, including
/// keys that only become equal once parsed as [`StationId`].
mod station_entries {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::StationRecord;
    use crate::domain::StationId;

    pub fn serialize<S: Serializer>(
        entries: &[(StationId, StationRecord)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (id, record) in entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(StationId, StationRecord)>, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(StationId, StationRecord)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of station id to station")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}
