//! Route query results.

use serde::Serialize;

use crate::domain::{Metric, StationId, Weights};
use crate::network::{Connection, Station};

/// One traversed connection, annotated with all three weights.
///
/// Every segment reports time, cost and distance regardless of which metric
/// selected the route, so a caller can display any of them without a second
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub from: StationId,
    pub to: StationId,
    pub from_name: String,
    pub to_name: String,
    pub time: f64,
    pub cost: f64,
    pub distance: f64,
}

impl Segment {
    pub(crate) fn new(connection: &Connection, from: &Station, to: &Station) -> Self {
        Self {
            from: connection.from.clone(),
            to: connection.to.clone(),
            from_name: from.name.clone(),
            to_name: to.name.clone(),
            time: connection.weights.time,
            cost: connection.weights.cost,
            distance: connection.weights.distance,
        }
    }

    /// The raw weights of the traversed connection.
    pub fn weights(&self) -> Weights {
        Weights::new(self.time, self.cost, self.distance)
    }
}

/// The best route between two stations under one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Sum of the optimized metric along the path.
    pub total_weight: f64,
    /// Segments in travel order, start to end.
    pub path_details: Vec<Segment>,
    #[serde(skip)]
    pub metric: Metric,
    #[serde(skip)]
    start: StationId,
}

impl PathResult {
    /// The zero-length route from a station to itself.
    pub(crate) fn empty(start: StationId, metric: Metric) -> Self {
        Self {
            total_weight: 0.0,
            path_details: Vec::new(),
            metric,
            start,
        }
    }

    /// Assemble a result from segments in travel order.
    ///
    /// The total is summed in travel order so it matches what the search
    /// accumulated.
    pub(crate) fn from_segments(start: StationId, metric: Metric, segments: Vec<Segment>) -> Self {
        let total_weight = segments.iter().map(|s| s.weights().get(metric)).sum();
        Self {
            total_weight,
            path_details: segments,
            metric,
            start,
        }
    }

    /// Station ids visited, in travel order. Always starts with the start.
    pub fn station_ids(&self) -> Vec<&StationId> {
        std::iter::once(&self.start)
            .chain(self.path_details.iter().map(|s| &s.to))
            .collect()
    }

    /// Returns true for the zero-length route.
    pub fn is_empty(&self) -> bool {
        self.path_details.is_empty()
    }

    /// Number of traversed connections.
    pub fn len(&self) -> usize {
        self.path_details.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn segment(from: &str, to: &str, time: f64, cost: f64, distance: f64) -> Segment {
        let connection = Connection::new(id(from), id(to), Weights::new(time, cost, distance));
        Segment::new(
            &connection,
            &Station::new(id(from), format!("{from} name")),
            &Station::new(id(to), format!("{to} name")),
        )
    }

    #[test]
    fn empty_result() {
        let result = PathResult::empty(id("A"), Metric::Cost);
        assert!(result.is_empty());
        assert_eq!(result.total_weight, 0.0);
        assert_eq!(result.station_ids(), vec![&id("A")]);
    }

    #[test]
    fn total_uses_selected_metric_only() {
        let segments = vec![
            segment("A", "B", 5.0, 2.0, 3.0),
            segment("B", "C", 4.0, 1.0, 2.0),
        ];
        let result = PathResult::from_segments(id("A"), Metric::Distance, segments);

        assert_eq!(result.total_weight, 5.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result.station_ids(), vec![&id("A"), &id("B"), &id("C")]);
    }

    #[test]
    fn serializes_camel_case() {
        let result = PathResult::from_segments(
            id("A"),
            Metric::Time,
            vec![segment("A", "B", 5.0, 2.0, 3.0)],
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["totalWeight"], 5.0);
        let seg = &json["pathDetails"][0];
        assert_eq!(seg["from"], "A");
        assert_eq!(seg["to"], "B");
        assert_eq!(seg["fromName"], "A name");
        assert_eq!(seg["toName"], "B name");
        assert_eq!(seg["time"], 5.0);
        assert_eq!(seg["cost"], 2.0);
        assert_eq!(seg["distance"], 3.0);
        assert!(json.get("metric").is_none());
    }
}
