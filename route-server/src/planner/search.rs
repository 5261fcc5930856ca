//! Dijkstra route search.
//!
//! All connection weights are finite and non-negative (the network refuses
//! to load anything else), so a binary-heap Dijkstra finds the optimum in
//! O((V + E) log V).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::domain::Metric;
use crate::network::{Edge, Network, UnknownStation};

use super::error::RouteError;
use super::result::{PathResult, Segment};

/// Find the cheapest route from `start` to `end`, optimizing the metric
/// named by `metric` (`"time"`, `"cost"` or `"distance"`).
///
/// The metric is checked first, then the start station, then the end
/// station. A query from a station to itself succeeds with an empty path and
/// a total of zero.
pub fn find_path(
    network: &Network,
    start: &str,
    end: &str,
    metric: &str,
) -> Result<PathResult, RouteError> {
    let metric: Metric = metric.parse()?;
    find_path_with_metric(network, start, end, metric)
}

/// Find the cheapest route from `start` to `end` under `metric`.
///
/// Ties between equal-weight routes are broken by discovery order: among
/// frontier entries with equal distance the one pushed first is settled
/// first, and a station's predecessor is only replaced by a strictly better
/// one. Given the same network the result is always the same.
pub fn find_path_with_metric(
    network: &Network,
    start: &str,
    end: &str,
    metric: Metric,
) -> Result<PathResult, RouteError> {
    let origin = network
        .index_of(start)
        .ok_or_else(|| UnknownStation(start.to_string()))?;
    let destination = network
        .index_of(end)
        .ok_or_else(|| UnknownStation(end.to_string()))?;

    let start_id = network.station_at(origin).id.clone();

    debug!(
        start = %start_id,
        end = %network.station_at(destination).id,
        metric = %metric,
        "Route query"
    );

    if origin == destination {
        return Ok(PathResult::empty(start_id, metric));
    }

    let Some(via) = shortest_path_tree(network, origin, destination, metric) else {
        debug!(start = %start_id, end, "No path");
        return Err(RouteError::NoPath {
            from: start_id,
            to: network.station_at(destination).id.clone(),
        });
    };

    // Walk predecessors back from the destination, then flip into travel order.
    let mut segments = Vec::new();
    let mut at = destination;
    while let Some((prev, edge)) = via[at] {
        segments.push(Segment::new(
            &edge.connection,
            network.station_at(prev),
            network.station_at(at),
        ));
        at = prev;
    }
    segments.reverse();

    let result = PathResult::from_segments(start_id, metric, segments);
    debug!(
        segments = result.len(),
        total_weight = result.total_weight,
        "Route found"
    );
    Ok(result)
}

/// Frontier entry, ordered by distance then by discovery sequence.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    seq: u64,
    station: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Predecessor of each station on its best known route: the previous
/// station and the edge taken from it.
type Predecessors<'a> = Vec<Option<(usize, &'a Edge)>>;

/// Run Dijkstra from `origin` until `destination` is settled.
///
/// Returns `None` if the destination is unreachable.
fn shortest_path_tree(
    network: &Network,
    origin: usize,
    destination: usize,
    metric: Metric,
) -> Option<Predecessors<'_>> {
    let n = network.station_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut via: Predecessors<'_> = vec![None; n];

    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    distance[origin] = 0.0;
    heap.push(Reverse(Frontier {
        distance: 0.0,
        seq,
        station: origin,
    }));

    let mut popped = 0usize;
    while let Some(Reverse(entry)) = heap.pop() {
        let u = entry.station;
        if settled[u] {
            continue; // Stale entry
        }
        settled[u] = true;
        popped += 1;

        trace!(
            station = %network.station_at(u).id,
            distance = entry.distance,
            "Settled station"
        );

        if u == destination {
            break;
        }

        for edge in network.edges_from(u) {
            let v = edge.to;
            if settled[v] {
                continue;
            }

            let candidate = entry.distance + edge.connection.weights.get(metric);
            if candidate < distance[v] {
                distance[v] = candidate;
                via[v] = Some((u, edge));
                seq += 1;
                heap.push(Reverse(Frontier {
                    distance: candidate,
                    seq,
                    station: v,
                }));
            }
        }
    }

    trace!(settled = popped, "Search complete");

    settled[destination].then_some(via)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
