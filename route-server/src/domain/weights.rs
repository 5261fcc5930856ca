//! The three independent weights carried by every connection.

use serde::{Deserialize, Serialize};

use super::Metric;

/// Time, cost and distance of traversing one connection.
///
/// Validation (finite, non-negative) happens when a network is loaded; this
/// type itself is a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weights {
    /// Minutes.
    pub time: f64,
    /// Currency units.
    pub cost: f64,
    /// Kilometres.
    pub distance: f64,
}

impl Weights {
    pub fn new(time: f64, cost: f64, distance: f64) -> Self {
        Self {
            time,
            cost,
            distance,
        }
    }

    /// The weight for one metric.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Time => self.time,
            Metric::Cost => self.cost,
            Metric::Distance => self.distance,
        }
    }

    /// Returns the first metric whose weight is not a finite, non-negative
    /// number, with the offending value.
    pub fn first_invalid(&self) -> Option<(Metric, f64)> {
        Metric::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
    }
}
