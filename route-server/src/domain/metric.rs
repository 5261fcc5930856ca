//! Optimization metric.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a metric name is not one of `time`, `cost`, `distance`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid optimization metric {0:?}: expected time, cost or distance")]
pub struct InvalidMetric(pub String);

/// The weight dimension a route is optimized for.
///
/// # Examples
///
/// ```
/// use route_server::domain::Metric;
///
/// let metric: Metric = "cost".parse().unwrap();
/// assert_eq!(metric, Metric::Cost);
/// assert_eq!(metric.as_str(), "cost");
///
/// assert!("speed".parse::<Metric>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Travel time in minutes.
    #[default]
    Time,
    /// Fare in currency units.
    Cost,
    /// Track distance in kilometres.
    Distance,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 3] = [Metric::Time, Metric::Cost, Metric::Distance];

    /// The wire name of this metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::Cost => "cost",
            Metric::Distance => "distance",
        }
    }
}

impl FromStr for Metric {
    type Err = InvalidMetric;

    /// Metric names are matched exactly; `"Time"` is not a metric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Metric::Time),
            "cost" => Ok(Metric::Cost),
            "distance" => Ok(Metric::Distance),
            other => Err(InvalidMetric(other.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
