//! Domain types for the route engine.
//!
//! These are small validated values shared by the network model, the route
//! finder and the web layer. Types that carry an invariant enforce it at
//! construction time.

mod metric;
mod station;
mod weights;

pub use metric::{InvalidMetric, Metric};
pub use station::{InvalidStationId, StationId};
pub use weights::Weights;
