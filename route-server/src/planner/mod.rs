//! Route finder.
//!
//! Answers: "what is the best way from this station to that one, if I care
//! about time (or cost, or distance)?"
//!
//! The search is a Dijkstra over the selected metric. Whatever metric drove
//! the search, every segment of the result carries all three weights.

mod error;
mod result;
mod search;

pub use error::RouteError;
pub use result::{PathResult, Segment};
pub use search::{find_path, find_path_with_metric};
