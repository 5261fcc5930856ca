//! Station identifier type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A station identifier as used in requests, responses and the data feed.
///
/// Ids are opaque strings. The only requirement is that they are non-empty
/// and carry no surrounding whitespace, which `parse` enforces.
///
/// # Examples
///
/// ```
/// use route_server::domain::StationId;
///
/// let a = StationId::parse("A").unwrap();
/// assert_eq!(a.as_str(), "A");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationId::parse("  B ").unwrap().as_str(), "B");
///
/// // Blank ids are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be blank",
            });
        }
        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StationId::parse(&s)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
