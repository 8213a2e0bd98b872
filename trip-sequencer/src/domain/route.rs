//! Route identifiers and feed route records.

use std::fmt;

/// Error returned when a route short name is not a valid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id {short_name:?}: {reason}")]
pub struct InvalidRouteId {
    short_name: String,
    reason: &'static str,
}

/// A stable numeric route identifier.
///
/// Derived from the GTFS route short name, which this agency keeps numeric
/// and unique for the lifetime of a feed version.
///
/// # Examples
///
/// ```
/// use trip_sequencer::domain::RouteId;
///
/// let route = RouteId::from_short_name("14").unwrap();
/// assert_eq!(route.get(), 14);
///
/// assert!(RouteId::from_short_name("14A").is_err());
/// assert!(RouteId::from_short_name("").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u32);

impl RouteId {
    /// Parse a route id from a GTFS route short name.
    ///
    /// Surrounding whitespace is ignored; anything else must be decimal digits.
    pub fn from_short_name(short_name: &str) -> Result<Self, InvalidRouteId> {
        let trimmed = short_name.trim();
        let invalid = |reason| InvalidRouteId {
            short_name: short_name.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("short name is empty"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("short name must be decimal digits"));
        }

        trimmed
            .parse()
            .map(RouteId)
            .map_err(|_| invalid("short name is out of range"))
    }

    /// Returns the numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A route as parsed from the feed's `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRoute {
    /// GTFS `route_id`
    pub id: String,
    /// GTFS `agency_id`
    pub agency_id: Option<String>,
    /// GTFS `route_short_name`
    pub short_name: String,
    /// GTFS `route_long_name`
    pub long_name: Option<String>,
    /// GTFS `route_color`, possibly empty
    pub color: Option<String>,
}

impl FeedRoute {
    /// Creates a route record with only the required fields.
    pub fn new(id: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            agency_id: None,
            short_name: short_name.into(),
            long_name: None,
            color: None,
        }
    }

    /// Returns the feed color if the feed actually sets one.
    pub fn feed_color(&self) -> Option<&str> {
        self.color.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
