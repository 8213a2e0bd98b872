//! Stop identifiers and stop-time records.

use std::fmt;

/// Error returned when a stop identifier is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A GTFS stop identifier.
///
/// Stop ids are opaque strings assigned by the feed publisher. The only
/// validation is that they are non-empty and carry no surrounding
/// whitespace, so ids copied out of CSV cells compare equal to ids authored
/// in the agency tables.
///
/// # Examples
///
/// ```
/// use trip_sequencer::domain::StopId;
///
/// let stop = StopId::new("170545").unwrap();
/// assert_eq!(stop.as_str(), "170545");
///
/// assert!(StopId::new("").is_err());
/// assert!(StopId::new(" 170545").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id from anything string-like.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidStopId> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "stop id cannot be empty",
            });
        }
        if s.trim() != s {
            return Err(InvalidStopId {
                reason: "stop id cannot have surrounding whitespace",
            });
        }
        Ok(StopId(s))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observed visit of a vehicle run at a stop.
///
/// `sequence` is the feed's `stop_sequence`: increasing along the run but
/// not necessarily consecutive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopTime {
    /// Stop served
    pub stop_id: StopId,
    /// Position of the visit within the run
    pub sequence: u32,
}

impl StopTime {
    /// Creates a new stop-time record.
    pub fn new(stop_id: StopId, sequence: u32) -> Self {
        Self { stop_id, sequence }
    }
}

/// A vehicle run as observed in the feed.
///
/// Stop-times are kept sorted by sequence number; records with the same
/// sequence number keep their input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrip {
    /// GTFS `trip_id`
    pub trip_id: String,
    /// GTFS `route_id` of the route this trip runs on
    pub route: String,
    /// Feed-provided headsign, used when the route has no canonical split
    pub headsign: Option<String>,
    /// Feed-provided `direction_id`, used when the route has no canonical split
    pub direction_id: Option<u8>,
    stop_times: Vec<StopTime>,
}

impl RawTrip {
    /// Creates a trip from its stop-times, in any order.
    pub fn new(
        trip_id: impl Into<String>,
        route: impl Into<String>,
        mut stop_times: Vec<StopTime>,
    ) -> Self {
        stop_times.sort_by_key(|st| st.sequence);
        Self {
            trip_id: trip_id.into(),
            route: route.into(),
            headsign: None,
            direction_id: None,
            stop_times,
        }
    }

    /// Sets the feed headsign.
    pub fn with_headsign(mut self, headsign: impl Into<String>) -> Self {
        self.headsign = Some(headsign.into());
        self
    }

    /// Sets the feed direction id.
    pub fn with_direction_id(mut self, direction_id: u8) -> Self {
        self.direction_id = Some(direction_id);
        self
    }

    /// Stop-times in observed order.
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    /// Returns true if the trip has no stop-times.
    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}
