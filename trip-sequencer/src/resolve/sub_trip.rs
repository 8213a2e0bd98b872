//! Resolved sub-trips.

use std::fmt;

use crate::domain::{ConfigurationGap, DirectionKind, RawTrip, RouteId, StopTime};
use crate::store::{SequenceStore, StopRole};

use super::matcher::find_entry;
use super::ordering::{PositionedStop, StopPosition, sort_stops};

/// Which way a sub-trip runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubTripDirection {
    /// Matched against a canonical direction of the route
    Canonical(DirectionKind),
    /// The route has no canonical sequences; the feed's direction is kept
    Unsplit { direction_id: Option<u8> },
}

impl fmt::Display for SubTripDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubTripDirection::Canonical(kind) => write!(f, "{kind}"),
            SubTripDirection::Unsplit {
                direction_id: Some(id),
            } => write!(f, "feed direction {id}"),
            SubTripDirection::Unsplit { direction_id: None } => f.write_str("unsplit"),
        }
    }
}

/// One directional piece of a raw trip, with stops in canonical order.
///
/// Immutable once produced; merging further stop-times yields a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubTrip {
    trip_id: String,
    route_id: RouteId,
    direction: SubTripDirection,
    headsign: Option<String>,
    stops: Vec<PositionedStop>,
}

impl ResolvedSubTrip {
    /// Stops must already be sorted with the comparator.
    pub(crate) fn new(
        trip_id: String,
        route_id: RouteId,
        direction: SubTripDirection,
        headsign: Option<String>,
        stops: Vec<PositionedStop>,
    ) -> Self {
        Self {
            trip_id,
            route_id,
            direction,
            headsign,
            stops,
        }
    }

    /// The whole trip as one sub-trip, for routes without canonical sequences.
    ///
    /// Stops keep the feed's order; their position is their ordinal.
    pub(crate) fn unsplit(route_id: RouteId, trip: &RawTrip) -> Self {
        Self::new(
            trip.trip_id.clone(),
            route_id,
            SubTripDirection::Unsplit {
                direction_id: trip.direction_id,
            },
            trip.headsign.clone(),
            ordinal_stops(trip.stop_times().iter().cloned()),
        )
    }

    /// The trip this sub-trip was cut from.
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    pub fn direction(&self) -> SubTripDirection {
        self.direction
    }

    /// Canonical headsign, or the feed headsign for unsplit trips.
    pub fn headsign(&self) -> Option<&str> {
        self.headsign.as_deref()
    }

    /// Stops in canonical order.
    pub fn stops(&self) -> &[PositionedStop] {
        &self.stops
    }

    /// Returns the first stop.
    pub fn first_stop(&self) -> Option<&PositionedStop> {
        self.stops.first()
    }

    /// Returns the last stop.
    pub fn last_stop(&self) -> Option<&PositionedStop> {
        self.stops.last()
    }

    /// Absorb further stop-time records, returning a new sub-trip.
    ///
    /// Each new record is placed against the direction's canonical sequence
    /// between the stops that surround it by sequence number. A record that
    /// cannot be placed in that window is kept unmatched after its
    /// predecessor. A record never lands on the entry its predecessor
    /// already matched, unless that entry is an alternate. Records already
    /// present (same stop and sequence number) are ignored.
    ///
    /// Fails if the store no longer has the sub-trip's canonical direction.
    pub fn merge_stop_times(
        &self,
        store: &SequenceStore,
        records: &[StopTime],
    ) -> Result<Self, ConfigurationGap> {
        let kind = match self.direction {
            SubTripDirection::Canonical(kind) => kind,
            SubTripDirection::Unsplit { .. } => {
                let mut stop_times: Vec<StopTime> =
                    self.stops.iter().map(|s| s.stop_time.clone()).collect();
                for record in records {
                    if !stop_times.contains(record) {
                        stop_times.push(record.clone());
                    }
                }
                stop_times.sort_by_key(|st| st.sequence);
                return Ok(self.with_stops(ordinal_stops(stop_times)));
            }
        };

        let sequence = &store
            .lookup(self.route_id)
            .and_then(|route| route.direction(kind))
            .ok_or(ConfigurationGap::MissingSequence(self.route_id))?
            .sequence;
        let last_index = sequence.len().saturating_sub(1);

        let mut stops = self.stops.clone();
        for record in records {
            if stops.iter().any(|s| &s.stop_time == record) {
                continue;
            }

            let predecessor = stops
                .iter()
                .filter(|s| s.stop_time.sequence < record.sequence)
                .max_by_key(|s| s.stop_time.sequence);
            let floor = predecessor.map_or(0, |s| s.position.index);
            // An entry matched by anything but an alternate is used up
            let consumed = predecessor.is_some_and(|s| {
                s.position.matched
                    && sequence
                        .get(s.position.index)
                        .is_some_and(|e| e.role() != StopRole::Alternate)
            });
            let cursor = floor + usize::from(consumed);
            let ceiling = stops
                .iter()
                .filter(|s| s.stop_time.sequence > record.sequence)
                .min_by_key(|s| s.stop_time.sequence)
                .map_or(last_index, |s| s.position.index);

            let position = find_entry(sequence, &record.stop_id, cursor)
                .filter(|&entry| entry <= ceiling)
                .map_or(StopPosition::unmatched(floor), StopPosition::matched);
            stops.push(PositionedStop::new(record.clone(), position));
        }

        sort_stops(&mut stops);
        Ok(self.with_stops(stops))
    }

    fn with_stops(&self, stops: Vec<PositionedStop>) -> Self {
        Self {
            stops,
            ..self.clone()
        }
    }
}

fn ordinal_stops(stop_times: impl IntoIterator<Item = StopTime>) -> Vec<PositionedStop> {
    stop_times
        .into_iter()
        .enumerate()
        .map(|(i, st)| PositionedStop::new(st, StopPosition::unmatched(i)))
        .collect()
}
