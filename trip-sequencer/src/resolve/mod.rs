//! Trip resolution engine.
//!
//! This module answers: "which way is this trip going, and in what order
//! does it really serve its stops?"
//!
//! Each raw trip is aligned against both canonical directions of its route,
//! cut into at most two directional segments, and emitted as sub-trips
//! whose stops are ordered by canonical position. Routes without canonical
//! sequences pass through unchanged.

mod batch;
mod config;
mod error;
mod matcher;
mod ordering;
mod splitter;
mod sub_trip;

#[cfg(test)]
mod scenario_tests;

use tracing::debug;

use crate::domain::{RawTrip, RouteId};
use crate::store::SequenceStore;

pub use batch::{FeedResolution, TripFailure, resolve_feed};
pub use config::MatchConfig;
pub use error::TripError;
pub use ordering::{PositionedStop, StopPosition, compare_stops, sort_stops};
pub use sub_trip::{ResolvedSubTrip, SubTripDirection};

/// Resolves trips against a borrowed sequence store.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a SequenceStore,
    config: &'a MatchConfig,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    pub fn new(store: &'a SequenceStore, config: &'a MatchConfig) -> Self {
        Self { store, config }
    }

    /// Resolve one trip of the given route into directional sub-trips.
    ///
    /// Returns one sub-trip when a single direction explains the trip (or
    /// the route has no canonical sequences), two when the trip turns
    /// around once.
    pub fn resolve_trip(
        &self,
        route_id: RouteId,
        trip: &RawTrip,
    ) -> Result<Vec<ResolvedSubTrip>, TripError> {
        if trip.is_empty() {
            return Err(TripError::EmptyTrip {
                trip_id: trip.trip_id.clone(),
            });
        }

        let Some(route) = self.store.lookup(route_id) else {
            debug!(
                trip_id = %trip.trip_id,
                %route_id,
                "no canonical sequences, keeping trip whole"
            );
            return Ok(vec![ResolvedSubTrip::unsplit(route_id, trip)]);
        };

        let mapping = splitter::segment(route, trip.stop_times(), self.config)
            .map_err(|rejection| rejection.into_error(route_id, &trip.trip_id))?;
        let sub_trips = splitter::emit(route, trip, &mapping);

        debug!(
            trip_id = %trip.trip_id,
            %route_id,
            sub_trips = sub_trips.len(),
            "resolved trip"
        );
        Ok(sub_trips)
    }
}
