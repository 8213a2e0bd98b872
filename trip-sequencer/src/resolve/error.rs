//! Per-trip resolution errors.
//!
//! These are reported per trip and collected by the batch resolver; one
//! failing trip never stops the others.

use crate::domain::RouteId;

/// Why a trip could not be resolved into sub-trips.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    /// Both directions explain the trip equally well
    #[error("trip {trip_id} on route {route_id} matches {score} mandatory stops in both directions")]
    AmbiguousDirection {
        trip_id: String,
        route_id: RouteId,
        score: usize,
    },

    /// Too few mandatory stops matched; the trip belongs to no configured split
    #[error(
        "trip {trip_id} on route {route_id} matches at most {best} mandatory stops, {required} required"
    )]
    BelowMatchThreshold {
        trip_id: String,
        route_id: RouteId,
        best: usize,
        required: usize,
    },

    /// The trip changes direction more than once
    #[error("trip {trip_id} on route {route_id} changes direction more than once")]
    MultiSegmentUnsupported { trip_id: String, route_id: RouteId },

    /// The trip has no stop-times at all
    #[error("trip {trip_id} has no stop times")]
    EmptyTrip { trip_id: String },
}

/// Outcome of matching before trip context is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    BelowThreshold { best: usize, required: usize },
    Tie { score: usize },
    MultiSegment,
}

impl Rejection {
    pub(crate) fn into_error(self, route_id: RouteId, trip_id: &str) -> TripError {
        let trip_id = trip_id.to_string();
        match self {
            Rejection::BelowThreshold { best, required } => TripError::BelowMatchThreshold {
                trip_id,
                route_id,
                best,
                required,
            },
            Rejection::Tie { score } => TripError::AmbiguousDirection {
                trip_id,
                route_id,
                score,
            },
            Rejection::MultiSegment => TripError::MultiSegmentUnsupported { trip_id, route_id },
        }
    }
}
