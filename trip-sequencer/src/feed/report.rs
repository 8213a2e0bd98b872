//! JSON report of a feed resolution.

use serde::Serialize;

use crate::agency::{AgencyProfile, RouteMetadata};
use crate::resolve::{
    FeedResolution, PositionedStop, ResolvedSubTrip, SubTripDirection, TripError, TripFailure,
};

/// Everything resolved from one snapshot.
#[derive(Debug, Serialize)]
pub struct ResolutionReport {
    pub agency: AgencyReport,
    pub routes: Vec<RouteReport>,
    pub sub_trips: Vec<SubTripReport>,
    pub failures: Vec<FailureReport>,
    pub skipped_trips: usize,
}

/// The agency the snapshot was resolved for.
#[derive(Debug, Serialize)]
pub struct AgencyReport {
    pub agency_id: String,
    pub name: String,
    /// Six uppercase hex digits
    pub color: String,
    /// GTFS `route_type` code
    pub route_type: u16,
}

/// Display data of a route.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub route_id: u32,
    pub feed_route_id: String,
    pub short_name: String,
    pub display_name: String,
    /// Six uppercase hex digits
    pub color: String,
}

/// A resolved sub-trip.
#[derive(Debug, Serialize)]
pub struct SubTripReport {
    pub trip_id: String,
    pub route_id: u32,
    /// Canonical direction, absent for routes that are not split
    pub direction: Option<&'static str>,
    /// Feed direction id, only for routes that are not split
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_direction_id: Option<u8>,
    pub headsign: Option<String>,
    pub stops: Vec<StopReport>,
}

/// A stop of a sub-trip, in canonical order.
#[derive(Debug, Serialize)]
pub struct StopReport {
    pub stop_id: String,
    pub stop_sequence: u32,
    pub canonical_index: usize,
    pub matched: bool,
}

/// A trip that could not be resolved.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub trip_id: String,
    pub route_id: u32,
    /// Machine-readable failure kind
    pub kind: &'static str,
    pub message: String,
}

impl ResolutionReport {
    pub fn new(profile: &AgencyProfile, resolution: &FeedResolution) -> Self {
        Self {
            agency: AgencyReport::from(profile),
            routes: resolution.routes.iter().map(RouteReport::from).collect(),
            sub_trips: resolution.sub_trips.iter().map(SubTripReport::from).collect(),
            failures: resolution.failures.iter().map(FailureReport::from).collect(),
            skipped_trips: resolution.skipped_trips,
        }
    }
}

impl From<&AgencyProfile> for AgencyReport {
    fn from(profile: &AgencyProfile) -> Self {
        Self {
            agency_id: profile.agency_id().to_string(),
            name: profile.name().to_string(),
            color: profile.agency_color().as_str().to_string(),
            route_type: profile.route_type().gtfs_code(),
        }
    }
}

impl From<&RouteMetadata> for RouteReport {
    fn from(meta: &RouteMetadata) -> Self {
        Self {
            route_id: meta.route_id.get(),
            feed_route_id: meta.feed_id.clone(),
            short_name: meta.short_name.clone(),
            display_name: meta.display_name.clone(),
            color: meta.color.as_str().to_string(),
        }
    }
}

impl From<&ResolvedSubTrip> for SubTripReport {
    fn from(sub_trip: &ResolvedSubTrip) -> Self {
        let (direction, feed_direction_id) = match sub_trip.direction() {
            SubTripDirection::Canonical(kind) => (Some(kind.as_str()), None),
            SubTripDirection::Unsplit { direction_id } => (None, direction_id),
        };

        Self {
            trip_id: sub_trip.trip_id().to_string(),
            route_id: sub_trip.route_id().get(),
            direction,
            feed_direction_id,
            headsign: sub_trip.headsign().map(str::to_string),
            stops: sub_trip.stops().iter().map(StopReport::from).collect(),
        }
    }
}

impl From<&PositionedStop> for StopReport {
    fn from(stop: &PositionedStop) -> Self {
        Self {
            stop_id: stop.stop_time.stop_id.as_str().to_string(),
            stop_sequence: stop.stop_time.sequence,
            canonical_index: stop.position.index,
            matched: stop.position.matched,
        }
    }
}

impl From<&TripFailure> for FailureReport {
    fn from(failure: &TripFailure) -> Self {
        let kind = match failure.error {
            TripError::AmbiguousDirection { .. } => "ambiguous_direction",
            TripError::BelowMatchThreshold { .. } => "below_match_threshold",
            TripError::MultiSegmentUnsupported { .. } => "multi_segment_unsupported",
            TripError::EmptyTrip { .. } => "empty_trip",
        };

        Self {
            trip_id: failure.trip_id.clone(),
            route_id: failure.route_id.get(),
            kind,
            message: failure.error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agency::AgencyProfile;
    use crate::domain::{FeedRoute, RawTrip, RouteId, StopId, StopTime};
    use crate::resolve::{MatchConfig, Resolver, resolve_feed};
    use crate::store::SequenceStore;

    fn trip(id: &str, route: &str, stops: &[&str]) -> RawTrip {
        RawTrip::new(
            id,
            route,
            stops
                .iter()
                .enumerate()
                .map(|(i, s)| StopTime::new(StopId::new(*s).unwrap(), i as u32 + 1))
                .collect(),
        )
    }

    #[test]
    fn report_serializes() {
        let profile = AgencyProfile::cranbrook().unwrap();
        let store = profile.sequence_store().unwrap();
        let routes = vec![FeedRoute {
            agency_id: Some("27".into()),
            ..FeedRoute::new("4-CRA", "4")
        }];
        let trips = vec![
            trip("good", "4-CRA", &["170545", "170502", "570002"]),
            trip("bad", "4-CRA", &["170545"]),
        ];

        let resolution =
            resolve_feed(&profile, &store, &MatchConfig::default(), &routes, &trips).unwrap();
        let report = ResolutionReport::new(&profile, &resolution);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["agency"]["agency_id"], "27");
        assert_eq!(json["agency"]["name"], "Cranbrook Transit System");
        assert_eq!(json["agency"]["color"], "34B233");
        assert_eq!(json["agency"]["route_type"], 3);

        assert_eq!(json["routes"][0]["route_id"], 4);
        assert_eq!(json["routes"][0]["color"], "03A14D");

        let sub_trip = &json["sub_trips"][0];
        assert_eq!(sub_trip["trip_id"], "good");
        assert_eq!(sub_trip["direction"], "NORTH");
        assert_eq!(sub_trip["headsign"], "Mission Pl");
        assert!(sub_trip.get("feed_direction_id").is_none());
        assert_eq!(sub_trip["stops"][2]["stop_id"], "570002");
        assert_eq!(sub_trip["stops"][2]["canonical_index"], 2);
        assert_eq!(sub_trip["stops"][2]["matched"], true);

        let failure = &json["failures"][0];
        assert_eq!(failure["trip_id"], "bad");
        assert_eq!(failure["kind"], "below_match_threshold");
        assert_eq!(failure["route_id"], 4);
    }

    #[test]
    fn unsplit_sub_trip_reports_feed_direction() {
        let store = SequenceStore::new();
        let config = MatchConfig::default();
        let trip = trip("x", "9", &["a"]).with_direction_id(1);
        let sub_trips = Resolver::new(&store, &config)
            .resolve_trip(RouteId(9), &trip)
            .unwrap();
        let resolution = FeedResolution {
            sub_trips,
            ..FeedResolution::default()
        };

        let profile = AgencyProfile::cranbrook().unwrap();
        let json = serde_json::to_value(ResolutionReport::new(&profile, &resolution)).unwrap();
        assert!(json["sub_trips"][0]["direction"].is_null());
        assert_eq!(json["sub_trips"][0]["feed_direction_id"], 1);
    }
}
