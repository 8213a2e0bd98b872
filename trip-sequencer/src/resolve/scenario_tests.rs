//! End-to-end tests of trip resolution, on Cranbrook data and synthetic routes.

use super::*;
use crate::agency::AgencyProfile;
use crate::domain::{DirectionKind, StopId, StopTime};
use crate::store::{DirectionRecord, EntryRecord, RouteRecord};
use EntryRecord::*;

fn stop_times(ids: &[&str]) -> Vec<StopTime> {
    ids.iter()
        .enumerate()
        .map(|(i, s)| StopTime::new(StopId::new(*s).unwrap(), (i as u32 + 1) * 5))
        .collect()
}

fn trip(id: &str, ids: &[&str]) -> RawTrip {
    RawTrip::new(id, "feed-route", stop_times(ids))
}

fn cranbrook_store() -> SequenceStore {
    AgencyProfile::cranbrook()
        .unwrap()
        .sequence_store()
        .unwrap()
}

fn stop_ids(sub_trip: &ResolvedSubTrip) -> Vec<&str> {
    sub_trip
        .stops()
        .iter()
        .map(|s| s.stop_time.stop_id.as_str())
        .collect()
}

fn indices(sub_trip: &ResolvedSubTrip) -> Vec<usize> {
    sub_trip.stops().iter().map(|s| s.position.index).collect()
}

const fn two_way(
    route: u32,
    first: (DirectionKind, &'static [EntryRecord]),
    second: (DirectionKind, &'static [EntryRecord]),
) -> RouteRecord {
    RouteRecord {
        route,
        directions: [
            DirectionRecord {
                kind: first.0,
                headsign: "First",
                stops: first.1,
            },
            DirectionRecord {
                kind: second.0,
                headsign: "Second",
                stops: second.1,
            },
        ],
    }
}

/// Two directions that only share their middle stops
const AMBIGUOUS: RouteRecord = two_way(
    90,
    (
        DirectionKind::North,
        &[Mandatory("x"), Mandatory("a"), Mandatory("b"), Mandatory("y")],
    ),
    (
        DirectionKind::South,
        &[Mandatory("z"), Mandatory("a"), Mandatory("b"), Mandatory("w")],
    ),
);

/// Two directions with no stop in common
const DISJOINT: RouteRecord = two_way(
    91,
    (
        DirectionKind::North,
        &[
            Mandatory("n0"),
            Mandatory("n1"),
            Mandatory("n2"),
            Mandatory("n3"),
            Mandatory("n4"),
            Mandatory("n5"),
        ],
    ),
    (
        DirectionKind::South,
        &[
            Mandatory("s0"),
            Mandatory("s1"),
            Mandatory("s2"),
            Mandatory("s3"),
            Mandatory("s4"),
            Mandatory("s5"),
        ],
    ),
);

/// Out from a hub to a terminal and back by another street
const LOOP: RouteRecord = two_way(
    92,
    (
        DirectionKind::East,
        &[
            Mandatory("h"),
            Mandatory("e1"),
            Mandatory("e2"),
            Mandatory("e3"),
            Mandatory("e4"),
            Mandatory("t"),
        ],
    ),
    (
        DirectionKind::West,
        &[
            Mandatory("t"),
            Mandatory("w1"),
            Mandatory("w2"),
            Mandatory("w3"),
            Mandatory("w4"),
            Mandatory("h"),
        ],
    ),
);

fn synthetic_store() -> SequenceStore {
    SequenceStore::from_records(&[AMBIGUOUS, DISJOINT, LOOP]).unwrap()
}

#[test]
fn route_1_northbound_trip() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip(
        "1-north",
        &["170545", "170509", "170427", "170428", "170429", "170409"],
    );
    let sub_trips = resolver.resolve_trip(RouteId(1), &trip).unwrap();

    assert_eq!(sub_trips.len(), 1);
    let sub_trip = &sub_trips[0];
    assert_eq!(
        sub_trip.direction(),
        SubTripDirection::Canonical(DirectionKind::North)
    );
    assert_eq!(sub_trip.headsign(), Some("Walmart"));
    assert_eq!(
        stop_ids(sub_trip),
        vec!["170545", "170509", "170427", "170428", "170429", "170409"]
    );
    assert_eq!(indices(sub_trip), vec![0, 1, 2, 3, 4, 10]);
}

#[test]
fn route_2_round_trip_splits_at_highlands() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip(
        "2-loop",
        &["170545", "170524", "170474", "170464", "170545"],
    );
    let sub_trips = resolver.resolve_trip(RouteId(2), &trip).unwrap();

    assert_eq!(sub_trips.len(), 2);
    let (east, west) = (&sub_trips[0], &sub_trips[1]);

    assert_eq!(east.direction(), SubTripDirection::Canonical(DirectionKind::East));
    assert_eq!(east.headsign(), Some("Highlands"));
    assert_eq!(stop_ids(east), vec!["170545", "170524", "170474"]);
    assert_eq!(indices(east), vec![0, 1, 2]);

    assert_eq!(west.direction(), SubTripDirection::Canonical(DirectionKind::West));
    assert_eq!(west.headsign(), Some("Downtown"));
    assert_eq!(stop_ids(west), vec!["170474", "170464", "170545"]);
    assert_eq!(indices(west), vec![0, 1, 2]);

    // The boundary visit is the same stop-time in both
    assert_eq!(
        east.last_stop().map(|s| &s.stop_time),
        west.first_stop().map(|s| &s.stop_time)
    );
}

#[test]
fn single_mandatory_match_is_below_threshold() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip("14-odd", &["170537", "999001", "999002"]);
    assert_eq!(
        resolver.resolve_trip(RouteId(14), &trip),
        Err(TripError::BelowMatchThreshold {
            trip_id: "14-odd".into(),
            route_id: RouteId(14),
            best: 1,
            required: 2,
        })
    );
}

#[test]
fn equal_scores_are_ambiguous() {
    let store = synthetic_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    assert_eq!(
        resolver.resolve_trip(RouteId(90), &trip("mid", &["a", "b"])),
        Err(TripError::AmbiguousDirection {
            trip_id: "mid".into(),
            route_id: RouteId(90),
            score: 2,
        })
    );
}

#[test]
fn lower_threshold_accepts_single_match() {
    let store = cranbrook_store();
    let config = MatchConfig::new(1);
    let resolver = Resolver::new(&store, &config);

    let sub_trips = resolver
        .resolve_trip(RouteId(14), &trip("14-odd", &["170537", "999001", "999002"]))
        .unwrap();

    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].headsign(), Some("Downtown"));
    // Unknown stops trail the stop they follow
    assert_eq!(indices(&sub_trips[0]), vec![1, 1, 1]);
    assert!(!sub_trips[0].stops()[1].position.matched);
}

#[test]
fn empty_trip_rejected() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    assert_eq!(
        resolver.resolve_trip(RouteId(2), &trip("empty", &[])),
        Err(TripError::EmptyTrip {
            trip_id: "empty".into()
        })
    );
}

#[test]
fn route_without_sequences_passes_through() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip("6-any", &["p", "q", "r"])
        .with_headsign("Airport")
        .with_direction_id(0);
    let sub_trips = resolver.resolve_trip(RouteId(6), &trip).unwrap();

    assert_eq!(sub_trips.len(), 1);
    assert_eq!(sub_trips[0].headsign(), Some("Airport"));
    assert_eq!(
        sub_trips[0].direction(),
        SubTripDirection::Unsplit {
            direction_id: Some(0)
        }
    );
    assert_eq!(stop_ids(&sub_trips[0]), vec!["p", "q", "r"]);
}

#[test]
fn merge_after_split() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    // The eastbound half misses its middle stop
    let trip = trip("2-gap", &["170545", "170474", "170464", "170545"]);
    let sub_trips = resolver.resolve_trip(RouteId(2), &trip).unwrap();
    assert_eq!(sub_trips.len(), 2);

    let late = StopTime::new(StopId::new("170524").unwrap(), 7);
    let merged = sub_trips[0].merge_stop_times(&store, &[late]).unwrap();

    assert_eq!(stop_ids(&merged), vec!["170545", "170524", "170474"]);
    assert_eq!(indices(&merged), vec![0, 1, 2]);
}

#[test]
fn loop_without_turnaround_splits_between_legs() {
    let store = synthetic_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip(
        "loop-skip",
        &["h", "e1", "e2", "e3", "e4", "w1", "w2", "w3", "w4", "h"],
    );
    let sub_trips = resolver.resolve_trip(RouteId(92), &trip).unwrap();

    assert_eq!(sub_trips.len(), 2);
    let (east, west) = (&sub_trips[0], &sub_trips[1]);
    assert_eq!(east.direction(), SubTripDirection::Canonical(DirectionKind::East));
    assert_eq!(stop_ids(east), vec!["h", "e1", "e2", "e3", "e4"]);
    assert_eq!(west.direction(), SubTripDirection::Canonical(DirectionKind::West));
    assert_eq!(stop_ids(west), vec!["w1", "w2", "w3", "w4", "h"]);
    assert!(
        sub_trips
            .iter()
            .flat_map(|t| t.stops())
            .all(|s| s.position.matched)
    );
}

#[test]
fn route_5_round_trip_without_college_way() {
    let store = cranbrook_store();
    let config = MatchConfig::default();
    let resolver = Resolver::new(&store, &config);

    let trip = trip(
        "5-short",
        &["170545", "170443", "170539", "170445", "170545"],
    );
    let sub_trips = resolver.resolve_trip(RouteId(5), &trip).unwrap();

    assert_eq!(sub_trips.len(), 2);
    let (east, west) = (&sub_trips[0], &sub_trips[1]);

    assert_eq!(east.headsign(), Some("College"));
    assert_eq!(stop_ids(east), vec!["170545", "170443", "170539"]);
    assert_eq!(indices(east), vec![0, 1, 2]);

    assert_eq!(west.headsign(), Some("Downtown"));
    assert_eq!(stop_ids(west), vec!["170445", "170545"]);
    assert_eq!(indices(west), vec![1, 2]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const NORTH: [&str; 6] = ["n0", "n1", "n2", "n3", "n4", "n5"];
    const SOUTH: [&str; 6] = ["s0", "s1", "s2", "s3", "s4", "s5"];

    /// Stops of the loop route plus a few the store has never heard of
    const LOOP_STOPS: [&str; 13] = [
        "h", "e1", "e2", "e3", "e4", "t", "w1", "w2", "w3", "w4", "u1", "u2", "u3",
    ];

    fn concatenated(sub_trips: &[ResolvedSubTrip]) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        let mut previous: Option<&ResolvedSubTrip> = None;
        for sub_trip in sub_trips {
            // A shared turnaround ends one sub-trip and starts the next
            let shared = previous.is_some_and(|p| {
                p.last_stop().map(|s| &s.stop_time)
                    == sub_trip.first_stop().map(|s| &s.stop_time)
            });
            let skip = usize::from(shared);
            ids.extend(
                sub_trip.stops()[skip..]
                    .iter()
                    .map(|s| s.stop_time.stop_id.as_str().to_string()),
            );
            previous = Some(sub_trip);
        }
        ids
    }

    fn out_and_back() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
        (
            prop::sample::subsequence(vec!["e1", "e2", "e3", "e4"], 1..=4),
            prop::sample::subsequence(vec!["w1", "w2", "w3", "w4"], 1..=4),
        )
    }

    fn loop_trip(east: &[&'static str], west: &[&'static str]) -> Vec<&'static str> {
        let mut ids = vec!["h"];
        ids.extend(east);
        ids.push("t");
        ids.extend(west);
        ids.push("h");
        ids
    }

    proptest! {
        /// An in-order subset of one direction resolves to that direction alone
        #[test]
        fn exact_subsequence_stays_whole(
            north in any::<bool>(),
            ids in prop::sample::subsequence(NORTH.to_vec(), 2..=6),
        ) {
            let store = synthetic_store();
            let config = MatchConfig::default();
            let resolver = Resolver::new(&store, &config);

            let ids: Vec<&str> = if north {
                ids
            } else {
                ids.iter().map(|s| SOUTH[NORTH.iter().position(|n| n == s).unwrap()]).collect()
            };
            let sub_trips = resolver.resolve_trip(RouteId(91), &trip("t", &ids)).unwrap();

            let expected = if north { DirectionKind::North } else { DirectionKind::South };
            prop_assert_eq!(sub_trips.len(), 1);
            prop_assert_eq!(sub_trips[0].direction(), SubTripDirection::Canonical(expected));
            prop_assert!(sub_trips[0].stops().iter().all(|s| s.position.matched));
            prop_assert_eq!(stop_ids(&sub_trips[0]), ids);
        }

        /// A trip out and back splits at the terminal, and each half
        /// resolves to itself when fed back in
        #[test]
        fn out_and_back_is_idempotent((east, west) in out_and_back()) {
            let store = synthetic_store();
            let config = MatchConfig::default();
            let resolver = Resolver::new(&store, &config);

            let ids = loop_trip(&east, &west);
            let sub_trips = resolver.resolve_trip(RouteId(92), &trip("t", &ids)).unwrap();
            prop_assert_eq!(sub_trips.len(), 2);
            prop_assert_eq!(sub_trips[0].last_stop().unwrap().stop_time.stop_id.as_str(), "t");

            for sub_trip in &sub_trips {
                let stop_times = sub_trip.stops().iter().map(|s| s.stop_time.clone()).collect();
                let again = resolver
                    .resolve_trip(RouteId(92), &RawTrip::new("t", "feed-route", stop_times))
                    .unwrap();
                prop_assert_eq!(again.len(), 1);
                prop_assert_eq!(&again[0], sub_trip);
            }
        }

        /// Whatever the trip, resolved sub-trips are in canonical order and
        /// put back together give the observed stops
        #[test]
        fn resolution_preserves_observed_order(
            ids in prop::collection::vec(prop::sample::select(LOOP_STOPS.to_vec()), 0..14),
        ) {
            let store = synthetic_store();
            let config = MatchConfig::default();
            let resolver = Resolver::new(&store, &config);

            if let Ok(sub_trips) = resolver.resolve_trip(RouteId(92), &trip("t", &ids)) {
                prop_assert!(!sub_trips.is_empty() && sub_trips.len() <= 2);
                for sub_trip in &sub_trips {
                    let indices = indices(sub_trip);
                    prop_assert!(indices.windows(2).all(|w| w[0] <= w[1]));
                }
                prop_assert_eq!(concatenated(&sub_trips), ids);
            }
        }

        /// Resolving the same trip twice gives the same answer
        #[test]
        fn resolution_is_deterministic(
            ids in prop::collection::vec(prop::sample::select(LOOP_STOPS.to_vec()), 1..14),
        ) {
            let store = synthetic_store();
            let config = MatchConfig::default();
            let resolver = Resolver::new(&store, &config);

            let trip = trip("t", &ids);
            prop_assert_eq!(
                resolver.resolve_trip(RouteId(92), &trip),
                resolver.resolve_trip(RouteId(92), &trip)
            );
        }
    }
}
