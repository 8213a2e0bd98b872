//! Resolving a whole feed snapshot.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::agency::{AgencyProfile, RouteMetadata, describe_route};
use crate::domain::{ConfigurationGap, FeedRoute, RawTrip, RouteId};
use crate::store::SequenceStore;

use super::Resolver;
use super::config::MatchConfig;
use super::error::TripError;
use super::sub_trip::ResolvedSubTrip;

/// A trip that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripFailure {
    pub route_id: RouteId,
    pub trip_id: String,
    pub error: TripError,
}

/// Everything produced from one feed snapshot.
#[derive(Debug, Clone, Default)]
pub struct FeedResolution {
    /// Metadata of every route of the agency, by route id
    pub routes: Vec<RouteMetadata>,
    /// Sub-trips ordered by route id, then trip order within the route
    pub sub_trips: Vec<ResolvedSubTrip>,
    pub failures: Vec<TripFailure>,
    /// Trips on routes that belong to another agency or are not in the feed
    pub skipped_trips: usize,
}

/// Resolve every trip of the agency's routes.
///
/// Route metadata is checked first: any configuration gap aborts the run
/// before a single trip is resolved. Per-trip errors are collected instead.
/// Routes are resolved in parallel.
pub fn resolve_feed(
    profile: &AgencyProfile,
    store: &SequenceStore,
    config: &MatchConfig,
    routes: &[FeedRoute],
    trips: &[RawTrip],
) -> Result<FeedResolution, ConfigurationGap> {
    let mut metadata = Vec::new();
    let mut route_ids: HashMap<&str, RouteId> = HashMap::new();

    for route in routes {
        if !profile.includes_agency(route.agency_id.as_deref()) {
            debug!(
                route = %route.id,
                agency_id = ?route.agency_id,
                "skipping route of another agency"
            );
            continue;
        }
        let meta = describe_route(profile, route)?;
        if profile.expects_split(meta.route_id) && !store.contains(meta.route_id) {
            return Err(ConfigurationGap::MissingSequence(meta.route_id));
        }
        route_ids.insert(route.id.as_str(), meta.route_id);
        metadata.push(meta);
    }
    metadata.sort_by_key(|m| m.route_id);

    let mut by_route: BTreeMap<RouteId, Vec<&RawTrip>> = BTreeMap::new();
    let mut skipped_trips = 0;
    for trip in trips {
        match route_ids.get(trip.route.as_str()) {
            Some(&route_id) => by_route.entry(route_id).or_default().push(trip),
            None => skipped_trips += 1,
        }
    }

    let resolver = Resolver::new(store, config);
    let groups: Vec<_> = by_route.into_iter().collect();
    let resolved: Vec<_> = groups
        .par_iter()
        .map(|(route_id, trips)| resolve_route(&resolver, *route_id, trips))
        .collect();

    let mut resolution = FeedResolution {
        routes: metadata,
        skipped_trips,
        ..FeedResolution::default()
    };
    for (sub_trips, failures) in resolved {
        resolution.sub_trips.extend(sub_trips);
        resolution.failures.extend(failures);
    }

    info!(
        routes = resolution.routes.len(),
        sub_trips = resolution.sub_trips.len(),
        failures = resolution.failures.len(),
        skipped_trips,
        "resolved feed"
    );
    Ok(resolution)
}

fn resolve_route(
    resolver: &Resolver<'_>,
    route_id: RouteId,
    trips: &[&RawTrip],
) -> (Vec<ResolvedSubTrip>, Vec<TripFailure>) {
    let mut sub_trips = Vec::new();
    let mut failures = Vec::new();

    for trip in trips {
        match resolver.resolve_trip(route_id, trip) {
            Ok(resolved) => sub_trips.extend(resolved),
            Err(error) => {
                warn!(trip_id = %trip.trip_id, %route_id, %error, "could not resolve trip");
                failures.push(TripFailure {
                    route_id,
                    trip_id: trip.trip_id.clone(),
                    error,
                });
            }
        }
    }

    (sub_trips, failures)
}
