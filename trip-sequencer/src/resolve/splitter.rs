//! Cutting raw trips into directional segments.
//!
//! Some feeds publish a vehicle run that goes out and comes back as a
//! single trip. If one direction explains the whole trip it stays whole;
//! otherwise the trip is cut where the prefix stops matching one direction
//! and the suffix starts matching the other. The cut either falls on a
//! turnaround stop that both halves share, or between two stops when the
//! feed leaves the turnaround out.

use tracing::debug;

use crate::domain::{RawTrip, StopTime};
use crate::store::RouteSpec;

use super::config::MatchConfig;
use super::error::Rejection;
use super::matcher::{Alignment, align, align_both, select_primary};
use super::ordering::{PositionedStop, sort_stops};
use super::sub_trip::{ResolvedSubTrip, SubTripDirection};

/// Direction pairs tried at each boundary, in route order.
const DIRECTION_PAIRS: [(usize, usize); 2] = [(0, 1), (1, 0)];

/// A run of observed stops assigned to one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    /// Index of the direction in the route
    pub(crate) slot: usize,
    /// First observed stop, inclusive
    pub(crate) start: usize,
    /// Last observed stop, inclusive
    pub(crate) end: usize,
    pub(crate) alignment: Alignment,
}

/// How each observed stop of a trip maps onto canonical sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PositionMapping {
    pub(crate) segments: Vec<Segment>,
}

/// A candidate cut of a trip into two segments.
///
/// The segments either share one boundary stop (`head_end == tail_start`)
/// or sit next to each other (`head_end + 1 == tail_start`).
#[derive(Debug, Clone)]
struct Split {
    head_end: usize,
    tail_start: usize,
    head_slot: usize,
    tail_slot: usize,
    head: Alignment,
    tail: Alignment,
    score: usize,
}

impl Split {
    fn shared(&self) -> bool {
        self.head_end == self.tail_start
    }

    fn beats(&self, other: &Split) -> bool {
        (self.score, self.shared()) > (other.score, other.shared())
    }
}

/// Score one cut, or `None` if either side falls short.
///
/// A shared boundary stop must be matched on both sides and is only
/// counted once.
fn try_cut(
    route: &RouteSpec,
    stops: &[StopTime],
    (head_end, tail_start): (usize, usize),
    (head_slot, tail_slot): (usize, usize),
    config: &MatchConfig,
) -> Option<Split> {
    let directions = route.directions();
    let head = align(&directions[head_slot].sequence, &stops[..=head_end]);
    let tail = align(&directions[tail_slot].sequence, &stops[tail_start..]);

    if head.score < config.min_mandatory_matches || tail.score < config.min_mandatory_matches {
        return None;
    }

    let mut score = head.score + tail.score;
    if head_end == tail_start {
        let (boundary_head, boundary_tail) = (head.last()?, tail.first()?);
        if boundary_head.entry().is_none() || boundary_tail.entry().is_none() {
            return None;
        }
        if boundary_head.is_scored() && boundary_tail.is_scored() {
            score -= 1;
        }
    }

    Some(Split {
        head_end,
        tail_start,
        head_slot,
        tail_slot,
        head,
        tail,
        score,
    })
}

/// Find the best way to cut `stops` in two.
///
/// A cut either shares a boundary stop between both segments or places
/// the segments back to back, for feeds that skip the turnaround stop.
/// Each segment has to clear the threshold on its own. On equal scores a
/// shared boundary wins over a back-to-back cut, then the lowest cut,
/// then the earlier direction pair.
fn best_split(route: &RouteSpec, stops: &[StopTime], config: &MatchConfig) -> Option<Split> {
    let mut best: Option<Split> = None;

    for cut in 0..stops.len().saturating_sub(1) {
        let shared = (cut > 0).then_some((cut, cut));
        for bounds in shared.into_iter().chain([(cut, cut + 1)]) {
            for slots in DIRECTION_PAIRS {
                let Some(split) = try_cut(route, stops, bounds, slots, config) else {
                    continue;
                };
                if best.as_ref().is_none_or(|b| split.beats(b)) {
                    best = Some(split);
                }
            }
        }
    }

    best
}

fn best_single(alignments: &[Alignment; 2]) -> usize {
    alignments[0].score.max(alignments[1].score)
}

/// Returns true if cutting `stops` explains them better than either direction alone.
fn improves(route: &RouteSpec, stops: &[StopTime], config: &MatchConfig) -> bool {
    let single = best_single(&align_both(route, stops));
    best_split(route, stops, config).is_some_and(|split| split.score > single)
}

/// Map every observed stop onto a canonical direction.
///
/// Produces one segment when a single direction explains the trip best,
/// two when a cut scores strictly higher. A trip whose segments could
/// themselves be cut again changes direction more than once and is rejected.
pub(crate) fn segment(
    route: &RouteSpec,
    stops: &[StopTime],
    config: &MatchConfig,
) -> Result<PositionMapping, Rejection> {
    let singles = align_both(route, stops);
    let single = best_single(&singles);

    if let Some(split) = best_split(route, stops, config).filter(|s| s.score > single) {
        let head_stops = &stops[..=split.head_end];
        let tail_stops = &stops[split.tail_start..];
        if improves(route, head_stops, config) || improves(route, tail_stops, config) {
            return Err(Rejection::MultiSegment);
        }

        debug!(
            route_id = %route.route_id(),
            head_end = split.head_end,
            tail_start = split.tail_start,
            score = split.score,
            single,
            "splitting trip"
        );
        return Ok(PositionMapping {
            segments: vec![
                Segment {
                    slot: split.head_slot,
                    start: 0,
                    end: split.head_end,
                    alignment: split.head,
                },
                Segment {
                    slot: split.tail_slot,
                    start: split.tail_start,
                    end: stops.len() - 1,
                    alignment: split.tail,
                },
            ],
        });
    }

    let slot = select_primary(&singles, config)?;
    let [first, second] = singles;
    let alignment = if slot == 0 { first } else { second };
    Ok(PositionMapping {
        segments: vec![Segment {
            slot,
            start: 0,
            end: stops.len() - 1,
            alignment,
        }],
    })
}

/// Turn a mapping into sub-trips, one per segment, in trip order.
pub(crate) fn emit(
    route: &RouteSpec,
    trip: &RawTrip,
    mapping: &PositionMapping,
) -> Vec<ResolvedSubTrip> {
    let stop_times = trip.stop_times();

    mapping
        .segments
        .iter()
        .map(|segment| {
            let direction = &route.directions()[segment.slot];
            let mut stops: Vec<PositionedStop> = stop_times[segment.start..=segment.end]
                .iter()
                .zip(segment.alignment.positions())
                .map(|(stop_time, position)| PositionedStop::new(stop_time.clone(), position))
                .collect();
            sort_stops(&mut stops);

            ResolvedSubTrip::new(
                trip.trip_id.clone(),
                route.route_id(),
                SubTripDirection::Canonical(direction.kind),
                Some(direction.headsign.clone()),
                stops,
            )
        })
        .collect()
}
