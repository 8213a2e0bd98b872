//! Alignment of observed stops onto canonical sequences.
//!
//! A trip is aligned against each direction independently by walking its
//! stops in order with a cursor into the canonical sequence. The cursor
//! never moves backwards: a stop that only matches behind it is left
//! unmatched rather than undoing earlier matches.

use crate::domain::{StopId, StopTime};
use crate::store::{CanonicalSequence, RouteSpec, StopRole};

use super::config::MatchConfig;
use super::error::Rejection;
use super::ordering::StopPosition;

/// Where one observed stop landed in a canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Matched { entry: usize, role: StopRole },
    Unmatched,
}

impl Placement {
    pub(crate) fn entry(self) -> Option<usize> {
        match self {
            Placement::Matched { entry, .. } => Some(entry),
            Placement::Unmatched => None,
        }
    }

    pub(crate) fn is_scored(self) -> bool {
        matches!(self, Placement::Matched { role, .. } if role.is_scored())
    }
}

/// Best-effort alignment of a run of observed stops onto one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Alignment {
    /// One placement per observed stop, in observed order
    pub(crate) placements: Vec<Placement>,
    /// Number of mandatory entries matched
    pub(crate) score: usize,
}

impl Alignment {
    /// Placement of the first observed stop.
    pub(crate) fn first(&self) -> Option<Placement> {
        self.placements.first().copied()
    }

    /// Placement of the last observed stop.
    pub(crate) fn last(&self) -> Option<Placement> {
        self.placements.last().copied()
    }

    /// Canonical position of every observed stop.
    ///
    /// Unmatched stops take the index of the closest matched stop before
    /// them, or of the first matched stop when nothing before them matched.
    pub(crate) fn positions(&self) -> Vec<StopPosition> {
        let mut anchor = self
            .placements
            .iter()
            .find_map(|p| p.entry())
            .unwrap_or(0);

        self.placements
            .iter()
            .map(|p| match p.entry() {
                Some(entry) => {
                    anchor = entry;
                    StopPosition::matched(entry)
                }
                None => StopPosition::unmatched(anchor),
            })
            .collect()
    }
}

/// Align observed stops onto a canonical sequence.
pub(crate) fn align(sequence: &CanonicalSequence, stops: &[StopTime]) -> Alignment {
    let mut cursor = 0;
    let mut score = 0;
    let mut placements = Vec::with_capacity(stops.len());

    for stop_time in stops {
        let Some(entry) = find_entry(sequence, &stop_time.stop_id, cursor) else {
            placements.push(Placement::Unmatched);
            continue;
        };

        let role = sequence.entries()[entry].role();
        // Alternate entries stay available to the next observed stop
        cursor = match role {
            StopRole::Alternate => entry,
            StopRole::Mandatory | StopRole::Duplicate => entry + 1,
        };
        if role.is_scored() {
            score += 1;
        }
        placements.push(Placement::Matched { entry, role });
    }

    Alignment { placements, score }
}

/// Find the entry an observed stop lands on, at or after `cursor`.
///
/// Takes the lowest matching index. When that entry is an alternate and a
/// non-alternate entry for the same stop follows before any other
/// non-alternate entry, the non-alternate entry wins: taking it skips no
/// anchor.
pub(crate) fn find_entry(
    sequence: &CanonicalSequence,
    stop: &StopId,
    cursor: usize,
) -> Option<usize> {
    let entries = sequence.entries();
    let first = (cursor..entries.len()).find(|&i| entries[i].matches(stop))?;

    if entries[first].role() != StopRole::Alternate {
        return Some(first);
    }

    let preferred = entries[first + 1..]
        .iter()
        .enumerate()
        .find(|(_, e)| e.role() != StopRole::Alternate)
        .filter(|(_, e)| e.matches(stop))
        .map(|(offset, _)| first + 1 + offset);

    Some(preferred.unwrap_or(first))
}

/// Align observed stops against both directions of a route.
pub(crate) fn align_both(route: &RouteSpec, stops: &[StopTime]) -> [Alignment; 2] {
    let [first, second] = route.directions();
    [align(&first.sequence, stops), align(&second.sequence, stops)]
}

/// Pick the direction slot that explains the trip.
///
/// The threshold is checked before the tie: a trip nobody explains is not
/// ambiguous, it just belongs to no configured split.
pub(crate) fn select_primary(
    alignments: &[Alignment; 2],
    config: &MatchConfig,
) -> Result<usize, Rejection> {
    let [first, second] = alignments;
    let best = first.score.max(second.score);

    if best < config.min_mandatory_matches {
        return Err(Rejection::BelowThreshold {
            best,
            required: config.min_mandatory_matches,
        });
    }
    if first.score == second.score {
        return Err(Rejection::Tie { score: best });
    }

    Ok(if first.score > second.score { 0 } else { 1 })
}
