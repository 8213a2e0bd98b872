//! Literal route records.
//!
//! Agency tables are authored as `const` arrays of these records, close to
//! the shape a person reads off a route map. They are compiled into
//! [`RouteSpec`]s once, when the store is built.

use crate::domain::{ConfigurationGap, DirectionKind, RouteId, StopId};

use super::sequence::{CanonicalSequence, Direction, RouteSpec, SequenceEntry};

/// One authored entry of a canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRecord {
    /// See [`SequenceEntry::mandatory`]
    Mandatory(&'static str),
    /// See [`SequenceEntry::duplicate`]
    Duplicate(&'static str),
    /// See [`SequenceEntry::alternate`]
    Alternate(&'static [&'static str]),
}

/// One authored direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionRecord {
    pub kind: DirectionKind,
    pub headsign: &'static str,
    pub stops: &'static [EntryRecord],
}

/// One authored route with both of its directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub route: u32,
    pub directions: [DirectionRecord; 2],
}

impl RouteRecord {
    /// The route id this record describes.
    pub fn route_id(&self) -> RouteId {
        RouteId(self.route)
    }

    /// Compile the record, validating stop ids and both directions.
    pub fn to_spec(&self) -> Result<RouteSpec, ConfigurationGap> {
        let route = self.route_id();
        let [first, second] = &self.directions;
        RouteSpec::new(
            route,
            compile_direction(route, first)?,
            compile_direction(route, second)?,
        )
    }
}

fn compile_direction(
    route: RouteId,
    record: &DirectionRecord,
) -> Result<Direction, ConfigurationGap> {
    let stop = |s: &str| {
        StopId::new(s).map_err(|e| {
            ConfigurationGap::InvalidDocument(format!("route {route} {}: {e}", record.kind))
        })
    };

    let entries = record
        .stops
        .iter()
        .map(|entry| {
            Ok(match entry {
                EntryRecord::Mandatory(s) => SequenceEntry::mandatory(stop(s)?),
                EntryRecord::Duplicate(s) => SequenceEntry::duplicate(stop(s)?),
                EntryRecord::Alternate(stops) => SequenceEntry::alternate(
                    stops.iter().map(|s| stop(s)).collect::<Result<_, _>>()?,
                ),
            })
        })
        .collect::<Result<Vec<_>, ConfigurationGap>>()?;

    Ok(Direction::new(
        record.kind,
        record.headsign,
        CanonicalSequence::new(entries),
    ))
}
