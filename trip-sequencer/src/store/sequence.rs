//! Canonical stop sequences and the roles of their entries.

use crate::domain::{ConfigurationGap, DirectionKind, RouteId, StopId};

/// How an entry of a canonical sequence takes part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopRole {
    /// Must appear; a firm anchor that counts toward a direction's score.
    Mandatory,
    /// One of a set of interchangeable stops. May be matched by several
    /// observed stops in a row.
    Alternate,
    /// A stop the route visits more than once. Matched like a mandatory
    /// stop but never counted toward the score, since its presence alone
    /// does not say which part of the route the vehicle is on.
    Duplicate,
}

impl StopRole {
    /// Returns true if a match on this role is counted toward the score.
    pub fn is_scored(self) -> bool {
        self == StopRole::Mandatory
    }
}

/// One position of a canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    stops: Vec<StopId>,
    role: StopRole,
}

impl SequenceEntry {
    /// A mandatory stop.
    pub fn mandatory(stop: StopId) -> Self {
        Self {
            stops: vec![stop],
            role: StopRole::Mandatory,
        }
    }

    /// A stop visited more than once along the route.
    pub fn duplicate(stop: StopId) -> Self {
        Self {
            stops: vec![stop],
            role: StopRole::Duplicate,
        }
    }

    /// A set of interchangeable stops; the feed may serve any of them.
    pub fn alternate(stops: Vec<StopId>) -> Self {
        Self {
            stops,
            role: StopRole::Alternate,
        }
    }

    /// The role of this entry.
    pub fn role(&self) -> StopRole {
        self.role
    }

    /// Every stop this entry accepts.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Returns true if an observed stop can land on this entry.
    pub fn matches(&self, stop: &StopId) -> bool {
        self.stops.contains(stop)
    }
}

/// An ordered list of entries in the order buses actually serve them.
///
/// The same stop may appear several times (loops); every occurrence is a
/// distinct entry identified by its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSequence {
    entries: Vec<SequenceEntry>,
}

impl CanonicalSequence {
    /// Creates a sequence from its entries.
    pub fn new(entries: Vec<SequenceEntry>) -> Self {
        Self { entries }
    }

    /// All entries in canonical order.
    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    /// The entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SequenceEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of mandatory entries, i.e. the best score a trip can reach.
    pub fn mandatory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.role.is_scored()).count()
    }
}

/// A logical direction of a route: a headsign and its canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    /// Which direction this is
    pub kind: DirectionKind,
    /// Headsign shown to riders for sub-trips in this direction
    pub headsign: String,
    /// Stops in the order they are served
    pub sequence: CanonicalSequence,
}

impl Direction {
    /// Creates a direction.
    pub fn new(
        kind: DirectionKind,
        headsign: impl Into<String>,
        sequence: CanonicalSequence,
    ) -> Self {
        Self {
            kind,
            headsign: headsign.into(),
            sequence,
        }
    }

    fn validate(&self, route: RouteId) -> Result<(), ConfigurationGap> {
        if self.sequence.is_empty() {
            return Err(ConfigurationGap::EmptySequence {
                route,
                direction: self.kind,
            });
        }

        if let Some(index) = self
            .sequence
            .entries()
            .iter()
            .position(|e| e.stops().is_empty())
        {
            return Err(ConfigurationGap::EmptyAlternate {
                route,
                direction: self.kind,
                index,
            });
        }

        if self.sequence.mandatory_count() == 0 {
            return Err(ConfigurationGap::NoMandatoryStop {
                route,
                direction: self.kind,
            });
        }

        Ok(())
    }
}

/// The canonical description of a route: exactly two directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    route_id: RouteId,
    directions: [Direction; 2],
}

impl RouteSpec {
    /// Creates a route, checking that both directions are usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_sequencer::domain::{DirectionKind, RouteId, StopId};
    /// use trip_sequencer::store::{CanonicalSequence, Direction, RouteSpec, SequenceEntry};
    ///
    /// let stop = |s: &str| SequenceEntry::mandatory(StopId::new(s).unwrap());
    /// let east = Direction::new(
    ///     DirectionKind::East,
    ///     "Highlands",
    ///     CanonicalSequence::new(vec![stop("170545"), stop("170474")]),
    /// );
    /// let west = Direction::new(
    ///     DirectionKind::West,
    ///     "Downtown",
    ///     CanonicalSequence::new(vec![stop("170474"), stop("170545")]),
    /// );
    ///
    /// let route = RouteSpec::new(RouteId(2), east, west).unwrap();
    /// assert_eq!(route.direction(DirectionKind::West).unwrap().headsign, "Downtown");
    /// ```
    pub fn new(
        route_id: RouteId,
        first: Direction,
        second: Direction,
    ) -> Result<Self, ConfigurationGap> {
        if first.kind == second.kind {
            return Err(ConfigurationGap::DuplicateDirection {
                route: route_id,
                direction: first.kind,
            });
        }
        first.validate(route_id)?;
        second.validate(route_id)?;

        Ok(Self {
            route_id,
            directions: [first, second],
        })
    }

    /// The route this describes.
    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Both directions, in configuration order.
    pub fn directions(&self) -> &[Direction; 2] {
        &self.directions
    }

    /// The direction of the given kind, if the route has it.
    pub fn direction(&self, kind: DirectionKind) -> Option<&Direction> {
        self.directions.iter().find(|d| d.kind == kind)
    }
}
