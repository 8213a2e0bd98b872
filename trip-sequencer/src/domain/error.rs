//! Configuration error types.
//!
//! A `ConfigurationGap` means the static agency configuration is out of
//! date with the feed being processed. These are fatal for a run: no
//! partial output is produced.

use super::{DirectionKind, RouteId};

/// Static configuration does not cover the data it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationGap {
    /// Known route without a feed color or a configured one
    #[error("no color configured for route {0}")]
    MissingRouteColor(RouteId),

    /// A color in the feed or the agency tables is malformed
    #[error("route {route} has invalid color {value:?}")]
    InvalidColor { route: RouteId, value: String },

    /// The agency color is malformed
    #[error("agency has invalid color {0:?}")]
    InvalidAgencyColor(String),

    /// Route short name cannot be turned into a route id
    #[error("route short name {0:?} is not a numeric route id")]
    InvalidShortName(String),

    /// The agency expects this route to be split but no sequences are loaded
    #[error("no canonical sequences loaded for route {0}")]
    MissingSequence(RouteId),

    /// A direction's canonical sequence has no entries
    #[error("route {route} direction {direction} has an empty canonical sequence")]
    EmptySequence {
        route: RouteId,
        direction: DirectionKind,
    },

    /// A direction's canonical sequence has nothing to anchor a match on
    #[error("route {route} direction {direction} has no mandatory stops")]
    NoMandatoryStop {
        route: RouteId,
        direction: DirectionKind,
    },

    /// An alternate entry lists no stops
    #[error("route {route} direction {direction} entry {index} lists no alternate stops")]
    EmptyAlternate {
        route: RouteId,
        direction: DirectionKind,
        index: usize,
    },

    /// Both directions of a route use the same direction kind
    #[error("route {route} declares direction {direction} twice")]
    DuplicateDirection {
        route: RouteId,
        direction: DirectionKind,
    },

    /// The same route is configured twice
    #[error("route {0} is configured twice")]
    DuplicateRoute(RouteId),

    /// A stored sequence document could not be interpreted
    #[error("invalid sequence document: {0}")]
    InvalidDocument(String),
}
