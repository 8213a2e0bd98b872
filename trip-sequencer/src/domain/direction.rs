//! Logical travel directions.

use std::fmt;

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?}: expected NORTH, SOUTH, EAST or WEST")]
pub struct InvalidDirectionKind(String);

/// A logical travel direction of a route.
///
/// Routes are described with a compass pair (NORTH/SOUTH or EAST/WEST)
/// even when the buses do not literally travel that way; the pair only has
/// to tell the two halves of the service apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectionKind {
    North,
    South,
    East,
    West,
}

impl DirectionKind {
    /// Parse a direction from its upper-case name.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_sequencer::domain::DirectionKind;
    ///
    /// assert_eq!(DirectionKind::parse("NORTH").unwrap(), DirectionKind::North);
    /// assert!(DirectionKind::parse("UP").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidDirectionKind> {
        match s {
            "NORTH" => Ok(DirectionKind::North),
            "SOUTH" => Ok(DirectionKind::South),
            "EAST" => Ok(DirectionKind::East),
            "WEST" => Ok(DirectionKind::West),
            other => Err(InvalidDirectionKind(other.to_string())),
        }
    }

    /// Returns the upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionKind::North => "NORTH",
            DirectionKind::South => "SOUTH",
            DirectionKind::East => "EAST",
            DirectionKind::West => "WEST",
        }
    }

    /// Returns the opposite compass direction.
    pub fn opposite(self) -> Self {
        match self {
            DirectionKind::North => DirectionKind::South,
            DirectionKind::South => DirectionKind::North,
            DirectionKind::East => DirectionKind::West,
            DirectionKind::West => DirectionKind::East,
        }
    }
}

impl fmt::Display for DirectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
