//! Matching configuration.

/// Configuration parameters for trip resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Minimum number of mandatory stops a direction must match before a
    /// trip (or one segment of a split trip) is assigned to it.
    pub min_mandatory_matches: usize,
}

impl MatchConfig {
    /// Create a new configuration with the given threshold.
    pub fn new(min_mandatory_matches: usize) -> Self {
        Self {
            min_mandatory_matches,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_mandatory_matches: 2,
        }
    }
}
