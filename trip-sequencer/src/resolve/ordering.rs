//! Ordering of stops within a resolved sub-trip.

use std::cmp::Ordering;

use crate::domain::StopTime;

/// Where a stop sits relative to its direction's canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopPosition {
    /// Index of the matched sequence entry. Unmatched stops inherit the
    /// index of the matched stop before them.
    pub index: usize,
    /// Whether the stop itself matched a sequence entry.
    pub matched: bool,
}

impl StopPosition {
    /// A stop that matched the entry at `index`.
    pub fn matched(index: usize) -> Self {
        Self {
            index,
            matched: true,
        }
    }

    /// A stop that matched nothing, placed after the entry at `index`.
    pub fn unmatched(index: usize) -> Self {
        Self {
            index,
            matched: false,
        }
    }
}

/// A stop-time together with its canonical position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedStop {
    pub stop_time: StopTime,
    pub position: StopPosition,
}

impl PositionedStop {
    /// Pairs a stop-time with its position.
    pub fn new(stop_time: StopTime, position: StopPosition) -> Self {
        Self {
            stop_time,
            position,
        }
    }
}

/// Compare two stops of the same sub-trip.
///
/// Orders by:
/// 1. Canonical index
/// 2. Observed stop-time sequence number (stops sharing an alternate entry)
/// 3. Stop id, lexically
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use trip_sequencer::domain::{StopId, StopTime};
/// use trip_sequencer::resolve::{PositionedStop, StopPosition, compare_stops};
///
/// let at = |stop: &str, seq, index| {
///     PositionedStop::new(
///         StopTime::new(StopId::new(stop).unwrap(), seq),
///         StopPosition::matched(index),
///     )
/// };
///
/// // Canonical index wins over the feed's own sequence
/// assert_eq!(compare_stops(&at("a", 9, 1), &at("b", 2, 4)), Ordering::Less);
/// // Same entry: fall back to the sequence number
/// assert_eq!(compare_stops(&at("a", 9, 1), &at("b", 2, 1)), Ordering::Greater);
/// ```
pub fn compare_stops(a: &PositionedStop, b: &PositionedStop) -> Ordering {
    a.position
        .index
        .cmp(&b.position.index)
        .then_with(|| a.stop_time.sequence.cmp(&b.stop_time.sequence))
        .then_with(|| a.stop_time.stop_id.cmp(&b.stop_time.stop_id))
}

/// Sort stops with [`compare_stops`].
pub fn sort_stops(stops: &mut [PositionedStop]) {
    stops.sort_by(compare_stops);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StopId;
    use proptest::prelude::*;

    fn positioned_stop() -> impl Strategy<Value = PositionedStop> {
        (0usize..4, 0u32..4, prop::sample::select(vec!["a", "b", "c"]), any::<bool>()).prop_map(
            |(index, sequence, stop, matched)| PositionedStop {
                stop_time: StopTime::new(StopId::new(stop).unwrap(), sequence),
                position: StopPosition { index, matched },
            },
        )
    }

    proptest! {
        /// Nothing is less than itself
        #[test]
        fn irreflexive(a in positioned_stop()) {
            prop_assert_eq!(compare_stops(&a, &a), Ordering::Equal);
        }

        /// Swapping the arguments reverses the result
        #[test]
        fn antisymmetric(a in positioned_stop(), b in positioned_stop()) {
            prop_assert_eq!(compare_stops(&a, &b), compare_stops(&b, &a).reverse());
        }

        /// a <= b and b <= c imply a <= c, strictly if either step is strict
        #[test]
        fn transitive(a in positioned_stop(), b in positioned_stop(), c in positioned_stop()) {
            let ab = compare_stops(&a, &b);
            let bc = compare_stops(&b, &c);
            let ac = compare_stops(&a, &c);
            if ab != Ordering::Greater && bc != Ordering::Greater {
                prop_assert_ne!(ac, Ordering::Greater);
                if ab == Ordering::Less || bc == Ordering::Less {
                    prop_assert_eq!(ac, Ordering::Less);
                }
            }
        }

        /// Equal under the comparator means same index, sequence and stop
        #[test]
        fn equal_only_on_same_keys(a in positioned_stop(), b in positioned_stop()) {
            if compare_stops(&a, &b) == Ordering::Equal {
                prop_assert_eq!(a.position.index, b.position.index);
                prop_assert_eq!(&a.stop_time, &b.stop_time);
            }
        }
    }
}
