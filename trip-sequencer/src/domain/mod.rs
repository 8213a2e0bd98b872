//! Domain types for the trip sequencer.
//!
//! This module contains the validated identifiers and feed records that
//! flow through the resolution engine. All types enforce their invariants
//! at construction time, so code that receives them can trust their
//! validity.

mod color;
mod direction;
mod error;
mod route;
mod stop;

pub use color::{Color, InvalidColor};
pub use direction::{DirectionKind, InvalidDirectionKind};
pub use error::ConfigurationGap;
pub use route::{FeedRoute, InvalidRouteId, RouteId};
pub use stop::{InvalidStopId, RawTrip, StopId, StopTime};
