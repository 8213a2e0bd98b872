//! Feed snapshot input and resolution report output.
//!
//! The engine does not read GTFS archives. Callers hand it routes and trips
//! already parsed into a JSON snapshot, and get back a JSON report.

mod convert;
mod report;
mod types;

pub use convert::{ConversionError, convert_feed, convert_route, convert_trip};
pub use report::{
    AgencyReport, FailureReport, ResolutionReport, RouteReport, StopReport, SubTripReport,
};
pub use types::{FeedDocument, RouteDto, StopTimeDto, TripDto};
