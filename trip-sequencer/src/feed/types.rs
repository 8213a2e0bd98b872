//! Feed snapshot DTOs.
//!
//! Field names follow the GTFS column names of `routes.txt`, `trips.txt`
//! and `stop_times.txt`. Optional columns are `Option` and may be omitted.

use serde::Deserialize;

/// A feed snapshot: the routes and trips to resolve.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    pub routes: Vec<RouteDto>,
    pub trips: Vec<TripDto>,
}

impl FeedDocument {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One row of `routes.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub route_id: String,
    pub agency_id: Option<String>,
    pub route_short_name: String,
    pub route_long_name: Option<String>,
    pub route_color: Option<String>,
}

/// One row of `trips.txt`, with its stop-times inlined.
#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    pub trip_id: String,
    pub route_id: String,
    pub trip_headsign: Option<String>,
    /// 0 or 1 when present
    pub direction_id: Option<u8>,
    #[serde(default)]
    pub stop_times: Vec<StopTimeDto>,
}

/// One row of `stop_times.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeDto {
    pub stop_id: String,
    pub stop_sequence: u32,
}
