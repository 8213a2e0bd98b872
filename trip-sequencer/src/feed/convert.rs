//! Conversion from feed DTOs to domain types.

use crate::domain::{FeedRoute, RawTrip, StopId, StopTime};

use super::types::{FeedDocument, RouteDto, TripDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A stop-time references an unusable stop id
    #[error("trip {trip_id} has invalid stop id {stop_id:?}")]
    InvalidStopId { trip_id: String, stop_id: String },

    /// GTFS direction ids are 0 or 1
    #[error("trip {trip_id} has invalid direction id {direction_id}")]
    InvalidDirectionId { trip_id: String, direction_id: u8 },
}

/// Convert a feed route. Every field is carried over as-is.
pub fn convert_route(dto: &RouteDto) -> FeedRoute {
    FeedRoute {
        id: dto.route_id.clone(),
        agency_id: dto.agency_id.clone(),
        short_name: dto.route_short_name.clone(),
        long_name: dto.route_long_name.clone(),
        color: dto.route_color.clone(),
    }
}

/// Convert a trip and its stop-times.
pub fn convert_trip(dto: &TripDto) -> Result<RawTrip, ConversionError> {
    let stop_times = dto
        .stop_times
        .iter()
        .map(|st| {
            StopId::new(st.stop_id.as_str())
                .map(|stop_id| StopTime::new(stop_id, st.stop_sequence))
                .map_err(|_| ConversionError::InvalidStopId {
                    trip_id: dto.trip_id.clone(),
                    stop_id: st.stop_id.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut trip = RawTrip::new(dto.trip_id.as_str(), dto.route_id.as_str(), stop_times);
    if let Some(headsign) = &dto.trip_headsign {
        trip = trip.with_headsign(headsign.as_str());
    }
    if let Some(direction_id) = dto.direction_id {
        if direction_id > 1 {
            return Err(ConversionError::InvalidDirectionId {
                trip_id: dto.trip_id.clone(),
                direction_id,
            });
        }
        trip = trip.with_direction_id(direction_id);
    }

    Ok(trip)
}

/// Convert a whole snapshot. The first invalid trip fails the conversion.
pub fn convert_feed(
    doc: &FeedDocument,
) -> Result<(Vec<FeedRoute>, Vec<RawTrip>), ConversionError> {
    let routes = doc.routes.iter().map(convert_route).collect();
    let trips = doc
        .trips
        .iter()
        .map(convert_trip)
        .collect::<Result<_, _>>()?;
    Ok((routes, trips))
}
