//! Route metadata derived from feed routes and agency tables.

use crate::domain::{Color, ConfigurationGap, FeedRoute, RouteId};

use super::AgencyProfile;

/// Display data for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMetadata {
    pub route_id: RouteId,
    /// GTFS `route_id` the metadata was derived from
    pub feed_id: String,
    pub short_name: String,
    /// Long name when the feed has one, else the short name
    pub display_name: String,
    pub color: Color,
}

/// Derive route metadata for a feed route.
///
/// The route id is the numeric short name. A non-empty feed color wins over
/// the agency's table; a route colored by neither is a configuration gap.
pub fn describe_route(
    profile: &AgencyProfile,
    route: &FeedRoute,
) -> Result<RouteMetadata, ConfigurationGap> {
    let route_id = RouteId::from_short_name(&route.short_name)
        .map_err(|_| ConfigurationGap::InvalidShortName(route.short_name.clone()))?;

    let color = match route.feed_color() {
        Some(value) => Color::parse(value).map_err(|_| ConfigurationGap::InvalidColor {
            route: route_id,
            value: value.to_string(),
        })?,
        None => profile
            .route_color(route_id)
            .ok_or(ConfigurationGap::MissingRouteColor(route_id))?,
    };

    let short_name = route.short_name.trim().to_string();
    let display_name = route
        .long_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| short_name.clone(), str::to_string);

    Ok(RouteMetadata {
        route_id,
        feed_id: route.id.clone(),
        short_name,
        display_name,
        color,
    })
}
