//! Per-agency configuration.
//!
//! An agency profile bundles what the engine needs to know about one
//! publisher's feed: which routes belong to it, how to color them, and the
//! canonical sequences of the routes whose trips must be split.

mod cranbrook;
mod metadata;

use std::collections::HashMap;

use crate::domain::{Color, ConfigurationGap, RouteId};
use crate::store::{RouteRecord, SequenceStore};

pub use metadata::{RouteMetadata, describe_route};

/// GTFS `route_type` of the agency's services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
}

impl RouteType {
    /// The numeric code used in `routes.txt`.
    pub fn gtfs_code(self) -> u16 {
        match self {
            RouteType::Tram => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
            RouteType::Ferry => 4,
        }
    }
}

/// Literal agency data, as authored.
#[derive(Debug, Clone, Copy)]
pub struct AgencyTables {
    pub name: &'static str,
    /// Only routes of this GTFS `agency_id` are processed
    pub agency_id: &'static str,
    pub agency_color: &'static str,
    pub route_type: RouteType,
    /// Colors for routes the feed leaves uncolored, by route short name
    pub route_colors: &'static [(u32, &'static str)],
    /// Canonical sequences of the routes whose trips are split
    pub routes: &'static [RouteRecord],
}

/// Validated configuration of one agency.
#[derive(Debug, Clone)]
pub struct AgencyProfile {
    name: &'static str,
    agency_id: &'static str,
    agency_color: Color,
    route_type: RouteType,
    route_colors: HashMap<RouteId, Color>,
    routes: &'static [RouteRecord],
}

impl AgencyProfile {
    /// Validate literal tables into a profile.
    pub fn from_tables(tables: &AgencyTables) -> Result<Self, ConfigurationGap> {
        let agency_color = Color::parse(tables.agency_color)
            .map_err(|_| ConfigurationGap::InvalidAgencyColor(tables.agency_color.to_string()))?;

        let route_colors: HashMap<RouteId, Color> = tables
            .route_colors
            .iter()
            .map(|&(route, value)| {
                let route = RouteId(route);
                Color::parse(value)
                    .map(|color| (route, color))
                    .map_err(|_| ConfigurationGap::InvalidColor {
                        route,
                        value: value.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            name: tables.name,
            agency_id: tables.agency_id,
            agency_color,
            route_type: tables.route_type,
            route_colors,
            routes: tables.routes,
        })
    }

    /// Cranbrook Transit System, BC Transit agency 27.
    pub fn cranbrook() -> Result<Self, ConfigurationGap> {
        Self::from_tables(&cranbrook::TABLES)
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn agency_id(&self) -> &str {
        self.agency_id
    }

    pub fn agency_color(&self) -> Color {
        self.agency_color
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    /// Check if a feed route with this `agency_id` belongs to the agency.
    pub fn includes_agency(&self, agency_id: Option<&str>) -> bool {
        agency_id == Some(self.agency_id)
    }

    /// Configured color of a route, if any.
    pub fn route_color(&self, route_id: RouteId) -> Option<Color> {
        self.route_colors.get(&route_id).copied()
    }

    /// Check if the agency has canonical sequences for this route.
    pub fn expects_split(&self, route_id: RouteId) -> bool {
        self.routes.iter().any(|r| r.route_id() == route_id)
    }

    /// Compile the agency's canonical sequences.
    pub fn sequence_store(&self) -> Result<SequenceStore, ConfigurationGap> {
        SequenceStore::from_records(self.routes)
    }
}
