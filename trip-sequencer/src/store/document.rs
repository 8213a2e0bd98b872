//! JSON form of the sequence store.
//!
//! Lets an agency override or extend its compiled-in tables without a
//! rebuild. A document looks like:
//!
//! ```json
//! { "routes": [ { "route_id": 2, "directions": [
//!     { "direction": "EAST", "headsign": "Highlands",
//!       "stops": ["170545", {"stop": "170427", "role": "duplicate"},
//!                 {"stops": ["170524", "170525"], "role": "alternate"}, "170474"] },
//!     { "direction": "WEST", "headsign": "Downtown", "stops": ["170474", "170545"] }
//! ] } ] }
//! ```
//!
//! Plain strings are mandatory stops.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ConfigurationGap, DirectionKind, RouteId, StopId};

use super::sequence::{CanonicalSequence, Direction, RouteSpec, SequenceEntry, StopRole};
use super::{SequenceStore, SequenceStoreBuilder};

/// Errors loading a store document from disk.
#[derive(Debug, thiserror::Error)]
pub enum StoreLoadError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The file is not a valid document
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document describes an unusable store
    #[error(transparent)]
    Config(#[from] ConfigurationGap),
}

/// Top-level store document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub routes: Vec<RouteDocument>,
}

/// A route and its two directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDocument {
    pub route_id: u32,
    pub directions: Vec<DirectionDocument>,
}

/// One direction of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionDocument {
    /// `NORTH`, `SOUTH`, `EAST` or `WEST`
    pub direction: String,
    pub headsign: String,
    pub stops: Vec<EntryDocument>,
}

/// A sequence entry: either a bare stop id or an annotated entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryDocument {
    Stop(String),
    Annotated(AnnotatedEntry),
}

/// A sequence entry with an explicit role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stops: Vec<String>,
    #[serde(default)]
    pub role: RoleDocument,
}

/// Serialized form of [`StopRole`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleDocument {
    #[default]
    Mandatory,
    Alternate,
    Duplicate,
}

impl StoreDocument {
    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Describe an existing store, routes in ascending order.
    pub fn from_store(store: &SequenceStore) -> Self {
        let routes = store
            .route_ids()
            .into_iter()
            .filter_map(|id| store.lookup(id))
            .map(|spec| RouteDocument {
                route_id: spec.route_id().get(),
                directions: spec.directions().iter().map(describe_direction).collect(),
            })
            .collect();

        Self { routes }
    }

    /// Compile the document into a store.
    pub fn into_store(self) -> Result<SequenceStore, ConfigurationGap> {
        self.routes
            .into_iter()
            .try_fold(SequenceStoreBuilder::new(), |builder, route| {
                Ok::<_, ConfigurationGap>(builder.route(route.compile()?))
            })?
            .build()
    }
}

impl SequenceStore {
    /// Load a store from a JSON document on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, StoreLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(StoreDocument::from_json(&json)?.into_store()?)
    }
}

impl RouteDocument {
    fn compile(self) -> Result<RouteSpec, ConfigurationGap> {
        let route = RouteId(self.route_id);
        let count = self.directions.len();
        let [first, second]: [DirectionDocument; 2] =
            self.directions.try_into().map_err(|_| {
                ConfigurationGap::InvalidDocument(format!(
                    "route {route} has {count} directions, expected 2"
                ))
            })?;

        RouteSpec::new(route, first.compile(route)?, second.compile(route)?)
    }
}

impl DirectionDocument {
    fn compile(self, route: RouteId) -> Result<Direction, ConfigurationGap> {
        let invalid =
            |msg: String| ConfigurationGap::InvalidDocument(format!("route {route}: {msg}"));

        let kind = DirectionKind::parse(&self.direction).map_err(|e| invalid(e.to_string()))?;
        let stop = |s: String| StopId::new(s).map_err(|e| invalid(format!("{kind}: {e}")));

        let entries = self
            .stops
            .into_iter()
            .map(|entry| match entry {
                EntryDocument::Stop(s) => Ok(SequenceEntry::mandatory(stop(s)?)),
                EntryDocument::Annotated(annotated) => {
                    let mut ids: Vec<String> = annotated.stop.into_iter().collect();
                    ids.extend(annotated.stops);

                    match annotated.role {
                        RoleDocument::Alternate => Ok(SequenceEntry::alternate(
                            ids.into_iter().map(&stop).collect::<Result<_, _>>()?,
                        )),
                        role => {
                            let [id]: [String; 1] = ids.try_into().map_err(|_| {
                                invalid(format!("{kind}: {role:?} entry needs exactly one stop"))
                            })?;
                            let id = stop(id)?;
                            Ok(match role {
                                RoleDocument::Duplicate => SequenceEntry::duplicate(id),
                                _ => SequenceEntry::mandatory(id),
                            })
                        }
                    }
                }
            })
            .collect::<Result<Vec<_>, ConfigurationGap>>()?;

        Ok(Direction::new(kind, self.headsign, CanonicalSequence::new(entries)))
    }
}

fn describe_direction(direction: &Direction) -> DirectionDocument {
    let stops = direction
        .sequence
        .entries()
        .iter()
        .map(|entry| {
            let mut ids: Vec<String> = entry.stops().iter().map(|s| s.to_string()).collect();
            match entry.role() {
                StopRole::Mandatory if ids.len() == 1 => EntryDocument::Stop(ids.remove(0)),
                StopRole::Duplicate if ids.len() == 1 => EntryDocument::Annotated(AnnotatedEntry {
                    stop: Some(ids.remove(0)),
                    stops: Vec::new(),
                    role: RoleDocument::Duplicate,
                }),
                role => EntryDocument::Annotated(AnnotatedEntry {
                    stop: None,
                    stops: ids,
                    role: match role {
                        StopRole::Mandatory => RoleDocument::Mandatory,
                        StopRole::Alternate => RoleDocument::Alternate,
                        StopRole::Duplicate => RoleDocument::Duplicate,
                    },
                }),
            }
        })
        .collect();

    DirectionDocument {
        direction: direction.kind.as_str().to_string(),
        headsign: direction.headsign.clone(),
        stops,
    }
}
