//! Canonical sequence store.
//!
//! Holds, per route, one ordered reference stop list per logical direction.
//! The store is built once at startup, from literal agency records or a
//! JSON document, and is read-only afterwards. Looking up a route that is
//! not in the store is not an error: it means the route keeps the feed's
//! own single-direction handling.

mod document;
mod record;
mod sequence;

use std::collections::HashMap;

use crate::domain::{ConfigurationGap, RouteId};

pub use document::{
    AnnotatedEntry, DirectionDocument, EntryDocument, RoleDocument, RouteDocument, StoreDocument,
    StoreLoadError,
};
pub use record::{DirectionRecord, EntryRecord, RouteRecord};
pub use sequence::{CanonicalSequence, Direction, RouteSpec, SequenceEntry, StopRole};

/// Read-only lookup from route id to its canonical description.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    routes: HashMap<RouteId, RouteSpec>,
}

impl SequenceStore {
    /// Create an empty store: every route keeps default handling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from literal route records.
    pub fn from_records(records: &[RouteRecord]) -> Result<Self, ConfigurationGap> {
        records
            .iter()
            .fold(SequenceStoreBuilder::new(), |builder, record| {
                builder.record(record)
            })
            .build()
    }

    /// Get the canonical description of a route, if it has one.
    pub fn lookup(&self, route_id: RouteId) -> Option<&RouteSpec> {
        self.routes.get(&route_id)
    }

    /// Check if a route has canonical sequences.
    pub fn contains(&self, route_id: RouteId) -> bool {
        self.routes.contains_key(&route_id)
    }

    /// All routes in the store, in ascending order.
    pub fn route_ids(&self) -> Vec<RouteId> {
        let mut ids: Vec<_> = self.routes.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no route has canonical sequences.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder for a [`SequenceStore`].
///
/// Keeps the first configuration error and reports it from [`build`],
/// so a whole table can be chained without checking every step.
///
/// [`build`]: SequenceStoreBuilder::build
#[derive(Debug, Default)]
pub struct SequenceStoreBuilder {
    inner: SequenceStore,
    error: Option<ConfigurationGap>,
}

impl SequenceStoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compiled route.
    pub fn route(mut self, spec: RouteSpec) -> Self {
        if self.error.is_some() {
            return self;
        }
        let route_id = spec.route_id();
        if self.inner.routes.insert(route_id, spec).is_some() {
            self.error = Some(ConfigurationGap::DuplicateRoute(route_id));
        }
        self
    }

    /// Compile and add a literal route record.
    pub fn record(self, record: &RouteRecord) -> Self {
        match record.to_spec() {
            Ok(spec) => self.route(spec),
            Err(e) => self.fail(e),
        }
    }

    fn fail(mut self, error: ConfigurationGap) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Build the store, or report the first configuration error.
    pub fn build(self) -> Result<SequenceStore, ConfigurationGap> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.inner),
        }
    }
}
