//! Location registry
//!
//! Holds the most recently observed [`Location`] snapshot for every internal
//! id. Updates are unconditional overwrites (last write wins); there is no
//! merging of partial snapshots and no history.
//!
//! The registry is a plain value. The batch driver threads it through each
//! processed date and persists it once at the end of a run.

use crate::models::Location;
use std::collections::BTreeMap;

pub mod persistence;

#[cfg(test)]
pub mod tests;

/// Mapping from internal id to the latest location snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationRegistry {
    /// Ordered by internal id so persistence is deterministic
    pub(crate) locations: BTreeMap<i64, Location>,
}

impl LocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot, replacing whatever was held for `id`
    pub fn upsert(&mut self, id: i64, location: Location) {
        self.locations.insert(id, location);
    }

    /// Get the current snapshot for an internal id
    pub fn get(&self, id: i64) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.locations.contains_key(&id)
    }

    /// Number of locations held
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate in ascending internal id order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Location)> {
        self.locations.iter().map(|(&id, location)| (id, location))
    }
}

impl FromIterator<(i64, Location)> for LocationRegistry {
    fn from_iter<I: IntoIterator<Item = (i64, Location)>>(iter: I) -> Self {
        Self {
            locations: iter.into_iter().collect(),
        }
    }
}
