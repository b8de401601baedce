//! Station metadata lookup
//!
//! The decoder only needs one capability from station metadata: map a station
//! identifier to its position and elevation. [`StationDirectory`] is that
//! seam; [`StationTable`] is an in-memory implementation that can be built
//! programmatically or loaded from a plain-text station file.

use crate::models::StationInfo;
use std::collections::HashMap;

pub mod loader;

#[cfg(test)]
pub mod tests;

pub use loader::LoadStats;

/// Lookup of station metadata by identifier.
///
/// A miss is a normal outcome: the decoder leaves `location` absent and
/// carries on.
pub trait StationDirectory {
    fn lookup(&self, station_id: &str) -> Option<StationInfo>;
}

impl<T: StationDirectory + ?Sized> StationDirectory for &T {
    fn lookup(&self, station_id: &str) -> Option<StationInfo> {
        (**self).lookup(station_id)
    }
}

/// In-memory station directory with O(1) lookups.
///
/// Identifiers are trimmed and uppercased on insert and lookup, so
/// `" katl"` and `"KATL"` refer to the same station.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    stations: HashMap<String, StationInfo>,
}

impl StationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a station, returning the previous entry
    pub fn insert(&mut self, station_id: &str, info: StationInfo) -> Option<StationInfo> {
        self.stations.insert(normalize_station_id(station_id), info)
    }

    /// Add a station, builder style
    pub fn with_station(
        mut self,
        station_id: &str,
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Self {
        self.insert(
            station_id,
            StationInfo {
                latitude_deg,
                longitude_deg,
                elevation_m,
            },
        );
        self
    }

    pub fn contains_station(&self, station_id: &str) -> bool {
        self.stations
            .contains_key(&normalize_station_id(station_id))
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Iterate over (identifier, metadata) pairs in arbitrary order
    pub fn iter_stations(&self) -> impl Iterator<Item = (&str, &StationInfo)> {
        self.stations.iter().map(|(id, info)| (id.as_str(), info))
    }
}

impl StationDirectory for StationTable {
    fn lookup(&self, station_id: &str) -> Option<StationInfo> {
        self.stations.get(&normalize_station_id(station_id)).copied()
    }
}

impl FromIterator<(String, StationInfo)> for StationTable {
    fn from_iter<I: IntoIterator<Item = (String, StationInfo)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (id, info) in iter {
            table.insert(&id, info);
        }
        table
    }
}

/// Key normalization shared by insert and lookup
pub fn normalize_station_id(station_id: &str) -> String {
    station_id.trim().to_ascii_uppercase()
}
