//! Tests for in-memory station lookups

use super::super::{StationDirectory, StationTable, normalize_station_id};
use crate::models::StationInfo;

#[test]
fn test_lookup_normalizes_identifiers() {
    let table = StationTable::new().with_station("katl ", 33.6301, -84.4418, 315.0);

    let info = table.lookup("KATL").unwrap();
    assert_eq!(info.elevation_m, 315.0);
    assert_eq!(table.lookup(" katl"), Some(info));
    assert!(table.contains_station("Katl"));
}

#[test]
fn test_lookup_miss_is_none() {
    let table = StationTable::new().with_station("KATL", 33.6301, -84.4418, 315.0);

    assert_eq!(table.lookup("KJFK"), None);
    assert_eq!(table.lookup(""), None);
}

#[test]
fn test_insert_replaces_existing_station() {
    let mut table = StationTable::new();
    let first = StationInfo {
        latitude_deg: 1.0,
        longitude_deg: 2.0,
        elevation_m: 3.0,
    };
    let second = StationInfo {
        latitude_deg: 4.0,
        longitude_deg: 5.0,
        elevation_m: 6.0,
    };

    assert_eq!(table.insert("KXYZ", first), None);
    assert_eq!(table.insert("kxyz", second), Some(first));
    assert_eq!(table.station_count(), 1);
    assert_eq!(table.lookup("KXYZ"), Some(second));
}

#[test]
fn test_table_from_iterator() {
    let table: StationTable = vec![
        (
            "kbos".to_string(),
            StationInfo {
                latitude_deg: 42.3606,
                longitude_deg: -71.0097,
                elevation_m: 6.0,
            },
        ),
        (
            "KLAS".to_string(),
            StationInfo {
                latitude_deg: 36.0719,
                longitude_deg: -115.1634,
                elevation_m: 664.0,
            },
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(table.station_count(), 2);
    assert!(table.lookup("KBOS").is_some());
    let mut ids: Vec<&str> = table.iter_stations().map(|(id, _)| id).collect();
    ids.sort();
    assert_eq!(ids, vec!["KBOS", "KLAS"]);
}

#[test]
fn test_directory_by_reference() {
    fn elevation_of(directory: &dyn StationDirectory, id: &str) -> Option<f64> {
        directory.lookup(id).map(|info| info.elevation_m)
    }

    let table = StationTable::new().with_station("CYYT", 47.6186, -52.7519, 140.0);
    let by_ref = &table;

    assert_eq!(elevation_of(&by_ref, "CYYT"), Some(140.0));
    assert!(StationTable::new().is_empty());
}

#[test]
fn test_normalize_station_id() {
    assert_eq!(normalize_station_id("  kjfk\t"), "KJFK");
    assert_eq!(normalize_station_id("EGLL"), "EGLL");
}
