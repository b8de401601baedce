//! Tests for the report decoder
//!
//! Field parsers are tested token by token; the decoder tests run complete
//! reports against a small in-memory station directory.

use crate::station_directory::StationTable;


/// Directory with the stations used across the decoder tests
pub fn sample_directory() -> StationTable {
    StationTable::new()
        .with_station("KATL", 33.6301, -84.4418, 315.0)
        .with_station("KBOS", 42.3606, -71.0097, 6.0)
        .with_station("KLAS", 36.0719, -115.1634, 664.0)
        .with_station("CYYT", 47.6186, -52.7519, 140.0)
}

/// Assert two floats agree to within `tolerance`
pub fn assert_close(actual: Option<f64>, expected: f64, tolerance: f64) {
    match actual {
        Some(value) => assert!(
            (value - expected).abs() < tolerance,
            "expected {} +/- {}, got {}",
            expected,
            tolerance,
            value
        ),
        None => panic!("expected {}, got None", expected),
    }
}
