//! Shared test fixtures for station directory tests

use std::io::Write;
use tempfile::NamedTempFile;

pub mod table_tests;

/// Write a station file with the given body and return its handle
pub fn create_station_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

pub const SAMPLE_STATIONS: &str = "\
# id,latitude,longitude,elevation_m
KATL,33.6301,-84.4418,315

KBOS,42.3606,-71.0097,6
klas,36.0719,-115.1634,664
CYYT, 47.6186, -52.7519, 140
";
