//! Station table file loading
//!
//! Station files are plain text with one station per line:
//!
//! ```text
//! # id,latitude,longitude,elevation_m
//! KATL,33.6301,-84.4418,315
//! KBOS,42.3606,-71.0097,6
//! ```
//!
//! Blank lines and `#` comments are ignored. Malformed lines are skipped with
//! a warning unless strict loading is requested.

use super::StationTable;
use crate::constants::STATION_FILE_COMMENT;
use crate::error::{MetarError, Result};
use crate::models::StationInfo;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics from loading a station file
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub lines_read: usize,
    pub stations_loaded: usize,
    pub lines_skipped: usize,
    pub duplicate_ids: usize,
    pub load_duration: Duration,
}

impl StationTable {
    /// Load a station table from a file.
    ///
    /// With `strict` set, the first malformed line aborts loading with
    /// [`MetarError::StationFile`]; otherwise it is logged and skipped.
    pub fn load_from_file(path: &Path, strict: bool) -> Result<(Self, LoadStats)> {
        let start = Instant::now();
        let file = File::open(path).map_err(|e| MetarError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut table = StationTable::new();
        let mut stats = LoadStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| MetarError::io(path, e))?;
            let line_number = index + 1;
            stats.lines_read = line_number;

            match parse_station_line(&line) {
                Ok(Some((station_id, info))) => {
                    if table.insert(&station_id, info).is_some() {
                        debug!("Station {} redefined at line {}", station_id, line_number);
                        stats.duplicate_ids += 1;
                    } else {
                        stats.stations_loaded += 1;
                    }
                }
                Ok(None) => {}
                Err(reason) if strict => {
                    return Err(MetarError::StationFile {
                        path: path.to_path_buf(),
                        line: line_number,
                        reason,
                    });
                }
                Err(reason) => {
                    warn!(
                        "Skipping station line {} in {}: {}",
                        line_number,
                        path.display(),
                        reason
                    );
                    stats.lines_skipped += 1;
                }
            }
        }

        stats.load_duration = start.elapsed();
        info!(
            "Loaded {} stations from {} ({} lines skipped)",
            stats.stations_loaded,
            path.display(),
            stats.lines_skipped
        );

        Ok((table, stats))
    }
}

/// Parse one station file line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_station_line(line: &str) -> std::result::Result<Option<(String, StationInfo)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(STATION_FILE_COMMENT) {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected 4 fields, found {}", parts.len()));
    }

    let station_id = parts[0];
    if station_id.is_empty() || !station_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("invalid station id '{}'", station_id));
    }

    let latitude_deg = parse_coordinate(parts[1], "latitude", 90.0)?;
    let longitude_deg = parse_coordinate(parts[2], "longitude", 180.0)?;
    let elevation_m = parts[3]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid elevation '{}'", parts[3]))?;

    Ok(Some((
        station_id.to_ascii_uppercase(),
        StationInfo {
            latitude_deg,
            longitude_deg,
            elevation_m,
        },
    )))
}

fn parse_coordinate(value: &str, name: &str, limit: f64) -> std::result::Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| format!("invalid {} '{}'", name, value))
}
