//! METAR Processor Library
//!
//! A Rust library for decoding METAR aviation weather reports into typed
//! observations and reducing the reported altimeter setting to station and
//! sea-level pressure.
//!
//! This library provides tools for:
//! - Decoding a report body group by group, where a malformed group only
//!   leaves its own fields absent
//! - Mapping present-weather groups to WMO present-weather codes
//! - Looking up station elevation through a pluggable station directory
//! - Reducing altimeter settings to sea-level pressure
//!
//! ```rust
//! use metar_processor::{StationTable, decode};
//!
//! let stations = StationTable::new().with_station("KLAS", 36.0719, -115.1634, 664.0);
//! let ob = decode("KLAS 102156Z VRB03KT 10SM BKN250 34/M06 A3007", &stations);
//!
//! assert_eq!(ob.wind_direction_deg, None);
//! assert_eq!(ob.wind_speed_kt, Some(3.0));
//! assert_eq!(ob.dewpoint_c, Some(-6.0));
//! assert_eq!(ob.sea_level_pressure_hpa, Some(1013.09));
//! ```

pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod pressure;
pub mod station_directory;
pub mod weather_codes;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{DecoderConfig, ReferenceMonth};
pub use decoder::{ReportDecoder, decode};
pub use error::{MetarError, ReductionError, Result};
pub use models::{
    CoverKind, Observation, ReportKind, ReportModifier, SkyLayer, StationInfo, WeatherPhenomenon,
};
pub use pressure::{
    AltimeterSetting, PressureReduction, sea_level_pressure, station_pressure,
    try_sea_level_pressure,
};
pub use station_directory::{StationDirectory, StationTable};
