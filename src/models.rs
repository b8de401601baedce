//! Core data structures for decoded METAR observations.
//!
//! Every field that a report may omit or garble is an `Option`; absence is
//! never encoded as a sentinel number.

use crate::constants::{MAX_SKY_LAYERS, MAX_WEATHER_GROUPS, cover_codes, oktas};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Station metadata supplied by a [`StationDirectory`](crate::StationDirectory)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
}

/// Report type named by the optional leading token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Metar,
    Speci,
}

/// Report modifier following the timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportModifier {
    /// Fully automated observation
    Auto,
    /// Corrected report
    Corrected,
}

impl ReportModifier {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AUTO" => Some(Self::Auto),
            "COR" | "CCA" | "CCB" | "CCC" => Some(Self::Corrected),
            _ => None,
        }
    }
}

/// Sky cover amount of a single layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverKind {
    Clear,
    Few,
    Scattered,
    Broken,
    Overcast,
    VerticalVisibility,
}

impl CoverKind {
    /// Map a sky condition cover code (`FEW`, `OVC`, `VV`, ...) to its kind
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            c if cover_codes::CLEAR_FAMILY.contains(&c) => Some(Self::Clear),
            cover_codes::FEW => Some(Self::Few),
            cover_codes::SCATTERED => Some(Self::Scattered),
            cover_codes::BROKEN => Some(Self::Broken),
            cover_codes::OVERCAST => Some(Self::Overcast),
            cover_codes::VERTICAL_VISIBILITY => Some(Self::VerticalVisibility),
            _ => None,
        }
    }

    /// Eighths of sky covered
    pub fn oktas(&self) -> u8 {
        match self {
            CoverKind::Clear => oktas::CLEAR,
            CoverKind::Few => oktas::FEW,
            CoverKind::Scattered => oktas::SCATTERED,
            CoverKind::Broken => oktas::BROKEN,
            CoverKind::Overcast | CoverKind::VerticalVisibility => oktas::OVERCAST,
        }
    }
}

/// One decoded sky condition group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyLayer {
    pub cover: CoverKind,
    /// Layer base (or vertical visibility) in feet; absent for clear-sky groups
    pub height_ft: Option<f64>,
}

/// A present-weather group as reported, with its WMO code when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    pub token: String,
    pub code: Option<u8>,
}

/// One decoded METAR report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub report_kind: Option<ReportKind>,
    pub station_id: Option<String>,
    pub location: Option<StationInfo>,

    pub report_day: Option<u8>,
    /// Observation time as HHMM
    pub report_time_utc: Option<u16>,
    /// Full timestamp, only when a reference year and month were configured
    pub observed_at: Option<DateTime<Utc>>,
    pub modifier: Option<ReportModifier>,

    pub wind_direction_deg: Option<u16>,
    pub wind_speed_kt: Option<f64>,
    pub wind_gust_kt: Option<f64>,
    pub wind_calm: bool,
    pub wind_variable_from_deg: Option<u16>,
    pub wind_variable_to_deg: Option<u16>,

    pub visibility_sm: Option<f64>,

    pub weather_phenomena: [Option<WeatherPhenomenon>; MAX_WEATHER_GROUPS],
    pub sky_layers: [Option<SkyLayer>; MAX_SKY_LAYERS],
    pub cloud_cover_oktas: Option<u8>,

    pub temperature_c: Option<f64>,
    pub dewpoint_c: Option<f64>,

    pub altimeter_inhg: Option<f64>,
    pub station_pressure_hpa: Option<f64>,
    pub sea_level_pressure_hpa: Option<f64>,
}

impl Observation {
    /// Station elevation from the directory lookup, if any
    pub fn elevation_m(&self) -> Option<f64> {
        self.location.map(|info| info.elevation_m)
    }

    /// Decoded weather groups, skipping empty slots
    pub fn weather(&self) -> impl Iterator<Item = &WeatherPhenomenon> {
        self.weather_phenomena.iter().flatten()
    }

    /// Populated sky layers in report order
    pub fn layers(&self) -> impl Iterator<Item = &SkyLayer> {
        self.sky_layers.iter().flatten()
    }
}
