//! Application constants for the METAR processor
//!
//! Physical constants for the pressure reduction, report grammar markers,
//! unit conversion factors and decoder defaults.

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical constants used by the pressure reduction
pub mod physics {
    /// Standard sea-level pressure (hPa)
    pub const STANDARD_SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;

    /// Standard sea-level temperature (K)
    pub const STANDARD_SEA_LEVEL_TEMPERATURE_K: f64 = 288.0;

    /// Lapse rate of the NACA standard atmosphere below the isothermal layer (K/m)
    pub const STANDARD_LAPSE_RATE_K_PER_M: f64 = 0.0065;

    /// Gas constant for dry air (J / (kg K))
    pub const DRY_AIR_GAS_CONSTANT: f64 = 287.047_490_977_184_57;

    /// Standard gravity (m / s^2)
    pub const STANDARD_GRAVITY: f64 = 9.80665;

    /// Offset between Celsius and Kelvin
    pub const CELSIUS_TO_KELVIN_OFFSET: f64 = 273.15;

    /// Altimeter/station pressure offset from the Smithsonian tables (hPa)
    pub const ALTIMETER_OFFSET_HPA: f64 = 0.3;
}

// =============================================================================
// Unit Conversions
// =============================================================================

/// Hectopascals per inch of mercury
pub const HPA_PER_INHG: f64 = 33.8639;

/// Metres per statute mile
pub const METERS_PER_STATUTE_MILE: f64 = 1609.344;

/// Knots per metre per second
pub const KNOTS_PER_MPS: f64 = 1.943_844;

/// Knots per kilometre per hour
pub const KNOTS_PER_KMH: f64 = 0.539_957;

/// Metric visibility value meaning "10 km or more"
pub const METRIC_VISIBILITY_UNLIMITED: u32 = 9999;

/// Visibility reported for CAVOK (10 km)
pub const CAVOK_VISIBILITY_M: f64 = 10_000.0;

// =============================================================================
// Report Grammar
// =============================================================================

/// Report type tokens that may prefix a report body
pub const REPORT_TYPE_METAR: &str = "METAR";
pub const REPORT_TYPE_SPECI: &str = "SPECI";

/// Tokens that terminate the decoded body (remarks and trend forecasts)
pub const BODY_TERMINATORS: &[&str] = &["RMK", "NOSIG", "BECMG", "TEMPO"];

/// Automated-station placeholder for present weather that was not observed
pub const WEATHER_NOT_OBSERVED: &str = "//";

/// Cover codes accepted in sky condition groups
pub mod cover_codes {
    pub const CLEAR_FAMILY: &[&str] = &["SKC", "NCD", "CLR", "NSC"];
    pub const FEW: &str = "FEW";
    pub const SCATTERED: &str = "SCT";
    pub const BROKEN: &str = "BKN";
    pub const OVERCAST: &str = "OVC";
    pub const VERTICAL_VISIBILITY: &str = "VV";
}

/// Okta values derived from the lowest sky layer
pub mod oktas {
    pub const CLEAR: u8 = 0;
    pub const FEW: u8 = 2;
    pub const SCATTERED: u8 = 4;
    pub const BROKEN: u8 = 6;
    pub const OVERCAST: u8 = 8;
}

/// Slot counts in an observation
pub const MAX_WEATHER_GROUPS: usize = 2;
pub const MAX_SKY_LAYERS: usize = 4;

/// Sky condition heights are reported in hundreds of feet
pub const SKY_HEIGHT_UNIT_FT: f64 = 100.0;

/// Highest valid wind direction (degrees)
pub const MAX_WIND_DIRECTION_DEG: u16 = 360;

// =============================================================================
// Decoder Defaults
// =============================================================================

/// Altimeter values above this are hundredths of inHg, otherwise hectopascals
pub const DEFAULT_ALTIMETER_HPA_THRESHOLD: f64 = 1100.0;

/// Decimal places kept in altimeter and pressure fields
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 2;

/// Upper bound accepted for display decimals
pub const MAX_DISPLAY_DECIMALS: u32 = 6;

/// Comment prefix in station table files
pub const STATION_FILE_COMMENT: char = '#';
