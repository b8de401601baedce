//! Altimeter setting to station and sea-level pressure.
//!
//! The reduction runs in two stages. The altimeter setting is first inverted
//! through the standard atmosphere to recover the pressure at the station
//! (Smithsonian Meteorological Tables, 1951, p. 269):
//!
//! ```text
//! p_station = (A^n - (p0^n * a * z) / T0)^(1/n) + 0.3      n = Rd * a / g
//! ```
//!
//! The station pressure is then carried down to sea level with the
//! hypsometric equation using the observed temperature (Wallace & Hobbs,
//! eq. 2.31):
//!
//! ```text
//! p_sea_level = p_station * exp(z / H)                      H = Rd * T / g
//! ```
//!
//! All arithmetic is `f64`. The unchecked functions are total over finite
//! inputs; [`try_sea_level_pressure`] additionally rejects non-physical input
//! and non-finite output.

use crate::constants::{HPA_PER_INHG, MAX_DISPLAY_DECIMALS, physics};
use crate::error::ReductionError;
use serde::{Deserialize, Serialize};

/// An altimeter setting in the unit it was reported in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AltimeterSetting {
    InchesOfMercury(f64),
    Hectopascals(f64),
}

impl AltimeterSetting {
    pub fn to_hectopascals(self) -> f64 {
        match self {
            AltimeterSetting::InchesOfMercury(inhg) => inhg_to_hpa(inhg),
            AltimeterSetting::Hectopascals(hpa) => hpa,
        }
    }

    pub fn to_inches_of_mercury(self) -> f64 {
        match self {
            AltimeterSetting::InchesOfMercury(inhg) => inhg,
            AltimeterSetting::Hectopascals(hpa) => hpa_to_inhg(hpa),
        }
    }

    fn raw_value(self) -> f64 {
        match self {
            AltimeterSetting::InchesOfMercury(v) | AltimeterSetting::Hectopascals(v) => v,
        }
    }
}

/// Both stages of a successful reduction, in hPa
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureReduction {
    pub station_pressure_hpa: f64,
    pub sea_level_pressure_hpa: f64,
}

pub fn inhg_to_hpa(inhg: f64) -> f64 {
    inhg * HPA_PER_INHG
}

pub fn hpa_to_inhg(hpa: f64) -> f64 {
    hpa / HPA_PER_INHG
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + physics::CELSIUS_TO_KELVIN_OFFSET
}

/// Standard-atmosphere exponent `n = Rd * a / g` (about 0.1903)
pub fn standard_atmosphere_exponent() -> f64 {
    physics::DRY_AIR_GAS_CONSTANT * physics::STANDARD_LAPSE_RATE_K_PER_M
        / physics::STANDARD_GRAVITY
}

/// Scale height `H = Rd * T / g` in metres for a temperature in Celsius
pub fn scale_height_m(temperature_c: f64) -> f64 {
    physics::DRY_AIR_GAS_CONSTANT * celsius_to_kelvin(temperature_c) / physics::STANDARD_GRAVITY
}

/// Station pressure (hPa) recovered from an altimeter setting at `elevation_m`
pub fn station_pressure(altimeter: AltimeterSetting, elevation_m: f64) -> f64 {
    let n = standard_atmosphere_exponent();
    let altimeter_hpa = altimeter.to_hectopascals();
    let p0 = physics::STANDARD_SEA_LEVEL_PRESSURE_HPA;

    let correction = p0.powf(n) * physics::STANDARD_LAPSE_RATE_K_PER_M * elevation_m
        / physics::STANDARD_SEA_LEVEL_TEMPERATURE_K;

    (altimeter_hpa.powf(n) - correction).powf(1.0 / n) + physics::ALTIMETER_OFFSET_HPA
}

/// Sea-level pressure (hPa) from an altimeter setting, station elevation and
/// station temperature in Celsius
pub fn sea_level_pressure(altimeter: AltimeterSetting, elevation_m: f64, temperature_c: f64) -> f64 {
    let p_station = station_pressure(altimeter, elevation_m);
    p_station * (elevation_m / scale_height_m(temperature_c)).exp()
}

/// Checked reduction returning both stages.
///
/// Rejects non-finite inputs and absolute temperatures at or below zero
/// before computing, and non-finite results after.
pub fn try_sea_level_pressure(
    altimeter: AltimeterSetting,
    elevation_m: f64,
    temperature_c: f64,
) -> Result<PressureReduction, ReductionError> {
    if !altimeter.raw_value().is_finite() {
        return Err(ReductionError::NonFiniteInput { name: "altimeter" });
    }
    if !elevation_m.is_finite() {
        return Err(ReductionError::NonFiniteInput { name: "elevation" });
    }
    if !temperature_c.is_finite() {
        return Err(ReductionError::NonFiniteInput {
            name: "temperature",
        });
    }

    let kelvin = celsius_to_kelvin(temperature_c);
    if kelvin <= 0.0 {
        return Err(ReductionError::NonPhysicalTemperature { kelvin });
    }

    let station_pressure_hpa = station_pressure(altimeter, elevation_m);
    if !station_pressure_hpa.is_finite() {
        return Err(ReductionError::NonFiniteResult { stage: "station" });
    }

    let sea_level_pressure_hpa =
        station_pressure_hpa * (elevation_m / scale_height_m(temperature_c)).exp();
    if !sea_level_pressure_hpa.is_finite() {
        return Err(ReductionError::NonFiniteResult { stage: "sea-level" });
    }

    Ok(PressureReduction {
        station_pressure_hpa,
        sea_level_pressure_hpa,
    })
}

/// Round to a fixed number of decimal places for display fields.
///
/// `places` is capped at `MAX_DISPLAY_DECIMALS` so the scale factor stays
/// finite.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_DISPLAY_DECIMALS) as i32);
    (value * factor).round() / factor
}
