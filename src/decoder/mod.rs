//! METAR report decoder
//!
//! Turns one report body into an [`Observation`]. Decoding never fails: every
//! group is parsed independently and a group that is missing or malformed
//! leaves its fields absent while the rest of the report still decodes.
//!
//! ## Architecture
//!
//! - [`field_parsers`] - shape checks and parsers for individual groups
//! - [`ReportDecoder`] - walks the report in group order and assembles the
//!   observation, including the derived cloud cover and pressure fields
//!
//! ## Usage
//!
//! ```rust
//! use metar_processor::{StationTable, decode};
//!
//! let stations = StationTable::new().with_station("KATL", 33.6301, -84.4418, 315.0);
//! let ob = decode(
//!     "KATL 102052Z 31008KT 10SM FEW013 SCT100 BKN150 BKN250 26/22 A2996",
//!     &stations,
//! );
//!
//! assert_eq!(ob.wind_direction_deg, Some(310));
//! assert_eq!(ob.altimeter_inhg, Some(29.96));
//! assert!(ob.sea_level_pressure_hpa.is_some());
//! ```

pub mod field_parsers;

#[cfg(test)]
mod tests;

use crate::config::DecoderConfig;
use crate::constants::{BODY_TERMINATORS, MAX_SKY_LAYERS, MAX_WEATHER_GROUPS};
use crate::models::{Observation, ReportModifier};
use crate::pressure::{round_to, try_sea_level_pressure};
use crate::station_directory::StationDirectory;
use field_parsers::{
    cloud_cover_oktas, is_altimeter_group, is_datetime_group, is_runway_visual_range,
    is_sky_group, is_temperature_group, is_unobserved_weather, is_vertical_visibility,
    is_weather_group, is_wind_group, parse_altimeter, parse_report_kind, parse_report_time,
    parse_sky_layer, parse_split_visibility, parse_station_id, parse_temperature,
    parse_visibility, parse_weather, parse_wind, parse_wind_variation,
};
use tracing::{debug, trace};

/// Decode a report with the default configuration
pub fn decode(report_text: &str, directory: &dyn StationDirectory) -> Observation {
    ReportDecoder::default().decode(report_text, directory)
}

/// Stateless METAR decoder; safe to share between threads
#[derive(Debug, Clone, Default)]
pub struct ReportDecoder {
    config: DecoderConfig,
}

impl ReportDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one report body.
    ///
    /// Groups are consumed in report order. The station directory is
    /// consulted once, and only when a station identifier was decoded.
    pub fn decode(&self, report_text: &str, directory: &dyn StationDirectory) -> Observation {
        let mut cursor = TokenCursor::new(report_text);
        let mut ob = Observation::default();
        trace!("Decoding report with {} body groups", cursor.len());

        ob.report_kind = cursor.next_map(parse_report_kind);

        ob.station_id = cursor.next_map(parse_station_id);
        match &ob.station_id {
            Some(station_id) => {
                ob.location = directory.lookup(station_id);
                if ob.location.is_none() {
                    debug!("Station {} not found in directory", station_id);
                }
            }
            None => debug!("Report has no station identifier: '{}'", report_text),
        }

        self.decode_timestamp(&mut cursor, &mut ob);
        ob.modifier = cursor.next_map(ReportModifier::from_token);

        self.decode_wind(&mut cursor, &mut ob);
        self.decode_visibility(&mut cursor, &mut ob);
        self.decode_weather(&mut cursor, &mut ob);
        self.decode_sky(&mut cursor, &mut ob);
        ob.cloud_cover_oktas = cloud_cover_oktas(ob.sky_layers[0].as_ref());

        self.decode_temperature(&mut cursor, &mut ob);
        self.decode_pressure(&mut cursor, &mut ob);

        ob
    }

    fn decode_timestamp(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        let Some(token) = cursor.seek(is_datetime_group) else {
            debug!("No date/time group");
            return;
        };
        let Some(time) = parse_report_time(token) else {
            debug!("Date/time group '{}' out of range", token);
            return;
        };

        ob.report_day = Some(time.day);
        ob.report_time_utc = Some(time.time_utc());

        if let Some(reference) = self.config.reference_month {
            ob.observed_at = time.resolve(reference.year, reference.month);
            if ob.observed_at.is_none() {
                debug!(
                    "Day {} does not exist in {}-{:02}",
                    time.day, reference.year, reference.month
                );
            }
        }
    }

    fn decode_wind(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        if let Some(token) = cursor.seek(is_wind_group) {
            match parse_wind(token) {
                Some(wind) => {
                    ob.wind_direction_deg = wind.direction_deg;
                    ob.wind_speed_kt = wind.speed_kt;
                    ob.wind_gust_kt = wind.gust_kt;
                    ob.wind_calm = wind.calm;
                }
                None => debug!("Wind group '{}' is malformed", token),
            }
        }

        if let Some((from, to)) = cursor.next_map(parse_wind_variation) {
            ob.wind_variable_from_deg = Some(from);
            ob.wind_variable_to_deg = Some(to);
        }
    }

    fn decode_visibility(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        let split = cursor
            .peek()
            .zip(cursor.peek_nth(1))
            .and_then(|(whole, fraction)| parse_split_visibility(whole, fraction));

        ob.visibility_sm = match split {
            Some(miles) => {
                cursor.advance(2);
                Some(miles)
            }
            None => cursor.next_map(parse_visibility),
        };

        while let Some(token) = cursor.next_if(is_runway_visual_range) {
            trace!("Skipping runway visual range group '{}'", token);
        }
    }

    fn decode_weather(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        let mut slot = 0;
        while let Some(token) =
            cursor.next_if(|token| is_weather_group(token) || is_unobserved_weather(token))
        {
            if is_unobserved_weather(token) {
                trace!("Weather not observed in slot {}", slot);
            } else if slot < MAX_WEATHER_GROUPS {
                let phenomenon = parse_weather(token);
                if phenomenon.code.is_none() {
                    debug!("Weather group '{}' has no known code", token);
                }
                ob.weather_phenomena[slot] = Some(phenomenon);
            } else {
                debug!("Dropping extra weather group '{}'", token);
            }
            slot += 1;
        }
    }

    fn decode_sky(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        let mut slot = 0;
        let mut vertical_visibility = false;

        while let Some(token) = cursor.next_if(is_sky_group) {
            if vertical_visibility {
                debug!("Ignoring sky group '{}' after vertical visibility", token);
                continue;
            }

            let layer = parse_sky_layer(token);
            if layer.is_none() {
                debug!("Sky group '{}' could not be decoded", token);
            }

            if is_vertical_visibility(token) {
                ob.sky_layers = Default::default();
                ob.sky_layers[0] = layer;
                vertical_visibility = true;
            } else if slot < MAX_SKY_LAYERS {
                ob.sky_layers[slot] = layer;
            } else {
                debug!("Dropping extra sky group '{}'", token);
            }
            slot += 1;
        }
    }

    fn decode_temperature(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        match cursor.seek(is_temperature_group).and_then(parse_temperature) {
            Some((temperature, dewpoint)) => {
                ob.temperature_c = temperature;
                ob.dewpoint_c = dewpoint;
            }
            None => debug!("No temperature/dewpoint group"),
        }
    }

    fn decode_pressure(&self, cursor: &mut TokenCursor<'_>, ob: &mut Observation) {
        let threshold = self.config.altimeter_hpa_threshold;
        let Some(setting) = cursor
            .seek(is_altimeter_group)
            .and_then(|token| parse_altimeter(token, threshold))
        else {
            debug!("No altimeter group");
            return;
        };

        let decimals = self.config.display_decimals;
        ob.altimeter_inhg = Some(round_to(setting.to_inches_of_mercury(), decimals));

        let (Some(elevation_m), Some(temperature_c)) = (ob.elevation_m(), ob.temperature_c) else {
            return;
        };

        match try_sea_level_pressure(setting, elevation_m, temperature_c) {
            Ok(reduction) => {
                ob.station_pressure_hpa = Some(round_to(reduction.station_pressure_hpa, decimals));
                ob.sea_level_pressure_hpa =
                    Some(round_to(reduction.sea_level_pressure_hpa, decimals));
            }
            Err(e) => debug!("Pressure reduction rejected: {}", e),
        }
    }
}

/// Forward-only cursor over the groups of a report body.
///
/// The body ends at the first remarks or trend marker; nothing after it is
/// visible to the decoder.
struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    position: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(report_text: &'a str) -> Self {
        let body = report_text.trim().trim_end_matches('=');
        let tokens = body
            .split_whitespace()
            .take_while(|token| !BODY_TERMINATORS.contains(token))
            .collect();
        Self {
            tokens,
            position: 0,
        }
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn peek(&self) -> Option<&'a str> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.position + offset).copied()
    }

    fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.tokens.len());
    }

    /// Consume the next token if it satisfies `predicate`
    fn next_if(&mut self, predicate: impl Fn(&str) -> bool) -> Option<&'a str> {
        let token = self.peek().filter(|token| predicate(token))?;
        self.advance(1);
        Some(token)
    }

    /// Consume the next token if `parse` accepts it
    fn next_map<T>(&mut self, parse: impl Fn(&'a str) -> Option<T>) -> Option<T> {
        let value = self.peek().and_then(parse)?;
        self.advance(1);
        Some(value)
    }

    /// Find the next token satisfying `predicate`, consuming it and every
    /// token before it. Nothing is consumed when no token matches.
    fn seek(&mut self, predicate: impl Fn(&str) -> bool) -> Option<&'a str> {
        let offset = self.tokens[self.position..]
            .iter()
            .position(|token| predicate(token))?;
        for skipped in &self.tokens[self.position..self.position + offset] {
            trace!("Skipping unrecognized group '{}'", skipped);
        }
        self.position += offset + 1;
        Some(self.tokens[self.position - 1])
    }
}
