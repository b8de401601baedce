//! Field parsing utilities for METAR report groups
//!
//! Each report group has a shape check (`is_*_group`) used by the decoder to
//! decide whether a token belongs to that group, and a parser that turns a
//! token of that shape into a typed value. Parsers return `None` for values
//! that have the right shape but are out of range or unreadable.

use crate::constants::{
    CAVOK_VISIBILITY_M, KNOTS_PER_KMH, KNOTS_PER_MPS, MAX_WIND_DIRECTION_DEG,
    METERS_PER_STATUTE_MILE, METRIC_VISIBILITY_UNLIMITED, REPORT_TYPE_METAR, REPORT_TYPE_SPECI,
    SKY_HEIGHT_UNIT_FT, WEATHER_NOT_OBSERVED, cover_codes,
};
use crate::models::{CoverKind, ReportKind, SkyLayer, WeatherPhenomenon};
use crate::pressure::AltimeterSetting;
use crate::weather_codes;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DATETIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})Z$").expect("datetime pattern is valid"));

static WIND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<direction>\d{3}|VRB|///)(?P<speed>\d{2,3}|//)(?:G(?P<gust>\d{2,3}))?(?P<unit>KT|MPS|KMH)$",
    )
    .expect("wind pattern is valid")
});

static WIND_VARIATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3})V(\d{3})$").expect("wind variation pattern is valid"));

static VISIBILITY_MILES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[MP]?(?:(?P<whole>\d{1,2})|(?P<num>\d)/(?P<den>\d{1,2}))SM$")
        .expect("visibility pattern is valid")
});

static VISIBILITY_METRIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<metres>\d{4})(?:NDV)?$").expect("metric visibility pattern is valid")
});

static RUNWAY_VISUAL_RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^R\d{2}[LCR]?/\S+$").expect("RVR pattern is valid"));

static SKY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<cover>[A-Z]{2,3}|///)(?P<height>[0-9/]{3})(?:CB|TCU|///)?$")
        .expect("sky pattern is valid")
});

static SKY_GROUP_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z]{2,3}|///)[0-9/][0-9A-Z/]*$").expect("sky group shape is valid")
});

static TEMPERATURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<temperature>M?\d{2}|MM|//)/(?P<dewpoint>M?\d{2}|MM|//)?$")
        .expect("temperature pattern is valid")
});

static ALTIMETER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[AQ](?P<value>\d{4})$").expect("altimeter pattern is valid"));

// =============================================================================
// Report header
// =============================================================================

pub fn parse_report_kind(token: &str) -> Option<ReportKind> {
    match token {
        REPORT_TYPE_METAR => Some(ReportKind::Metar),
        REPORT_TYPE_SPECI => Some(ReportKind::Speci),
        _ => None,
    }
}

/// Station identifiers are 3-4 ASCII alphanumerics, stored uppercase
pub fn parse_station_id(token: &str) -> Option<String> {
    let trimmed = token.trim();
    let valid = (3..=4).contains(&trimmed.len())
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| trimmed.to_ascii_uppercase())
}

/// Day of month and time of a `DDHHMMZ` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl ReportTime {
    /// Time of day as HHMM
    pub fn time_utc(&self) -> u16 {
        u16::from(self.hour) * 100 + u16::from(self.minute)
    }

    /// Full timestamp in the given year and month, if that date exists
    pub fn resolve(&self, year: i32, month: u32) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(year, month, u32::from(self.day))?
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .map(|naive| naive.and_utc())
    }
}

pub fn is_datetime_group(token: &str) -> bool {
    DATETIME_PATTERN.is_match(token)
}

pub fn parse_report_time(token: &str) -> Option<ReportTime> {
    let caps = DATETIME_PATTERN.captures(token)?;
    let day: u8 = caps[1].parse().ok()?;
    let hour: u8 = caps[2].parse().ok()?;
    let minute: u8 = caps[3].parse().ok()?;

    if !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return None;
    }

    Some(ReportTime { day, hour, minute })
}

// =============================================================================
// Wind
// =============================================================================

/// Decoded surface wind group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wind {
    pub direction_deg: Option<u16>,
    pub speed_kt: Option<f64>,
    pub gust_kt: Option<f64>,
    pub calm: bool,
}

pub fn is_wind_group(token: &str) -> bool {
    WIND_PATTERN.is_match(token)
}

/// Parse a `dddss[Ggg]KT` group.
///
/// `VRB` leaves the direction absent, slashes leave the corresponding value
/// absent and `00000KT` is calm (no direction, no speed). A direction above
/// 360 makes the whole group malformed.
pub fn parse_wind(token: &str) -> Option<Wind> {
    let caps = WIND_PATTERN.captures(token)?;

    let to_knots = match &caps["unit"] {
        "MPS" => KNOTS_PER_MPS,
        "KMH" => KNOTS_PER_KMH,
        _ => 1.0,
    };

    let direction_deg = match &caps["direction"] {
        "VRB" | "///" => None,
        digits => {
            let direction: u16 = digits.parse().ok()?;
            if direction > MAX_WIND_DIRECTION_DEG {
                return None;
            }
            Some(direction)
        }
    };

    let speed = match &caps["speed"] {
        "//" => None,
        digits => Some(digits.parse::<u16>().ok()?),
    };
    let gust = match caps.name("gust") {
        Some(m) => Some(m.as_str().parse::<u16>().ok()?),
        None => None,
    };

    if direction_deg == Some(0) && speed == Some(0) && gust.is_none() {
        return Some(Wind {
            calm: true,
            ..Wind::default()
        });
    }

    Some(Wind {
        direction_deg,
        speed_kt: speed.map(|s| f64::from(s) * to_knots),
        gust_kt: gust.map(|g| f64::from(g) * to_knots),
        calm: false,
    })
}

/// Parse a `dddVddd` variable wind sector
pub fn parse_wind_variation(token: &str) -> Option<(u16, u16)> {
    let caps = WIND_VARIATION_PATTERN.captures(token)?;
    let from: u16 = caps[1].parse().ok()?;
    let to: u16 = caps[2].parse().ok()?;
    (from <= MAX_WIND_DIRECTION_DEG && to <= MAX_WIND_DIRECTION_DEG).then_some((from, to))
}

// =============================================================================
// Visibility and runway visual range
// =============================================================================

/// Parse a single-token visibility group into statute miles.
///
/// Accepts `10SM`, `1/4SM`, `M1/4SM`, `P6SM`, metric `0800`/`9999` and
/// `CAVOK`.
pub fn parse_visibility(token: &str) -> Option<f64> {
    if token == "CAVOK" {
        return Some(CAVOK_VISIBILITY_M / METERS_PER_STATUTE_MILE);
    }

    if let Some(caps) = VISIBILITY_MILES_PATTERN.captures(token) {
        if let Some(whole) = caps.name("whole") {
            return whole.as_str().parse::<f64>().ok();
        }
        let num: f64 = caps["num"].parse().ok()?;
        let den: f64 = caps["den"].parse().ok()?;
        return (den > 0.0).then(|| num / den);
    }

    let caps = VISIBILITY_METRIC_PATTERN.captures(token)?;
    let metres: u32 = caps["metres"].parse().ok()?;
    let metres = if metres == METRIC_VISIBILITY_UNLIMITED {
        CAVOK_VISIBILITY_M
    } else {
        f64::from(metres)
    };
    Some(metres / METERS_PER_STATUTE_MILE)
}

/// Parse visibility split over two tokens, e.g. `1 1/2SM`
pub fn parse_split_visibility(whole: &str, fraction: &str) -> Option<f64> {
    if whole.len() != 1 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if fraction.starts_with(['M', 'P']) || !fraction.contains('/') {
        return None;
    }
    let whole: f64 = whole.parse().ok()?;
    parse_visibility(fraction).map(|part| whole + part)
}

pub fn is_runway_visual_range(token: &str) -> bool {
    RUNWAY_VISUAL_RANGE_PATTERN.is_match(token)
}

// =============================================================================
// Present weather
// =============================================================================

pub fn is_weather_group(token: &str) -> bool {
    weather_codes::is_weather_group(token)
}

/// `//` from automated stations: present weather not observable
pub fn is_unobserved_weather(token: &str) -> bool {
    token == WEATHER_NOT_OBSERVED
}

/// Keep the raw group and attach its WMO code when the table knows it
pub fn parse_weather(token: &str) -> WeatherPhenomenon {
    WeatherPhenomenon {
        token: token.to_string(),
        code: weather_codes::lookup(token),
    }
}

// =============================================================================
// Sky condition
// =============================================================================

/// Cover code followed by a height field, readable or not.
///
/// A group such as `BKN0A0` still occupies a sky slot; `parse_sky_layer`
/// decides whether its contents decode.
pub fn is_sky_group(token: &str) -> bool {
    cover_codes::CLEAR_FAMILY.contains(&token)
        || (SKY_GROUP_SHAPE.is_match(token) && !is_temperature_group(token))
}

pub fn is_vertical_visibility(token: &str) -> bool {
    token.starts_with(cover_codes::VERTICAL_VISIBILITY)
}

/// Parse one sky condition group.
///
/// Bare clear-sky codes have no height. An unknown cover code or an
/// unreadable height yields `None`.
pub fn parse_sky_layer(token: &str) -> Option<SkyLayer> {
    if cover_codes::CLEAR_FAMILY.contains(&token) {
        return Some(SkyLayer {
            cover: CoverKind::Clear,
            height_ft: None,
        });
    }

    let caps = SKY_PATTERN.captures(token)?;
    let cover = CoverKind::from_code(&caps["cover"])?;
    let hundreds: u16 = caps["height"].parse().ok()?;

    Some(SkyLayer {
        cover,
        height_ft: Some(f64::from(hundreds) * SKY_HEIGHT_UNIT_FT),
    })
}

/// Oktas of the lowest reported layer
pub fn cloud_cover_oktas(first_layer: Option<&SkyLayer>) -> Option<u8> {
    first_layer.map(|layer| layer.cover.oktas())
}

// =============================================================================
// Temperature and pressure
// =============================================================================

pub fn is_temperature_group(token: &str) -> bool {
    temperature_captures(token).is_some()
}

/// At least one side must be reported or `MM`; bare slashes such as `///`
/// are placeholders, not a temperature group
fn temperature_captures(token: &str) -> Option<regex::Captures<'_>> {
    let caps = TEMPERATURE_PATTERN.captures(token)?;
    let reported = |side: Option<regex::Match<'_>>| side.is_some_and(|m| m.as_str() != "//");
    (reported(caps.name("temperature")) || reported(caps.name("dewpoint"))).then_some(caps)
}

/// Parse a `TT/DD` group into (temperature, dewpoint) in Celsius
pub fn parse_temperature(token: &str) -> Option<(Option<f64>, Option<f64>)> {
    let caps = temperature_captures(token)?;
    let temperature = parse_signed_celsius(&caps["temperature"]);
    let dewpoint = caps
        .name("dewpoint")
        .and_then(|m| parse_signed_celsius(m.as_str()));
    Some((temperature, dewpoint))
}

/// `M` prefix means below zero; `MM` and `//` mean not reported
fn parse_signed_celsius(value: &str) -> Option<f64> {
    match value.strip_prefix('M') {
        Some("M") => None,
        Some(magnitude) => magnitude.parse::<f64>().ok().map(|v| -v),
        None => value.parse::<f64>().ok(),
    }
}

pub fn is_altimeter_group(token: &str) -> bool {
    ALTIMETER_PATTERN.is_match(token)
}

/// Parse an `Adddd`/`Qdddd` group.
///
/// Values above `hpa_threshold` are hundredths of inches of mercury, values
/// at or below it are whole hectopascals. The unit letter is not consulted.
pub fn parse_altimeter(token: &str, hpa_threshold: f64) -> Option<AltimeterSetting> {
    let caps = ALTIMETER_PATTERN.captures(token)?;
    let value: f64 = caps["value"].parse().ok()?;

    if value > hpa_threshold {
        Some(AltimeterSetting::InchesOfMercury(value / 100.0))
    } else {
        Some(AltimeterSetting::Hectopascals(value))
    }
}
