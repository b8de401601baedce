//! Present-weather code table
//!
//! Maps METAR present-weather groups (`BR`, `-SHRA`, `+TSRA`, ...) to WMO
//! present-weather codes (ww, 0-99). The table is immutable and indexed once
//! on first use.
//!
//! Thunderstorm groups with rain or snow share the 95 (moderate) and 97
//! (heavy) codes; the symbol distinction between rain and snow is not kept.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Raw table entries: (METAR group, WMO code)
const WEATHER_CODES: &[(&str, u8)] = &[
    ("TSNO", 0),
    // Haze, smoke, dust
    ("VA", 4),
    ("FU", 4),
    ("HZ", 5),
    ("DU", 6),
    ("BLDU", 7),
    ("SA", 7),
    ("BLSA", 7),
    ("VCBLSA", 7),
    ("VCBLDU", 7),
    ("BLPY", 7),
    ("PO", 8),
    ("VCPO", 8),
    ("VCDS", 9),
    ("VCSS", 9),
    // Mist, shallow fog, vicinity phenomena
    ("BR", 10),
    ("BCBR", 10),
    ("BC", 11),
    ("MIFG", 12),
    ("VCTS", 13),
    ("VIRGA", 14),
    ("VCSH", 16),
    ("TS", 17),
    ("THDR", 17),
    ("VCTSHZ", 17),
    ("TSFZFG", 17),
    ("TSBR", 17),
    ("TSDZ", 17),
    ("SQ", 18),
    ("FC", 19),
    ("+FC", 19),
    // Duststorm, sandstorm, drifting snow
    ("DS", 31),
    ("SS", 31),
    ("DRSA", 31),
    ("DRDU", 31),
    ("TSUP", 32),
    ("+DS", 34),
    ("+SS", 34),
    ("-BLSN", 36),
    ("BLSN", 36),
    ("+BLSN", 36),
    ("VCBLSN", 36),
    ("DRSN", 38),
    ("+DRSN", 38),
    // Fog
    ("VCFG", 40),
    ("BCFG", 41),
    ("PRFG", 44),
    ("FG", 45),
    ("FZFG", 49),
    // Drizzle
    ("-DZ", 51),
    ("-DZBR", 51),
    ("VCTSDZ", 53),
    ("DZ", 53),
    ("+VCTSDZ", 55),
    ("+DZ", 55),
    ("-VCTSDZ", 51),
    ("-FZDZ", 56),
    ("-FZDZSN", 56),
    ("FZDZ", 57),
    ("+FZDZ", 57),
    ("FZDZSN", 57),
    ("-DZRA", 58),
    ("DZRA", 59),
    ("+DZRA", 59),
    // Rain
    ("-RA", 61),
    ("-RABR", 61),
    ("RA", 63),
    ("RABR", 63),
    ("RAFG", 63),
    ("+RA", 65),
    ("-FZRA", 66),
    ("-FZRASN", 66),
    ("-FZRABR", 66),
    ("-FZRAPL", 66),
    ("-FZRASNPL", 66),
    ("TSFZRAPL", 67),
    ("-TSFZRA", 67),
    ("FZRA", 67),
    ("+FZRA", 67),
    ("FZRASN", 67),
    ("TSFZRA", 67),
    ("-DZSN", 68),
    ("-RASN", 68),
    ("-SNRA", 68),
    ("-SNDZ", 68),
    ("RASN", 69),
    ("+RASN", 69),
    ("SNRA", 69),
    ("DZSN", 69),
    ("SNDZ", 69),
    ("+DZSN", 69),
    ("+SNDZ", 69),
    // Snow and ice
    ("-SN", 71),
    ("-SNBR", 71),
    ("SN", 73),
    ("+SN", 75),
    ("VCTSUP", 76),
    ("IN", 76),
    ("-UP", 76),
    ("UP", 76),
    ("+UP", 76),
    ("-SNSG", 77),
    ("SG", 77),
    ("-SG", 77),
    ("IC", 78),
    ("-FZDZPL", 79),
    ("-FZDZPLSN", 79),
    ("FZDZPL", 79),
    ("-FZRAPLSN", 79),
    ("FZRAPL", 79),
    ("+FZRAPL", 79),
    ("-RAPL", 79),
    ("-RASNPL", 79),
    ("-RAPLSN", 79),
    ("+RAPL", 79),
    ("RAPL", 79),
    ("-SNPL", 79),
    ("SNPL", 79),
    ("-PL", 79),
    ("PL", 79),
    ("-PLSN", 79),
    ("-PLRA", 79),
    ("PLRA", 79),
    ("-PLDZ", 79),
    ("+PL", 79),
    ("PLSN", 79),
    ("PLUP", 79),
    ("+PLSN", 79),
    // Showers
    ("-SH", 80),
    ("-SHRA", 80),
    ("SH", 81),
    ("SHRA", 81),
    ("+SH", 81),
    ("+SHRA", 81),
    ("-SHRASN", 83),
    ("-SHSNRA", 83),
    ("+SHRABR", 84),
    ("SHRASN", 84),
    ("+SHRASN", 84),
    ("SHSNRA", 84),
    ("+SHSNRA", 84),
    ("-SHSN", 85),
    ("-SHSNBR", 85),
    ("SHSN", 86),
    ("+SHSN", 86),
    ("-GS", 87),
    ("-SHGS", 87),
    ("FZRAPLGS", 88),
    ("-SNGS", 88),
    ("GSPLSN", 88),
    ("GSPL", 88),
    ("PLGSSN", 88),
    ("GS", 88),
    ("SHGS", 88),
    ("+GS", 88),
    ("+SHGS", 88),
    ("-GR", 89),
    ("-SHGR", 89),
    ("-SNGR", 90),
    ("GR", 90),
    ("SHGR", 90),
    ("+GR", 90),
    ("+SHGR", 90),
    // Thunderstorms
    ("-TSRASN", 95),
    ("TSRASN", 95),
    ("-TSSNRA", 95),
    ("TSSNRA", 95),
    ("-VCTSRA", 95),
    ("-TSRA", 95),
    ("TSRA", 95),
    ("-TSDZ", 95),
    ("VCTSRA", 95),
    ("TSPL", 95),
    ("-TSSN", 95),
    ("-TSPL", 95),
    ("TSSN", 95),
    ("-VCTSSN", 95),
    ("VCTSSN", 95),
    ("TSPLSN", 95),
    ("TSSNPL", 95),
    ("-TSSNPL", 95),
    ("-TSRAGR", 96),
    ("TSRAGS", 96),
    ("TSRAGR", 96),
    ("TSGS", 96),
    ("TSGR", 96),
    ("+TSFZRAPL", 97),
    ("+VCTSRA", 97),
    ("+TSRA", 97),
    ("+TSFZRA", 97),
    ("+TSSN", 97),
    ("+TSPL", 97),
    ("+TSPLSN", 97),
    ("+VCTSSN", 97),
    ("TSSA", 98),
    ("TSDS", 98),
    ("TSDU", 98),
    ("+TSGS", 99),
    ("+TSGR", 99),
];

static CODE_TABLE: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| WEATHER_CODES.iter().copied().collect());

/// Two-letter descriptor and phenomenon codes that make up a weather group
const WEATHER_ABBREVIATIONS: &[&str] = &[
    // Descriptors
    "MI", "PR", "BC", "DR", "BL", "SH", "TS", "FZ",
    // Precipitation
    "DZ", "RA", "SN", "SG", "IC", "PL", "GR", "GS", "UP",
    // Obscuration
    "BR", "FG", "FU", "VA", "DU", "SA", "HZ", "PY",
    // Other
    "PO", "SQ", "FC", "SS", "DS",
];

/// Look up the WMO present-weather code for a METAR weather group.
///
/// Matching is exact and case-sensitive; unknown groups return `None`.
pub fn lookup(token: &str) -> Option<u8> {
    CODE_TABLE.get(token).copied()
}

/// Number of distinct groups in the table
pub fn table_len() -> usize {
    CODE_TABLE.len()
}

/// Whether `token` has the shape of a present-weather group.
///
/// Table entries always qualify. Other tokens qualify when, after an optional
/// intensity/proximity prefix, they are built entirely from known two-letter
/// codes, optionally joined by `-` or `+` (`BR-DZ`).
pub fn is_weather_group(token: &str) -> bool {
    if CODE_TABLE.contains_key(token) {
        return true;
    }

    let body = ["-", "+", "VC", "RE"]
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .unwrap_or(token);

    let mut rest = body;
    let mut codes = 0;
    while !rest.is_empty() {
        if codes > 0 {
            rest = rest.strip_prefix(['-', '+']).unwrap_or(rest);
        }
        match rest.get(..2) {
            Some(code) if WEATHER_ABBREVIATIONS.contains(&code) => {
                rest = &rest[2..];
                codes += 1;
            }
            _ => return false,
        }
    }
    codes > 0
}
