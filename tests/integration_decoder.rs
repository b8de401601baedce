//! Integration tests for decoding reports against a station file
//!
//! These tests load a station table from disk, decode a small bulletin of
//! reports and check the derived pressure fields end to end.

use metar_processor::{
    AltimeterSetting, CoverKind, DecoderConfig, ReportDecoder, StationTable, decode,
    sea_level_pressure, station_pressure,
};
use std::io::Write;
use tempfile::NamedTempFile;

const STATIONS: &str = "\
# id,latitude,longitude,elevation_m
KATL,33.6301,-84.4418,315
KBOS,42.3606,-71.0097,6
KLAS,36.0719,-115.1634,664
CYYT,47.6186,-52.7519,140
KMIA,25.7932,-80.2906,4
";

const BULLETIN: [&str; 4] = [
    "KATL 102052Z 31008KT 10SM FEW013 SCT100 BKN150 BKN250 26/22 A2996",
    "KBOS 102054Z 11015KT 10SM FEW031 FEW090 SCT160 SCT200 BKN280 22/15 A3007",
    "KLAS 102156Z VRB03KT 10SM BKN250 34/M06 A3007",
    "METAR CYYT 081100Z 00000KT 0SM FG VV000 07/07 A3019",
];

fn load_stations() -> StationTable {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", STATIONS).unwrap();
    file.flush().unwrap();

    let (table, stats) = StationTable::load_from_file(file.path(), true).unwrap();
    assert_eq!(stats.stations_loaded, 5);
    table
}

/// Every report in the bulletin resolves its station and gets a sea-level
/// pressure close to the standard atmosphere
#[test]
fn test_decode_bulletin_with_station_file() {
    let stations = load_stations();
    let decoder = ReportDecoder::default();

    for report in BULLETIN {
        let ob = decoder.decode(report, &stations);

        assert!(ob.location.is_some(), "{}", report);
        let slp = ob.sea_level_pressure_hpa.unwrap();
        assert!((990.0..1040.0).contains(&slp), "{}: {}", report, slp);
        assert!(ob.station_pressure_hpa.unwrap() <= slp, "{}", report);
    }
}

#[test]
fn test_low_elevation_sea_level_pressure() {
    let stations = load_stations();

    let ob = decode(
        "KMIA 101953Z 09012KT 10SM SCT025 19/15 A2995",
        &stations,
    );

    assert_eq!(ob.altimeter_inhg, Some(29.95));
    let slp = ob.sea_level_pressure_hpa.unwrap();
    assert!((slp - 1014.0).abs() <= 1.0, "{}", slp);
    assert_eq!(ob.sky_layers[0].as_ref().unwrap().cover, CoverKind::Scattered);
}

#[test]
fn test_pressure_functions_agree_with_decoder() {
    let setting = AltimeterSetting::InchesOfMercury(30.07);

    let station = station_pressure(setting, 664.0);
    let sea_level = sea_level_pressure(setting, 664.0, 34.0);

    assert!((station - 940.97).abs() < 0.01);
    assert!((sea_level - 1013.09).abs() < 0.01);
    assert_eq!(
        sea_level_pressure(setting, 0.0, 15.0),
        station_pressure(setting, 0.0)
    );
}

#[test]
fn test_reference_month_timestamps() {
    let stations = load_stations();
    let decoder = ReportDecoder::new(DecoderConfig::default().with_reference_month(2019, 6));

    let ob = decoder.decode(BULLETIN[3], &stations);

    assert_eq!(
        ob.observed_at.map(|t| t.to_rfc3339()),
        Some("2019-06-08T11:00:00+00:00".to_string())
    );
}

#[test]
fn test_observation_serializes_to_json() {
    let ob = decode(BULLETIN[2], &load_stations());

    let json = serde_json::to_value(&ob).unwrap();

    assert_eq!(json["station_id"], "KLAS");
    assert_eq!(json["wind_direction_deg"], serde_json::Value::Null);
    assert_eq!(json["dewpoint_c"], -6.0);
    assert_eq!(json["altimeter_inhg"], 30.07);
}
