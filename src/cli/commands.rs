//! Command implementation for the METAR decoder CLI
//!
//! Loads the optional station table, decodes each report and prints either a
//! human-readable summary or one JSON object per report.

use crate::cli::args::{Args, OutputFormat};
use crate::decoder::ReportDecoder;
use crate::models::Observation;
use crate::station_directory::StationTable;
use crate::weather_codes;
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, BufRead};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Decoding statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct DecodeStats {
    /// Reports decoded
    pub reports_decoded: usize,
    /// Reports whose station was found in the station table
    pub stations_resolved: usize,
    /// Reports with a sea-level pressure
    pub pressures_reduced: usize,
    /// Total decoding time
    pub processing_time: Duration,
}

impl DecodeStats {
    fn record(&mut self, ob: &Observation) {
        self.reports_decoded += 1;
        if ob.location.is_some() {
            self.stations_resolved += 1;
        }
        if ob.sea_level_pressure_hpa.is_some() {
            self.pressures_reduced += 1;
        }
    }
}

/// Main command runner
///
/// 1. Set up logging and validate arguments
/// 2. Load the station table, if one was given
/// 3. Decode every report and print it
pub fn run(args: Args) -> Result<DecodeStats> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate().context("Invalid arguments")?;

    let stations = load_stations(&args)?;
    let decoder = ReportDecoder::new(args.decoder_config());
    debug!(
        "Decoder ready with {} weather codes: {:?}",
        weather_codes::table_len(),
        decoder.config()
    );

    let reports = if args.reports.is_empty() {
        read_reports(io::stdin().lock()).context("Failed to read reports from stdin")?
    } else {
        args.reports.clone()
    };
    info!("Decoding {} reports", reports.len());

    let mut stats = DecodeStats::default();
    for report in &reports {
        let ob = decoder.decode(report, &stations);
        stats.record(&ob);

        match args.output_format {
            OutputFormat::Human => println!("{}", format_observation(&ob)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string(&ob).context("Failed to serialize observation")?
            ),
        }
    }

    stats.processing_time = start_time.elapsed();

    if args.output_format == OutputFormat::Human && !args.quiet {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn load_stations(args: &Args) -> Result<StationTable> {
    let Some(path) = &args.stations else {
        info!("No station file given; pressure reduction is disabled");
        return Ok(StationTable::new());
    };

    let (table, stats) = StationTable::load_from_file(path, args.strict_stations)
        .with_context(|| format!("Failed to load station file {}", path.display()))?;

    if stats.lines_skipped > 0 {
        info!(
            "Skipped {} malformed lines in {}",
            stats.lines_skipped,
            path.display()
        );
    }

    Ok(table)
}

/// Read one report per non-blank line
pub fn read_reports<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut reports = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            reports.push(trimmed.to_string());
        }
    }
    Ok(reports)
}

/// Render one observation as a short human-readable block
pub fn format_observation(ob: &Observation) -> String {
    let station = ob.station_id.as_deref().unwrap_or("????");
    let time = match (ob.report_day, ob.report_time_utc) {
        (Some(day), Some(time)) => format!("day {:02} {:04}Z", day, time),
        _ => "time unknown".to_string(),
    };

    let mut lines = vec![format!(
        "{} {}",
        station.bright_cyan().bold(),
        time.bright_black()
    )];

    let wind = if ob.wind_calm {
        "calm".to_string()
    } else {
        let direction = ob
            .wind_direction_deg
            .map_or_else(|| "VRB".to_string(), |d| format!("{:03}", d));
        match (ob.wind_speed_kt, ob.wind_gust_kt) {
            (Some(speed), Some(gust)) => {
                format!("{} at {:.0} kt gusting {:.0} kt", direction, speed, gust)
            }
            (Some(speed), None) => format!("{} at {:.0} kt", direction, speed),
            (None, _) => "missing".to_string(),
        }
    };
    lines.push(format!("   • Wind: {}", wind));

    if let Some(visibility) = ob.visibility_sm {
        lines.push(format!("   • Visibility: {:.2} sm", visibility));
    }

    let weather: Vec<String> = ob
        .weather()
        .map(|w| match w.code {
            Some(code) => format!("{} ({})", w.token, code),
            None => w.token.clone(),
        })
        .collect();
    if !weather.is_empty() {
        lines.push(format!("   • Weather: {}", weather.join(", ")));
    }

    let sky: Vec<String> = ob
        .layers()
        .map(|layer| match layer.height_ft {
            Some(height) => format!("{:?} {:.0} ft", layer.cover, height),
            None => format!("{:?}", layer.cover),
        })
        .collect();
    if !sky.is_empty() {
        let oktas = ob
            .cloud_cover_oktas
            .map_or_else(String::new, |o| format!(" [{} oktas]", o));
        lines.push(format!("   • Sky: {}{}", sky.join(", "), oktas));
    }

    if let Some(temperature) = ob.temperature_c {
        let dewpoint = ob
            .dewpoint_c
            .map_or_else(|| "--".to_string(), |d| format!("{:.0}", d));
        lines.push(format!(
            "   • Temperature: {:.0} °C, dewpoint {} °C",
            temperature, dewpoint
        ));
    }

    if let Some(altimeter) = ob.altimeter_inhg {
        lines.push(format!("   • Altimeter: {} inHg", altimeter));
    }
    if let Some(slp) = ob.sea_level_pressure_hpa {
        let station = ob
            .station_pressure_hpa
            .map_or_else(String::new, |p| format!(" (station {} hPa)", p));
        lines.push(format!(
            "   • Sea-level pressure: {}{}",
            format!("{} hPa", slp).bright_green(),
            station
        ));
    }

    lines.join("\n")
}

fn print_summary(stats: &DecodeStats) {
    println!();
    println!("{}", "METAR decoding complete".bright_green().bold());
    println!("   • Reports decoded: {}", stats.reports_decoded);
    println!("   • Stations resolved: {}", stats.stations_resolved);
    println!("   • Sea-level pressures: {}", stats.pressures_reduced);
    println!("   • Processing time: {:.2?}", stats.processing_time);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn test_read_reports_skips_blank_lines() {
        let input = "KATL 102052Z 31008KT\n\n   \n  KBOS 102054Z 11015KT  \n";
        let reports = read_reports(input.as_bytes()).unwrap();
        assert_eq!(
            reports,
            vec![
                "KATL 102052Z 31008KT".to_string(),
                "KBOS 102054Z 11015KT".to_string()
            ]
        );
    }

    #[test]
    fn test_format_observation() {
        let stations = StationTable::new().with_station("KLAS", 36.0719, -115.1634, 664.0);
        let ob = decode("KLAS 102156Z VRB03KT 10SM -RA BKN250 34/M06 A3007", &stations);

        let text = format_observation(&ob);
        assert!(text.contains("KLAS"));
        assert!(text.contains("day 10 2156Z"));
        assert!(text.contains("VRB at 3 kt"));
        assert!(text.contains("-RA (61)"));
        assert!(text.contains("Broken 25000 ft [6 oktas]"));
        assert!(text.contains("dewpoint -6"));
        assert!(text.contains("30.07 inHg"));
        assert!(text.contains("1013.09 hPa"));
    }

    #[test]
    fn test_format_calm_report_without_station() {
        let ob = decode("102052Z 00000KT", &StationTable::new());

        let text = format_observation(&ob);
        assert!(text.contains("????"));
        assert!(text.contains("Wind: calm"));
        assert!(!text.contains("Altimeter"));
    }

    #[test]
    fn test_stats_record() {
        let stations = StationTable::new().with_station("KLAS", 36.0719, -115.1634, 664.0);
        let mut stats = DecodeStats::default();

        stats.record(&decode("KLAS 102156Z VRB03KT 10SM 34/M06 A3007", &stations));
        stats.record(&decode("KJFK 102051Z 04012KT 10SM 22/14 A3001", &stations));

        assert_eq!(stats.reports_decoded, 2);
        assert_eq!(stats.stations_resolved, 1);
        assert_eq!(stats.pressures_reduced, 1);
    }
}
