//! Command-line argument definitions for the METAR decoder
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::DecoderConfig;
use crate::constants::{DEFAULT_ALTIMETER_HPA_THRESHOLD, DEFAULT_DISPLAY_DECIMALS};
use crate::error::{MetarError, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the METAR decoder
///
/// Decodes METAR reports into typed observations and, when the station's
/// elevation is known, reduces the altimeter setting to sea-level pressure.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metar-decode",
    version,
    about = "Decode METAR reports and derive sea-level pressure",
    long_about = "Decodes METAR aviation weather reports given on the command line, or one per \
                  line on standard input, into structured observations. With a station file the \
                  altimeter setting is reduced to station and sea-level pressure."
)]
pub struct Args {
    /// Reports to decode; read from stdin, one per line, when omitted
    #[arg(value_name = "REPORT")]
    pub reports: Vec<String>,

    /// Station metadata file
    ///
    /// One `ID,latitude,longitude,elevation_m` line per station. Lines
    /// starting with `#` and blank lines are ignored.
    #[arg(short = 's', long = "stations", value_name = "FILE")]
    pub stations: Option<PathBuf>,

    /// Fail on the first malformed station line instead of skipping it
    #[arg(long = "strict-stations", requires = "stations")]
    pub strict_stations: bool,

    /// Year used to resolve report timestamps
    #[arg(long, requires = "month")]
    pub year: Option<i32>,

    /// Month (1-12) used to resolve report timestamps
    #[arg(long, requires = "year")]
    pub month: Option<u32>,

    /// Altimeter values at or below this are read as hectopascals
    #[arg(long = "altimeter-threshold", value_name = "VALUE", default_value_t = DEFAULT_ALTIMETER_HPA_THRESHOLD)]
    pub altimeter_threshold: f64,

    /// Decimal places for pressure fields
    #[arg(long, default_value_t = DEFAULT_DISPLAY_DECIMALS)]
    pub decimals: u32,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format for decoded observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// One JSON object per report
    Json,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(stations) = &self.stations {
            if !stations.is_file() {
                return Err(MetarError::configuration(format!(
                    "Station file does not exist: {}",
                    stations.display()
                )));
            }
        }

        self.decoder_config().validate()
    }

    /// Decoder configuration selected by the flags
    pub fn decoder_config(&self) -> DecoderConfig {
        let config = DecoderConfig::default()
            .with_altimeter_hpa_threshold(self.altimeter_threshold)
            .with_display_decimals(self.decimals);

        match (self.year, self.month) {
            (Some(year), Some(month)) => config.with_reference_month(year, month),
            _ => config,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["metar-decode", "KATL 102052Z 31008KT"]).unwrap();

        assert_eq!(args.reports, vec!["KATL 102052Z 31008KT".to_string()]);
        assert_eq!(args.output_format, OutputFormat::Human);
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.validate().is_ok());

        let config = args.decoder_config();
        assert_eq!(config.altimeter_hpa_threshold, DEFAULT_ALTIMETER_HPA_THRESHOLD);
        assert_eq!(config.display_decimals, DEFAULT_DISPLAY_DECIMALS);
        assert!(config.reference_month.is_none());
    }

    #[test]
    fn test_reference_month_needs_both_parts() {
        assert!(Args::try_parse_from(["metar-decode", "--year", "2023"]).is_err());
        assert!(Args::try_parse_from(["metar-decode", "--month", "7"]).is_err());

        let args =
            Args::try_parse_from(["metar-decode", "--year", "2023", "--month", "7"]).unwrap();
        let reference = args.decoder_config().reference_month.unwrap();
        assert_eq!((reference.year, reference.month), (2023, 7));
    }

    #[test]
    fn test_invalid_month_fails_validation() {
        let args =
            Args::try_parse_from(["metar-decode", "--year", "2023", "--month", "13"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_missing_station_file_fails_validation() {
        let args =
            Args::try_parse_from(["metar-decode", "--stations", "/no/such/stations.txt"]).unwrap();
        assert!(matches!(
            args.validate(),
            Err(MetarError::Configuration { .. })
        ));
    }

    #[test]
    fn test_log_levels() {
        let verbose = Args::try_parse_from(["metar-decode", "-vv"]).unwrap();
        assert_eq!(verbose.get_log_level(), "debug");

        let quiet = Args::try_parse_from(["metar-decode", "-q", "--format", "json"]).unwrap();
        assert_eq!(quiet.get_log_level(), "error");
        assert_eq!(quiet.output_format, OutputFormat::Json);

        assert!(Args::try_parse_from(["metar-decode", "-q", "-v"]).is_err());
    }
}
