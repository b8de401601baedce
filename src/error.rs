//! Error handling for METAR processing operations.
//!
//! Report decoding itself never fails: malformed groups become absent fields.
//! These types cover the surfaces around the decoder (station tables,
//! configuration) and the checked form of the pressure reduction.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetarError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid station table entry in {path} at line {line}: {reason}")]
    StationFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl MetarError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Rejection reasons for the checked sea-level pressure reduction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    #[error("Input {name} is not a finite number")]
    NonFiniteInput { name: &'static str },

    #[error("Absolute temperature {kelvin} K is not physical")]
    NonPhysicalTemperature { kelvin: f64 },

    #[error("Reduction produced a non-finite {stage} pressure")]
    NonFiniteResult { stage: &'static str },
}

pub type Result<T> = std::result::Result<T, MetarError>;
