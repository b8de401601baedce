//! Decoder configuration and validation.
//!
//! The defaults reproduce the reference decoding behaviour; the builder
//! methods exist for callers that need a full timestamp or different display
//! precision.

use crate::constants::{
    DEFAULT_ALTIMETER_HPA_THRESHOLD, DEFAULT_DISPLAY_DECIMALS, MAX_DISPLAY_DECIMALS,
};
use crate::error::{MetarError, Result};
use serde::{Deserialize, Serialize};

/// Year and month used to turn a report's day-of-month into a full date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceMonth {
    pub year: i32,
    pub month: u32,
}

/// Configuration for [`ReportDecoder`](crate::ReportDecoder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Altimeter groups above this value are hundredths of inHg; at or below
    /// it they are whole hectopascals
    pub altimeter_hpa_threshold: f64,

    /// Decimal places kept in altimeter and pressure fields
    pub display_decimals: u32,

    /// Enables `Observation::observed_at`
    pub reference_month: Option<ReferenceMonth>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            altimeter_hpa_threshold: DEFAULT_ALTIMETER_HPA_THRESHOLD,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
            reference_month: None,
        }
    }
}

impl DecoderConfig {
    pub fn with_altimeter_hpa_threshold(mut self, threshold: f64) -> Self {
        self.altimeter_hpa_threshold = threshold;
        self
    }

    pub fn with_display_decimals(mut self, decimals: u32) -> Self {
        self.display_decimals = decimals;
        self
    }

    /// Resolve report days against the given year and month
    pub fn with_reference_month(mut self, year: i32, month: u32) -> Self {
        self.reference_month = Some(ReferenceMonth { year, month });
        self
    }

    /// Check the configuration for values the decoder cannot use
    pub fn validate(&self) -> Result<()> {
        if !self.altimeter_hpa_threshold.is_finite() || self.altimeter_hpa_threshold <= 0.0 {
            return Err(MetarError::configuration(format!(
                "altimeter_hpa_threshold must be a positive number, got {}",
                self.altimeter_hpa_threshold
            )));
        }

        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(MetarError::configuration(format!(
                "display_decimals must be at most {}, got {}",
                MAX_DISPLAY_DECIMALS, self.display_decimals
            )));
        }

        if let Some(reference) = self.reference_month {
            if !(1..=12).contains(&reference.month) {
                return Err(MetarError::configuration(format!(
                    "reference month must be 1-12, got {}",
                    reference.month
                )));
            }
        }

        Ok(())
    }
}
