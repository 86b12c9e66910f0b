// src/error.rs
//! Unified error handling for accel-dsp
//!
//! Two classes of failure exist. Hard errors ([`AccelError`]) abort the
//! operation that raised them: a filter that cannot be designed or a signal
//! that cannot be filtered must never produce output. Soft failures
//! ([`BandUnavailable`]) only degrade a single band metric; the rest of the
//! analysis still completes and is reported alongside the missing value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::table::TableError;

/// Unified error type for every fallible operation in the crate
#[derive(Debug, Error)]
pub enum AccelError {
    /// Filter parameters violate the design constraints
    #[error("[DESIGN] Invalid filter spec: {reason}")]
    InvalidFilterSpec { reason: String },

    /// Signal too short for the requested edge padding
    #[error("[CONVOLUTION] Signal has {actual} samples, zero-phase filtering needs at least {required}")]
    InsufficientSignalLength { required: usize, actual: usize },

    /// Input data rejected by a processing stage
    #[error("[DATA] Invalid {data_type}: {reason}")]
    InvalidData { data_type: String, reason: String },

    /// Tabular I/O failure
    #[error("[TABLE] {0}")]
    Table(#[from] TableError),

    /// Configuration loading or validation failure
    #[error("[CONFIG] {0}")]
    Config(#[from] ConfigError),
}

impl AccelError {
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        AccelError::InvalidFilterSpec { reason: reason.into() }
    }

    pub fn invalid_data(data_type: &str, reason: impl Into<String>) -> Self {
        AccelError::InvalidData {
            data_type: data_type.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for accel-dsp operations
pub type AccelResult<T> = Result<T, AccelError>;

/// Frequency band a metric was computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Passband,
    Stopband,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Passband => write!(f, "passband"),
            Band::Stopband => write!(f, "stopband"),
        }
    }
}

/// Reason a band metric could not be measured
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BandUnavailable {
    /// No grid point fell inside the requested range
    #[error("no {band} samples in the requested frequency range")]
    EmptyBandSelection { band: Band },

    /// A selected magnitude was NaN or infinite
    #[error("non-finite {band} magnitude at {frequency_hz:.3} Hz")]
    NonFiniteSample { band: Band, frequency_hz: f64 },
}

impl BandUnavailable {
    pub fn band(&self) -> Band {
        match self {
            BandUnavailable::EmptyBandSelection { band } => *band,
            BandUnavailable::NonFiniteSample { band, .. } => *band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccelError::InsufficientSignalLength { required: 41, actual: 10 };
        let display = format!("{}", err);
        assert!(display.contains("CONVOLUTION"));
        assert!(display.contains("41"));
        assert!(display.contains("10"));

        let err = AccelError::invalid_spec("cutoff above Nyquist");
        assert!(format!("{}", err).contains("cutoff above Nyquist"));
    }

    #[test]
    fn test_band_unavailable_reports_band() {
        let reason = BandUnavailable::NonFiniteSample { band: Band::Stopband, frequency_hz: 20.0 };
        assert_eq!(reason.band(), Band::Stopband);
        assert!(reason.to_string().contains("stopband"));

        let reason = BandUnavailable::EmptyBandSelection { band: Band::Passband };
        assert_eq!(reason.band(), Band::Passband);
    }

    #[test]
    fn test_table_error_conversion() {
        let table_err = TableError::MissingColumn("xaccel".to_string());
        let err: AccelError = table_err.into();
        match err {
            AccelError::Table(TableError::MissingColumn(name)) => assert_eq!(name, "xaccel"),
            _ => panic!("Expected table error"),
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccelError>();
    }
}
