// src/config/mod.rs
//! Configuration shared by every processing stage
//!
//! The sampling rate, cutoff and order are one value passed explicitly into
//! each component rather than constants repeated per binary.

pub mod constants;
pub mod loader;
pub mod processing_config;

pub use constants::*;
pub use loader::{ConfigError, ConfigLoader};
pub use processing_config::*;

use serde::{Deserialize, Serialize};

/// Complete pipeline configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub filter: FilterSpec,

    #[serde(default)]
    pub convolution: ConvolutionConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub resample: ResampleConfig,

    #[serde(default)]
    pub files: FileConfig,
}

impl PipelineConfig {
    /// Check cross-field invariants, collecting every violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        let filter = &self.filter;

        if !(filter.sampling_rate_hz.is_finite() && filter.sampling_rate_hz > 0.0) {
            problems.push(format!("filter.sampling_rate_hz must be positive, got {}", filter.sampling_rate_hz));
        } else if !(filter.cutoff_hz > 0.0 && filter.cutoff_hz < filter.nyquist_hz()) {
            problems.push(format!(
                "filter.cutoff_hz must lie in (0, {}), got {}",
                filter.nyquist_hz(),
                filter.cutoff_hz
            ));
        }

        if self.analysis.grid_size == 0 {
            problems.push("analysis.grid_size must be at least 1".to_string());
        }
        let analysis = &self.analysis;
        if !analysis.passband_limit_hz.is_finite() || !analysis.stopband_start_hz.is_finite() {
            problems.push(format!(
                "analysis band limits must be finite, got passband_limit_hz {} and stopband_start_hz {}",
                analysis.passband_limit_hz, analysis.stopband_start_hz
            ));
        } else if analysis.passband_limit_hz >= analysis.stopband_start_hz {
            problems.push(format!(
                "analysis.passband_limit_hz ({}) must be below analysis.stopband_start_hz ({})",
                self.analysis.passband_limit_hz, self.analysis.stopband_start_hz
            ));
        }

        if !(self.resample.target_rate_hz.is_finite() && self.resample.target_rate_hz > 0.0) {
            problems.push(format!("resample.target_rate_hz must be positive, got {}", self.resample.target_rate_hz));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }
}

/// Default value providers using constants
pub(crate) mod defaults {
    use crate::config::constants::*;

    pub fn sampling_rate_hz() -> f64 { filter::DEFAULT_SAMPLING_RATE_HZ }
    pub fn cutoff_hz() -> f64 { filter::DEFAULT_CUTOFF_HZ }
    pub fn order() -> usize { filter::DEFAULT_ORDER }

    pub fn grid_size() -> usize { analysis::DEFAULT_GRID_SIZE }
    pub fn passband_limit_hz() -> f64 { analysis::DEFAULT_PASSBAND_LIMIT_HZ }
    pub fn stopband_start_hz() -> f64 { analysis::DEFAULT_STOPBAND_START_HZ }

    pub fn target_rate_hz() -> f64 { resample::DEFAULT_TARGET_RATE_HZ }

    pub fn raw_data_file() -> String { paths::RAW_DATA_FILE.to_string() }
    pub fn resampled_data_file() -> String { paths::RESAMPLED_DATA_FILE.to_string() }
    pub fn filtered_data_file() -> String { paths::FILTERED_DATA_FILE.to_string() }
    pub fn manual_filtered_data_file() -> String { paths::MANUAL_FILTERED_DATA_FILE.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.filter.order, 40);
        assert_eq!(config.analysis.grid_size, 8000);
        assert_eq!(config.files.resampled_data, "resampled_data.txt");
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let mut config = PipelineConfig::default();
        config.filter.cutoff_hz = 30.0;
        config.analysis.grid_size = 0;
        config.resample.target_rate_hz = -1.0;

        match config.validate() {
            Err(ConfigError::Validation(problems)) => {
                assert_eq!(problems.len(), 3);
                assert!(problems[0].contains("cutoff_hz"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_band_limits_rejected() {
        for (passband, stopband) in [(f64::NAN, 12.0), (8.0, f64::NAN), (8.0, f64::INFINITY)] {
            let mut config = PipelineConfig::default();
            config.analysis.passband_limit_hz = passband;
            config.analysis.stopband_start_hz = stopband;

            match config.validate() {
                Err(ConfigError::Validation(problems)) => {
                    assert_eq!(problems.len(), 1);
                    assert!(problems[0].contains("finite"));
                }
                other => panic!("Expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = PipelineConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: PipelineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }
}
