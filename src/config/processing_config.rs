// src/config/processing_config.rs
//! Signal processing configuration structures

use serde::{Deserialize, Serialize};

use super::defaults;

/// FIR low-pass design parameters
///
/// `num_taps` is always `order + 1`. An even order yields a Type-I
/// linear-phase filter with an integer group delay.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterSpec {
    #[serde(default = "defaults::sampling_rate_hz")]
    pub sampling_rate_hz: f64,

    #[serde(default = "defaults::cutoff_hz")]
    pub cutoff_hz: f64,

    #[serde(default = "defaults::order")]
    pub order: usize,

    #[serde(default)]
    pub window: WindowKind,
}

impl FilterSpec {
    pub fn new(sampling_rate_hz: f64, cutoff_hz: f64, order: usize) -> Self {
        Self {
            sampling_rate_hz,
            cutoff_hz,
            order,
            window: WindowKind::Hamming,
        }
    }

    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    pub fn num_taps(&self) -> usize {
        self.order + 1
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sampling_rate_hz / 2.0
    }

    /// Cutoff as a fraction of Nyquist
    pub fn normalized_cutoff(&self) -> f64 {
        self.cutoff_hz / self.nyquist_hz()
    }
}

/// Window function applied to the ideal impulse response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Rectangular,
    #[default]
    Hamming,
    Hann,
    Blackman,
}

/// How the causal convolution is evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CausalMethod {
    /// Reversed-coefficient dot product per output sample
    #[default]
    Direct,
    /// Zero-padded FFT linear convolution
    Fft,
    /// Direct for short filters, FFT once the tap count passes a threshold
    Auto,
}

/// Edge extension used before zero-phase filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadType {
    /// Point-symmetric reflection about the edge sample
    #[default]
    Odd,
    /// Mirror reflection excluding the edge sample
    Even,
    /// Repeat the edge sample
    Constant,
    /// No extension
    None,
}

/// Convolver configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ConvolutionConfig {
    #[serde(default)]
    pub causal_method: CausalMethod,

    #[serde(default)]
    pub pad_type: PadType,

    /// Edge padding length; `None` means the filter order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_len: Option<usize>,
}

/// Frequency response analysis configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default = "defaults::grid_size")]
    pub grid_size: usize,

    #[serde(default = "defaults::passband_limit_hz")]
    pub passband_limit_hz: f64,

    #[serde(default = "defaults::stopband_start_hz")]
    pub stopband_start_hz: f64,
}

/// Resampling configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResampleConfig {
    #[serde(default = "defaults::target_rate_hz")]
    pub target_rate_hz: f64,
}

/// Input and output file locations used by the binaries
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default = "defaults::raw_data_file")]
    pub raw_data: String,

    #[serde(default = "defaults::resampled_data_file")]
    pub resampled_data: String,

    #[serde(default = "defaults::filtered_data_file")]
    pub filtered_data: String,

    #[serde(default = "defaults::manual_filtered_data_file")]
    pub manual_filtered_data: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            sampling_rate_hz: defaults::sampling_rate_hz(),
            cutoff_hz: defaults::cutoff_hz(),
            order: defaults::order(),
            window: WindowKind::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_size: defaults::grid_size(),
            passband_limit_hz: defaults::passband_limit_hz(),
            stopband_start_hz: defaults::stopband_start_hz(),
        }
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            target_rate_hz: defaults::target_rate_hz(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            raw_data: defaults::raw_data_file(),
            resampled_data: defaults::resampled_data_file(),
            filtered_data: defaults::filtered_data_file(),
            manual_filtered_data: defaults::manual_filtered_data_file(),
        }
    }
}
