// src/processing/analysis/frequency_response.rs
//! Frequency response of FIR coefficients and band quality metrics
//!
//! The response grid covers `[0, Nyquist)`: grid point `i` of `n` sits at
//! angular frequency `pi * i / n`, so 0 Hz is included and Nyquist is not.
//! Use [`FrequencyResponseAnalyzer::evaluate_at`] for arbitrary frequencies,
//! Nyquist included.

use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::config::processing_config::{AnalysisConfig, FilterSpec};
use crate::error::{AccelError, AccelResult, Band, BandUnavailable};
use crate::processing::filters::CoefficientVector;

/// Magnitude response sampled on a frequency grid
///
/// A zero magnitude is stored as negative infinity dB. Non-finite values
/// are kept so plots show them; [`BandMetrics`] refuses to measure them.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    frequencies_hz: Vec<f64>,
    magnitudes_db: Vec<f64>,
}

impl FrequencyResponse {
    /// Build a response from parallel sequences
    pub fn from_parts(frequencies_hz: Vec<f64>, magnitudes_db: Vec<f64>) -> AccelResult<Self> {
        if frequencies_hz.len() != magnitudes_db.len() {
            return Err(AccelError::invalid_data(
                "frequency response",
                format!(
                    "{} frequencies but {} magnitudes",
                    frequencies_hz.len(),
                    magnitudes_db.len()
                ),
            ));
        }
        Ok(Self { frequencies_hz, magnitudes_db })
    }

    pub fn frequencies_hz(&self) -> &[f64] {
        &self.frequencies_hz
    }

    pub fn magnitudes_db(&self) -> &[f64] {
        &self.magnitudes_db
    }

    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// `(frequency_hz, magnitude_db)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies_hz
            .iter()
            .copied()
            .zip(self.magnitudes_db.iter().copied())
    }

    pub fn band_metrics(&self, passband_limit_hz: f64, stopband_start_hz: f64) -> BandMetrics {
        FrequencyResponseAnalyzer::band_metrics(self, passband_limit_hz, stopband_start_hz)
    }
}

/// Passband flatness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassbandMetrics {
    pub max_db: f64,
    pub min_db: f64,
    pub ripple_db: f64,
}

/// Stopband suppression; the least attenuated point is the worst case
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopbandMetrics {
    pub min_attenuation_db: f64,
}

/// Per-band results, each independently available or not
#[derive(Debug, Clone, PartialEq)]
pub struct BandMetrics {
    pub passband: Result<PassbandMetrics, BandUnavailable>,
    pub stopband: Result<StopbandMetrics, BandUnavailable>,
}

impl BandMetrics {
    pub fn is_complete(&self) -> bool {
        self.passband.is_ok() && self.stopband.is_ok()
    }
}

/// Response plus metrics for one filter
#[derive(Debug, Clone)]
pub struct FilterAnalysis {
    pub response: FrequencyResponse,
    pub metrics: BandMetrics,
}

/// Evaluates FIR transfer functions at a fixed sampling rate
#[derive(Debug, Clone)]
pub struct FrequencyResponseAnalyzer {
    sampling_rate_hz: f64,
}

impl FrequencyResponseAnalyzer {
    pub fn new(sampling_rate_hz: f64) -> AccelResult<Self> {
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(AccelError::invalid_spec(format!(
                "sampling rate must be positive and finite, got {} Hz",
                sampling_rate_hz
            )));
        }
        Ok(Self { sampling_rate_hz })
    }

    pub fn from_spec(spec: &FilterSpec) -> AccelResult<Self> {
        Self::new(spec.sampling_rate_hz)
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sampling_rate_hz / 2.0
    }

    /// Response at `grid_size` points evenly spaced over `[0, Nyquist)`
    pub fn evaluate(&self, coeffs: &CoefficientVector, grid_size: usize) -> AccelResult<FrequencyResponse> {
        if grid_size == 0 {
            return Err(AccelError::invalid_data("grid size", "must be at least 1"));
        }

        let frequencies_hz: Vec<f64> = (0..grid_size)
            .map(|i| i as f64 / grid_size as f64 * self.nyquist_hz())
            .collect();

        let n_fft = 2 * grid_size;
        let response: Vec<Complex<f64>> = if n_fft >= coeffs.num_taps() {
            let mut buffer: Vec<Complex<f64>> = coeffs.iter().map(|&h| Complex::new(h, 0.0)).collect();
            buffer.resize(n_fft, Complex::new(0.0, 0.0));
            FftPlanner::<f64>::new().plan_fft_forward(n_fft).process(&mut buffer);
            buffer.truncate(grid_size);
            buffer
        } else {
            frequencies_hz.iter().map(|&f| self.dtft(coeffs, f)).collect()
        };

        tracing::debug!(grid_size, num_taps = coeffs.num_taps(), "evaluated frequency response");
        Ok(FrequencyResponse {
            frequencies_hz,
            magnitudes_db: response.iter().map(|h| magnitude_db(h.norm())).collect(),
        })
    }

    /// Response at arbitrary physical frequencies
    pub fn evaluate_at(&self, coeffs: &CoefficientVector, frequencies_hz: &[f64]) -> FrequencyResponse {
        FrequencyResponse {
            frequencies_hz: frequencies_hz.to_vec(),
            magnitudes_db: frequencies_hz
                .iter()
                .map(|&f| magnitude_db(self.dtft(coeffs, f).norm()))
                .collect(),
        }
    }

    /// Ripple over `f <= passband_limit_hz`, attenuation over `f >= stopband_start_hz`
    pub fn band_metrics(response: &FrequencyResponse, passband_limit_hz: f64, stopband_start_hz: f64) -> BandMetrics {
        let passband = select_band(response, Band::Passband, |f| f <= passband_limit_hz).map(|db| {
            let (min_db, max_db) = min_max(&db);
            PassbandMetrics {
                max_db,
                min_db,
                ripple_db: max_db - min_db,
            }
        });

        let stopband = select_band(response, Band::Stopband, |f| f >= stopband_start_hz).map(|db| {
            let (_, max_db) = min_max(&db);
            StopbandMetrics {
                min_attenuation_db: max_db,
            }
        });

        for reason in [passband.as_ref().err(), stopband.as_ref().err()].into_iter().flatten() {
            tracing::warn!("{} metric unavailable: {}", reason.band(), reason);
        }

        BandMetrics { passband, stopband }
    }

    /// Evaluate on the configured grid and measure the configured bands
    pub fn analyze(&self, coeffs: &CoefficientVector, config: &AnalysisConfig) -> AccelResult<FilterAnalysis> {
        let response = self.evaluate(coeffs, config.grid_size)?;
        let metrics = Self::band_metrics(&response, config.passband_limit_hz, config.stopband_start_hz);
        Ok(FilterAnalysis { response, metrics })
    }

    fn dtft(&self, coeffs: &CoefficientVector, frequency_hz: f64) -> Complex<f64> {
        let omega = PI * frequency_hz / self.nyquist_hz();
        coeffs
            .iter()
            .enumerate()
            .map(|(k, &h)| Complex::from_polar(h, -omega * k as f64))
            .sum()
    }
}

fn magnitude_db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Magnitudes inside a band, or why they cannot be measured
fn select_band(
    response: &FrequencyResponse,
    band: Band,
    contains: impl Fn(f64) -> bool,
) -> Result<Vec<f64>, BandUnavailable> {
    let mut selected = Vec::new();
    for (frequency_hz, db) in response.iter().filter(|&(f, _)| contains(f)) {
        if !db.is_finite() {
            return Err(BandUnavailable::NonFiniteSample { band, frequency_hz });
        }
        selected.push(db);
    }

    if selected.is_empty() {
        Err(BandUnavailable::EmptyBandSelection { band })
    } else {
        Ok(selected)
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
