// src/processing/analysis/spectrum.rs
//! Magnitude spectrum and dominant frequency of accelerometer channels

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{AccelError, AccelResult};

/// Non-negative half of a full FFT
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

/// Strongest spectral component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantFrequency {
    pub frequency_hz: f64,
    pub magnitude: f64,
    pub bin: usize,
}

impl Spectrum {
    /// Peak bin, ignoring DC unless it is the only bin
    pub fn dominant(&self) -> Option<DominantFrequency> {
        let start = if self.magnitudes.len() > 1 { 1 } else { 0 };
        let mut best: Option<usize> = None;
        for bin in start..self.magnitudes.len() {
            match best {
                Some(b) if self.magnitudes[bin] <= self.magnitudes[b] => {}
                _ => best = Some(bin),
            }
        }

        best.map(|bin| DominantFrequency {
            frequency_hz: self.frequencies_hz[bin],
            magnitude: self.magnitudes[bin],
            bin,
        })
    }
}

/// FFT-based spectrum analyzer
pub struct SpectrumAnalyzer {
    sampling_rate_hz: f64,
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    pub fn new(sampling_rate_hz: f64) -> AccelResult<Self> {
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(AccelError::invalid_data(
                "sampling rate",
                format!("must be positive and finite, got {} Hz", sampling_rate_hz),
            ));
        }
        Ok(Self {
            sampling_rate_hz,
            planner: FftPlanner::new(),
        })
    }

    /// |X[k]| for the bins whose FFT frequency is non-negative
    pub fn spectrum(&mut self, signal: &[f64]) -> AccelResult<Spectrum> {
        if signal.is_empty() {
            return Err(AccelError::invalid_data("signal", "no samples to analyze"));
        }

        let n = signal.len();
        let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.planner.plan_fft_forward(n).process(&mut buffer);

        let positive_bins = (n + 1) / 2;
        let bin_width_hz = self.sampling_rate_hz / n as f64;

        Ok(Spectrum {
            frequencies_hz: (0..positive_bins).map(|k| k as f64 * bin_width_hz).collect(),
            magnitudes: buffer[..positive_bins].iter().map(|c| c.norm()).collect(),
        })
    }

    pub fn dominant_frequency(&mut self, signal: &[f64]) -> AccelResult<DominantFrequency> {
        let spectrum = self.spectrum(signal)?;
        let dominant = spectrum
            .dominant()
            .ok_or_else(|| AccelError::invalid_data("spectrum", "no bins"))?;

        tracing::debug!(
            samples = signal.len(),
            frequency_hz = dominant.frequency_hz,
            magnitude = dominant.magnitude,
            "found dominant frequency"
        );
        Ok(dominant)
    }
}
