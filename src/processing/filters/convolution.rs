// src/processing/filters/convolution.rs
//! Applying FIR coefficients to a whole signal
//!
//! The causal form is the textbook `y[n] = sum_k h[k] x[n-k]`, evaluated as
//! a dot product between the reversed taps and a window of the left
//! zero-padded signal. Output sample `n` therefore depends only on inputs
//! `0..=n` and lags the ideal filtered signal by `(num_taps - 1) / 2`.
//!
//! The zero-phase form runs the causal filter forward then backward over an
//! edge-extended copy, cancelling the delay and squaring the magnitude
//! response.

use ndarray::{s, Array1};
use rustfft::{num_complex::Complex, FftPlanner};

use super::fir::CoefficientVector;
use crate::config::constants::convolution::FFT_TAP_THRESHOLD;
use crate::config::processing_config::{CausalMethod, ConvolutionConfig, PadType};
use crate::error::{AccelError, AccelResult};

/// Phase behaviour of a [`FilteredSignal`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterPhase {
    /// Output lags the input by a constant number of samples
    Causal { group_delay_samples: f64 },
    /// Forward-backward filtered, no net delay
    ZeroPhase,
}

/// Filter output, same length as its input
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSignal {
    pub samples: Vec<f64>,
    pub phase: FilterPhase,
}

impl FilteredSignal {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Delay relative to the input in samples, zero for zero-phase output
    pub fn delay_samples(&self) -> f64 {
        match self.phase {
            FilterPhase::Causal { group_delay_samples } => group_delay_samples,
            FilterPhase::ZeroPhase => 0.0,
        }
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Applies a [`CoefficientVector`] with the configured strategy
#[derive(Debug, Clone, Default)]
pub struct Convolver {
    config: ConvolutionConfig,
}

impl Convolver {
    pub fn new(config: &ConvolutionConfig) -> Self {
        Self { config: config.clone() }
    }

    pub fn config(&self) -> &ConvolutionConfig {
        &self.config
    }

    /// Causal filtering with left zero padding
    pub fn apply_causal(&self, signal: &[f64], coeffs: &CoefficientVector) -> AccelResult<FilteredSignal> {
        let samples = match self.config.causal_method {
            CausalMethod::Direct => convolve_direct(signal, coeffs),
            CausalMethod::Fft => convolve_fft(signal, coeffs),
            CausalMethod::Auto => convolve_auto(signal, coeffs),
        };
        tracing::debug!(
            samples = signal.len(),
            num_taps = coeffs.num_taps(),
            method = ?self.config.causal_method,
            "applied causal FIR"
        );

        Ok(FilteredSignal {
            samples,
            phase: FilterPhase::Causal {
                group_delay_samples: coeffs.group_delay_samples(),
            },
        })
    }

    /// Forward-backward filtering over an edge-extended signal
    ///
    /// The signal must be strictly longer than the padding. With the
    /// default padding of `order` samples that means at least `num_taps`
    /// samples.
    pub fn apply_zero_phase(&self, signal: &[f64], coeffs: &CoefficientVector) -> AccelResult<FilteredSignal> {
        let pad_len = match self.config.pad_type {
            PadType::None => 0,
            _ => self.config.pad_len.unwrap_or_else(|| coeffs.order()),
        };

        if signal.is_empty() || signal.len() <= pad_len {
            return Err(AccelError::InsufficientSignalLength {
                required: pad_len + 1,
                actual: signal.len(),
            });
        }

        let extended = extend_edges(signal, pad_len, self.config.pad_type);
        let zi = lfilter_zi(coeffs);

        let forward_state: Vec<f64> = zi.iter().map(|z| z * extended[0]).collect();
        let mut forward = lfilter(coeffs, &extended, Some(forward_state.as_slice()));
        forward.reverse();

        let backward_state: Vec<f64> = zi.iter().map(|z| z * forward[0]).collect();
        let mut backward = lfilter(coeffs, &forward, Some(backward_state.as_slice()));
        backward.reverse();

        let samples = backward[pad_len..pad_len + signal.len()].to_vec();
        tracing::debug!(
            samples = signal.len(),
            num_taps = coeffs.num_taps(),
            pad_len,
            pad_type = ?self.config.pad_type,
            "applied zero-phase FIR"
        );

        Ok(FilteredSignal {
            samples,
            phase: FilterPhase::ZeroPhase,
        })
    }
}

/// Causal convolution picking the cheaper evaluation for the tap count
pub fn convolve_auto(signal: &[f64], coeffs: &CoefficientVector) -> Vec<f64> {
    if coeffs.num_taps() > FFT_TAP_THRESHOLD {
        convolve_fft(signal, coeffs)
    } else {
        convolve_direct(signal, coeffs)
    }
}

/// Reversed-coefficient dot product over the left zero-padded signal
pub fn convolve_direct(signal: &[f64], coeffs: &CoefficientVector) -> Vec<f64> {
    let n_coeffs = coeffs.num_taps();
    let reversed = Array1::from(coeffs.reversed());

    let mut padded = Array1::<f64>::zeros(signal.len() + n_coeffs - 1);
    padded
        .slice_mut(s![n_coeffs - 1..])
        .assign(&Array1::from(signal.to_vec()));

    (0..signal.len())
        .map(|n| padded.slice(s![n..n + n_coeffs]).dot(&reversed))
        .collect()
}

/// Same output as [`convolve_direct`], computed through the FFT
pub fn convolve_fft(signal: &[f64], coeffs: &CoefficientVector) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let full_len = signal.len() + coeffs.num_taps() - 1;
    let fft_len = full_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(fft_len);
    let inverse = planner.plan_fft_inverse(fft_len);

    let mut x = to_complex_padded(signal, fft_len);
    let mut h = to_complex_padded(coeffs.as_slice(), fft_len);
    forward.process(&mut x);
    forward.process(&mut h);

    for (xv, hv) in x.iter_mut().zip(h.iter()) {
        *xv *= *hv;
    }
    inverse.process(&mut x);

    let scale = 1.0 / fft_len as f64;
    x.iter().take(signal.len()).map(|c| c.re * scale).collect()
}

/// Nested-loop `y[n] = sum_k h[k] x[n-k]`, the reference the fast paths are checked against
pub fn convolve_naive(signal: &[f64], coeffs: &[f64]) -> Vec<f64> {
    let mut output = vec![0.0; signal.len()];
    for (n, out) in output.iter_mut().enumerate() {
        for (k, &h) in coeffs.iter().enumerate() {
            if k > n {
                break;
            }
            *out += h * signal[n - k];
        }
    }
    output
}

/// FIR filtering with an explicit initial delay line
///
/// Transposed direct form; `state` holds `num_taps - 1` values and
/// defaults to zeros, which reproduces [`convolve_direct`].
pub fn lfilter(coeffs: &CoefficientVector, signal: &[f64], state: Option<&[f64]>) -> Vec<f64> {
    let b = coeffs.as_slice();
    let order = b.len() - 1;
    let mut z = match state {
        Some(initial) => {
            let mut z = initial.to_vec();
            z.resize(order, 0.0);
            z
        }
        None => vec![0.0; order],
    };

    let mut output = Vec::with_capacity(signal.len());
    for &x in signal {
        let y = b[0] * x + z.first().copied().unwrap_or(0.0);
        for k in 0..order {
            let next = if k + 1 < order { z[k + 1] } else { 0.0 };
            z[k] = b[k + 1] * x + next;
        }
        output.push(y);
    }
    output
}

/// Delay-line state of a filter in steady state under a unit step
///
/// Scaling it by the first sample starts [`lfilter`] as if the signal had
/// always held that value, which removes the start-up transient.
pub fn lfilter_zi(coeffs: &CoefficientVector) -> Vec<f64> {
    let b = coeffs.as_slice();
    (1..b.len()).map(|k| b[k..].iter().sum()).collect()
}

/// Extend both ends of `signal` by `pad_len` samples
pub fn extend_edges(signal: &[f64], pad_len: usize, pad_type: PadType) -> Vec<f64> {
    if pad_len == 0 || signal.is_empty() {
        return signal.to_vec();
    }

    let first = signal[0];
    let last = signal[signal.len() - 1];
    let n = signal.len();
    let mut extended = Vec::with_capacity(n + 2 * pad_len);

    match pad_type {
        PadType::Odd => {
            extended.extend((1..=pad_len).rev().map(|i| 2.0 * first - signal[i]));
            extended.extend_from_slice(signal);
            extended.extend((1..=pad_len).map(|i| 2.0 * last - signal[n - 1 - i]));
        }
        PadType::Even => {
            extended.extend((1..=pad_len).rev().map(|i| signal[i]));
            extended.extend_from_slice(signal);
            extended.extend((1..=pad_len).map(|i| signal[n - 1 - i]));
        }
        PadType::Constant => {
            extended.extend(std::iter::repeat(first).take(pad_len));
            extended.extend_from_slice(signal);
            extended.extend(std::iter::repeat(last).take(pad_len));
        }
        PadType::None => extended.extend_from_slice(signal),
    }
    extended
}

fn to_complex_padded(values: &[f64], len: usize) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v, 0.0)).collect();
    buffer.resize(len, Complex::new(0.0, 0.0));
    buffer
}
