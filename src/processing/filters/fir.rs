// src/processing/filters/fir.rs
//! FIR (Finite Impulse Response) low-pass design by the window method

use std::f64::consts::PI;
use std::ops::Deref;

use crate::config::constants::filter::{MIN_RECOMMENDED_ORDER, SYMMETRY_TOLERANCE};
use crate::config::processing_config::FilterSpec;
use crate::error::{AccelError, AccelResult};
use crate::processing::windowing::generate_window;

/// Immutable FIR taps produced by [`FilterDesigner`]
///
/// The taps are symmetric and sum to one, so the filter is linear-phase
/// with unity gain at DC.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVector {
    taps: Vec<f64>,
}

impl CoefficientVector {
    /// Wrap externally supplied taps
    pub fn from_taps(taps: Vec<f64>) -> AccelResult<Self> {
        if taps.is_empty() {
            return Err(AccelError::invalid_spec("coefficient vector must not be empty"));
        }
        if taps.iter().any(|t| !t.is_finite()) {
            return Err(AccelError::invalid_spec("coefficient vector contains non-finite taps"));
        }
        Ok(Self { taps })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.taps
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    pub fn order(&self) -> usize {
        self.taps.len() - 1
    }

    /// Delay in samples of the causal form, `(num_taps - 1) / 2`
    pub fn group_delay_samples(&self) -> f64 {
        self.order() as f64 / 2.0
    }

    /// Sum of taps, the gain at 0 Hz
    pub fn dc_gain(&self) -> f64 {
        self.taps.iter().sum()
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.taps.len();
        (0..n / 2).all(|i| (self.taps[i] - self.taps[n - 1 - i]).abs() <= tolerance)
    }

    /// Taps in reverse order, `reversed[0]` multiplies the oldest sample
    pub fn reversed(&self) -> Vec<f64> {
        self.taps.iter().rev().copied().collect()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.taps
    }
}

impl Deref for CoefficientVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.taps
    }
}

/// Windowed-sinc low-pass designer
pub struct FilterDesigner;

impl FilterDesigner {
    /// Design `spec.order + 1` taps with unity DC gain
    ///
    /// Order 0 degenerates to the single tap `[1.0]`, an identity filter.
    pub fn design(spec: &FilterSpec) -> AccelResult<CoefficientVector> {
        Self::validate(spec)?;

        let num_taps = spec.num_taps();
        let cutoff = spec.normalized_cutoff();
        let center = (num_taps - 1) as f64 / 2.0;
        let window = generate_window(spec.window, num_taps);

        let mut taps: Vec<f64> = window
            .iter()
            .enumerate()
            .map(|(k, &w)| {
                let m = k as f64 - center;
                cutoff * sinc(cutoff * m) * w
            })
            .collect();

        let sum: f64 = taps.iter().sum();
        if sum.abs() < f64::EPSILON {
            return Err(AccelError::invalid_spec("windowed taps sum to zero, cannot normalize"));
        }
        taps.iter_mut().for_each(|t| *t /= sum);

        tracing::debug!(
            sampling_rate_hz = spec.sampling_rate_hz,
            cutoff_hz = spec.cutoff_hz,
            num_taps,
            window = ?spec.window,
            "designed FIR low-pass"
        );

        let coeffs = CoefficientVector { taps };
        debug_assert!(coeffs.is_symmetric(SYMMETRY_TOLERANCE));
        Ok(coeffs)
    }

    fn validate(spec: &FilterSpec) -> AccelResult<()> {
        if !(spec.sampling_rate_hz.is_finite() && spec.sampling_rate_hz > 0.0) {
            return Err(AccelError::invalid_spec(format!(
                "sampling rate must be positive and finite, got {} Hz",
                spec.sampling_rate_hz
            )));
        }
        if !spec.cutoff_hz.is_finite() || spec.cutoff_hz <= 0.0 {
            return Err(AccelError::invalid_spec(format!(
                "cutoff must be positive, got {} Hz",
                spec.cutoff_hz
            )));
        }
        if spec.cutoff_hz >= spec.nyquist_hz() {
            return Err(AccelError::invalid_spec(format!(
                "cutoff {} Hz must be below Nyquist ({} Hz)",
                spec.cutoff_hz,
                spec.nyquist_hz()
            )));
        }

        if spec.order % 2 == 1 {
            tracing::warn!(order = spec.order, "odd order gives a Type-II filter with half-sample delay");
        } else if spec.order < MIN_RECOMMENDED_ORDER {
            tracing::warn!(order = spec.order, "order below {} gives an identity filter", MIN_RECOMMENDED_ORDER);
        }
        Ok(())
    }
}

/// Normalized sinc, `sin(pi x) / (pi x)`
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}
