//! accel-dsp: low-pass filtering and frequency analysis for two-axis accelerometer logs
//!
//! The library turns a jittered accelerometer log into filtered signals and
//! reports on the filter used to do it:
//!
//! - Windowed-sinc FIR low-pass design with unity DC gain
//! - Causal dot-product filtering and zero-phase forward-backward filtering
//! - Frequency response on a uniform grid with passband and stopband metrics
//! - Uniform-rate resampling and dominant-frequency detection
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use accel_dsp::config::FilterSpec;
//! use accel_dsp::processing::{Convolver, FilterDesigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coeffs = FilterDesigner::design(&FilterSpec::new(50.0, 10.0, 40))?;
//!
//!     let signal: Vec<f64> = (0..200).map(|i| (i as f64 * 0.1).sin()).collect();
//!     let filtered = Convolver::default().apply_zero_phase(&signal, &coeffs)?;
//!     assert_eq!(filtered.len(), signal.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod logging;
pub mod processing;
pub mod table;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, FilterSpec, PipelineConfig};
pub use error::{AccelError, AccelResult, Band, BandUnavailable};
pub use processing::{
    BandMetrics, CoefficientVector, Convolver, FilterDesigner, FilterMode, FilteredSignal, FrequencyResponse,
    FrequencyResponseAnalyzer, Pipeline,
};
pub use table::DataTable;
pub use types::Axis;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
