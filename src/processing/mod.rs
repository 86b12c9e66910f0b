// src/processing/mod.rs
//! Numeric core: FIR design, filtering, frequency analysis and resampling

pub mod analysis;
pub mod filters;
pub mod pipeline;
pub mod resample;
pub mod windowing;

pub use analysis::*;
pub use filters::*;
pub use pipeline::{FilterMode, Pipeline};
pub use resample::*;
pub use windowing::*;
