// src/processing/analysis/mod.rs
//! Frequency-domain characterization of filters and signals

pub mod frequency_response;
pub mod spectrum;

pub use frequency_response::*;
pub use spectrum::*;
