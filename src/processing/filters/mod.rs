// src/processing/filters/mod.rs
//! FIR filter design and application

pub mod convolution;
pub mod fir;

pub use convolution::*;
pub use fir::*;
