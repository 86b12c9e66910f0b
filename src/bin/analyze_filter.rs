//! Frequency response and band metrics of the configured low-pass filter

use accel_dsp::{logging, AccelResult, Pipeline};

fn run() -> AccelResult<()> {
    let pipeline = Pipeline::from_working_dir()?;
    let analysis = pipeline.analyze_filter()?;
    let response = &analysis.response;

    if let (Some(first), Some(last)) = (response.frequencies_hz().first(), response.frequencies_hz().last()) {
        tracing::info!(
            "Evaluated {} points from {:.3} Hz to {:.3} Hz",
            response.len(),
            first,
            last
        );
    }
    if !analysis.metrics.is_complete() {
        tracing::warn!("Some band metrics were unavailable");
    }
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        tracing::error!("Filter analysis failed: {}", e);
        std::process::exit(1);
    }
}
