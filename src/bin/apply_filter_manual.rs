//! Causal dot-product filtering of the resampled accelerometer table

use accel_dsp::{logging, AccelResult, FilterMode, Pipeline};

fn run() -> AccelResult<()> {
    let pipeline = Pipeline::from_working_dir()?;
    let coeffs = pipeline.design()?;
    tracing::info!(
        "Causal output lags the input by {} samples",
        coeffs.group_delay_samples()
    );
    pipeline.apply_filter(FilterMode::Causal)?;
    tracing::info!("Manual filtering complete");
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        tracing::error!("Manual filtering failed: {}", e);
        std::process::exit(1);
    }
}
