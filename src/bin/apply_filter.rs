//! Zero-phase low-pass filtering of the resampled accelerometer table

use accel_dsp::{logging, AccelResult, FilterMode, Pipeline};

fn run() -> AccelResult<()> {
    let pipeline = Pipeline::from_working_dir()?;
    pipeline.apply_filter(FilterMode::ZeroPhase)?;
    tracing::info!("Filtering complete");
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        tracing::error!("Filtering failed: {}", e);
        std::process::exit(1);
    }
}
