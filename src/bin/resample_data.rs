//! Resample the raw accelerometer log onto a uniform time grid

use accel_dsp::{logging, AccelResult, Pipeline};

fn run() -> AccelResult<()> {
    let pipeline = Pipeline::from_working_dir()?;
    let resampled = pipeline.resample()?;
    tracing::info!(
        "Wrote {} rows to {}",
        resampled.row_count(),
        pipeline.config().files.resampled_data
    );
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        tracing::error!("Resampling failed: {}", e);
        std::process::exit(1);
    }
}
