//! Dominant frequency of each acceleration axis

use accel_dsp::{logging, AccelResult, Pipeline};

fn run() -> AccelResult<()> {
    let pipeline = Pipeline::from_working_dir()?;
    for (axis, dominant) in pipeline.analyze_frequency()? {
        println!("{}: {:.2} Hz (Magnitude: {:.2})", axis, dominant.frequency_hz, dominant.magnitude);
    }
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        tracing::error!("Frequency analysis failed: {}", e);
        std::process::exit(1);
    }
}
