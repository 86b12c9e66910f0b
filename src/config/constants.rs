// src/config/constants.rs
//! System-wide configuration constants

/// FIR design defaults shared by every binary
pub mod filter {
    pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 50.0;
    pub const DEFAULT_CUTOFF_HZ: f64 = 10.0;
    pub const DEFAULT_ORDER: usize = 40;
    pub const MIN_RECOMMENDED_ORDER: usize = 2;

    /// Tolerance used when checking coefficient symmetry
    pub const SYMMETRY_TOLERANCE: f64 = 1e-12;
}

/// Frequency response analysis defaults
pub mod analysis {
    pub const DEFAULT_GRID_SIZE: usize = 8000;
    pub const DEFAULT_PASSBAND_LIMIT_HZ: f64 = 8.0;
    pub const DEFAULT_STOPBAND_START_HZ: f64 = 12.0;
}

/// Convolution strategy thresholds
pub mod convolution {
    /// Above this many taps the FFT path is cheaper than the direct sum
    pub const FFT_TAP_THRESHOLD: usize = 64;
}

/// Resampling defaults
pub mod resample {
    pub const DEFAULT_TARGET_RATE_HZ: f64 = 50.0;
}

/// Table layout
pub mod table {
    pub const DELIMITER: u8 = b'\t';
    pub const FLOAT_PRECISION: usize = 9;

    pub const TIME_COLUMN: &str = "time";
    pub const X_COLUMN: &str = "xaccel";
    pub const Y_COLUMN: &str = "yaccel";
    pub const REQUIRED_COLUMNS: [&str; 3] = [TIME_COLUMN, X_COLUMN, Y_COLUMN];

    pub const FILTERED_SUFFIX: &str = "_filtered";
    pub const MANUAL_FILTERED_SUFFIX: &str = "_filtered_manual_dot";
}

/// Default file locations, relative to the working directory
pub mod paths {
    pub const CONFIG_FILE: &str = "accel_dsp.toml";
    pub const RAW_DATA_FILE: &str = "datates.txt";
    pub const RESAMPLED_DATA_FILE: &str = "resampled_data.txt";
    pub const FILTERED_DATA_FILE: &str = "filtered_data.txt";
    pub const MANUAL_FILTERED_DATA_FILE: &str = "filtered_data_manual_dot.txt";
}
