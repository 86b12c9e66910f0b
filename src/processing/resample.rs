// src/processing/resample.rs
//! Uniform-rate resampling by linear interpolation
//!
//! Raw logs store the time between samples rather than absolute time, and
//! that interval jitters. Resampling rebuilds absolute time and interpolates
//! both axes onto an evenly spaced grid.

use crate::config::constants::table::TIME_COLUMN;
use crate::config::processing_config::ResampleConfig;
use crate::error::{AccelError, AccelResult};
use crate::table::DataTable;
use crate::types::Axis;

/// Running total, turning per-sample deltas into absolute times
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// `start, start + step, ...` strictly below `end`
pub fn arange(start: f64, end: f64, step: f64) -> AccelResult<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(AccelError::invalid_data("step", format!("must be positive, got {}", step)));
    }
    if !(start.is_finite() && end.is_finite()) {
        return Err(AccelError::invalid_data("range", "bounds must be finite"));
    }
    if end <= start {
        return Ok(Vec::new());
    }

    let count = ((end - start) / step).ceil() as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// Piecewise-linear interpolation of `(xp, fp)` at each `x`
///
/// Points outside `[xp[0], xp[last]]` take the nearest end value. `xp` must
/// be non-decreasing.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> AccelResult<Vec<f64>> {
    if xp.is_empty() {
        return Err(AccelError::invalid_data("interpolation table", "no sample points"));
    }
    if xp.len() != fp.len() {
        return Err(AccelError::invalid_data(
            "interpolation table",
            format!("{} sample points but {} values", xp.len(), fp.len()),
        ));
    }
    if let Some(i) = xp.windows(2).position(|w| w[1] < w[0]) {
        return Err(AccelError::invalid_data(
            "interpolation table",
            format!("sample points decrease at index {}", i + 1),
        ));
    }

    let last = xp.len() - 1;
    Ok(x
        .iter()
        .map(|&xi| {
            if xi <= xp[0] {
                return fp[0];
            }
            if xi >= xp[last] {
                return fp[last];
            }
            // First index with xp[j] > xi; xp[j - 1] <= xi < xp[j]
            let j = xp.partition_point(|&v| v <= xi);
            let (x0, x1) = (xp[j - 1], xp[j]);
            let (y0, y1) = (fp[j - 1], fp[j]);
            y0 + (y1 - y0) * (xi - x0) / (x1 - x0)
        })
        .collect())
}

/// Resamples a raw table onto a uniform time grid
#[derive(Debug, Clone)]
pub struct Resampler {
    target_rate_hz: f64,
}

impl Resampler {
    pub fn new(config: &ResampleConfig) -> AccelResult<Self> {
        if !(config.target_rate_hz.is_finite() && config.target_rate_hz > 0.0) {
            return Err(AccelError::invalid_data(
                "target rate",
                format!("must be positive, got {} Hz", config.target_rate_hz),
            ));
        }
        Ok(Self {
            target_rate_hz: config.target_rate_hz,
        })
    }

    pub fn target_period(&self) -> f64 {
        1.0 / self.target_rate_hz
    }

    /// Table with absolute `time`, `xaccel` and `yaccel` at the target rate
    ///
    /// The input `time` column holds per-sample deltas.
    pub fn resample(&self, raw: &DataTable) -> AccelResult<DataTable> {
        let deltas = raw.column(TIME_COLUMN)?;
        if deltas.is_empty() {
            return Err(AccelError::invalid_data("table", "no rows to resample"));
        }

        let original_time = cumulative_sum(deltas);
        let start = original_time[0];
        let end = original_time[original_time.len() - 1];
        let target_time = arange(start, end, self.target_period())?;

        tracing::info!(
            input_rows = raw.row_count(),
            output_rows = target_time.len(),
            target_rate_hz = self.target_rate_hz,
            "resampling to uniform grid"
        );

        let mut resampled = DataTable::new();
        resampled.push_column(TIME_COLUMN, target_time.clone())?;
        for axis in Axis::ALL {
            let values = interp(&target_time, &original_time, raw.column(axis.column())?)?;
            resampled.push_column(axis.column(), values)?;
        }
        Ok(resampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_sum() {
        assert_eq!(cumulative_sum(&[0.5, 0.25, 0.25]), vec![0.5, 0.75, 1.0]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    #[test]
    fn test_arange_excludes_end() {
        assert_eq!(arange(0.0, 1.0, 0.25).unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(arange(0.0, 0.9, 0.25).unwrap().len(), 4);
        assert!(arange(1.0, 1.0, 0.1).unwrap().is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_interp_linear_and_clamped() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [0.0, 10.0, 0.0];
        let y = interp(&[-1.0, 0.0, 0.5, 1.0, 1.5, 2.0, 3.0], &xp, &fp).unwrap();
        assert_eq!(y, vec![0.0, 0.0, 5.0, 10.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_interp_rejects_bad_tables() {
        assert!(interp(&[0.0], &[], &[]).is_err());
        assert!(interp(&[0.0], &[0.0, 1.0], &[1.0]).is_err());
        assert!(interp(&[0.0], &[1.0, 0.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_resample_ramp() {
        let mut raw = DataTable::new();
        // Jittered deltas, absolute times 0.0, 0.03, 0.05, 0.09, 0.1
        raw.push_column("time", vec![0.0, 0.03, 0.02, 0.04, 0.01]).unwrap();
        let times = cumulative_sum(raw.column("time").unwrap());
        raw.push_column("xaccel", times.iter().map(|t| 2.0 * t).collect()).unwrap();
        raw.push_column("yaccel", times.iter().map(|t| 1.0 - t).collect()).unwrap();

        let resampler = Resampler::new(&ResampleConfig { target_rate_hz: 50.0 }).unwrap();
        let resampled = resampler.resample(&raw).unwrap();

        let time = resampled.column("time").unwrap();
        assert_eq!(time.len(), 5);
        for (i, &t) in time.iter().enumerate() {
            assert!((t - i as f64 * 0.02).abs() < 1e-12);
            assert!((resampled.column("xaccel").unwrap()[i] - 2.0 * t).abs() < 1e-12);
            assert!((resampled.column("yaccel").unwrap()[i] - (1.0 - t)).abs() < 1e-12);
        }
    }
}
