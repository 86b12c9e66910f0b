// src/processing/pipeline.rs
//! File-to-file processing stages
//!
//! Each stage reads one table from disk, runs one transform and writes its
//! result, so stages can be rerun independently.

use crate::config::constants::table::REQUIRED_COLUMNS;
use crate::config::{ConfigLoader, PipelineConfig};
use crate::error::{AccelError, AccelResult};
use crate::processing::analysis::{DominantFrequency, FilterAnalysis, FrequencyResponseAnalyzer, SpectrumAnalyzer};
use crate::processing::filters::{CoefficientVector, Convolver, FilterDesigner};
use crate::processing::resample::Resampler;
use crate::table::DataTable;
use crate::types::Axis;

/// How filtered columns are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Forward-backward filtering, written as `<axis>_filtered`
    ZeroPhase,
    /// Causal dot-product filtering, written as `<axis>_filtered_manual_dot`
    Causal,
}

impl FilterMode {
    pub fn column(&self, axis: Axis) -> String {
        match self {
            FilterMode::ZeroPhase => axis.filtered_column(),
            FilterMode::Causal => axis.manual_filtered_column(),
        }
    }
}

/// Runs the processing stages against the configured files
pub struct Pipeline {
    config: PipelineConfig,
    convolver: Convolver,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> AccelResult<Self> {
        config.validate()?;
        let convolver = Convolver::new(&config.convolution);
        Ok(Self { config, convolver })
    }

    /// Pipeline configured from `accel_dsp.toml` when present, defaults otherwise
    pub fn from_working_dir() -> AccelResult<Self> {
        Self::new(ConfigLoader::new().load()?)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn design(&self) -> AccelResult<CoefficientVector> {
        let spec = &self.config.filter;
        tracing::info!(
            "Designing FIR low-pass filter: fs={}Hz, cutoff={}Hz, numtaps={}, window={:?}",
            spec.sampling_rate_hz,
            spec.cutoff_hz,
            spec.num_taps(),
            spec.window
        );
        let coeffs = FilterDesigner::design(spec)?;
        tracing::info!("Filter coefficients (first 5): {:?}", &coeffs[..coeffs.num_taps().min(5)]);
        Ok(coeffs)
    }

    /// Raw log to uniformly sampled table
    pub fn resample(&self) -> AccelResult<DataTable> {
        let files = &self.config.files;
        tracing::info!("Loading data from {}", files.raw_data);
        let raw = DataTable::read_tsv(&files.raw_data)?;
        raw.require_columns(&REQUIRED_COLUMNS)?;

        let resampled = Resampler::new(&self.config.resample)?.resample(&raw)?;

        tracing::info!("Saving resampled data to {}", files.resampled_data);
        resampled.write_tsv(&files.resampled_data)?;

        let verify = DataTable::read_tsv(&files.resampled_data)?;
        if verify.row_count() != resampled.row_count() {
            return Err(AccelError::invalid_data(
                "resampled table",
                format!("wrote {} rows but read back {}", resampled.row_count(), verify.row_count()),
            ));
        }
        tracing::info!("Resampling complete, {} points", resampled.row_count());
        Ok(resampled)
    }

    /// Append a filtered column per axis
    ///
    /// Zero-phase output keeps every input column; causal output keeps only
    /// the required columns ahead of the filtered ones.
    pub fn filter_table(&self, table: &DataTable, coeffs: &CoefficientVector, mode: FilterMode) -> AccelResult<DataTable> {
        table.require_columns(&REQUIRED_COLUMNS)?;

        let mut output = match mode {
            FilterMode::ZeroPhase => table.clone(),
            FilterMode::Causal => table.select(&REQUIRED_COLUMNS)?,
        };

        for axis in Axis::ALL {
            let signal = table.column(axis.column())?;
            let filtered = match mode {
                FilterMode::ZeroPhase => self.convolver.apply_zero_phase(signal, coeffs)?,
                FilterMode::Causal => self.convolver.apply_causal(signal, coeffs)?,
            };
            output.push_column(&mode.column(axis), filtered.into_samples())?;
        }
        Ok(output)
    }

    /// Resampled table to filtered table
    pub fn apply_filter(&self, mode: FilterMode) -> AccelResult<DataTable> {
        let files = &self.config.files;
        tracing::info!("Loading resampled data from {}", files.resampled_data);
        let table = DataTable::read_tsv(&files.resampled_data)?;

        let coeffs = self.design()?;
        let filtered = self.filter_table(&table, &coeffs, mode)?;

        let output_path = match mode {
            FilterMode::ZeroPhase => &files.filtered_data,
            FilterMode::Causal => &files.manual_filtered_data,
        };
        tracing::info!("Saving filtered data to {}", output_path);
        filtered.write_tsv(output_path)?;
        Ok(filtered)
    }

    /// Design the filter and measure its response
    pub fn analyze_filter(&self) -> AccelResult<FilterAnalysis> {
        let coeffs = self.design()?;
        let analyzer = FrequencyResponseAnalyzer::from_spec(&self.config.filter)?;
        let analysis = analyzer.analyze(&coeffs, &self.config.analysis)?;

        match &analysis.metrics.passband {
            Ok(pass) => tracing::info!(
                "Passband (<= {} Hz): max {:.4} dB, min {:.4} dB, ripple {:.4} dB",
                self.config.analysis.passband_limit_hz,
                pass.max_db,
                pass.min_db,
                pass.ripple_db
            ),
            Err(reason) => tracing::info!("Skipping passband metrics: {}", reason),
        }
        match &analysis.metrics.stopband {
            Ok(stop) => tracing::info!(
                "Stopband (>= {} Hz): minimum attenuation {:.2} dB",
                self.config.analysis.stopband_start_hz,
                stop.min_attenuation_db
            ),
            Err(reason) => tracing::info!("Skipping stopband metrics: {}", reason),
        }
        Ok(analysis)
    }

    /// Dominant non-DC frequency of each axis in the resampled table
    pub fn analyze_frequency(&self) -> AccelResult<Vec<(Axis, DominantFrequency)>> {
        let files = &self.config.files;
        tracing::info!("Loading resampled data from {}", files.resampled_data);
        let table = DataTable::read_tsv(&files.resampled_data)?;

        let mut analyzer = SpectrumAnalyzer::new(self.config.filter.sampling_rate_hz)?;
        tracing::info!(
            "Analyzing {} samples with Fs = {} Hz",
            table.row_count(),
            self.config.filter.sampling_rate_hz
        );

        Axis::ALL
            .iter()
            .map(|&axis| -> AccelResult<(Axis, DominantFrequency)> {
                let dominant = analyzer.dominant_frequency(table.column(axis.column())?)?;
                tracing::info!(
                    "{}: {:.2} Hz (Magnitude: {:.2})",
                    axis,
                    dominant.frequency_hz,
                    dominant.magnitude
                );
                Ok((axis, dominant))
            })
            .collect()
    }
}
