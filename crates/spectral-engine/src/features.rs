//! Spectral Feature Tables

use dataframe::{Element, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dft::Transform;
use crate::error::SpectralError;
use crate::peaks::{PeakPicking, SpectralAnalyzer};

/// Attributes written per signal, in output column order
pub const FEATURE_ATTRIBUTES: [&str; 3] = ["Frequencies", "Amplitudes", "Phases"];

/// Spectral extraction configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    /// Sampling frequency of every column (Hz)
    pub sample_rate: f64,
    /// Number of bins extracted per signal
    pub features: usize,
    /// Transform used for the spectrum
    #[serde(default)]
    pub transform: Transform,
    /// Bin selection strategy
    #[serde(default)]
    pub peak_picking: PeakPicking,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            sample_rate: 100.0,
            features: 3,
            transform: Transform::Direct,
            peak_picking: PeakPicking::TopBins,
        }
    }
}

impl SpectralConfig {
    /// Config for `features` bins at `sample_rate`
    pub fn new(features: usize, sample_rate: f64) -> Self {
        Self {
            sample_rate,
            features,
            ..Default::default()
        }
    }

    /// Config that suppresses neighbouring bins of each reported peak
    pub fn distinct_peaks(features: usize, sample_rate: f64) -> Self {
        Self {
            peak_picking: PeakPicking::DistinctPeaks { guard_bins: 1 },
            ..Self::new(features, sample_rate)
        }
    }

    /// Build an analyzer from this config
    pub fn analyzer(&self) -> Result<SpectralAnalyzer, SpectralError> {
        Ok(SpectralAnalyzer::new(self.sample_rate)?
            .with_transform(self.transform)
            .with_peak_picking(self.peak_picking))
    }
}

/// Output labels for `signals` input columns
pub fn feature_labels(signals: usize) -> Vec<String> {
    (1..=signals)
        .flat_map(|signal| {
            FEATURE_ATTRIBUTES
                .iter()
                .map(move |attribute| format!("Signal {} {}", signal, attribute))
        })
        .collect()
}

fn to_cells<T: Element>(values: Vec<f64>) -> Vec<T> {
    values.into_iter().map(T::from_f64).collect()
}

/// Build a table of spectral features, one Frequencies/Amplitudes/Phases
/// column block per input column
///
/// The result has `config.features` rows and `3 * table.width()` columns.
pub fn spectral_table<T: Element>(
    table: &Table<T>,
    config: &SpectralConfig,
) -> Result<Table<T>, SpectralError> {
    let mut analyzer = config.analyzer()?;
    let signals = table.width();
    let mut output = Table::zeroed_with_headers(
        config.features,
        signals * FEATURE_ATTRIBUTES.len(),
        feature_labels(signals),
    )?;

    for (signal, block) in (0..signals).zip((0..output.width()).step_by(FEATURE_ATTRIBUTES.len())) {
        let samples: Vec<f64> = table
            .get_column(signal)?
            .into_iter()
            .map(Element::to_f64)
            .collect();
        let features = analyzer.extract(&samples, config.features)?;
        debug!("Signal {}: dominant {:?} Hz", signal + 1, features.dominant_frequency());

        output.refactor_column(block, to_cells(features.frequencies))?;
        output.refactor_column(block + 1, to_cells(features.amplitudes))?;
        output.refactor_column(block + 2, to_cells(features.phases))?;
    }

    info!(
        "Extracted {} spectral features from {} signals",
        config.features, signals
    );
    Ok(output)
}

/// Spectral feature extraction as a table method
pub trait SpectralExt<T: Element> {
    /// Features table for `n` bins per column at `sample_rate`
    fn dsp_data(&self, n: usize, sample_rate: f64) -> Result<Table<T>, SpectralError>;

    /// Features table under an explicit config
    fn dsp_data_with(&self, config: &SpectralConfig) -> Result<Table<T>, SpectralError>;
}

impl<T: Element> SpectralExt<T> for Table<T> {
    fn dsp_data(&self, n: usize, sample_rate: f64) -> Result<Table<T>, SpectralError> {
        spectral_table(self, &SpectralConfig::new(n, sample_rate))
    }

    fn dsp_data_with(&self, config: &SpectralConfig) -> Result<Table<T>, SpectralError> {
        spectral_table(self, config)
    }
}
