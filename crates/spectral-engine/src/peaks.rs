//! Spectral Peak Extraction

use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dft::{discrete_fourier_transform, fast_fourier_transform, frequency_axis, Transform};
use crate::error::SpectralError;

/// Strategy for choosing which bins to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PeakPicking {
    /// Greedy top-N bins by magnitude; neighbouring bins of one wide line may
    /// take several slots
    #[default]
    TopBins,
    /// Top-N bins where each pick suppresses `guard_bins` neighbours on
    /// either side, falling back to suppressed bins once nothing else remains
    DistinctPeaks { guard_bins: usize },
}

/// Frequencies, amplitudes and phases of the selected bins, strongest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    /// Bin frequencies (Hz)
    pub frequencies: Vec<f64>,
    /// Normalised bin magnitudes
    pub amplitudes: Vec<f64>,
    /// Bin phases (radians, `atan2(im, re)`)
    pub phases: Vec<f64>,
}

impl SpectralFeatures {
    /// Number of extracted bins
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether no bins were extracted
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the strongest bin
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.frequencies.first().copied()
    }
}

/// First index of the largest magnitude among bins accepted by `allowed`
fn argmax(magnitudes: &[f64], allowed: impl Fn(usize) -> bool) -> Option<usize> {
    magnitudes
        .iter()
        .enumerate()
        .filter(|&(i, _)| allowed(i))
        .fold(None, |best: Option<(usize, f64)>, (i, &m)| match best {
            Some((_, top)) if top >= m => best,
            _ => Some((i, m)),
        })
        .map(|(i, _)| i)
}

/// Choose `n` distinct bins. `n` must not exceed `magnitudes.len()`.
fn pick_bins(magnitudes: &[f64], n: usize, picking: PeakPicking) -> Vec<usize> {
    let mut taken = vec![false; magnitudes.len()];
    let mut suppressed = vec![false; magnitudes.len()];
    let mut bins = Vec::with_capacity(n);

    for _ in 0..n {
        let pick = argmax(magnitudes, |i| !taken[i] && !suppressed[i])
            .or_else(|| argmax(magnitudes, |i| !taken[i]));
        let Some(bin) = pick else { break };

        taken[bin] = true;
        if let PeakPicking::DistinctPeaks { guard_bins } = picking {
            let lo = bin.saturating_sub(guard_bins);
            let hi = (bin + guard_bins).min(magnitudes.len() - 1);
            suppressed[lo..=hi].iter_mut().for_each(|s| *s = true);
        }
        bins.push(bin);
    }
    bins
}

/// Extracts the strongest spectral bins from uniformly sampled signals
pub struct SpectralAnalyzer {
    /// FFT planner, used when `transform` is `Fast`
    planner: FftPlanner<f64>,
    /// Sampling frequency (Hz)
    sample_rate: f64,
    transform: Transform,
    peak_picking: PeakPicking,
}

impl SpectralAnalyzer {
    /// Create an analyzer using the direct DFT and greedy bin selection
    pub fn new(sample_rate: f64) -> Result<Self, SpectralError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectralError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            planner: FftPlanner::new(),
            sample_rate,
            transform: Transform::default(),
            peak_picking: PeakPicking::default(),
        })
    }

    /// Use a different transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Use a different bin selection strategy
    pub fn with_peak_picking(mut self, peak_picking: PeakPicking) -> Self {
        self.peak_picking = peak_picking;
        self
    }

    /// Sampling frequency (Hz)
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Normalised spectrum of `signal`; NaN samples are read as zero
    pub fn spectrum(&mut self, signal: &[f64]) -> Vec<Complex<f64>> {
        let cleaned: Vec<f64> = signal
            .iter()
            .map(|&v| if v.is_nan() { 0.0 } else { v })
            .collect();

        match self.transform {
            Transform::Direct => discrete_fourier_transform(&cleaned),
            Transform::Fast => fast_fourier_transform(&mut self.planner, &cleaned),
        }
    }

    /// Extract the `n` strongest bins from the positive half of the spectrum
    pub fn extract(&mut self, signal: &[f64], n: usize) -> Result<SpectralFeatures, SpectralError> {
        let available = signal.len() / 2;
        if n > available {
            return Err(SpectralError::NotEnoughBins {
                requested: n,
                available,
            });
        }
        if n == 0 {
            return Ok(SpectralFeatures::default());
        }

        let axis = frequency_axis(signal.len(), self.sample_rate);
        let spectrum = self.spectrum(signal);
        let magnitudes: Vec<f64> = spectrum[..available].par_iter().map(|c| c.norm()).collect();
        let bins = pick_bins(&magnitudes, n, self.peak_picking);

        debug!(
            "Extracted {} of {} bins ({:?}, {:?})",
            bins.len(),
            available,
            self.transform,
            self.peak_picking
        );

        Ok(SpectralFeatures {
            frequencies: bins.iter().map(|&b| axis[b]).collect(),
            amplitudes: bins.iter().map(|&b| magnitudes[b]).collect(),
            phases: bins.iter().map(|&b| spectrum[b].im.atan2(spectrum[b].re)).collect(),
        })
    }
}
