//! Spectral Feature Engine
//!
//! Moves table columns into the frequency domain and extracts the strongest
//! bins of each as frequency, amplitude and phase columns.

mod dft;
mod error;
mod features;
mod peaks;

pub use dft::{discrete_fourier_transform, fast_fourier_transform, frequency_axis, Transform};
pub use error::SpectralError;
pub use features::{feature_labels, spectral_table, SpectralConfig, SpectralExt, FEATURE_ATTRIBUTES};
pub use peaks::{PeakPicking, SpectralAnalyzer, SpectralFeatures};
