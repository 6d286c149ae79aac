//! Spectral Error Types

use dataframe::TableError;
use thiserror::Error;

/// Errors during spectral feature extraction
#[derive(Debug, Error)]
pub enum SpectralError {
    /// Sample rate must be finite and positive
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f64),

    /// More features requested than the half spectrum holds
    #[error("Requested {requested} spectral bins but only {available} are available")]
    NotEnoughBins { requested: usize, available: usize },

    /// Underlying table operation failed
    #[error(transparent)]
    Table(#[from] TableError),
}
