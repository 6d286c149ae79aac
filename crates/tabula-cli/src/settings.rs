//! Layered Application Configuration

use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File};
use dataframe::ReaderOptions;
use serde::{Deserialize, Serialize};
use spectral_engine::SpectralConfig;

/// Prefix of environment variable overrides, e.g. `TABULA_LOG_LEVEL`
pub const ENV_PREFIX: &str = "TABULA";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum log level (`error` through `trace`)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// How input files are read
    pub reader: ReaderOptions,
    /// Spectral extraction defaults for `dsp`
    pub spectral: SpectralConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            reader: ReaderOptions::default(),
            spectral: SpectralConfig::default(),
        }
    }
}

/// Load configuration: built-in defaults, then the optional file at `path`,
/// then `TABULA_*` environment variables (`__` separates nested keys).
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to load configuration")?;

    settings
        .try_deserialize()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral_engine::{PeakPicking, Transform};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.reader.delimiter, b',');
        assert!(config.reader.has_header);
        assert_eq!(config.spectral.features, 3);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[reader]
delimiter = 59
has_header = false

[spectral]
sample_rate = 256.0
features = 5
transform = "fast"
peak_picking = {{ mode = "distinct_peaks", guard_bins = 2 }}
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.reader.delimiter, b';');
        assert!(!config.reader.has_header);
        assert_eq!(config.spectral.sample_rate, 256.0);
        assert_eq!(config.spectral.features, 5);
        assert_eq!(config.spectral.transform, Transform::Fast);
        assert_eq!(
            config.spectral.peak_picking,
            PeakPicking::DistinctPeaks { guard_bins: 2 }
        );
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[spectral]\nfeatures = 7").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.spectral.features, 7);
        assert_eq!(config.spectral.sample_rate, 100.0);
        assert_eq!(config.reader, ReaderOptions::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
