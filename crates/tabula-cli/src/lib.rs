//! Tabula Command-Line Front End
//!
//! Logging setup, layered configuration and the command implementations
//! behind the `tabula` binary.

use std::str::FromStr;

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod settings;

pub use commands::{convert, describe, dsp, load_table, mean, median, Selection};
pub use settings::{load_config, AppConfig, LogFormat, ENV_PREFIX};

/// Initialize logging to standard error
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let level = Level::from_str(level).with_context(|| format!("Invalid log level: {}", level))?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .context("Failed to set tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_log_level() {
        assert!(init_logging("loud", LogFormat::Text).is_err());
    }
}
