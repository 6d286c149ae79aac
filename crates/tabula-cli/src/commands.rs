//! Command Implementations

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use dataframe::{Axis, NanPolicy, ReaderOptions, Table, TableError};
use spectral_engine::{spectral_table, SpectralConfig};
use tracing::debug;

/// Cells a reduction runs over
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Every cell in the table
    Table,
    /// One column by header label
    Label(String),
    /// One row; negative indices count from the end
    Row(i64),
    /// One row or column; negative indices count from the end
    Index { index: i64, axis: Axis },
}

/// Load a table of `f64` cells
pub fn load_table(path: &Path, options: ReaderOptions) -> anyhow::Result<Table<f64>> {
    Table::from_path_with(path, options)
        .with_context(|| format!("Failed to load table from {}", path.display()))
}

/// Mean of the selected cells
pub fn mean(table: &Table<f64>, selection: &Selection, policy: NanPolicy) -> Result<f64, TableError> {
    debug!("Mean over {:?} ({:?})", selection, policy);
    match selection {
        Selection::Table => Ok(table.mean()),
        Selection::Label(label) => table.mean_by_label_with(label, policy),
        Selection::Row(index) => table.mean_row_with(*index, policy),
        Selection::Index { index, axis } => table.mean_axis(*index, policy, *axis),
    }
}

/// Median of the selected cells, NaN omitted
pub fn median(table: &Table<f64>, selection: &Selection) -> Result<f64, TableError> {
    debug!("Median over {:?}", selection);
    match selection {
        Selection::Table => table.median(),
        Selection::Label(label) => table.median_by_label(label),
        Selection::Row(index) => table.median_row(*index),
        Selection::Index { index, axis } => table.median_axis(*index, *axis),
    }
}

/// Write a per-column summary as aligned text or pretty JSON
pub fn describe<W: Write>(table: &Table<f64>, out: &mut W, json: bool) -> anyhow::Result<()> {
    let summaries = table.describe();

    if json {
        serde_json::to_writer_pretty(&mut *out, &summaries)?;
        writeln!(out)?;
        return Ok(());
    }

    let width = table.max_column_width();
    writeln!(
        out,
        "{:>width$}|{:>width$}|{:>width$}|{:>width$}|",
        "column", "mean", "median", "NaN"
    )?;
    for (index, summary) in summaries.iter().enumerate() {
        let label = summary
            .label
            .clone()
            .unwrap_or_else(|| format!("#{}", index));
        let median = summary
            .median
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>width$}|{:>width$}|{:>width$}|{:>width$}|",
            label, summary.mean, median, summary.nan_count
        )?;
    }
    Ok(())
}

/// Spectral features of every column, written to `output` when given
pub fn dsp(
    table: &Table<f64>,
    config: &SpectralConfig,
    output: Option<&Path>,
) -> anyhow::Result<Table<f64>> {
    let features = spectral_table(table, config)?;
    if let Some(path) = output {
        features
            .to_csv(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(features)
}

/// Re-export a table as CSV, or as fixed-width text when `pretty`
pub fn convert(table: &Table<f64>, output: &Path, pretty: bool) -> anyhow::Result<()> {
    let written = if pretty {
        table.to_txt(output)
    } else {
        table.to_csv(output)
    };
    written.with_context(|| format!("Failed to write {}", output.display()))
}
