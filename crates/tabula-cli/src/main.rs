//! Tabula - Main Entry Point

use std::io;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dataframe::{Axis, NanPolicy};
use spectral_engine::{PeakPicking, Transform};
use tabula_cli::{
    convert, describe, dsp, init_logging, load_config, load_table, mean, median, AppConfig,
    Selection,
};
use tracing::info;

/// Inspect, reduce and transform numeric tables stored as delimited text
#[derive(Parser, Debug)]
#[command(name = "tabula", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat the first line as data rather than headers
    #[arg(long, global = true, default_value_t = false)]
    no_header: bool,

    /// Field delimiter (single ASCII character)
    #[arg(long, global = true)]
    delimiter: Option<char>,

    /// Maximum log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the first rows
    Head {
        file: PathBuf,
        /// Number of rows
        #[arg(short, default_value_t = 5)]
        n: usize,
    },
    /// Print the last rows
    Tail {
        file: PathBuf,
        /// Number of rows
        #[arg(short, default_value_t = 5)]
        n: usize,
    },
    /// Print a summary view of the table
    Show { file: PathBuf },
    /// Mean of a row, a column or the whole table
    Mean {
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Leave NaN cells out instead of counting them as zero
        #[arg(long, default_value_t = false)]
        omit_nan: bool,
    },
    /// Median of a row, a column or the whole table (NaN omitted)
    Median {
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Per-column mean, median and NaN count
    Describe {
        file: PathBuf,
        /// Emit JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Extract the strongest spectral bins of every column
    Dsp {
        file: PathBuf,
        /// Bins per column
        #[arg(long)]
        features: Option<usize>,
        /// Sampling frequency (Hz)
        #[arg(long)]
        sample_rate: Option<f64>,
        /// Suppress neighbouring bins of each reported peak
        #[arg(long, default_value_t = false)]
        distinct: bool,
        /// Use the FFT instead of the direct DFT
        #[arg(long, default_value_t = false)]
        fast: bool,
        /// Write the features table as CSV
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the table to a new file
    Convert {
        file: PathBuf,
        /// Output path
        #[arg(long)]
        out: PathBuf,
        /// Fixed-width text instead of CSV
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Column label
    #[arg(long, conflicts_with_all = ["row", "index"])]
    column: Option<String>,
    /// Row index (negative counts from the end)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "index")]
    row: Option<i64>,
    /// Row or column index (negative counts from the end)
    #[arg(long, allow_negative_numbers = true, requires = "axis")]
    index: Option<i64>,
    /// Axis for `--index`
    #[arg(long, value_enum, requires = "index")]
    axis: Option<AxisArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum AxisArg {
    Row,
    Column,
}

impl From<AxisArg> for Axis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::Row => Axis::Row,
            AxisArg::Column => Axis::Column,
        }
    }
}

impl SelectionArgs {
    fn selection(&self) -> Selection {
        match (&self.column, self.row, self.index, self.axis) {
            (Some(label), _, _, _) => Selection::Label(label.clone()),
            (_, Some(row), _, _) => Selection::Row(row),
            (_, _, Some(index), Some(axis)) => Selection::Index {
                index,
                axis: axis.into(),
            },
            _ => Selection::Table,
        }
    }
}

impl Cli {
    /// Apply command-line flags over the loaded configuration
    fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if self.no_header {
            config.reader.has_header = false;
        }
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                bail!("Delimiter must be a single ASCII character, got {:?}", delimiter);
            }
            config.reader.delimiter = delimiter as u8;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        if let Command::Dsp {
            features,
            sample_rate,
            distinct,
            fast,
            ..
        } = &self.command
        {
            if let Some(features) = features {
                config.spectral.features = *features;
            }
            if let Some(sample_rate) = sample_rate {
                config.spectral.sample_rate = *sample_rate;
            }
            if *distinct {
                config.spectral.peak_picking = PeakPicking::DistinctPeaks { guard_bins: 1 };
            }
            if *fast {
                config.spectral.transform = Transform::Fast;
            }
        }
        Ok(())
    }
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let options = config.reader;
    match command {
        Command::Head { file, n } => load_table(&file, options)?.print_head(n)?,
        Command::Tail { file, n } => load_table(&file, options)?.print_tail(n)?,
        Command::Show { file } => print!("{}", load_table(&file, options)?),
        Command::Mean {
            file,
            selection,
            omit_nan,
        } => {
            let policy = if omit_nan {
                NanPolicy::Omit
            } else {
                NanPolicy::AsZero
            };
            println!("{}", mean(&load_table(&file, options)?, &selection.selection(), policy)?);
        }
        Command::Median { file, selection } => {
            println!("{}", median(&load_table(&file, options)?, &selection.selection())?);
        }
        Command::Describe { file, json } => {
            describe(&load_table(&file, options)?, &mut io::stdout().lock(), json)?;
        }
        Command::Dsp { file, out, .. } => {
            let features = dsp(&load_table(&file, options)?, &config.spectral, out.as_deref())?;
            if out.is_none() {
                print!("{}", features);
            }
        }
        Command::Convert { file, out, pretty } => {
            convert(&load_table(&file, options)?, &out, pretty)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config)?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== Tabula v{} ===", env!("CARGO_PKG_VERSION"));
    run(cli.command, &config)
}
