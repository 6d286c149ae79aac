//! Numeric Tables
//!
//! Provides an in-memory table of numeric cells with delimited-text
//! ingestion, structural mutation, NaN-aware reductions and fixed-width
//! rendering.

mod display;
mod element;
mod error;
mod mutation;
mod reader;
mod statistics;
mod table;
mod writer;

pub use element::Element;
pub use error::{Result, TableError};
pub use reader::ReaderOptions;
pub use statistics::{Axis, ColumnSummary, NanPolicy};
pub use table::{Table, DEFAULT_COLUMN_WIDTH, PADDING};
