//! NaN-Aware Statistical Reductions
//!
//! Means and medians over a row, a column (by index or label) or the whole
//! table. Column gathers run on the rayon pool with per-task accumulation;
//! the whole-table mean is a single sequential fold.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::Element;
use crate::error::{Result, TableError};
use crate::table::Table;

/// How NaN cells take part in a mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// NaN counts as a zero-valued cell
    #[default]
    AsZero,
    /// NaN is left out of both sum and denominator
    Omit,
}

/// Direction a reduction runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Across the cells of one row
    Row,
    /// Down the cells of one column
    Column,
}

/// Per-column summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column label, if the table has a header row
    pub label: Option<String>,
    /// Mean with NaN omitted
    pub mean: f64,
    /// Median with NaN omitted (absent when the column is all NaN)
    pub median: Option<f64>,
    /// Number of NaN cells
    pub nan_count: usize,
}

/// Mean of a slice under a NaN policy. Zero when nothing is left to divide by.
fn mean_of<T: Element>(values: &[T], policy: NanPolicy) -> T {
    let (sum, count) = match policy {
        NanPolicy::AsZero => (values.iter().map(|v| v.or_zero()).sum::<T>(), values.len()),
        NanPolicy::Omit => values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((T::ZERO, 0usize), |(sum, count), &v| (sum + v, count + 1)),
    };
    divide(sum, count)
}

fn divide<T: Element>(sum: T, count: usize) -> T {
    if count == 0 {
        T::ZERO
    } else {
        sum / T::from_usize(count)
    }
}

/// Median by partial selection. Input must already be free of NaN.
fn median_of<T: Element>(mut values: Vec<T>) -> Result<T> {
    if values.is_empty() {
        return Err(TableError::EmptySelection);
    }

    let len = values.len();
    let mid = len / 2;
    let (left, middle, _) =
        values.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let middle = *middle;

    if len % 2 == 0 {
        // Everything left of `mid` ranks below it, so its max is the lower middle.
        let lower = left
            .iter()
            .copied()
            .fold(left[0], |acc, v| if v > acc { v } else { acc });
        Ok((lower + middle) / T::from_usize(2))
    } else {
        Ok(middle)
    }
}

impl<T: Element> Table<T> {
    /// Mean of a labelled column, NaN counted as zero
    pub fn mean_by_label(&self, label: &str) -> Result<T> {
        self.mean_by_label_with(label, NanPolicy::AsZero)
    }

    /// Mean of a labelled column under a NaN policy
    pub fn mean_by_label_with(&self, label: &str, policy: NanPolicy) -> Result<T> {
        let column = self.column_index(label)?;
        Ok(self.column_mean(column, policy))
    }

    /// Mean of a row, NaN counted as zero. Negative indices count from the end.
    pub fn mean_row(&self, index: i64) -> Result<T> {
        self.mean_row_with(index, NanPolicy::AsZero)
    }

    /// Mean of a row under a NaN policy
    pub fn mean_row_with(&self, index: i64, policy: NanPolicy) -> Result<T> {
        let row = Self::resolve_index(index, self.height)?;
        Ok(mean_of(&self.rows[row], policy))
    }

    /// Mean of a column by position under a NaN policy
    pub fn mean_column(&self, index: i64, policy: NanPolicy) -> Result<T> {
        let column = Self::resolve_index(index, self.width)?;
        Ok(self.column_mean(column, policy))
    }

    /// Mean of a row or column by position
    pub fn mean_axis(&self, index: i64, policy: NanPolicy, axis: Axis) -> Result<T> {
        match axis {
            Axis::Row => self.mean_row_with(index, policy),
            Axis::Column => self.mean_column(index, policy),
        }
    }

    /// Mean of every non-NaN cell in the table
    pub fn mean(&self) -> T {
        let (sum, count) = self
            .rows
            .iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold((T::ZERO, 0usize), |(sum, count), &v| (sum + v, count + 1));
        divide(sum, count)
    }

    fn column_mean(&self, column: usize, policy: NanPolicy) -> T {
        debug!("Column {} mean over {} rows ({:?})", column, self.height, policy);
        match policy {
            NanPolicy::AsZero => {
                let sum: T = self.rows.par_iter().map(|row| row[column].or_zero()).sum();
                divide(sum, self.height)
            }
            NanPolicy::Omit => {
                let (sum, count) = self
                    .rows
                    .par_iter()
                    .map(|row| row[column])
                    .filter(|v| !v.is_nan())
                    .fold(|| (T::ZERO, 0usize), |(sum, count), v| (sum + v, count + 1))
                    .reduce(|| (T::ZERO, 0usize), |a, b| (a.0 + b.0, a.1 + b.1));
                divide(sum, count)
            }
        }
    }

    /// Non-NaN cells of a column, in no particular order
    fn gather_column(&self, column: usize) -> Vec<T> {
        self.rows
            .par_iter()
            .map(|row| row[column])
            .filter(|v| !v.is_nan())
            .collect()
    }

    /// Median of a row, NaN omitted
    pub fn median_row(&self, index: i64) -> Result<T> {
        let row = Self::resolve_index(index, self.height)?;
        median_of(self.rows[row].iter().copied().filter(|v| !v.is_nan()).collect())
    }

    /// Median of a labelled column, NaN omitted
    pub fn median_by_label(&self, label: &str) -> Result<T> {
        let column = self.column_index(label)?;
        median_of(self.gather_column(column))
    }

    /// Median of a column by position, NaN omitted
    pub fn median_column(&self, index: i64) -> Result<T> {
        let column = Self::resolve_index(index, self.width)?;
        median_of(self.gather_column(column))
    }

    /// Median of a row or column by position
    pub fn median_axis(&self, index: i64, axis: Axis) -> Result<T> {
        match axis {
            Axis::Row => self.median_row(index),
            Axis::Column => self.median_column(index),
        }
    }

    /// Median of every non-NaN cell in the table
    pub fn median(&self) -> Result<T> {
        let flat: Vec<T> = self
            .rows
            .par_iter()
            .flat_map_iter(|row| row.iter().copied().filter(|v| !v.is_nan()))
            .collect();
        median_of(flat)
    }

    /// Number of NaN cells in a column
    pub fn nan_count(&self, column: usize) -> Result<usize> {
        if column >= self.width {
            return Err(TableError::IndexOutOfBounds {
                index: column as i64,
                extent: self.width,
            });
        }
        Ok(self.column_nan_count(column))
    }

    fn column_nan_count(&self, column: usize) -> usize {
        self.rows.par_iter().filter(|row| row[column].is_nan()).count()
    }

    /// Summarise every column
    pub fn describe(&self) -> Vec<ColumnSummary> {
        (0..self.width)
            .map(|column| {
                let median = median_of(self.gather_column(column)).ok();
                ColumnSummary {
                    label: self.headers.get(column).cloned(),
                    mean: self.column_mean(column, NanPolicy::Omit).to_f64(),
                    median: median.map(Element::to_f64),
                    nan_count: self.column_nan_count(column),
                }
            })
            .collect()
    }
}
