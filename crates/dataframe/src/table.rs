//! Table Store

use crate::element::Element;
use crate::error::{Result, TableError};

/// Padding added to the longest label when sizing display columns
pub const PADDING: usize = 5;

/// Minimum display column width
pub const DEFAULT_COLUMN_WIDTH: usize = 15;

/// Owned, rectangular grid of numeric cells with an optional header row
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T: Element> {
    /// Data rows, each exactly `width` cells long
    pub(crate) rows: Vec<Vec<T>>,
    /// Column labels (empty when there is no header row)
    pub(crate) headers: Vec<String>,
    /// Whether `headers` is populated
    pub(crate) has_header_row: bool,
    /// Number of data rows
    pub(crate) height: usize,
    /// Number of columns
    pub(crate) width: usize,
    /// Cached display column width
    pub(crate) max_column_width: usize,
}

impl<T: Element> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Table<T> {
    /// Create an empty table with no header row
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            headers: Vec::new(),
            has_header_row: false,
            height: 0,
            width: 0,
            max_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Create a zero-filled table with no header row
    pub fn zeroed(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![T::ZERO; columns]; rows],
            height: rows,
            width: columns,
            ..Self::new()
        }
    }

    /// Create a zero-filled table with a header row
    pub fn zeroed_with_headers(rows: usize, columns: usize, headers: Vec<String>) -> Result<Self> {
        if headers.len() != columns {
            return Err(TableError::HeaderWidthMismatch {
                headers: headers.len(),
                width: columns,
            });
        }

        let mut table = Self::zeroed(rows, columns);
        table.attach_headers(headers);
        Ok(table)
    }

    /// Create a headerless table from an in-memory grid
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        Self::check_shape(&rows, width)?;

        Ok(Self {
            height: rows.len(),
            width,
            rows,
            ..Self::new()
        })
    }

    /// Create a labelled table from an in-memory grid
    pub fn from_rows_with_headers(rows: Vec<Vec<T>>, headers: Vec<String>) -> Result<Self> {
        let width = rows.first().map_or(headers.len(), Vec::len);
        Self::check_shape(&rows, width)?;

        if headers.len() != width {
            return Err(TableError::HeaderWidthMismatch {
                headers: headers.len(),
                width,
            });
        }

        let mut table = Self {
            height: rows.len(),
            width,
            rows,
            ..Self::new()
        };
        table.attach_headers(headers);
        Ok(table)
    }

    fn check_shape(rows: &[Vec<T>], width: usize) -> Result<()> {
        match rows.iter().position(|row| row.len() != width) {
            Some(row) => Err(TableError::BadShape {
                row,
                expected: width,
                found: rows[row].len(),
            }),
            None => Ok(()),
        }
    }

    /// Install a header row and resize display columns to fit it
    pub(crate) fn attach_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
        self.has_header_row = true;
        self.max_column_width = display_width_for(&self.headers);
    }

    /// Number of data rows (header row excluded)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the table has a header row
    pub fn has_header_row(&self) -> bool {
        self.has_header_row
    }

    /// Whether the table holds no data rows
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Column labels (empty slice when headerless)
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Display column width used by the text renderers
    pub fn max_column_width(&self) -> usize {
        self.max_column_width
    }

    /// Label of the column at `index`
    pub fn get_header(&self, index: usize) -> Result<&str> {
        if !self.has_header_row {
            return Err(TableError::NoHeaderRow);
        }
        self.headers
            .get(index)
            .map(String::as_str)
            .ok_or(TableError::IndexOutOfBounds {
                index: index as i64,
                extent: self.width,
            })
    }

    /// Cell at (`row`, `column`)
    pub fn get_element(&self, row: usize, column: usize) -> Result<T> {
        if column >= self.width {
            return Err(TableError::IndexOutOfBounds {
                index: column as i64,
                extent: self.width,
            });
        }
        self.rows
            .get(row)
            .map(|r| r[column])
            .ok_or(TableError::IndexOutOfBounds {
                index: row as i64,
                extent: self.height,
            })
    }

    /// Borrow a data row
    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterate over data rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copy out a column top to bottom
    pub fn get_column(&self, index: usize) -> Result<Vec<T>> {
        if index >= self.width {
            return Err(TableError::IndexOutOfBounds {
                index: index as i64,
                extent: self.width,
            });
        }
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Copy out a column by its label
    pub fn get_column_by_label(&self, label: &str) -> Result<Vec<T>> {
        let index = self.column_index(label)?;
        self.get_column(index)
    }

    /// Position of the first column carrying `label`
    pub fn column_index(&self, label: &str) -> Result<usize> {
        if !self.has_header_row {
            return Err(TableError::NoHeaderRow);
        }
        self.headers
            .iter()
            .position(|h| h == label)
            .ok_or_else(|| TableError::ColumnNotFound(label.to_string()))
    }

    /// Resolve a possibly negative index against `extent`
    pub(crate) fn resolve_index(index: i64, extent: usize) -> Result<usize> {
        let magnitude = index.unsigned_abs() as usize;
        if magnitude >= extent {
            return Err(TableError::IndexOutOfBounds { index, extent });
        }
        Ok(if index < 0 { extent - magnitude } else { magnitude })
    }
}

/// Display column width for a set of labels
pub(crate) fn display_width_for(labels: &[String]) -> usize {
    labels
        .iter()
        .map(|label| label.chars().count() + PADDING)
        .fold(DEFAULT_COLUMN_WIDTH, usize::max)
}
