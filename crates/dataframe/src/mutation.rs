//! Structural Mutation

use tracing::debug;

use crate::element::Element;
use crate::error::{Result, TableError};
use crate::table::{display_width_for, Table};

impl<T: Element> Table<T> {
    /// Append a row to the bottom of the table
    pub fn insert_row(&mut self, row: Vec<T>) -> Result<()> {
        if row.len() != self.width {
            return Err(TableError::SizeMismatch {
                expected: self.width,
                found: row.len(),
            });
        }
        self.rows.push(row);
        self.height += 1;
        Ok(())
    }

    /// Append a zero-filled row
    pub fn insert_empty_row(&mut self) {
        self.rows.push(vec![T::ZERO; self.width]);
        self.height += 1;
    }

    /// Append an unlabelled column to a headerless table
    pub fn insert_column(&mut self, column: Vec<T>) -> Result<()> {
        self.check_column_len(column.len())?;
        if self.has_header_row {
            return Err(TableError::HeaderStateMismatch {
                table_has_headers: true,
            });
        }
        self.append_column(column);
        Ok(())
    }

    /// Append a labelled column to a table with a header row
    pub fn insert_labeled_column(&mut self, label: impl Into<String>, column: Vec<T>) -> Result<()> {
        self.check_column_len(column.len())?;
        if !self.has_header_row {
            return Err(TableError::HeaderStateMismatch {
                table_has_headers: false,
            });
        }
        self.push_label(label.into());
        self.append_column(column);
        Ok(())
    }

    /// Append a zero-filled unlabelled column
    pub fn insert_empty_column(&mut self) -> Result<()> {
        self.insert_column(vec![T::ZERO; self.height])
    }

    /// Append a zero-filled labelled column
    pub fn insert_empty_labeled_column(&mut self, label: impl Into<String>) -> Result<()> {
        self.insert_labeled_column(label, vec![T::ZERO; self.height])
    }

    fn check_column_len(&self, len: usize) -> Result<()> {
        if len != self.height {
            return Err(TableError::SizeMismatch {
                expected: self.height,
                found: len,
            });
        }
        Ok(())
    }

    fn push_label(&mut self, label: String) {
        self.headers.push(label);
        self.max_column_width = display_width_for(&self.headers);
    }

    fn append_column(&mut self, column: Vec<T>) {
        for (row, value) in self.rows.iter_mut().zip(column) {
            row.push(value);
        }
        self.width += 1;
        debug!("Inserted column, width now {}", self.width);
    }

    /// Replace the column at `index` in place
    pub fn refactor_column(&mut self, index: usize, column: Vec<T>) -> Result<()> {
        self.check_column_len(column.len())?;
        if index >= self.width {
            return Err(TableError::IndexOutOfBounds {
                index: index as i64,
                extent: self.width,
            });
        }
        for (row, value) in self.rows.iter_mut().zip(column) {
            row[index] = value;
        }
        Ok(())
    }

    /// Replace the first column carrying `label`
    pub fn refactor_column_by_label(&mut self, label: &str, column: Vec<T>) -> Result<()> {
        let index = self.column_index(label)?;
        self.refactor_column(index, column)
    }

    /// Replace the header row, or attach one to a headerless table
    pub fn refactor_headers(&mut self, headers: Vec<String>) -> Result<()> {
        let expected = if self.has_header_row {
            self.headers.len()
        } else {
            self.width
        };
        if headers.len() != expected {
            return Err(TableError::HeaderWidthMismatch {
                headers: headers.len(),
                width: expected,
            });
        }
        self.attach_headers(headers);
        Ok(())
    }

    /// Append every row of `bottom` beneath this table
    ///
    /// Both tables are left untouched when the widths or header rows differ.
    pub fn stack(&mut self, bottom: &Table<T>) -> Result<()> {
        if self.width != bottom.width {
            return Err(TableError::SizeMismatch {
                expected: self.width,
                found: bottom.width,
            });
        }
        if self.has_header_row != bottom.has_header_row || self.headers != bottom.headers {
            return Err(TableError::HeaderLabelMismatch);
        }

        self.rows.extend(bottom.rows.iter().cloned());
        self.height += bottom.height;
        debug!("Stacked {} rows, height now {}", bottom.height, self.height);
        Ok(())
    }
}
