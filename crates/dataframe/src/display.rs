//! Fixed-Width Text Rendering

use std::fmt;
use std::io::{self, Write};
use std::ops::Range;

use crate::element::Element;
use crate::error::{Result, TableError};
use crate::table::{Table, PADDING};

/// Rows shown at each end of the summary view of a large table
const SUMMARY_ROWS: usize = 10;

/// Tables at least this tall are summarised with `SUMMARY_ROWS` at each end
const SUMMARY_THRESHOLD: usize = 20;

impl<T: Element> Table<T> {
    fn rule_len(&self) -> usize {
        self.max_column_width * self.width + 2 * PADDING
    }

    fn summary_rows(&self) -> usize {
        if self.height >= SUMMARY_THRESHOLD {
            SUMMARY_ROWS
        } else {
            self.height / 2
        }
    }

    fn render_preamble<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let rule = "_".repeat(self.rule_len());
        if self.has_header_row {
            writeln!(out, "{}", rule)?;
            for label in &self.headers {
                write!(out, "{:>width$}|", label, width = self.max_column_width)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "{}", rule)
    }

    fn render_rows<W: fmt::Write>(&self, out: &mut W, range: Range<usize>) -> fmt::Result {
        for row in &self.rows[range] {
            for value in row {
                write!(out, "{:>width$}|", value, width = self.max_column_width)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn render(&self, range: Range<usize>) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail
        let _ = self
            .render_preamble(&mut text)
            .and_then(|_| self.render_rows(&mut text, range));
        text
    }

    fn check_requested(&self, n_rows: usize) -> Result<()> {
        if n_rows > self.height {
            return Err(TableError::RowsRequested {
                requested: n_rows,
                available: self.height,
            });
        }
        Ok(())
    }

    /// Render the first `n_rows` rows
    pub fn head_text(&self, n_rows: usize) -> Result<String> {
        self.check_requested(n_rows)?;
        Ok(self.render(0..n_rows))
    }

    /// Render the last `n_rows` rows
    pub fn tail_text(&self, n_rows: usize) -> Result<String> {
        self.check_requested(n_rows)?;
        Ok(self.render(self.height - n_rows..self.height))
    }

    /// Write the first `n_rows` rows to `out`
    pub fn write_head<W: Write>(&self, out: &mut W, n_rows: usize) -> Result<()> {
        out.write_all(self.head_text(n_rows)?.as_bytes())?;
        Ok(())
    }

    /// Write the last `n_rows` rows to `out`
    pub fn write_tail<W: Write>(&self, out: &mut W, n_rows: usize) -> Result<()> {
        out.write_all(self.tail_text(n_rows)?.as_bytes())?;
        Ok(())
    }

    /// Print the first `n_rows` rows to standard output
    pub fn print_head(&self, n_rows: usize) -> Result<()> {
        self.write_head(&mut io::stdout().lock(), n_rows)
    }

    /// Print the last `n_rows` rows to standard output
    pub fn print_tail(&self, n_rows: usize) -> Result<()> {
        self.write_tail(&mut io::stdout().lock(), n_rows)
    }

    /// Write the whole table in fixed-width form
    pub fn write_pretty<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render(0..self.height).as_bytes())?;
        Ok(())
    }
}

/// Summary view: up to ten rows from each end with an ellipsis between
impl<T: Element> fmt::Display for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_rows = self.summary_rows();
        self.render_preamble(f)?;
        self.render_rows(f, 0..n_rows)?;

        if n_rows > 1 {
            writeln!(f)?;
            writeln!(
                f,
                "{:>width$}",
                "...",
                width = self.max_column_width * self.width / 2
            )?;
            writeln!(f)?;
            self.render_rows(f, self.height - n_rows..self.height)?;
        }
        Ok(())
    }
}
