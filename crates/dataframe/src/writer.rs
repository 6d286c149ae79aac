//! Table Export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::element::Element;
use crate::error::Result;
use crate::table::Table;

impl<T: Element> Table<T> {
    /// Write the header row (if any) and every data row as delimited text.
    ///
    /// Each line ends with the delimiter; the reader drops that trailing
    /// empty field, so the output reads back into an identical table.
    pub fn write_csv<W: Write>(&self, out: W, delimiter: u8) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .flexible(true)
            .from_writer(out);

        if self.has_header_row && self.width > 0 {
            writer.write_record(self.headers.iter().map(String::as_str).chain([""]))?;
        }

        if self.width > 0 {
            for row in &self.rows {
                writer.write_record(row.iter().map(|v| v.to_string()).chain([String::new()]))?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Write the table as comma-separated text to `path`
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_csv(BufWriter::new(File::create(path)?), b',')?;
        info!("Wrote {} rows to {}", self.height, path.display());
        Ok(())
    }

    /// Write the fixed-width rendering of the whole table to `path`
    pub fn to_txt(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_pretty(&mut out)?;
        out.flush()?;
        info!("Wrote {} rows to {}", self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ReaderOptions;

    fn sample() -> Table<f64> {
        Table::from_rows_with_headers(
            vec![vec![1.5, f64::NAN], vec![-2.0, 4.0]],
            vec!["left".to_string(), "right".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_csv_lines_are_delimiter_terminated() {
        let mut out = Vec::new();
        sample().write_csv(&mut out, b',').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "left,right,\n1.5,NaN,\n-2,4,\n");
    }

    #[test]
    fn test_headerless_csv_has_no_leading_blank_line() {
        let table = Table::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let mut out = Vec::new();
        table.write_csv(&mut out, b';').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1;2;\n");
    }

    #[test]
    fn test_csv_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let table = sample();
        table.to_csv(&path).unwrap();

        let back: Table<f64> = Table::from_path_with(&path, ReaderOptions::default()).unwrap();
        assert_eq!(back.headers(), table.headers());
        assert_eq!(back.height(), 2);
        assert_eq!(back.width(), 2);
        assert_eq!(back.get_element(1, 0).unwrap(), -2.0);
        assert!(back.get_element(0, 1).unwrap().is_nan());
    }

    #[test]
    fn test_txt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        sample().to_txt(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("right|"));
    }
}
