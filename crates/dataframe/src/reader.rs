//! Delimited Text Ingestion

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::element::Element;
use crate::error::{Result, TableError};
use crate::table::Table;

/// Options controlling how delimited text is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderOptions {
    /// Field separator byte
    pub delimiter: u8,
    /// Whether the first line is a header row
    pub has_header: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

impl ReaderOptions {
    /// Comma-separated file without a header row
    pub fn headerless() -> Self {
        Self {
            has_header: false,
            ..Default::default()
        }
    }

    /// Tab-separated file with a header row
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }
}

/// Record fields, less the empty field a terminating delimiter leaves behind.
///
/// With a known width the last field is dropped only when it is that extra
/// field; a short row ending in an empty cell keeps it. Without a width (the
/// header, or the first headerless row) a trailing empty field is always
/// treated as a terminator.
fn row_fields(record: &csv::ByteRecord, width: Option<usize>) -> impl Iterator<Item = &[u8]> {
    let len = record.len();
    let terminated = len > 1 && record.get(len - 1) == Some(&b""[..]);
    let keep = match width {
        Some(width) if terminated && len == width + 1 => width,
        Some(_) => len,
        None if terminated => len - 1,
        None => len,
    };
    record.iter().take(keep)
}

fn is_blank(record: &csv::ByteRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, <[u8]>::is_empty)
}

impl<T: Element> Table<T> {
    /// Read a comma-separated file
    pub fn from_path(path: impl AsRef<Path>, has_header: bool) -> Result<Self> {
        Self::from_path_with(
            path,
            ReaderOptions {
                has_header,
                ..Default::default()
            },
        )
    }

    /// Read a delimited file with explicit options
    pub fn from_path_with(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::InvalidSource {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file, options)?;
        info!(
            "Loaded {}: {} rows x {} columns",
            path.display(),
            table.height,
            table.width
        );
        Ok(table)
    }

    /// Read delimited text from any reader
    ///
    /// Cells that fail numeric conversion are stored as NaN. Width is fixed by
    /// the header row if present, otherwise by the first data row, and any
    /// later row of a different width is rejected.
    pub fn from_reader<R: Read>(reader: R, options: ReaderOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::new();
        let mut expected_width: Option<usize> = None;
        let mut unparsed = 0usize;
        let mut record = csv::ByteRecord::new();

        if options.has_header {
            while csv_reader.read_byte_record(&mut record)? {
                if is_blank(&record) {
                    continue;
                }
                let headers: Vec<String> = row_fields(&record, None)
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect();
                expected_width = Some(headers.len());
                table.attach_headers(headers);
                break;
            }
            // A header flag on an empty source still yields a labelled table
            table.has_header_row = true;
        }

        while csv_reader.read_byte_record(&mut record)? {
            if is_blank(&record) {
                continue;
            }

            let row: Vec<T> = row_fields(&record, expected_width)
                .map(|field| {
                    T::parse_field(field).unwrap_or_else(|| {
                        unparsed += 1;
                        T::NAN
                    })
                })
                .collect();

            let width = *expected_width.get_or_insert(row.len());
            if row.len() != width {
                return Err(TableError::MalformedRow {
                    line: record.position().map_or(0, csv::Position::line),
                    expected: width,
                    found: row.len(),
                });
            }

            table.rows.push(row);
        }

        table.height = table.rows.len();
        table.width = expected_width.unwrap_or(0);

        if unparsed > 0 {
            warn!("{} cells failed numeric conversion and were stored as NaN", unparsed);
        }
        debug!("Parsed {} rows x {} columns", table.height, table.width);

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read(text: &str, options: ReaderOptions) -> Result<Table<f64>> {
        Table::from_reader(text.as_bytes(), options)
    }

    #[test]
    fn test_read_with_header() {
        let table = read("a,b,c\n1,2,3\n4,5,6\n", ReaderOptions::default()).unwrap();
        assert!(table.has_header_row());
        assert_eq!(table.headers(), ["a", "b", "c"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 3);
        assert_eq!(table.get_element(1, 2).unwrap(), 6.0);
    }

    #[test]
    fn test_read_headerless() {
        let table = read("1,2\n3,4\n5,6", ReaderOptions::headerless()).unwrap();
        assert!(!table.has_header_row());
        assert_eq!(table.height(), 3);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_bad_cells_become_nan() {
        let table = read("x,y\n1,oops\n,2\n", ReaderOptions::default()).unwrap();
        assert!(table.get_element(0, 1).unwrap().is_nan());
        assert!(table.get_element(1, 0).unwrap().is_nan());
        assert_eq!(table.get_element(1, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_ragged_row_fails_fast() {
        let result = read("a,b\n1,2\n3\n", ReaderOptions::default());
        assert!(matches!(
            result,
            Err(TableError::MalformedRow { line: 3, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_trailing_delimiter_and_blank_lines() {
        let table = read("a,b,\n1,2,\n\n3,4,\n", ReaderOptions::default()).unwrap();
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_empty_last_cell_becomes_nan() {
        let table = read("a,b\n1,2\n3,\n", ReaderOptions::default()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.get_element(1, 0).unwrap(), 3.0);
        assert!(table.get_element(1, 1).unwrap().is_nan());

        let table = read("1,2,\n3,,\n", ReaderOptions::headerless()).unwrap();
        assert_eq!(table.width(), 2);
        assert!(table.get_element(1, 1).unwrap().is_nan());
    }

    #[test]
    fn test_invalid_utf8_cell_becomes_nan() {
        let table: Table<f64> =
            Table::from_reader(&b"a,b\n1,\xff\n2,3\n"[..], ReaderOptions::default()).unwrap();
        assert_eq!(table.height(), 2);
        assert_eq!(table.get_element(0, 0).unwrap(), 1.0);
        assert!(table.get_element(0, 1).unwrap().is_nan());
        assert_eq!(table.get_element(1, 1).unwrap(), 3.0);
    }

    #[test]
    fn test_whitespace_and_custom_delimiter() {
        let table = read("p\tq\n 1.5 \t 2\n", ReaderOptions::tsv()).unwrap();
        assert_eq!(table.get_element(0, 0).unwrap(), 1.5);
        assert_eq!(table.get_element(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_header_only_source() {
        let table = read("a,b\n", ReaderOptions::default()).unwrap();
        assert!(table.has_header_row());
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result: Result<Table<f64>> = Table::from_path("/definitely/not/here.csv", true);
        assert!(matches!(result, Err(TableError::InvalidSource { .. })));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time,value").unwrap();
        for i in 0..5 {
            writeln!(file, "{},{}", i, i * 2).unwrap();
        }

        let table: Table<f32> = Table::from_path(file.path(), true).unwrap();
        assert_eq!(table.height(), 5);
        assert_eq!(table.width(), 2);
        assert_eq!(table.get_column(1).unwrap(), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }
}
