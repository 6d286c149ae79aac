//! Property tests for table construction, indexing and mutation

use dataframe::{NanPolicy, ReaderOptions, Table, TableError};
use proptest::prelude::*;

fn grid(max_rows: usize, max_columns: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..=max_rows, 1..=max_columns).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(prop::collection::vec(-1e6f64..1e6, columns), rows)
    })
}

fn to_csv(rows: &[Vec<f64>]) -> String {
    rows.iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn test_parsed_cells_fill_a_rectangle(rows in grid(30, 8)) {
        let text = to_csv(&rows);
        let table: Table<f64> = Table::from_reader(text.as_bytes(), ReaderOptions::headerless()).unwrap();
        let cells: usize = rows.iter().map(Vec::len).sum();

        prop_assert_eq!(table.height() * table.width(), cells);
        prop_assert!(table.rows().all(|row| row.len() == table.width()));
    }

    #[test]
    fn test_negative_row_index_counts_from_end(rows in grid(20, 5), offset in 1usize..20) {
        let table = Table::from_rows(rows).unwrap();
        let height = table.height();
        prop_assume!(offset < height);

        let from_end = table.mean_row(-(offset as i64)).unwrap();
        let direct = table.mean_row((height - offset) as i64).unwrap();
        prop_assert_eq!(from_end, direct);
    }

    #[test]
    fn test_inserted_column_reads_back(rows in grid(20, 5), seed in -100.0f64..100.0) {
        let mut table = Table::from_rows(rows).unwrap();
        let width = table.width();
        let column: Vec<f64> = (0..table.height()).map(|i| seed + i as f64).collect();

        table.insert_column(column.clone()).unwrap();
        prop_assert_eq!(table.width(), width + 1);
        prop_assert_eq!(table.get_column(width).unwrap(), column);
    }

    #[test]
    fn test_stacking_adds_heights(top in grid(15, 4), extra in 1usize..15) {
        let width = top[0].len();
        let headers: Vec<String> = (0..width).map(|c| format!("c{}", c)).collect();
        let bottom_rows = vec![vec![1.0; width]; extra];

        let mut upper = Table::from_rows_with_headers(top, headers.clone()).unwrap();
        let lower = Table::from_rows_with_headers(bottom_rows, headers).unwrap();
        let expected = upper.height() + lower.height();

        upper.stack(&lower).unwrap();
        prop_assert_eq!(upper.height(), expected);
    }

    #[test]
    fn test_out_of_range_index_is_rejected(rows in grid(10, 4)) {
        let table = Table::from_rows(rows).unwrap();
        let height = table.height() as i64;
        let width = table.width() as i64;

        let row_error = matches!(table.mean_row(height), Err(TableError::IndexOutOfBounds { .. }));
        let column_error = matches!(
            table.mean_column(-width, NanPolicy::Omit),
            Err(TableError::IndexOutOfBounds { .. })
        );
        prop_assert!(row_error);
        prop_assert!(column_error);
    }

    #[test]
    fn test_median_lies_within_range(values in prop::collection::vec(-1e3f64..1e3, 1..50)) {
        let table = Table::from_rows(vec![values.clone()]).unwrap();
        let median = table.median().unwrap();
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        prop_assert!(median >= min && median <= max);
    }
}
