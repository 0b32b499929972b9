//! Load a rainfall table from CSV
//!
//! Layout: one header row of instance labels (years), then one row per day of
//! the season. A leading index column, as written by pandas (`""` or
//! `"Unnamed: 0"` header), is dropped. Empty cells are missing readings.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use super::{MissingValuePolicy, RainfallTable};
use crate::error::DataError;

/// Load a rainfall table from a CSV file
pub fn load_rainfall_table<P: AsRef<Path>>(path: P) -> Result<RainfallTable, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = load_rainfall_from_reader(file)?;
    info!(
        "Loaded rainfall history from {}: {} instances x {} days",
        path.display(),
        table.instance_count(),
        table.days()
    );
    Ok(table)
}

/// Load a rainfall table from any reader (file, byte slice, ...)
pub fn load_rainfall_from_reader<R: Read>(reader: R) -> Result<RainfallTable, DataError> {
    load_rainfall_with_policy(reader, MissingValuePolicy::default())
}

pub fn load_rainfall_with_policy<R: Read>(
    reader: R,
    policy: MissingValuePolicy,
) -> Result<RainfallTable, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let skip = usize::from(headers.get(0).is_some_and(is_index_header));
    let labels: Vec<String> = headers.iter().skip(skip).map(str::to_string).collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        for (idx, field) in record.iter().skip(skip).enumerate() {
            let value = parse_cell(field).ok_or_else(|| DataError::Parse {
                line,
                column: labels[idx].clone(),
                value: field.to_string(),
            })?;
            columns[idx].push(value);
        }
    }

    RainfallTable::from_columns_with_policy(labels, columns, policy)
}

fn is_index_header(name: &str) -> bool {
    name.is_empty() || name.starts_with("Unnamed")
}

/// Empty cells and `NA`/`NaN` markers read as NaN, which the policy treats as missing
fn parse_cell(field: &str) -> Option<f64> {
    if field.is_empty() || field.eq_ignore_ascii_case("na") || field.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_pandas_index() {
        let data = "\
Unnamed: 0,1983,1984,1985
0,1.5,0,-999
1,2.0,,3.25
2,-999,4,1
";
        let table = load_rainfall_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.labels(), &["1983", "1984", "1985"]);
        assert_eq!(table.days(), 3);
        assert_eq!(table.reading(0, 0), Some(1.5));
        assert_eq!(table.reading(1, 0), Some(0.0));
        assert_eq!(table.reading(2, 0), None);
        assert_eq!(table.reading(1, 1), None);
        assert_eq!(table.reading(0, 2), None);
        assert_eq!(table.reading(2, 1), Some(3.25));
    }

    #[test]
    fn test_load_without_index() {
        let data = "2010,2011\n1,2\n3,4\n";
        let table = load_rainfall_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.labels(), &["2010", "2011"]);
        assert_eq!(table.reading(1, 1), Some(4.0));
    }

    #[test]
    fn test_unparsable_cell() {
        let data = "2010,2011\n1,2\n3,wet\n";
        let err = load_rainfall_from_reader(data.as_bytes()).unwrap_err();
        match err {
            DataError::Parse { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "2011");
                assert_eq!(value, "wet");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_is_csv_error() {
        let data = "2010,2011\n1,2\n3\n";
        let err = load_rainfall_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_sample_data_file() {
        let table = load_rainfall_table(concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_rainfall.csv"))
            .unwrap();
        assert_eq!(table.days(), 366);
        assert!(table.instance_count() >= 2);
    }
}
