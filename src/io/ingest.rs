//! CSV ingest.
//!
//! Turns a measurement CSV into a typed `Dataset`:
//! - `date` parsed with one format (`YYYY-MM-DD`); a malformed date fails the load
//! - `length`/`weight` coerced to `f64`; a row with a non-numeric value is
//!   quarantined rather than kept as a null
//! - every other column passes through as text
//!
//! Empty cells and the usual missing-value markers (`NA`, `NaN`, `null`, ...)
//! become nulls and are left for `validate` to report. A row with more fields
//! than the header fails the load; a short row reads its missing cells as nulls.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Dataset, Record, RowError};
use crate::error::LoadError;

/// The only accepted date representation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cell contents read as a missing value, compared exactly after trimming.
pub const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Open `path` and parse it as a measurement CSV.
pub fn read_dataset_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_dataset(file)
}

/// Parse a measurement CSV from any reader.
pub fn read_dataset<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let header_map: HashMap<String, usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect();

    let mut records = Vec::new();
    let mut quarantined = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, which is line 1.
        let line = idx + 2;
        let record = result?;
        if record.len() > columns.len() {
            return Err(LoadError::FieldCount {
                line,
                expected: columns.len(),
                found: record.len(),
            });
        }

        let date = match get_optional(&record, &header_map, "date") {
            Some(s) => Some(parse_date(s).ok_or_else(|| LoadError::InvalidDate {
                line,
                value: s.to_string(),
            })?),
            None => None,
        };

        let length = match parse_measurement(&record, &header_map, "length") {
            Ok(v) => v,
            Err(message) => {
                quarantined.push(RowError { line, message });
                continue;
            }
        };
        let weight = match parse_measurement(&record, &header_map, "weight") {
            Ok(v) => v,
            Err(message) => {
                quarantined.push(RowError { line, message });
                continue;
            }
        };

        let passthrough = columns
            .iter()
            .enumerate()
            .filter(|(_, name)| !matches!(name.as_str(), "date" | "length" | "weight"))
            .map(|(col, name)| (name.clone(), cell(&record, col).map(str::to_string)))
            .collect();

        records.push(Record {
            line,
            date,
            length,
            weight,
            passthrough,
        });
    }

    for bad in &quarantined {
        tracing::warn!(line = bad.line, "quarantined row: {}", bad.message);
    }

    Ok(Dataset {
        columns,
        records,
        quarantined,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !NULL_TOKENS.contains(s))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    cell(record, *idx)
}

/// `Ok(None)` for a missing column or null cell, `Err` for text that is not a finite number.
fn parse_measurement(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<Option<f64>, String> {
    let Some(s) = get_optional(record, header_map, name) else {
        return Ok(None);
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("invalid `{name}` value '{s}'")),
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_columns_and_passthrough() {
        let csv = "\u{feff}Date, Length ,weight,tank\n2024-01-02,12.5,30.1,A\n2024-01-03,13.0,,B\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(ds.columns, vec!["date", "length", "weight", "tank"]);
        assert_eq!(ds.len(), 2);
        let first = &ds.records[0];
        assert_eq!(first.line, 2);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(first.length, Some(12.5));
        assert_eq!(first.field("tank"), Some("A"));
        assert_eq!(ds.records[1].weight, None);
    }

    #[test]
    fn malformed_date_fails_the_whole_load() {
        let csv = "date,length,weight\n2024-01-02,1,2\n02/01/2024,1,2\n";
        match read_dataset(csv.as_bytes()) {
            Err(LoadError::InvalidDate { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "02/01/2024");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_measurement_is_quarantined() {
        let csv = "date,length,weight\n2024-01-02,abc,2\n2024-01-03,4,inf\n2024-01-04,5,6\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.quarantined.len(), 2);
        assert_eq!(ds.quarantined[0].line, 2);
        assert!(ds.quarantined[1].message.contains("weight"));
    }

    #[test]
    fn empty_date_cell_is_a_null() {
        let csv = "date,length,weight\n,1,2\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].date, None);
    }

    #[test]
    fn null_markers_read_as_nulls_in_every_column() {
        let csv = "date,length,weight,site\n2024-01-01,10,2,NA\n2024-01-02,NaN,3,north\n2024-01-03,12,4,null\nN/A,13,5,south\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 4);
        assert!(ds.quarantined.is_empty());
        assert_eq!(ds.records[0].field("site"), None);
        assert_eq!(ds.records[1].length, None);
        assert_eq!(ds.records[1].field("site"), Some("north"));
        assert_eq!(ds.records[2].field("site"), None);
        assert_eq!(ds.records[3].date, None);
        assert_eq!(ds.records.iter().map(Record::null_count).sum::<usize>(), 4);
    }

    #[test]
    fn extra_fields_fail_the_load() {
        let csv = "date,length,weight\n2024-01-01,10,2\n2024-01-02,11,3,999,junk\n";
        match read_dataset(csv.as_bytes()) {
            Err(LoadError::FieldCount { line, expected, found }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 5);
            }
            other => panic!("expected FieldCount, got {other:?}"),
        }
    }

    #[test]
    fn short_row_reads_missing_cells_as_nulls() {
        let csv = "date,length,weight,site\n2024-01-01,10\n";
        let ds = read_dataset(csv.as_bytes()).unwrap();
        let row = &ds.records[0];
        assert_eq!(row.length, Some(10.0));
        assert_eq!(row.weight, None);
        assert_eq!(row.field("site"), None);
        assert_eq!(row.null_count(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_dataset_file(Path::new("/nonexistent/raw/fish.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
