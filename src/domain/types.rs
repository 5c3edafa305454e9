//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory by the cleaning and windowing steps
//! - handed to an external fitter as borrowed row slices
//! - exported as CSV/JSON summaries

use std::collections::BTreeSet;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Columns every measurement file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "length", "weight"];

/// Outlier suppression rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Keep values inside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`.
    #[default]
    Iqr,
}

/// One observation of one individual/sample.
///
/// A `None` field is a null cell in the source file. Extra columns are carried
/// through as raw text, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line in the source file (header is line 1).
    pub line: usize,
    pub date: Option<NaiveDate>,
    pub length: Option<f64>,
    pub weight: Option<f64>,
    pub passthrough: Vec<(String, Option<String>)>,
}

impl Record {
    /// Convenience constructor for a fully populated row without extra columns.
    pub fn new(line: usize, date: NaiveDate, length: f64, weight: f64) -> Self {
        Self {
            line,
            date: Some(date),
            length: Some(length),
            weight: Some(weight),
            passthrough: Vec::new(),
        }
    }

    /// Number of null cells in this row, passthrough fields included.
    pub fn null_count(&self) -> usize {
        let core = [
            self.date.is_none(),
            self.length.is_none(),
            self.weight.is_none(),
        ]
        .into_iter()
        .filter(|missing| *missing)
        .count();
        core + self.passthrough.iter().filter(|(_, v)| v.is_none()).count()
    }

    pub fn field(&self, column: &str) -> Option<&str> {
        self.passthrough
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// A row that failed type coercion at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// A loaded table of measurements.
///
/// `columns` lists the header names seen in the source (normalized to trimmed
/// lowercase). Records keep their load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    pub quarantined: Vec<RowError>,
}

impl Dataset {
    /// The "no usable data" value returned by a failed load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Dataset with the standard `date,length,weight` schema.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
            quarantined: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Same schema, different rows.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
            quarantined: self.quarantined.clone(),
        }
    }

    /// Distinct non-null dates, ascending.
    pub fn distinct_dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .filter_map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        compute_stats(self)
    }
}

/// Summary stats over the non-null values of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub n_dates: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub length_min: f64,
    pub length_max: f64,
    pub weight_min: f64,
    pub weight_max: f64,
}

fn compute_stats(dataset: &Dataset) -> Option<DatasetStats> {
    let dates = dataset.distinct_dates();
    let first_date = *dates.first()?;
    let last_date = *dates.last()?;

    let mut length_min = f64::INFINITY;
    let mut length_max = f64::NEG_INFINITY;
    let mut weight_min = f64::INFINITY;
    let mut weight_max = f64::NEG_INFINITY;

    for r in &dataset.records {
        if let Some(l) = r.length {
            length_min = length_min.min(l);
            length_max = length_max.max(l);
        }
        if let Some(w) = r.weight {
            weight_min = weight_min.min(w);
            weight_max = weight_max.max(w);
        }
    }

    if !length_min.is_finite() || !weight_min.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_rows: dataset.len(),
        n_dates: dates.len(),
        first_date,
        last_date,
        length_min,
        length_max,
        weight_min,
        weight_max,
    })
}

/// One walk-forward step: train on a trailing window of dates, test on the next.
///
/// Rows are borrowed from the cleaned dataset the split was built from.
#[derive(Debug, Clone, Serialize)]
pub struct RollingSplit<'a> {
    pub train: Vec<&'a Record>,
    pub test: Vec<&'a Record>,
    pub train_end_date: NaiveDate,
    pub test_date: NaiveDate,
}

impl RollingSplit<'_> {
    /// Earliest date in the training window.
    pub fn train_start_date(&self) -> Option<NaiveDate> {
        self.train.iter().filter_map(|r| r.date).min()
    }

    /// Distinct dates covered by the training rows, ascending.
    pub fn train_dates(&self) -> Vec<NaiveDate> {
        self.train
            .iter()
            .filter_map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn null_count_includes_passthrough_fields() {
        let mut r = Record::new(2, day(1), 10.0, 5.0);
        r.passthrough.push(("tank".to_string(), None));
        r.passthrough.push(("sex".to_string(), Some("f".to_string())));
        r.weight = None;
        assert_eq!(r.null_count(), 2);
        assert_eq!(r.field("sex"), Some("f"));
        assert_eq!(r.field("tank"), None);
    }

    #[test]
    fn distinct_dates_are_sorted_and_unique() {
        let ds = Dataset::from_records(vec![
            Record::new(2, day(3), 1.0, 1.0),
            Record::new(3, day(1), 1.0, 1.0),
            Record::new(4, day(3), 1.0, 1.0),
        ]);
        assert_eq!(ds.distinct_dates(), vec![day(1), day(3)]);
    }

    #[test]
    fn stats_ignore_nulls() {
        let mut odd = Record::new(4, day(5), 99.0, 9.0);
        odd.length = None;
        let ds = Dataset::from_records(vec![
            Record::new(2, day(1), 10.0, 2.0),
            Record::new(3, day(2), 12.0, 3.0),
            odd,
        ]);
        let stats = ds.stats().unwrap();
        assert_eq!(stats.n_rows, 3);
        assert_eq!(stats.n_dates, 3);
        assert_eq!(stats.last_date, day(5));
        assert_eq!(stats.length_max, 12.0);
        assert_eq!(stats.weight_max, 9.0);
    }

    #[test]
    fn empty_dataset_has_no_stats() {
        assert!(Dataset::empty().stats().is_none());
        assert!(Dataset::empty().is_empty());
    }
}
