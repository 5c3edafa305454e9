//! Walk-forward partitioning.
//!
//! Windows are counted in distinct dates, not rows, so several individuals
//! measured on the same day do not shorten the window's time span.
//!
//! For each position `i >= window_size` in the sorted distinct dates:
//! - train = every row dated in `dates[i - window_size..i]`
//! - test  = every row dated `dates[i]`
//!
//! A split is kept only when it has at least [`MIN_TRAIN_ROWS`] train rows and
//! one test row. Other positions are skipped without a diagnostic.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Dataset, RollingSplit};

/// Fixed training-row floor for emitting a split.
///
/// Separate from `DataConfig::min_data_points`, which is advice for the
/// fitter and is not consulted here.
pub const MIN_TRAIN_ROWS: usize = 10;

/// Build the rolling train/test splits over `dataset`, in ascending test date.
///
/// Rows without a date do not take part. Train rows keep the dataset's load
/// order.
pub fn create_rolling_dataset(dataset: &Dataset, window_size: usize) -> Vec<RollingSplit<'_>> {
    // date -> row indices, in load order
    let mut groups: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (idx, record) in dataset.records.iter().enumerate() {
        if let Some(date) = record.date {
            groups.entry(date).or_default().push(idx);
        }
    }
    let dates: Vec<NaiveDate> = groups.keys().copied().collect();

    let mut splits = Vec::new();
    for i in window_size..dates.len() {
        let train_dates = &dates[i - window_size..i];
        let test_date = dates[i];

        let mut train_idx: Vec<usize> = train_dates
            .iter()
            .flat_map(|d| groups[d].iter().copied())
            .collect();
        let test_idx = &groups[&test_date];

        if train_idx.len() < MIN_TRAIN_ROWS || test_idx.is_empty() {
            continue;
        }
        // A non-empty train set implies window_size > 0.
        let Some(&train_end_date) = train_dates.last() else {
            continue;
        };

        train_idx.sort_unstable();
        splits.push(RollingSplit {
            train: train_idx.iter().map(|&j| &dataset.records[j]).collect(),
            test: test_idx.iter().map(|&j| &dataset.records[j]).collect(),
            train_end_date,
            test_date,
        });
    }

    tracing::debug!(
        dates = dates.len(),
        window_size,
        splits = splits.len(),
        "built rolling splits"
    );
    splits
}
