//! Outlier suppression.
//!
//! IQR fencing runs on `length` first, then on `weight`. The weight quartiles
//! are computed over the rows that survived the length fence, not over the
//! input, so the result depends on the column order.

use crate::domain::{Dataset, OutlierMethod, Record};
use crate::math::iqr_fence;

/// Tukey multiplier.
const IQR_K: f64 = 1.5;

type Column = fn(&Record) -> Option<f64>;

fn length_of(r: &Record) -> Option<f64> {
    r.length
}

fn weight_of(r: &Record) -> Option<f64> {
    r.weight
}

const FENCED_COLUMNS: [(&str, Column); 2] = [("length", length_of), ("weight", weight_of)];

/// Return a copy of `dataset` without outlying rows.
///
/// Rows with a null in a fenced column never pass that column's fence. The
/// removed count is logged; the input is left untouched.
pub fn remove_outliers(dataset: &Dataset, method: OutlierMethod) -> Dataset {
    let mut kept: Vec<&Record> = dataset.records.iter().collect();

    match method {
        OutlierMethod::Iqr => {
            for (name, column) in FENCED_COLUMNS {
                let before = kept.len();
                kept = fence_column(kept, column);
                tracing::debug!(column = name, removed = before - kept.len(), "applied IQR fence");
            }
        }
    }

    let removed = dataset.len() - kept.len();
    if removed > 0 {
        tracing::info!("removed {removed} outlier row(s)");
    }

    dataset.with_records(kept.into_iter().cloned().collect())
}

fn fence_column(rows: Vec<&Record>, column: Column) -> Vec<&Record> {
    let values: Vec<f64> = rows.iter().filter_map(|r| column(r)).collect();
    let Some(fence) = iqr_fence(&values, IQR_K) else {
        // No non-null values left: nothing can pass.
        return Vec::new();
    };
    rows.into_iter()
        .filter(|r| column(r).is_some_and(|v| fence.contains(v)))
        .collect()
}
