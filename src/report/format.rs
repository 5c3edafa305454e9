//! Formatted run summary and split table.

use crate::config::DataConfig;
use crate::data::MIN_TRAIN_ROWS;
use crate::domain::{Dataset, RollingSplit};

/// Dataset counts and ranges before and after cleaning.
pub fn format_run_summary(raw: &Dataset, cleaned: &Dataset, source: &str, data: &DataConfig) -> String {
    let mut out = String::new();

    out.push_str("=== growth-prep - rolling-window data preparation ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Rows: loaded={} quarantined={} outliers_removed={} kept={}\n",
        raw.len(),
        raw.quarantined.len(),
        raw.len() - cleaned.len(),
        cleaned.len()
    ));

    match cleaned.stats() {
        Some(stats) => {
            out.push_str(&format!(
                "Dates: n={} | [{} .. {}]\n",
                stats.n_dates, stats.first_date, stats.last_date
            ));
            out.push_str(&format!(
                "Length: [{:.3}, {:.3}] | Weight: [{:.3}, {:.3}]\n",
                stats.length_min, stats.length_max, stats.weight_min, stats.weight_max
            ));
        }
        None => out.push_str("Dates: n=0\n"),
    }

    out.push_str(&format!(
        "Window: {} dates | split floor: {} train rows | min_data_points (fitter): {} | update every {} split(s)\n",
        data.window_size, MIN_TRAIN_ROWS, data.min_data_points, data.update_frequency
    ));

    out
}

/// One line per split.
pub fn format_splits(splits: &[RollingSplit<'_>]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Splits: {}\n", splits.len()));
    if splits.is_empty() {
        out.push_str("  (no window had enough rows)\n");
        return out;
    }

    out.push_str(&format!(
        "{:>5}  {:<10}  {:<10}  {:<10}  {:>6}  {:>5}\n",
        "#", "train_from", "train_to", "test", "train", "test"
    ));
    for (idx, split) in splits.iter().enumerate() {
        let from = split
            .train_start_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>5}  {:<10}  {:<10}  {:<10}  {:>6}  {:>5}\n",
            idx + 1,
            from,
            split.train_end_date,
            split.test_date,
            split.train.len(),
            split.test.len()
        ));
    }

    out
}
