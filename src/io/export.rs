//! Export a per-split summary to CSV.
//!
//! One row per rolling split, meant for spreadsheets or for checking which
//! windows survived the minimum-row filter.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::RollingSplit;
use crate::error::AppError;

/// Write the split summary CSV.
pub fn write_splits_csv(path: &Path, splits: &[RollingSplit<'_>]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create split CSV '{}': {e}", path.display())))?;
    write_splits(&mut file, splits)
        .map_err(|e| AppError::new(2, format!("Failed to write split CSV '{}': {e}", path.display())))
}

fn write_splits<W: Write>(out: &mut W, splits: &[RollingSplit<'_>]) -> std::io::Result<()> {
    writeln!(out, "split,train_start,train_end_date,test_date,train_rows,test_rows")?;
    for (idx, split) in splits.iter().enumerate() {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            idx + 1,
            split
                .train_start_date()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            split.train_end_date,
            split.test_date,
            split.train.len(),
            split.test.len(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Record;

    #[test]
    fn writes_one_line_per_split() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        let rows = vec![
            Record::new(2, d(1), 1.0, 1.0),
            Record::new(3, d(2), 1.0, 1.0),
            Record::new(4, d(3), 1.0, 1.0),
        ];
        let split = RollingSplit {
            train: vec![&rows[0], &rows[1]],
            test: vec![&rows[2]],
            train_end_date: d(2),
            test_date: d(3),
        };

        let mut buf = Vec::new();
        write_splits(&mut buf, &[split]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,2024-05-01,2024-05-02,2024-05-03,2,1");
    }
}
