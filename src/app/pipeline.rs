//! Shared "prepare" pipeline used by the CLI.
//!
//! load -> validate -> remove outliers
//!
//! Splits borrow from the cleaned dataset, so `PreparedData` owns it and hands
//! out splits on demand.

use crate::data::{self, DataManager, create_rolling_dataset, remove_outliers};
use crate::domain::{Dataset, OutlierMethod, RollingSplit};
use crate::error::AppError;

/// All computed outputs of a single `growth-prep prepare` run.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub raw: Dataset,
    pub cleaned: Dataset,
}

impl PreparedData {
    /// Rows dropped by outlier removal.
    pub fn removed(&self) -> usize {
        self.raw.len() - self.cleaned.len()
    }

    /// Walk-forward splits over the cleaned rows.
    pub fn splits(&self, window_size: usize) -> Vec<RollingSplit<'_>> {
        create_rolling_dataset(&self.cleaned, window_size)
    }
}

/// Load, validate and clean `file_name`.
///
/// An empty load or a failed validation stops the run with exit code 3.
pub fn prepare(
    manager: &DataManager,
    file_name: &str,
    outliers: Option<OutlierMethod>,
) -> Result<PreparedData, AppError> {
    let raw = manager.load(file_name);
    if raw.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No usable data in '{}'.",
                manager.source_path(file_name).display()
            ),
        ));
    }

    data::check(&raw).map_err(|issue| AppError::new(3, format!("Validation failed: {issue}")))?;

    let cleaned = match outliers {
        Some(method) => remove_outliers(&raw, method),
        None => raw.clone(),
    };

    Ok(PreparedData { raw, cleaned })
}
