//! Schema and completeness checks.
//!
//! Validation is advisory: it never mutates the dataset, and the caller decides
//! whether a failure aborts the run.

use crate::domain::{Dataset, REQUIRED_COLUMNS};

/// Why a dataset is not ready for cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Required columns absent from the header.
    MissingColumns(Vec<String>),
    /// Null cells somewhere in the table (any column).
    NullValues { count: usize },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingColumns(missing) => write!(
                f,
                "missing required columns: {} (need {})",
                missing.join(", "),
                REQUIRED_COLUMNS.join(", ")
            ),
            ValidationIssue::NullValues { count } => {
                write!(f, "dataset contains {count} null value(s)")
            }
        }
    }
}

/// Check the schema first, then scan every cell for nulls.
///
/// A schema failure short-circuits: the null scan only runs once all required
/// columns are present.
pub fn check(dataset: &Dataset) -> Result<(), ValidationIssue> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !dataset.has_column(col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationIssue::MissingColumns(missing));
    }

    let count: usize = dataset.records.iter().map(|r| r.null_count()).sum();
    if count > 0 {
        return Err(ValidationIssue::NullValues { count });
    }

    Ok(())
}

/// `true` when the dataset has the required columns and no nulls.
pub fn validate(dataset: &Dataset) -> bool {
    match check(dataset) {
        Ok(()) => true,
        Err(issue) => {
            tracing::warn!("validation failed: {issue}");
            false
        }
    }
}
