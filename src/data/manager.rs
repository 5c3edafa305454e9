//! Measurement file access.
//!
//! The manager only knows where raw files live. Loading is fail-soft: any I/O
//! or parse failure becomes an empty `Dataset` plus a warning, so callers check
//! `is_empty()` before going further. `try_load` exposes the underlying error.

use std::path::{Path, PathBuf};

use crate::domain::Dataset;
use crate::error::LoadError;
use crate::io::ingest::read_dataset_file;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "GROWTH_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";

/// Loads measurement CSVs from `<data_dir>/raw/`.
#[derive(Debug, Clone)]
pub struct DataManager {
    data_dir: PathBuf,
}

impl DataManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Data directory from `GROWTH_DATA_DIR` (a `.env` file is honoured), else `data`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of a raw measurement file.
    pub fn source_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join("raw").join(file_name)
    }

    /// Load a raw file, reporting the failure kind.
    pub fn try_load(&self, file_name: &str) -> Result<Dataset, LoadError> {
        read_dataset_file(&self.source_path(file_name))
    }

    /// Load a raw file; on failure log the reason and return an empty dataset.
    pub fn load(&self, file_name: &str) -> Dataset {
        match self.try_load(file_name) {
            Ok(dataset) => {
                tracing::info!(
                    file = file_name,
                    quarantined = dataset.quarantined.len(),
                    "loaded {} record(s)",
                    dataset.len()
                );
                dataset
            }
            Err(err) => {
                tracing::warn!(file = file_name, "failed to load data: {err}");
                Dataset::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn source_path_points_into_raw() {
        let manager = DataManager::new("/srv/growth");
        assert_eq!(
            manager.source_path("tilapia.csv"),
            PathBuf::from("/srv/growth/raw/tilapia.csv")
        );
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manager = DataManager::new(dir.path());
        assert!(manager.load("absent.csv").is_empty());
        assert!(matches!(manager.try_load("absent.csv"), Err(LoadError::Io { .. })));
    }

    #[test]
    fn bad_date_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("raw")).unwrap();
        fs::write(
            dir.path().join("raw/fish.csv"),
            "date,length,weight\n2024-01-01,10,2\nyesterday,11,3\n",
        )
        .unwrap();

        let manager = DataManager::new(dir.path());
        let ds = manager.load("fish.csv");
        assert!(ds.is_empty());
        assert!(ds.columns.is_empty());
    }

    #[test]
    fn overlong_row_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("raw")).unwrap();
        fs::write(
            dir.path().join("raw/fish.csv"),
            "date,length,weight\n2024-01-01,10,2\n2024-01-02,11,3,999,junk\n",
        )
        .unwrap();

        let manager = DataManager::new(dir.path());
        assert!(matches!(
            manager.try_load("fish.csv"),
            Err(LoadError::FieldCount { line: 3, .. })
        ));
        let ds = manager.load("fish.csv");
        assert!(ds.is_empty());
        assert!(ds.columns.is_empty());
    }

    #[test]
    fn good_file_loads_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("raw")).unwrap();
        fs::write(
            dir.path().join("raw/fish.csv"),
            "date,length,weight,id\n2024-01-01,10,2,a\n2024-01-01,11,3,b\n",
        )
        .unwrap();

        let ds = DataManager::new(dir.path()).load("fish.csv");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].field("id"), Some("b"));
    }
}
