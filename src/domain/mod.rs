//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement rows and tables (`Record`, `Dataset`, `DatasetStats`)
//! - walk-forward splits (`RollingSplit`)
//! - the outlier rule selector (`OutlierMethod`)

pub mod types;

pub use types::*;
