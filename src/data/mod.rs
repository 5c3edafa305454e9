//! Data preparation: load, validate, clean, partition.
//!
//! Each step takes a dataset by reference and returns a new value:
//!
//! ```text
//! DataManager::load -> validate -> remove_outliers -> create_rolling_dataset
//! ```
//!
//! `sample` generates synthetic input files for demos and tests.

pub mod manager;
pub mod outliers;
pub mod rolling;
pub mod sample;
pub mod validate;

pub use manager::*;
pub use outliers::*;
pub use rolling::*;
pub use sample::{SampleRow, SampleSpec, generate_sample, write_sample_csv};
pub use validate::*;
