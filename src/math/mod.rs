//! Mathematical utilities: quantiles and interquartile fences.

pub mod quantile;

pub use quantile::*;
