//! Terminal output for a prepare run.
//!
//! Formatting lives here so the data steps stay free of printing.

pub mod format;

pub use format::*;
