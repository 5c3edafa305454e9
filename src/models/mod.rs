//! Growth model implementations.
//!
//! Models are small, pure functions so that external fitting code and the
//! synthetic sample generator can share them.

pub mod growth;

pub use growth::*;
