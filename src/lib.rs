//! `growth-prep` library crate.
//!
//! Prepares dated length/weight measurements for walk-forward fitting of
//! growth models: load, validate, remove outliers, build rolling train/test
//! splits. The binary is a thin wrapper so the steps stay testable and
//! reusable by fitting code.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
