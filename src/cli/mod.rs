//! Command-line parsing for the growth data preparation tool.
//!
//! Argument parsing and command dispatch stay separate from the data steps.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::OutlierMethod;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "growth-prep",
    version,
    about = "Prepare growth measurements for rolling-window model fitting"
)]
pub struct Cli {
    /// Log progress (info level).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log everything (debug level).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load, validate and clean a measurement file, then build rolling splits.
    Prepare(PrepareArgs),
    /// Write a synthetic measurement CSV.
    Synth(SynthArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PrepareArgs {
    /// File name under `<data-dir>/raw/`.
    #[arg(short, long)]
    pub file: String,

    /// Data directory (defaults to $GROWTH_DATA_DIR, then `data`).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// JSON run configuration; missing fields use defaults.
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Override `data.window_size` (distinct dates per training window).
    #[arg(short, long)]
    pub window_size: Option<usize>,

    /// Outlier rule.
    #[arg(long, value_enum, default_value_t = OutlierMethod::Iqr)]
    pub outliers: OutlierMethod,

    /// Skip outlier removal.
    #[arg(long)]
    pub no_outliers: bool,

    /// Write one CSV line per split.
    #[arg(long, value_name = "CSV")]
    pub export_splits: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Output CSV path.
    #[arg(short, long)]
    pub out: PathBuf,

    /// JSON run configuration (model priors drive the generated curves).
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Number of consecutive sampling days.
    #[arg(long, default_value_t = 60)]
    pub dates: usize,

    /// Individuals measured per day.
    #[arg(long, default_value_t = 3)]
    pub per_date: usize,

    /// Random seed (defaults to `experiment.random_seed`).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log-scale measurement noise.
    #[arg(long, default_value_t = 0.03)]
    pub noise: f64,

    /// Probability of planting a length outlier on a row.
    #[arg(long, default_value_t = 0.0)]
    pub outlier_prob: f64,

    /// Length multiplier for planted outliers.
    #[arg(long, default_value_t = 5.0)]
    pub outlier_scale: f64,
}
