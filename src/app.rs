//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - resolves the run configuration
//! - runs the prepare pipeline and prints the summary
//! - writes optional exports

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, PrepareArgs, SynthArgs};
use crate::config::{RunConfig, load_config};
use crate::data::{DataManager, SampleSpec, generate_sample, write_sample_csv};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `growth-prep` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Command::Prepare(args) => handle_prepare(args),
        Command::Synth(args) => handle_synth(args),
    }
}

/// `RUST_LOG` wins when set; otherwise the flags pick the level.
fn init_logging(verbose: bool, debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });

    // Ignore a second init (tests, embedding).
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn resolve_config(path: Option<&Path>) -> Result<RunConfig, AppError> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    for violation in config.model.check_consistency() {
        tracing::warn!("model prior outside bounds: {violation}");
    }

    Ok(config)
}

fn handle_prepare(args: PrepareArgs) -> Result<(), AppError> {
    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(window_size) = args.window_size {
        config.data.window_size = window_size;
    }

    let manager = match &args.data_dir {
        Some(dir) => DataManager::new(dir.clone()),
        None => DataManager::from_env(),
    };
    let outliers = (!args.no_outliers).then_some(args.outliers);

    let prepared = pipeline::prepare(&manager, &args.file, outliers)?;
    let splits = prepared.splits(config.data.window_size);

    let source = manager.source_path(&args.file);
    println!(
        "{}",
        crate::report::format_run_summary(
            &prepared.raw,
            &prepared.cleaned,
            &source.display().to_string(),
            &config.data,
        )
    );
    println!("{}", crate::report::format_splits(&splits));

    if let Some(path) = &args.export_splits {
        crate::io::export::write_splits_csv(path, &splits)?;
        tracing::info!(path = %path.display(), "wrote split summary");
    }

    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    let config = resolve_config(args.config.as_deref())?;

    let mut spec = SampleSpec::from_model(&config.model, args.seed.unwrap_or(config.experiment.random_seed));
    spec.n_dates = args.dates;
    spec.per_date = args.per_date;
    spec.noise_sigma = args.noise;
    spec.outlier_prob = args.outlier_prob;
    spec.outlier_scale = args.outlier_scale;

    let rows = generate_sample(&spec)?;
    write_sample_csv(&args.out, &rows)?;
    println!("Wrote {} rows to {}", rows.len(), args.out.display());

    Ok(())
}
