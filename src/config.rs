//! Run configuration: window sizing, model priors/bounds and experiment knobs.
//!
//! All bundles are plain values with defaults. Nothing here checks that a
//! model's initial guesses sit inside its bounds; `ModelConfig::check_consistency`
//! reports violations for callers that want to know.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Window sizing and data thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Number of distinct dates in each training window.
    pub window_size: usize,
    /// Refit cadence, in splits. Consumed by the fitter.
    pub update_frequency: usize,
    /// Minimum training-set size advised to the fitter. Not enforced by
    /// `create_rolling_dataset`, which has its own fixed floor.
    pub min_data_points: usize,
    /// Share of data held out for validation. Consumed by the fitter.
    pub validation_ratio: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            window_size: 30,
            update_frequency: 7,
            min_data_points: 10,
            validation_ratio: 0.2,
        }
    }
}

/// Per-parameter lower/upper bounds, `P` being a fixed-size parameter array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<P> {
    pub lower: P,
    pub upper: P,
}

/// Initial guesses and bounds for the growth-curve optimizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// `[l_inf, k, t0]`
    pub vbgf_initial_guess: [f64; 3],
    pub vbgf_bounds: Bounds<[f64; 3]>,
    /// `[a, b]` in `weight = a * length^b`
    pub weight_initial_guess: [f64; 2],
    pub weight_bounds: Bounds<[f64; 2]>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vbgf_initial_guess: [40.0, 0.015, 0.0],
            vbgf_bounds: Bounds {
                lower: [20.0, 0.001, -15.0],
                upper: [100.0, 0.1, 10.0],
            },
            weight_initial_guess: [0.01, 3.0],
            weight_bounds: Bounds {
                lower: [0.001, 2.5],
                upper: [0.1, 3.5],
            },
        }
    }
}

/// A parameter whose initial guess falls outside its bounds (or whose bounds
/// are inverted).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundViolation {
    pub parameter: &'static str,
    pub lower: f64,
    pub guess: f64,
    pub upper: f64,
}

impl std::fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: expected {} <= {} <= {}",
            self.parameter, self.lower, self.guess, self.upper
        )
    }
}

const VBGF_PARAMS: [&str; 3] = ["vbgf.l_inf", "vbgf.k", "vbgf.t0"];
const WEIGHT_PARAMS: [&str; 2] = ["weight.a", "weight.b"];

impl ModelConfig {
    /// List every parameter where `lower <= guess <= upper` does not hold.
    pub fn check_consistency(&self) -> Vec<BoundViolation> {
        let mut out = Vec::new();
        let vbgf = &self.vbgf_bounds;
        collect_violations(&VBGF_PARAMS, &self.vbgf_initial_guess, &vbgf.lower, &vbgf.upper, &mut out);
        let weight = &self.weight_bounds;
        collect_violations(
            &WEIGHT_PARAMS,
            &self.weight_initial_guess,
            &weight.lower,
            &weight.upper,
            &mut out,
        );
        out
    }
}

fn collect_violations(
    names: &[&'static str],
    guess: &[f64],
    lower: &[f64],
    upper: &[f64],
    out: &mut Vec<BoundViolation>,
) {
    for (i, name) in names.iter().enumerate() {
        let (lower, g, upper) = (lower[i], guess[i], upper[i]);
        // NaN anywhere also fails this check.
        if !(lower <= g && g <= upper) {
            out.push(BoundViolation {
                parameter: *name,
                lower,
                guess: g,
                upper,
            });
        }
    }
}

/// Trial settings for the external experiment runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub random_seed: u64,
    pub n_trials: usize,
    pub confidence_level: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            random_seed: 42,
            n_trials: 10,
            confidence_level: 0.95,
        }
    }
}

/// Everything a run needs, as read from a JSON config file.
///
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub experiment: ExperimentConfig,
}

/// Read a `RunConfig` from a JSON file.
pub fn load_config(path: &Path) -> Result<RunConfig, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open config '{}': {e}", path.display())))?;
    let config: RunConfig = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid config JSON '{}': {e}", path.display())))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        assert!(ModelConfig::default().check_consistency().is_empty());
        let data = DataConfig::default();
        assert_eq!(data.window_size, 30);
        assert_eq!(data.min_data_points, 10);
        assert_eq!(ExperimentConfig::default().n_trials, 10);
    }

    #[test]
    fn guess_outside_bounds_is_reported() {
        let mut model = ModelConfig::default();
        model.vbgf_initial_guess[0] = 150.0;
        model.weight_bounds.lower[1] = 3.2;

        let violations = model.check_consistency();
        let names: Vec<_> = violations.iter().map(|v| v.parameter).collect();
        assert_eq!(names, vec!["vbgf.l_inf", "weight.b"]);
        assert!(violations[0].to_string().contains("150"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{ "data": { "window_size": 14 }, "experiment": { "n_trials": 3 } }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.data.window_size, 14);
        assert_eq!(config.data.update_frequency, 7);
        assert_eq!(config.experiment.n_trials, 3);
        assert_eq!(config.experiment.random_seed, 42);
        assert_eq!(config.model, ModelConfig::default());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/growth.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
