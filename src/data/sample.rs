//! Synthetic growth sample generation.
//!
//! Produces a seeded, reproducible measurement table shaped like real survey
//! data: several individuals per sampling day, lengths following a VBGF curve,
//! weights following the power law, log-normal measurement noise and an
//! optional share of planted length outliers.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::Serialize;

use crate::config::ModelConfig;
use crate::error::AppError;
use crate::io::ingest::DATE_FORMAT;
use crate::models::{days_since, power_weight, vbgf_length};

/// Knobs for [`generate_sample`].
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub start: NaiveDate,
    /// Number of consecutive sampling days.
    pub n_dates: usize,
    /// Individuals measured per day.
    pub per_date: usize,
    /// Age (days) of the cohort on `start`.
    pub age_offset_days: f64,
    /// Log-scale standard deviation of measurement noise.
    pub noise_sigma: f64,
    /// Probability that a row's length is replaced by an outlier.
    pub outlier_prob: f64,
    /// Multiplier applied to an outlier's length.
    pub outlier_scale: f64,
    pub seed: u64,
    pub vbgf_params: [f64; 3],
    pub weight_params: [f64; 2],
}

impl SampleSpec {
    /// Defaults seeded with the model priors from `model`.
    pub fn from_model(model: &ModelConfig, seed: u64) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            n_dates: 60,
            per_date: 3,
            age_offset_days: 30.0,
            noise_sigma: 0.03,
            outlier_prob: 0.0,
            outlier_scale: 5.0,
            seed,
            vbgf_params: model.vbgf_initial_guess,
            weight_params: model.weight_initial_guess,
        }
    }
}

/// One generated measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub individual: String,
    pub length: f64,
    pub weight: f64,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format(DATE_FORMAT))
}

pub fn generate_sample(spec: &SampleSpec) -> Result<Vec<SampleRow>, AppError> {
    if spec.n_dates == 0 || spec.per_date == 0 {
        return Err(AppError::new(2, "Sample needs at least one date and one row per date."));
    }
    if !(0.0..1.0).contains(&spec.outlier_prob) {
        return Err(AppError::new(2, "Outlier probability must be in [0, 1)."));
    }
    if !(spec.noise_sigma.is_finite() && spec.noise_sigma >= 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }
    if !(spec.outlier_scale.is_finite() && spec.outlier_scale > 0.0) {
        return Err(AppError::new(2, "Outlier scale must be finite and > 0."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    // Mean-one log-normal multiplier.
    let sigma = spec.noise_sigma;
    let noise = |rng: &mut StdRng| (sigma * normal.sample(rng) - 0.5 * sigma * sigma).exp();

    let mut rows = Vec::with_capacity(spec.n_dates * spec.per_date);
    for day in 0..spec.n_dates {
        let date = spec.start + Duration::days(day as i64);
        let age = spec.age_offset_days + days_since(spec.start, date);
        let expected_length = vbgf_length(age, &spec.vbgf_params);
        if !(expected_length.is_finite() && expected_length > 0.0) {
            return Err(AppError::new(
                2,
                format!("VBGF parameters give a non-positive length at age {age}."),
            ));
        }

        for k in 0..spec.per_date {
            let true_length = expected_length * noise(&mut rng);
            let weight = power_weight(true_length, &spec.weight_params) * noise(&mut rng);

            let length = if rng.gen_bool(spec.outlier_prob) {
                true_length * spec.outlier_scale
            } else {
                true_length
            };

            rows.push(SampleRow {
                date,
                individual: format!("ind-{:03}", k + 1),
                length,
                weight,
            });
        }
    }

    Ok(rows)
}

/// Write generated rows as a `date,individual,length,weight` CSV.
pub fn write_sample_csv(path: &Path, rows: &[SampleRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write sample row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush sample CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SampleSpec {
        SampleSpec::from_model(&ModelConfig::default(), 7)
    }

    #[test]
    fn same_seed_same_sample() {
        let a = generate_sample(&spec()).unwrap();
        let b = generate_sample(&spec()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 60 * 3);
    }

    #[test]
    fn lengths_grow_over_time() {
        let mut s = spec();
        s.noise_sigma = 0.0;
        let rows = generate_sample(&s).unwrap();
        let first = rows.first().unwrap().length;
        let last = rows.last().unwrap().length;
        assert!(last > first);
        assert!(rows.iter().all(|r| r.length > 0.0 && r.weight > 0.0));
    }

    #[test]
    fn outliers_are_planted_when_requested() {
        let mut s = spec();
        s.noise_sigma = 0.0;
        s.outlier_prob = 0.2;
        s.outlier_scale = 10.0;
        let rows = generate_sample(&s).unwrap();
        let limit = vbgf_length(s.age_offset_days + s.n_dates as f64, &s.vbgf_params);
        assert!(rows.iter().any(|r| r.length > limit * 2.0));
    }

    #[test]
    fn noiseless_lengths_follow_vbgf_from_the_start_date() {
        let mut s = spec();
        s.noise_sigma = 0.0;
        s.n_dates = 10;
        s.per_date = 1;
        let rows = generate_sample(&s).unwrap();
        for row in &rows {
            let age = s.age_offset_days + days_since(s.start, row.date);
            assert!((row.length - vbgf_length(age, &s.vbgf_params)).abs() < 1e-9);
        }
        assert_eq!(rows[9].date, s.start + Duration::days(9));
    }

    #[test]
    fn rejects_bad_settings() {
        let mut s = spec();
        s.n_dates = 0;
        assert_eq!(generate_sample(&s).unwrap_err().exit_code(), 2);

        let mut s = spec();
        s.outlier_prob = 1.0;
        assert!(generate_sample(&s).is_err());
    }

    #[test]
    fn csv_round_trips_through_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synth.csv");
        let mut s = spec();
        s.n_dates = 5;
        let rows = generate_sample(&s).unwrap();
        write_sample_csv(&path, &rows).unwrap();

        let ds = crate::io::ingest::read_dataset_file(&path).unwrap();
        assert_eq!(ds.len(), 15);
        assert_eq!(ds.columns, vec!["date", "individual", "length", "weight"]);
        assert_eq!(ds.records[0].date, Some(s.start));
    }
}
