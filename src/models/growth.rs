//! Growth-curve evaluation.
//!
//! Fitting lives outside this crate; these are the two model functions a fitter
//! evaluates against prepared splits, with parameter layouts matching
//! `ModelConfig`:
//!
//! - VBGF length: `l_inf * (1 - exp(-k * (t - t0)))`, params `[l_inf, k, t0]`
//! - power-law weight: `a * length^b`, params `[a, b]`

use chrono::NaiveDate;

/// Von Bertalanffy length at time `t` (same unit as `t0` and `1/k`).
pub fn vbgf_length(t: f64, params: &[f64; 3]) -> f64 {
    let [l_inf, k, t0] = *params;
    l_inf * (1.0 - (-k * (t - t0)).exp())
}

/// Length-weight power relationship.
pub fn power_weight(length: f64, params: &[f64; 2]) -> f64 {
    let [a, b] = *params;
    a * length.powf(b)
}

/// Days elapsed since `origin`, the time axis used when fitting VBGF to dated rows.
pub fn days_since(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vbgf_is_zero_at_t0_and_approaches_l_inf() {
        let params = [40.0, 0.015, 0.0];
        assert!(vbgf_length(0.0, &params).abs() < 1e-12);
        let late = vbgf_length(2_000.0, &params);
        assert!(late < 40.0 && late > 39.99);
        assert!(vbgf_length(30.0, &params) < vbgf_length(60.0, &params));
    }

    #[test]
    fn power_weight_smoke() {
        let w = power_weight(20.0, &[0.01, 3.0]);
        assert!((w - 80.0).abs() < 1e-9);
    }

    #[test]
    fn days_since_counts_calendar_days() {
        let a = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(days_since(a, b), 4.0);
    }
}
