//! Order-statistic helpers used by outlier fencing.

/// Quantile with linear interpolation between closest ranks.
///
/// For sorted values `x[0..n]` the quantile `q` sits at position `(n - 1) * q`;
/// fractional positions interpolate between neighbours. This matches the usual
/// dataframe default ("linear" method). Returns `None` for empty input or a `q`
/// outside `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

// `sorted` must be non-empty and ascending.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Inclusive Tukey fence `[Q1 - k*IQR, Q3 + k*IQR]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fence {
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Build the IQR fence for `values` with multiplier `k` (1.5 for the classic rule).
/// `None` for empty input.
pub fn iqr_fence(values: &[f64], k: f64) -> Option<Fence> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some(Fence {
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    })
}
