//! Descriptive statistics over plain `f64` samples.
//!
//! Moment-based shape measures use the biased (population) estimators:
//!
//! ```text
//! m_k = (1/n) Σ (xᵢ - x̄)^k
//! skewness g1 = m3 / m2^(3/2)
//! kurtosis g2 = m4 / m2² - 3        (Fisher / excess)
//! ```
//!
//! These are the values printed next to the skew and kurtosis tests.

use crate::stats::error::{StatsError, StatsResult, ensure_len, ensure_same_len};
use crate::stats::helpers::sorted;

/// Arithmetic mean. NaN for an empty sample.
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (1 = Bessel-corrected).
pub fn var(x: &[f64], ddof: usize) -> StatsResult<f64> {
    ensure_len(x.len(), ddof + 1, "variance")?;
    let m = mean(x);
    let ss: f64 = x.iter().map(|&v| (v - m) * (v - m)).sum();
    Ok(ss / (x.len() - ddof) as f64)
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std(x: &[f64], ddof: usize) -> StatsResult<f64> {
    var(x, ddof).map(f64::sqrt)
}

/// Covariance of two equal-length samples with `ddof` delta degrees of freedom.
pub fn cov(x: &[f64], y: &[f64], ddof: usize) -> StatsResult<f64> {
    ensure_same_len(x, y, "covariance")?;
    ensure_len(x.len(), ddof + 1, "covariance")?;
    let mx = mean(x);
    let my = mean(y);
    let s: f64 = x.iter().zip(y).map(|(&a, &b)| (a - mx) * (b - my)).sum();
    Ok(s / (x.len() - ddof) as f64)
}

/// k-th central moment about the mean (biased).
pub fn central_moment(x: &[f64], k: i32) -> f64 {
    let m = mean(x);
    x.iter().map(|&v| (v - m).powi(k)).sum::<f64>() / x.len() as f64
}

/// Sample skewness (Fisher-Pearson, biased).
///
/// NaN when the sample has zero variance.
pub fn skewness(x: &[f64]) -> StatsResult<f64> {
    ensure_len(x.len(), 1, "skewness")?;
    let m2 = central_moment(x, 2);
    if m2 == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(central_moment(x, 3) / m2.powf(1.5))
}

/// Sample excess kurtosis (Fisher's definition, biased).
///
/// NaN when the sample has zero variance.
pub fn kurtosis(x: &[f64]) -> StatsResult<f64> {
    ensure_len(x.len(), 1, "kurtosis")?;
    let m2 = central_moment(x, 2);
    if m2 == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(central_moment(x, 4) / (m2 * m2) - 3.0)
}

/// Median of a sample.
pub fn median(x: &[f64]) -> StatsResult<f64> {
    ensure_len(x.len(), 1, "median")?;
    let s = sorted(x);
    let n = s.len();
    if n % 2 == 1 {
        Ok(s[n / 2])
    } else {
        Ok((s[n / 2 - 1] + s[n / 2]) / 2.0)
    }
}

/// Mean after cutting `proportion` of observations from each tail.
pub fn trimmed_mean(x: &[f64], proportion: f64) -> StatsResult<f64> {
    ensure_len(x.len(), 1, "trimmed mean")?;
    if !(0.0..0.5).contains(&proportion) {
        return Err(StatsError::InvalidParameter {
            name: "proportion".to_string(),
            value: proportion,
            reason: "must be in [0, 0.5)".to_string(),
        });
    }
    let s = sorted(x);
    let cut = (proportion * s.len() as f64) as usize;
    Ok(mean(&s[cut..s.len() - cut]))
}
