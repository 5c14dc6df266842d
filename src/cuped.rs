//! CUPED variance reduction.
//!
//! Controlled-experiment Using Pre-Experiment Data: a pre-period covariate `x`
//! correlated with the outcome `y` is regressed out of `y`,
//!
//! ```text
//! θ     = cov(x, y) / var(x)
//! y_adj = y - θ (x - x̄)
//! ```
//!
//! The adjusted series keeps the mean of `y` and has variance
//! var(y)(1 - ρ²), where ρ is the correlation between `x` and `y`.
//!
//! # Example
//!
//! ```
//! use abstat::cuped;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.1, 3.9, 6.2, 7.8];
//! let y_adj = cuped(&x, &y).unwrap();
//! assert_eq!(y_adj.len(), 4);
//! ```

use crate::stats::{StatsError, StatsResult, cov, ensure_len, ensure_same_len, mean, var};
use tracing::debug;

/// Regression coefficient θ = cov(x, y) / var(x) from sample moments.
pub fn cuped_theta(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    coefficient(x, y, 1)
}

// ddof applies to both moments, so it cancels in the ratio up to rounding.
fn coefficient(x: &[f64], y: &[f64], ddof: usize) -> StatsResult<f64> {
    ensure_same_len(x, y, "CUPED")?;
    ensure_len(x.len(), 2, "CUPED")?;

    let vx = var(x, ddof)?;
    if vx == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "CUPED: covariate has zero variance".to_string(),
        });
    }
    let theta = cov(x, y, ddof)? / vx;
    debug!(theta, n = x.len(), "CUPED coefficient");
    Ok(theta)
}

/// Adjust `y` by the centered covariate: `y - θ (x - mean(x))`.
///
/// Sample (Bessel-corrected) covariance and variance. The mean of `y` is
/// preserved.
///
/// # Errors
///
/// * [`StatsError::LengthMismatch`] if `x` and `y` differ in length.
/// * [`StatsError::InsufficientData`] for fewer than two observations.
/// * [`StatsError::DegenerateData`] if `x` is constant.
pub fn cuped(x: &[f64], y: &[f64]) -> StatsResult<Vec<f64>> {
    let theta = coefficient(x, y, 1)?;
    let x_bar = mean(x);
    Ok(y.iter()
        .zip(x)
        .map(|(yi, xi)| yi - theta * (xi - x_bar))
        .collect())
}

/// Adjust `y` by the raw covariate: `y - θ x`.
///
/// Population moments are used for θ, giving the same coefficient as
/// [`cuped`]. Without centering the result is shifted by θ·mean(x), so it
/// matches [`cuped`] only when `x` is zero-mean.
pub fn cuped_simplified(x: &[f64], y: &[f64]) -> StatsResult<Vec<f64>> {
    let theta = coefficient(x, y, 0)?;
    Ok(y.iter().zip(x).map(|(yi, xi)| yi - theta * xi).collect())
}
