//! Reference distributions behind the test statistics.
//!
//! Only the pieces the hypothesis tests read are modelled: the first two
//! moments, the CDF and survival function, and quantiles for continuous
//! families.

use crate::stats::error::{StatsError, StatsResult};

/// First two moments of a distribution.
pub trait Distribution {
    fn mean(&self) -> f64;

    fn var(&self) -> f64;

    fn std(&self) -> f64 {
        self.var().sqrt()
    }
}

/// Distribution of a real-valued statistic.
pub trait ContinuousDistribution: Distribution {
    /// Density at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// P(X <= x).
    fn cdf(&self, x: f64) -> f64;

    /// P(X > x). Families with a closed-form upper tail override this so
    /// small p-values keep their precision.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Quantile function, the inverse of [`cdf`](Self::cdf).
    fn ppf(&self, p: f64) -> StatsResult<f64>;
}

/// Distribution of a count.
pub trait DiscreteDistribution: Distribution {
    /// P(X = k).
    fn pmf(&self, k: u64) -> f64;

    /// P(X <= k).
    fn cdf(&self, k: u64) -> f64;

    /// P(X > k).
    fn sf(&self, k: u64) -> f64 {
        1.0 - self.cdf(k)
    }
}

/// Shape or scale parameters must be strictly positive and finite.
pub(crate) fn positive(name: &str, value: f64) -> StatsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StatsError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: "must be positive and finite".to_string(),
        })
    }
}

/// Rejects quantile arguments outside [0, 1]; NaN is rejected too.
pub(crate) fn check_probability(p: f64) -> StatsResult<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(StatsError::InvalidProbability { value: p })
    }
}
