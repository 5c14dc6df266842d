//! Normal distribution.

use crate::stats::distribution::{
    ContinuousDistribution, Distribution, check_probability, positive,
};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::special::{FRAC_1_SQRT_2PI, norm_cdf, norm_ppf};

/// Gaussian N(μ, σ²).
///
/// Reference for the z approximations of the rank tests and skew/kurtosis
/// tests, and the fitted model of the KS normality check.
///
/// ```
/// use abstat::stats::{ContinuousDistribution, Normal};
///
/// let z = Normal::standard();
/// assert!((2.0 * z.sf(1.959963984540054) - 0.05).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    /// N(`loc`, `scale`²).
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidParameter`] when `loc` is not finite or `scale` is
    /// not positive and finite.
    pub fn new(loc: f64, scale: f64) -> StatsResult<Self> {
        if !loc.is_finite() {
            return Err(StatsError::InvalidParameter {
                name: "loc".to_string(),
                value: loc,
                reason: "must be finite".to_string(),
            });
        }
        let scale = positive("scale", scale)?;
        Ok(Self { loc, scale })
    }

    /// Mean μ.
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// Standard deviation σ.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// N(0, 1)
    pub fn standard() -> Self {
        Self {
            loc: 0.0,
            scale: 1.0,
        }
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.loc) / self.scale
    }
}

impl Distribution for Normal {
    fn mean(&self) -> f64 {
        self.loc
    }

    fn var(&self) -> f64 {
        self.scale * self.scale
    }
}

impl ContinuousDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = self.z(x);
        FRAC_1_SQRT_2PI / self.scale * (-0.5 * z * z).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        norm_cdf(self.z(x))
    }

    fn sf(&self, x: f64) -> f64 {
        norm_cdf(-self.z(x))
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        let p = check_probability(p)?;
        if p == 0.0 {
            Ok(f64::NEG_INFINITY)
        } else if p == 1.0 {
            Ok(f64::INFINITY)
        } else {
            Ok(self.loc + self.scale * norm_ppf(p))
        }
    }
}
