//! Student's t distribution.

use crate::stats::distribution::{
    ContinuousDistribution, Distribution, check_probability, positive,
};
use crate::stats::error::StatsResult;
use crate::stats::special::{betainc, betaincinv, lbeta};

/// Student's t with `df` degrees of freedom (non-integer `df` allowed, as
/// produced by the Welch-Satterthwaite equation).
#[derive(Debug, Clone, Copy)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    /// Fails with `InvalidParameter` unless `df` is positive and finite.
    pub fn new(df: f64) -> StatsResult<Self> {
        Ok(Self {
            df: positive("df", df)?,
        })
    }

    /// Degrees of freedom.
    pub fn df(&self) -> f64 {
        self.df
    }

    /// P(|T| >= |t|), read straight off the incomplete beta function.
    pub fn two_sided_pvalue(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        betainc(self.df / 2.0, 0.5, self.df / (self.df + t * t))
    }
}

impl Distribution for StudentT {
    fn mean(&self) -> f64 {
        if self.df > 1.0 { 0.0 } else { f64::NAN }
    }

    fn var(&self) -> f64 {
        if self.df > 2.0 {
            self.df / (self.df - 2.0)
        } else if self.df > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }
}

impl ContinuousDistribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        let nu = self.df;
        let log_density =
            -0.5 * nu.ln() - lbeta(0.5, nu / 2.0) - (nu + 1.0) / 2.0 * (x * x / nu).ln_1p();
        log_density.exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        let tail = 0.5 * self.two_sided_pvalue(x);
        if x > 0.0 { 1.0 - tail } else { tail }
    }

    fn sf(&self, x: f64) -> f64 {
        self.cdf(-x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        let p = check_probability(p)?;
        if p == 0.5 {
            return Ok(0.0);
        }
        // invert the two-sided tail mass 2 min(p, 1 - p)
        let tail = 2.0 * p.min(1.0 - p);
        if tail == 0.0 {
            return Ok(if p < 0.5 {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        let z = betaincinv(self.df / 2.0, 0.5, tail);
        let magnitude = (self.df * (1.0 - z) / z).sqrt();
        Ok(if p < 0.5 { -magnitude } else { magnitude })
    }
}
