//! Chi-squared distribution.

use crate::stats::distribution::{
    ContinuousDistribution, Distribution, check_probability, positive,
};
use crate::stats::error::StatsResult;
use crate::stats::special::{gammainc, gammaincc, gammaincinv, lgamma};

/// χ² with `df` degrees of freedom, i.e. Gamma(df/2, scale 2).
///
/// Bartlett's statistic and the D'Agostino-Pearson K² are read against it.
#[derive(Debug, Clone, Copy)]
pub struct ChiSquared {
    df: f64,
}

impl ChiSquared {
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

    fn shape(&self) -> f64 {
        self.df / 2.0
    }
}

impl Distribution for ChiSquared {
    fn mean(&self) -> f64 {
        self.df
    }

    fn var(&self) -> f64 {
        2.0 * self.df
    }
}

impl ContinuousDistribution for ChiSquared {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let a = self.shape();
        ((a - 1.0) * (x / 2.0).ln() - x / 2.0 - lgamma(a)).exp() / 2.0
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            0.0
        } else {
            gammainc(self.shape(), x / 2.0)
        }
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            gammaincc(self.shape(), x / 2.0)
        }
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        let p = check_probability(p)?;
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        if p == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * gammaincinv(self.shape(), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_df_is_exponential() {
        // χ²(2) has sf(x) = exp(-x/2)
        let chi2 = ChiSquared::new(2.0).unwrap();
        for x in [0.1, 1.0, 5.0, 22.78] {
            assert!((chi2.sf(x) - (-x / 2.0).exp()).abs() < 1e-12);
            assert!((chi2.pdf(x) - 0.5 * (-x / 2.0).exp()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bartlett_reference_tail() {
        // Bartlett statistic on three groups of ten, df = 2
        let chi2 = ChiSquared::new(2.0).unwrap();
        assert!((chi2.sf(22.789434813726768) - 1.1254782518834626e-05).abs() < 1e-12);
    }

    #[test]
    fn test_support_edges() {
        let chi2 = ChiSquared::new(3.0).unwrap();
        assert_eq!(chi2.cdf(-1.0), 0.0);
        assert_eq!(chi2.sf(0.0), 1.0);
        assert_eq!(chi2.pdf(-0.5), 0.0);
        assert_eq!(chi2.ppf(0.0).unwrap(), 0.0);
        assert!(ChiSquared::new(-3.0).is_err());
    }

    #[test]
    fn test_ppf_critical_value() {
        // 95th percentile of χ²(5)
        let chi2 = ChiSquared::new(5.0).unwrap();
        assert!((chi2.ppf(0.95).unwrap() - 11.070497693516351).abs() < 1e-6);
        assert_eq!(chi2.mean(), 5.0);
        assert_eq!(chi2.var(), 10.0);
    }
}
