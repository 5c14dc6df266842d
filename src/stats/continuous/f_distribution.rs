//! F distribution.

use crate::stats::distribution::{
    ContinuousDistribution, Distribution, check_probability, positive,
};
use crate::stats::error::StatsResult;
use crate::stats::special::{betainc, betaincinv, lbeta};

/// Fisher-Snedecor F(`dfn`, `dfd`), the reference for Levene's W.
#[derive(Debug, Clone, Copy)]
pub struct FDistribution {
    dfn: f64,
    dfd: f64,
}

impl FDistribution {
    /// Both degrees of freedom must be positive and finite.
    pub fn new(dfn: f64, dfd: f64) -> StatsResult<Self> {
        Ok(Self {
            dfn: positive("dfn", dfn)?,
            dfd: positive("dfd", dfd)?,
        })
    }

    /// Numerator degrees of freedom.
    pub fn dfn(&self) -> f64 {
        self.dfn
    }

    /// Denominator degrees of freedom.
    pub fn dfd(&self) -> f64 {
        self.dfd
    }

    /// Maps x onto the beta variable d1 x / (d1 x + d2).
    fn beta_arg(&self, x: f64) -> f64 {
        self.dfn * x / (self.dfn * x + self.dfd)
    }
}

impl Distribution for FDistribution {
    fn mean(&self) -> f64 {
        let d2 = self.dfd;
        if d2 > 2.0 { d2 / (d2 - 2.0) } else { f64::NAN }
    }

    fn var(&self) -> f64 {
        let (d1, d2) = (self.dfn, self.dfd);
        if d2 <= 4.0 {
            return f64::NAN;
        }
        2.0 * d2 * d2 * (d1 + d2 - 2.0) / (d1 * (d2 - 2.0).powi(2) * (d2 - 4.0))
    }
}

impl ContinuousDistribution for FDistribution {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let (a, b) = (self.dfn / 2.0, self.dfd / 2.0);
        let u = self.beta_arg(x);
        // beta density of u times du/dx
        let log_density = (a - 1.0) * u.ln() + (b - 1.0) * (1.0 - u).ln() - lbeta(a, b)
            + (self.dfn * self.dfd).ln()
            - 2.0 * (self.dfn * x + self.dfd).ln();
        log_density.exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        betainc(self.dfn / 2.0, self.dfd / 2.0, self.beta_arg(x))
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        // upper tail through the complementary beta argument
        let w = self.dfd / (self.dfd + self.dfn * x);
        betainc(self.dfd / 2.0, self.dfn / 2.0, w)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        let p = check_probability(p)?;
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let u = betaincinv(self.dfn / 2.0, self.dfd / 2.0, p);
        Ok(self.dfd * u / (self.dfn * (1.0 - u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StudentT;

    #[test]
    fn test_parameters() {
        let f = FDistribution::new(2.0, 27.0).unwrap();
        assert_eq!((f.dfn(), f.dfd()), (2.0, 27.0));
        assert!(FDistribution::new(0.0, 5.0).is_err());
        assert!(FDistribution::new(5.0, f64::NAN).is_err());
    }

    #[test]
    fn test_levene_reference_tail() {
        // Levene W on three groups of ten
        let f = FDistribution::new(2.0, 27.0).unwrap();
        assert!((f.sf(7.584952754501659) - 0.0024315059672496936).abs() < 1e-9);
        assert!((f.cdf(7.584952754501659) + f.sf(7.584952754501659) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_of_t() {
        // F(1, ν) is T² for T ~ t(ν)
        let f = FDistribution::new(1.0, 12.0).unwrap();
        let t = StudentT::new(12.0).unwrap();
        for x in [0.5, 1.7, 3.0] {
            assert!((f.sf(x * x) - t.two_sided_pvalue(x)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_pdf_integrates_near_one() {
        let f = FDistribution::new(4.0, 9.0).unwrap();
        let h = 1e-3;
        let mass: f64 = (0..20_000).map(|i| f.pdf((i as f64 + 0.5) * h) * h).sum();
        assert!((mass - f.cdf(20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_ppf_inverts_cdf() {
        let f = FDistribution::new(3.0, 15.0).unwrap();
        let x = f.ppf(0.9).unwrap();
        assert!((f.cdf(x) - 0.9).abs() < 1e-7);
        assert!((f.mean() - 15.0 / 13.0).abs() < 1e-15);
    }
}
