//! Binomial distribution.

use crate::stats::distribution::{DiscreteDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};
use crate::stats::special::{betainc, ln_choose};

/// Number of successes in `n` independent trials with success probability
/// `p`. Drives the exact binomial test and, with p = 1/2, the sign test.
#[derive(Debug, Clone, Copy)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    /// `n` trials with success probability `p`; `p` outside [0, 1] (or NaN) is
    /// an `InvalidParameter` error.
    pub fn new(n: u64, p: f64) -> StatsResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::InvalidParameter {
                name: "p".to_string(),
                value: p,
                reason: "success probability must lie in [0, 1]".to_string(),
            });
        }
        Ok(Self { n, p })
    }

    /// Number of trials n.
    pub fn trials(&self) -> u64 {
        self.n
    }

    /// Success probability p.
    pub fn success_probability(&self) -> f64 {
        self.p
    }

    /// Mass is concentrated on a single outcome when p is 0 or 1.
    fn point_mass(&self) -> Option<u64> {
        if self.p == 0.0 {
            Some(0)
        } else if self.p == 1.0 {
            Some(self.n)
        } else {
            None
        }
    }
}

impl Distribution for Binomial {
    fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    fn var(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }
}

impl DiscreteDistribution for Binomial {
    fn pmf(&self, k: u64) -> f64 {
        if k > self.n {
            return 0.0;
        }
        if let Some(at) = self.point_mass() {
            return if k == at { 1.0 } else { 0.0 };
        }
        let (k_f, rest) = (k as f64, (self.n - k) as f64);
        (ln_choose(self.n, k) + k_f * self.p.ln() + rest * (-self.p).ln_1p()).exp()
    }

    fn cdf(&self, k: u64) -> f64 {
        if k >= self.n {
            return 1.0;
        }
        match self.point_mass() {
            Some(at) => {
                if k >= at {
                    1.0
                } else {
                    0.0
                }
            }
            // P(X <= k) = I_{1-p}(n - k, k + 1)
            None => betainc((self.n - k) as f64, k as f64 + 1.0, 1.0 - self.p),
        }
    }

    fn sf(&self, k: u64) -> f64 {
        if k >= self.n {
            return 0.0;
        }
        match self.point_mass() {
            Some(at) => {
                if k < at {
                    1.0
                } else {
                    0.0
                }
            }
            // P(X > k) = I_p(k + 1, n - k)
            None => betainc(k as f64 + 1.0, (self.n - k) as f64, self.p),
        }
    }
}
