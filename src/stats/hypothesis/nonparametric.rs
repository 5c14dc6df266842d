//! Rank- and sign-based tests for two samples and paired observations.
//!
//! All tests are two-sided. A NaN in any sample yields a NaN statistic and
//! p-value, except in the sign test, where NaN counts as neither above nor
//! below the hypothesised median and is discarded.

use crate::stats::descriptive::mean;
use crate::stats::distribution::{ContinuousDistribution, DiscreteDistribution};
use crate::stats::error::{StatsError, StatsResult, ensure_len, ensure_same_len};
use crate::stats::helpers::{contains_nan, has_ties, rankdata, tie_term};
use crate::stats::types::TestResult;
use crate::stats::{Binomial, Normal, StudentT};
use tracing::debug;

/// Mann-Whitney U exact null distribution is used up to this size of the
/// smaller sample.
const MWU_EXACT_MAX: usize = 8;

/// Wilcoxon signed-rank exact null distribution is used up to this many
/// nonzero differences.
const WILCOXON_EXACT_MAX: usize = 50;

/// Relative tolerance for "as extreme as observed" in the binomial test.
const BINOM_RERR: f64 = 1.0 + 1e-7;

/// Mann-Whitney U test of H₀: the distributions of `x` and `y` are equal.
///
/// The reported statistic is U₁ = R₁ - n₁(n₁+1)/2, where R₁ is the rank sum of
/// `x` in the pooled sample. Without ties and with the smaller sample of at
/// most 8 observations the p-value is exact; otherwise it comes from the
/// normal approximation with tie and continuity correction.
pub fn mannwhitneyu(x: &[f64], y: &[f64]) -> StatsResult<TestResult> {
    ensure_len(x.len(), 1, "Mann-Whitney U test")?;
    ensure_len(y.len(), 1, "Mann-Whitney U test")?;
    if contains_nan(&[x, y]) {
        return Ok(TestResult::nan());
    }

    let n1 = x.len();
    let n2 = y.len();
    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let ranks = rankdata(&pooled);

    let r1: f64 = ranks[..n1].iter().sum();
    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n1f * n2f - u1;
    let u = u1.max(u2);

    let exact = !has_ties(&pooled) && n1.min(n2) <= MWU_EXACT_MAX;
    let p = if exact {
        debug!(n1, n2, "Mann-Whitney U: exact null distribution");
        2.0 * mwu_exact_sf(u, n1.min(n2), n1.max(n2))
    } else {
        let n = n1f + n2f;
        let s2 = n1f * n2f / 12.0 * ((n + 1.0) - tie_term(&pooled) / (n * (n - 1.0)));
        if s2 <= 0.0 {
            return Err(StatsError::DegenerateData {
                context: "Mann-Whitney U test: all values are tied".to_string(),
            });
        }
        let z = (u - n1f * n2f / 2.0 - 0.5) / s2.sqrt();
        2.0 * Normal::standard().sf(z)
    };

    Ok(TestResult::new(u1, p))
}

/// Frequencies of U for samples of sizes m and n: the coefficients of the
/// Gaussian binomial [m+n choose m]_q.
fn mwu_frequencies(m: usize, n: usize) -> Vec<f64> {
    let len = m * n + 1;
    let mut c = vec![0.0; len];
    c[0] = 1.0;
    for i in 1..=m {
        // multiply by (1 - q^(n+i))
        let shift = n + i;
        for j in (shift..len).rev() {
            c[j] -= c[j - shift];
        }
        // divide by (1 - q^i)
        for j in i..len {
            c[j] += c[j - i];
        }
    }
    c
}

/// P(U ≥ u) under H₀ for samples of sizes m and n.
fn mwu_exact_sf(u: f64, m: usize, n: usize) -> f64 {
    let freq = mwu_frequencies(m, n);
    let total: f64 = freq.iter().sum();
    // u is integral without ties
    let start = (u.round().max(0.0) as usize).min(freq.len());
    freq[start..].iter().sum::<f64>() / total
}

/// Brunner-Munzel test of H₀: P(X < Y) + ½ P(X = Y) = ½.
///
/// Unlike Mann-Whitney it does not assume equal variances. The statistic is
/// referred to a t distribution with Satterthwaite-type degrees of freedom.
pub fn brunnermunzel(x: &[f64], y: &[f64]) -> StatsResult<TestResult> {
    ensure_len(x.len(), 2, "Brunner-Munzel test")?;
    ensure_len(y.len(), 2, "Brunner-Munzel test")?;
    if contains_nan(&[x, y]) {
        return Ok(TestResult::nan());
    }

    let nx = x.len() as f64;
    let ny = y.len() as f64;
    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let rc = rankdata(&pooled);
    let (rcx, rcy) = rc.split_at(x.len());
    let rx = rankdata(x);
    let ry = rankdata(y);

    let mx = mean(rcx);
    let my = mean(rcy);
    let mrx = mean(&rx);
    let mry = mean(&ry);

    let placement_var = |pooled_ranks: &[f64], own: &[f64], m: f64, mr: f64, n: f64| {
        pooled_ranks
            .iter()
            .zip(own)
            .map(|(a, b)| (a - b - m + mr).powi(2))
            .sum::<f64>()
            / (n - 1.0)
    };
    let sx = placement_var(rcx, &rx, mx, mrx, nx);
    let sy = placement_var(rcy, &ry, my, mry, ny);

    let spread = nx * sx + ny * sy;
    if spread == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "Brunner-Munzel test: samples are completely separated or constant"
                .to_string(),
        });
    }

    let w = nx * ny * (my - mx) / ((nx + ny) * spread.sqrt());
    let df = spread.powi(2) / ((nx * sx).powi(2) / (nx - 1.0) + (ny * sy).powi(2) / (ny - 1.0));

    let t = StudentT::new(df)?;
    let c = t.cdf(w);
    Ok(TestResult::new(w, 2.0 * c.min(1.0 - c)))
}

/// Wilcoxon signed-rank test of H₀: the paired differences `a - b` are
/// symmetric about zero.
///
/// Zero differences are dropped. The statistic is min(R⁺, R⁻). With at most 50
/// differences and no zeros or ties the p-value is exact; otherwise the normal
/// approximation with tie correction is used.
pub fn wilcoxon(a: &[f64], b: &[f64]) -> StatsResult<TestResult> {
    ensure_same_len(a, b, "Wilcoxon signed-rank test")?;
    ensure_len(a.len(), 1, "Wilcoxon signed-rank test")?;
    if contains_nan(&[a, b]) {
        return Ok(TestResult::nan());
    }

    let all: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let d: Vec<f64> = all.iter().copied().filter(|&v| v != 0.0).collect();
    let zeros = all.len() - d.len();
    if d.is_empty() {
        return Err(StatsError::DegenerateData {
            context: "Wilcoxon signed-rank test: all differences are zero".to_string(),
        });
    }

    let abs_d: Vec<f64> = d.iter().map(|v| v.abs()).collect();
    let ranks = rankdata(&abs_d);
    let r_plus: f64 = ranks.iter().zip(&d).filter(|(_, v)| **v > 0.0).map(|(r, _)| r).sum();
    let r_minus: f64 = ranks.iter().zip(&d).filter(|(_, v)| **v < 0.0).map(|(r, _)| r).sum();
    let t = r_plus.min(r_minus);

    let n = d.len();
    let p = if n <= WILCOXON_EXACT_MAX && zeros == 0 && !has_ties(&abs_d) {
        debug!(n, "Wilcoxon signed-rank: exact null distribution");
        wilcoxon_exact_pvalue(r_plus.round() as usize, n)
    } else {
        let nf = n as f64;
        let se = ((nf * (nf + 1.0) * (2.0 * nf + 1.0) - 0.5 * tie_term(&abs_d)) / 24.0).sqrt();
        let z = (t - nf * (nf + 1.0) / 4.0) / se;
        2.0 * Normal::standard().sf(z.abs())
    };

    Ok(TestResult::new(t, p))
}

/// Number of sign assignments of ranks 1..=n giving each value of R⁺.
fn wilcoxon_counts(n: usize) -> Vec<u64> {
    let max = n * (n + 1) / 2;
    let mut c = vec![0u64; max + 1];
    c[0] = 1;
    for rank in 1..=n {
        for s in (rank..=max).rev() {
            c[s] += c[s - rank];
        }
    }
    c
}

fn wilcoxon_exact_pvalue(r_plus: usize, n: usize) -> f64 {
    let counts = wilcoxon_counts(n);
    let max = counts.len() - 1;
    if r_plus == max / 2 {
        return 1.0;
    }
    let total = 2f64.powi(n as i32);
    let r = r_plus.min(max);
    let p_less = counts[..=r].iter().sum::<u64>() as f64 / total;
    let p_greater = counts[r..].iter().sum::<u64>() as f64 / total;
    2.0 * p_less.min(p_greater)
}

/// Sign test of H₀: the median of `x` equals `mu0`.
///
/// The statistic is M = (n₊ - n₋)/2, where n₊ and n₋ count observations above
/// and below `mu0`; ties with `mu0` are discarded. The p-value is the
/// two-sided binomial test of min(n₊, n₋) successes in n₊ + n₋ trials at ½.
/// NaN observations are discarded along with the ties.
pub fn sign_test(x: &[f64], mu0: f64) -> StatsResult<TestResult> {
    let pos = x.iter().filter(|&&v| v > mu0).count() as u64;
    let neg = x.iter().filter(|&&v| v < mu0).count() as u64;
    if pos + neg == 0 {
        return Err(StatsError::InsufficientData {
            required: 1,
            got: 0,
            context: "sign test (observations different from mu0)".to_string(),
        });
    }
    let m = (pos as f64 - neg as f64) / 2.0;
    let p = binomtest(pos.min(neg), pos + neg, 0.5)?.pvalue;
    Ok(TestResult::new(m, p))
}

/// Exact two-sided binomial test of `k` successes in `n` trials against
/// success probability `p`.
///
/// Outcomes whose probability does not exceed that of `k` (up to a relative
/// tolerance of 1e-7) count as at least as extreme. The statistic is the
/// observed proportion k/n.
pub fn binomtest(k: u64, n: u64, p: f64) -> StatsResult<TestResult> {
    if n == 0 {
        return Err(StatsError::InvalidParameter {
            name: "n".to_string(),
            value: 0.0,
            reason: "number of trials must be positive".to_string(),
        });
    }
    if k > n {
        return Err(StatsError::InvalidParameter {
            name: "k".to_string(),
            value: k as f64,
            reason: format!("must not exceed the number of trials {}", n),
        });
    }
    let dist = Binomial::new(n, p)?;
    let proportion = k as f64 / n as f64;

    let expected = p * n as f64;
    let kf = k as f64;
    if kf == expected {
        return Ok(TestResult::new(proportion, 1.0));
    }

    let threshold = dist.pmf(k) * BINOM_RERR;
    let pval = if kf < expected {
        // outcomes in the upper tail at most as likely as k
        let lower = expected.ceil() as u64;
        let y = (lower..=n)
            .rev()
            .take_while(|&j| dist.pmf(j) <= threshold)
            .count() as u64;
        let upper = if y == 0 { 0.0 } else { dist.sf(n - y) };
        dist.cdf(k) + upper
    } else {
        // outcomes in the lower tail at most as likely as k
        let upper = expected.floor() as u64;
        let y = (0..=upper).take_while(|&j| dist.pmf(j) <= threshold).count() as u64;
        let lower = if y == 0 { 0.0 } else { dist.cdf(y - 1) };
        lower + dist.sf(k - 1)
    };

    Ok(TestResult::new(proportion, pval.min(1.0)))
}
