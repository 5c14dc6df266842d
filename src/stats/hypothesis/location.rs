//! Student's t-tests for location.

use crate::stats::StudentT;
use crate::stats::descriptive::{mean, var};
use crate::stats::error::{StatsError, StatsResult, ensure_len, ensure_same_len};
use crate::stats::types::TestResult;

/// Outcome of a t-test, carrying the degrees of freedom next to the usual pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub pvalue: f64,
    /// Degrees of freedom of the reference t distribution (fractional for Welch).
    pub df: f64,
}

impl From<TTestResult> for TestResult {
    fn from(r: TTestResult) -> Self {
        TestResult::new(r.statistic, r.pvalue)
    }
}

fn t_result(t: f64, df: f64) -> StatsResult<TTestResult> {
    // NaN input reaches here as a NaN statistic, or a NaN Welch df
    if t.is_nan() || df.is_nan() {
        return Ok(TTestResult {
            statistic: f64::NAN,
            pvalue: f64::NAN,
            df,
        });
    }
    let dist = StudentT::new(df)?;
    Ok(TTestResult {
        statistic: t,
        pvalue: dist.two_sided_pvalue(t),
        df,
    })
}

/// One-sample t-test of H₀: mean(x) = `popmean`.
pub fn ttest_1samp(x: &[f64], popmean: f64) -> StatsResult<TTestResult> {
    ensure_len(x.len(), 2, "one-sample t-test")?;
    let n = x.len() as f64;
    let se = (var(x, 1)? / n).sqrt();
    if se == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "one-sample t-test: sample has zero variance".to_string(),
        });
    }
    t_result((mean(x) - popmean) / se, n - 1.0)
}

/// Two independent samples t-test of H₀: equal means.
///
/// With `equal_var` the pooled variance and n₁+n₂-2 degrees of freedom are
/// used; otherwise Welch's statistic with the Welch-Satterthwaite degrees of
/// freedom.
pub fn ttest_ind(a: &[f64], b: &[f64], equal_var: bool) -> StatsResult<TTestResult> {
    ensure_len(a.len(), 2, "independent t-test")?;
    ensure_len(b.len(), 2, "independent t-test")?;

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let v1 = var(a, 1)?;
    let v2 = var(b, 1)?;
    let diff = mean(a) - mean(b);

    let (se2, df) = if equal_var {
        let df = n1 + n2 - 2.0;
        let sp2 = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
        (sp2 * (1.0 / n1 + 1.0 / n2), df)
    } else {
        let q1 = v1 / n1;
        let q2 = v2 / n2;
        let df = (q1 + q2).powi(2) / (q1 * q1 / (n1 - 1.0) + q2 * q2 / (n2 - 1.0));
        (q1 + q2, df)
    };

    if se2 == 0.0 {
        return Err(StatsError::DegenerateData {
            context: "independent t-test: both samples have zero variance".to_string(),
        });
    }
    t_result(diff / se2.sqrt(), df)
}

/// Paired t-test: a one-sample t-test on the differences `a - b`.
pub fn ttest_rel(a: &[f64], b: &[f64]) -> StatsResult<TTestResult> {
    ensure_same_len(a, b, "paired t-test")?;
    let d: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    ttest_1samp(&d, 0.0)
}
