//! Location comparisons between two samples, independent or paired.

use super::{EQUAL_SAMPLES, TestReport, ZERO_MEDIAN_DIFFERENCE, single};
use crate::stats::{self, StatsResult};

/// Student's t-test (pooled variance) for equal means of independent samples.
///
/// Assumes normal samples ([`normality_test`](super::normality_test)) with
/// equal variances ([`bartlett_test`](super::bartlett_test)). The p-value is
/// available as [`TestReport::pvalue`].
pub fn ttest_ind(a: &[f64], b: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("TTEST_IND: {}", name), alpha, &EQUAL_SAMPLES, || {
        Ok(stats::ttest_ind(a, b, true)?.into())
    })
}

/// Mann-Whitney U test, the rank-based alternative to [`ttest_ind`].
///
/// Does not assume normality but does assume similarly shaped distributions;
/// compare spreads with [`levenes_test`](super::levenes_test).
pub fn mannwhitney_utest(a: &[f64], b: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("MANNWHITNEY_UTEST: {}", name), alpha, &EQUAL_SAMPLES, || {
        stats::mannwhitneyu(a, b)
    })
}

/// Welch's t-test for equal means without assuming equal variances.
///
/// Still assumes normal samples.
pub fn welch_ttest(a: &[f64], b: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("WELCH_TTEST: {}", name), alpha, &EQUAL_SAMPLES, || {
        Ok(stats::ttest_ind(a, b, false)?.into())
    })
}

/// Brunner-Munzel test, the nonparametric counterpart of [`welch_ttest`].
///
/// H₀: an observation from `a` is as likely to exceed one from `b` as the
/// reverse. Assumes neither equal variances nor equal shapes.
pub fn brunner_munzel_test(
    a: &[f64],
    b: &[f64],
    name: &str,
    alpha: f64,
) -> StatsResult<TestReport> {
    single(format!("BRUNNER_MUNZEL_TEST: {}", name), alpha, &EQUAL_SAMPLES, || {
        stats::brunnermunzel(a, b)
    })
}

/// Paired t-test on index-aligned samples.
pub fn ttest_rel(a: &[f64], b: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("TTEST_REL: {}", name), alpha, &EQUAL_SAMPLES, || {
        Ok(stats::ttest_rel(a, b)?.into())
    })
}

/// Wilcoxon signed-rank test on paired samples.
///
/// Tests whether the paired differences are centred on zero. Assumes the
/// differences are symmetric ([`dagostino_skew_test`](super::dagostino_skew_test));
/// does not assume normality.
pub fn wilcoxon_test(a: &[f64], b: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("WILCOXON SIGNED-RANK TEST: {}", name), alpha, &EQUAL_SAMPLES, || {
        stats::wilcoxon(a, b)
    })
}

/// Sign test that the median of the paired differences `diffs` is zero.
pub fn sign_test(diffs: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    single(format!("SIGN_TEST: {}", name), alpha, &ZERO_MEDIAN_DIFFERENCE, || {
        stats::sign_test(diffs, 0.0)
    })
}
