//! Equality-of-variances checks for two samples.

use super::{EQUAL_VARIANCES, TestReport, single};
use crate::stats::{self, LeveneCenter, StatsResult};

/// Bartlett's test that `a` and `b` have equal variances.
///
/// Assumes both samples are normal (see [`normality_test`](super::normality_test));
/// prefer [`levenes_test`] otherwise.
pub fn bartlett_test(
    a: &[f64],
    b: &[f64],
    a_name: &str,
    b_name: &str,
    alpha: f64,
) -> StatsResult<TestReport> {
    single(format!("BARTLETT: {}, {}", a_name, b_name), alpha, &EQUAL_VARIANCES, || {
        stats::bartlett(&[a, b])
    })
}

/// Levene's test (median centred) that `a` and `b` have equal variances.
///
/// Less sensitive to non-normality than Bartlett's. Used to check the
/// similar-shape assumption of [`mannwhitney_utest`](super::mannwhitney_utest).
pub fn levenes_test(
    a: &[f64],
    b: &[f64],
    a_name: &str,
    b_name: &str,
    alpha: f64,
) -> StatsResult<TestReport> {
    single(format!("LEVENE`S: {}, {}", a_name, b_name), alpha, &EQUAL_VARIANCES, || {
        stats::levene(&[a, b], LeveneCenter::Median)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Decision;

    const A: [f64; 10] = [8.88, 9.12, 9.04, 8.98, 9.00, 9.08, 9.01, 8.85, 9.06, 8.99];
    const B: [f64; 10] = [8.88, 8.95, 9.29, 9.44, 9.15, 9.58, 8.36, 9.18, 8.67, 9.05];

    #[test]
    fn test_bartlett_report() {
        let report = bartlett_test(&A, &B, "a", "b", 0.05).unwrap();
        assert_eq!(report.title, "BARTLETT: a, b");
        assert_eq!(report.decision(), Some(Decision::Reject));
        assert!(
            report
                .to_string()
                .ends_with("variances are significantly different (reject H0)\n\n")
        );
    }

    #[test]
    fn test_levene_report() {
        let report = levenes_test(&A, &A, "a", "a again", 0.05).unwrap();
        assert_eq!(report.title, "LEVENE`S: a, a again");
        assert!((report.pvalue() - 1.0).abs() < 1e-9);
        assert!(
            report
                .to_string()
                .contains("variances are equal (fail to reject H0)\n")
        );
    }

    #[test]
    fn test_nan_sample_reports_nan_and_rejects() {
        let mut with_nan = A;
        with_nan[3] = f64::NAN;
        for report in [
            bartlett_test(&with_nan, &B, "a", "b", 0.05).unwrap(),
            levenes_test(&A, &with_nan, "a", "b", 0.05).unwrap(),
        ] {
            assert!(report.pvalue().is_nan());
            assert_eq!(report.decision(), Some(Decision::Reject));
            let text = report.to_string();
            assert!(text.contains("\np-value: nan\n"));
            assert!(text.ends_with("variances are significantly different (reject H0)\n\n"));
        }
    }

    #[test]
    fn test_variance_checks_propagate_errors() {
        assert!(bartlett_test(&[1.0], &B, "a", "b", 0.05).is_err());
        assert!(levenes_test(&[], &B, "a", "b", 0.05).is_err());
    }
}
