//! Normality and shape checks on a single sample.

use super::printer::{Console, ReportWriter};
use super::{GAUSSIAN, TestReport, ZERO_KURTOSIS, ZERO_SKEWNESS, format_float};
use crate::stats::{self, SHAPIRO_MAX_N, StatsResult};
use std::io::Write;

const LARGE_SAMPLE_WARNING: &str = "warning: sample size is greater than 5000, unreliable results";

/// Shapiro-Wilk, D'Agostino-Pearson and Kolmogorov-Smirnov normality tests.
///
/// The KS reference is N(mean, population std) of the sample itself. Above
/// 5000 observations a warning line is printed after the Shapiro-Wilk heading
/// and the test still runs.
///
/// Checks the normality assumption of [`bartlett_test`](super::bartlett_test),
/// [`ttest_ind`](super::ttest_ind) and [`welch_ttest`](super::welch_ttest).
pub fn normality_test(sample: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    write_normality(Console, sample, name, alpha)
}

fn write_normality<W: Write>(
    out: W,
    sample: &[f64],
    name: &str,
    alpha: f64,
) -> StatsResult<TestReport> {
    let mut writer = ReportWriter::begin(out, format!("NORMALITY TESTING: {}", name))?;
    let mut notes = Vec::new();
    if sample.len() > SHAPIRO_MAX_N {
        notes.push(LARGE_SAMPLE_WARNING.to_string());
    }
    writer.section(Some("SHAPIRO-WILK TEST"), notes, alpha, &GAUSSIAN, || {
        stats::shapiro(sample)
    })?;
    writer.section(
        Some("D’AGOSTINO AND PEARSON’S TEST"),
        Vec::new(),
        alpha,
        &GAUSSIAN,
        || stats::normaltest(sample),
    )?;
    writer.section(Some("KOLMOGOROV-SMIRNOV"), Vec::new(), alpha, &GAUSSIAN, || {
        stats::kstest_normal(sample)
    })?;
    writer.finish()
}

/// D'Agostino test that the skewness is zero, printed with the sample
/// skewness itself.
///
/// Checks the symmetry assumption of [`wilcoxon_test`](super::wilcoxon_test).
pub fn dagostino_skew_test(sample: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    write_skew(Console, sample, name, alpha)
}

fn write_skew<W: Write>(
    out: W,
    sample: &[f64],
    name: &str,
    alpha: f64,
) -> StatsResult<TestReport> {
    let mut writer = ReportWriter::begin(out, format!("DAGOSTINO_SKEW_TEST: {}", name))?;
    let skewness = stats::skewness(sample)?;
    // the same remark follows the skewness whatever its size
    let notes = vec![
        format!("skewness: {}", format_float(skewness)),
        "skewness is relatively small".to_string(),
    ];
    writer.section(None, notes, alpha, &ZERO_SKEWNESS, || stats::skewtest(sample))?;
    writer.finish()
}

/// Anscombe-Glynn test that the excess kurtosis is zero, printed with the
/// sample excess kurtosis.
pub fn pearson_kurtosis_test(sample: &[f64], name: &str, alpha: f64) -> StatsResult<TestReport> {
    let mut writer = ReportWriter::begin(Console, format!("PEARSON_KURTOSIS_TEST: {}", name))?;
    let result = stats::kurtosistest(sample)?;
    let notes = vec![format!("kurtosis: {}", format_float(stats::kurtosis(sample)?))];
    writer.section(None, notes, alpha, &ZERO_KURTOSIS, || Ok(result))?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Decision;
    use crate::stats::{ContinuousDistribution, Normal};

    const ROUGHLY_NORMAL: [f64; 20] = [
        2.1, 3.4, 1.9, 5.6, 4.4, 3.3, 2.8, 4.1, 3.9, 2.5, 3.0, 3.7, 4.8, 2.2, 3.6, 4.0, 3.1, 2.9,
        3.5, 4.2,
    ];

    #[test]
    fn test_normality_report_layout() {
        let report = normality_test(&ROUGHLY_NORMAL, "control", 0.05).unwrap();
        assert_eq!(report.sections.len(), 3);
        assert!(
            report
                .sections
                .iter()
                .all(|s| s.verdict.decision == Decision::FailToReject)
        );

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NORMALITY TESTING: control");
        assert_eq!(lines[1], "SHAPIRO-WILK TEST");
        assert!(lines[2].starts_with("p-value: "));
        assert_eq!(lines[3], "sample looks Gaussian (fail to reject H0)");
        assert_eq!(lines[4], "D’AGOSTINO AND PEARSON’S TEST");
        assert_eq!(lines[7], "KOLMOGOROV-SMIRNOV");
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[10], "");
        assert!(text.ends_with("(fail to reject H0)\n\n"));
    }

    #[test]
    fn test_normality_large_sample_warning() {
        let n = SHAPIRO_MAX_N + 1;
        let z = Normal::standard();
        let sample: Vec<f64> = (0..n)
            .map(|i| z.ppf((i as f64 + 0.5) / n as f64).unwrap())
            .collect();
        let report = normality_test(&sample, "big", 0.05).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "SHAPIRO-WILK TEST");
        assert_eq!(lines[2], LARGE_SAMPLE_WARNING);
        assert!(lines[3].starts_with("p-value: "));
    }

    #[test]
    fn test_skew_report_prints_skewness() {
        let sample = [2.0, 8.0, 0.0, 4.0, 1.0, 9.0, 9.0, 0.0];
        let report = dagostino_skew_test(&sample, "diffs", 0.05).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "DAGOSTINO_SKEW_TEST: diffs");
        assert!(lines[1].starts_with("skewness: 0.26505541"));
        assert_eq!(lines[2], "skewness is relatively small");
        assert_eq!(
            lines[4],
            "skewness is not significantly different from zero (fail to reject H0)"
        );

        // strongly skewed sample gets the same remark
        let skewed = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 50.0];
        let text = dagostino_skew_test(&skewed, "skewed", 0.05)
            .unwrap()
            .to_string();
        assert!(text.contains("\nskewness is relatively small\n"));
        assert!(text.contains("skewness is significantly different from zero (reject H0)"));
    }

    #[test]
    fn test_kurtosis_report() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let report = pearson_kurtosis_test(&x, "uniform", 0.05).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "PEARSON_KURTOSIS_TEST: uniform");
        assert!(lines[1].starts_with("kurtosis: -1.2"));
        assert_eq!(
            lines[3],
            "kurtosis is not significantly different from zero (fail to reject H0)"
        );
        assert!((report.pvalue() - 0.08804338332528348).abs() < 1e-6);
    }

    #[test]
    fn test_normality_propagates_short_sample() {
        assert!(normality_test(&[1.0, 2.0, 3.0], "tiny", 0.05).is_err());
    }

    #[test]
    fn test_normality_output_is_streamed() {
        let mut out = Vec::new();
        let report = write_normality(&mut out, &ROUGHLY_NORMAL, "control", 0.05).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), report.to_string());
    }

    #[test]
    fn test_normality_failure_keeps_finished_sections() {
        // Shapiro-Wilk runs on five values, the omnibus test needs eight
        let mut out = Vec::new();
        let sample = [1.0, 2.0, 3.0, 4.0, 10.0];
        assert!(write_normality(&mut out, &sample, "short", 0.05).is_err());
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NORMALITY TESTING: short");
        assert_eq!(lines[1], "SHAPIRO-WILK TEST");
        assert!(lines[2].starts_with("p-value: 0.15"));
        assert_eq!(lines[3], "sample looks Gaussian (fail to reject H0)");
        assert_eq!(lines[4], "D’AGOSTINO AND PEARSON’S TEST");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_skew_failure_keeps_banner() {
        let mut out = Vec::new();
        assert!(write_skew(&mut out, &[1.0, 2.0, 3.0], "short", 0.05).is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("DAGOSTINO_SKEW_TEST: short\nskewness: 0.0\n"));
        assert!(text.ends_with("skewness is relatively small\n"));
    }

    #[test]
    fn test_nan_sample_reports_nan_and_rejects() {
        let mut x = ROUGHLY_NORMAL.to_vec();
        x[7] = f64::NAN;

        let report = normality_test(&x, "nan", 0.05).unwrap();
        assert!(report.sections.iter().all(|s| s.result.pvalue.is_nan()));
        assert!(
            report
                .sections
                .iter()
                .all(|s| s.verdict.decision == Decision::Reject)
        );
        assert_eq!(report.to_string().matches("p-value: nan\n").count(), 3);

        for report in [
            dagostino_skew_test(&x, "nan", 0.05).unwrap(),
            pearson_kurtosis_test(&x, "nan", 0.05).unwrap(),
        ] {
            assert!(report.pvalue().is_nan());
            assert_eq!(report.decision(), Some(Decision::Reject));
            assert!(report.to_string().contains("\np-value: nan\n"));
        }
    }
}
