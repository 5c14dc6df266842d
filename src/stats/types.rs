//! Types for statistical algorithms.

use serde::Serialize;

/// Result of a statistical hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    /// Test statistic value
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
}

impl TestResult {
    pub(crate) fn new(statistic: f64, pvalue: f64) -> Self {
        Self {
            statistic,
            pvalue: clip_pvalue(pvalue),
        }
    }

    /// Outcome of a test whose input holds NaN.
    pub(crate) fn nan() -> Self {
        Self {
            statistic: f64::NAN,
            pvalue: f64::NAN,
        }
    }
}

/// Clamp a p-value into [0, 1], leaving NaN untouched.
pub(crate) fn clip_pvalue(p: f64) -> f64 {
    if p.is_nan() { p } else { p.clamp(0.0, 1.0) }
}

/// Centre used by Levene's test when computing absolute deviations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeveneCenter {
    /// Classical Levene's test.
    Mean,
    /// Brown-Forsythe variant, robust to non-normality.
    #[default]
    Median,
    /// 5% trimmed mean.
    TrimmedMean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pvalue_clipping() {
        assert_eq!(TestResult::new(1.0, 1.0000001).pvalue, 1.0);
        assert_eq!(TestResult::new(1.0, -1e-18).pvalue, 0.0);
        assert!(TestResult::new(1.0, f64::NAN).pvalue.is_nan());
    }

    #[test]
    fn test_levene_default_center() {
        assert_eq!(LeveneCenter::default(), LeveneCenter::Median);
    }
}
