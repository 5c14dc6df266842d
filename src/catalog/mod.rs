//! Catalog of hypothesis tests that print their verdicts.
//!
//! Each function runs one standard test (the normality check runs three),
//! prints a banner, the p-value and a fixed conclusion line chosen by
//! `p-value > alpha`, followed by a blank line, and returns the same content
//! as a [`TestReport`]. Output is written as the tests complete: when a test
//! fails, the banner and any finished sections have already been printed.
//!
//! A sample holding NaN gets a `p-value: nan` line and the reject conclusion.
//!
//! The functions are independent. Their docs name the assumptions a test
//! relies on and which other catalog test checks them; checking is left to the
//! analyst.
//!
//! ```no_run
//! use abstat::catalog::{levenes_test, mannwhitney_utest};
//!
//! let control = [12.1, 11.8, 12.4, 13.0, 12.2, 11.9, 12.7, 12.5];
//! let test = [12.9, 13.4, 12.8, 13.9, 13.1, 13.6, 12.6, 13.3];
//!
//! levenes_test(&control, &test, "control", "test", 0.05).unwrap();
//! let report = mannwhitney_utest(&control, &test, "control vs test", 0.05).unwrap();
//! println!("p = {}", report.pvalue());
//! ```

mod comparison;
mod normality;
mod printer;
mod report;
mod variance;

pub use comparison::{
    brunner_munzel_test, mannwhitney_utest, sign_test, ttest_ind, ttest_rel, welch_ttest,
    wilcoxon_test,
};
pub use normality::{dagostino_skew_test, normality_test, pearson_kurtosis_test};
pub use report::{
    Conclusions, Decision, EQUAL_SAMPLES, EQUAL_VARIANCES, GAUSSIAN, Section, TestReport, Verdict,
    ZERO_KURTOSIS, ZERO_MEDIAN_DIFFERENCE, ZERO_SKEWNESS, format_float,
};
pub use variance::{bartlett_test, levenes_test};

use crate::stats::{StatsResult, TestResult};
use printer::{Console, ReportWriter};

/// Banner plus one unheaded section, printed to stdout.
fn single<F>(
    title: String,
    alpha: f64,
    conclusions: &Conclusions,
    test: F,
) -> StatsResult<TestReport>
where
    F: FnOnce() -> StatsResult<TestResult>,
{
    let mut writer = ReportWriter::begin(Console, title)?;
    writer.section(None, Vec::new(), alpha, conclusions, test)?;
    writer.finish()
}
