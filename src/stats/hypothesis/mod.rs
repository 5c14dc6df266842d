//! Hypothesis tests over `f64` samples.
//!
//! Every test is two-sided and returns a [`TestResult`](crate::stats::TestResult)
//! whose p-value is clipped to [0, 1]. Inputs that cannot support the test
//! (too short, constant, mismatched lengths) yield an error. A sample of valid
//! shape that holds NaN yields a NaN statistic and p-value instead, the sign
//! test excepted.

mod location;
mod nonparametric;
mod normality;
mod variance;

pub use location::{TTestResult, ttest_1samp, ttest_ind, ttest_rel};
pub use nonparametric::{binomtest, brunnermunzel, mannwhitneyu, sign_test, wilcoxon};
pub use normality::{
    KS_EXACT_MAX_N, SHAPIRO_MAX_N, kolmogorov_sf, ks_pvalue, kstest_normal, kurtosistest,
    normaltest, shapiro, skewtest,
};
pub use variance::{bartlett, levene};
