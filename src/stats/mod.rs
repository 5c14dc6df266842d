//! Distributions, descriptive statistics, and hypothesis tests.
//!
//! The numerical core behind the report catalog. Samples are plain `&[f64]`
//! slices; special functions (erf, incomplete gamma and beta, and their
//! inverses) come from `numr`'s scalar kernels.
//!
//! # Distributions
//!
//! ```
//! use abstat::stats::{ContinuousDistribution, Normal, StudentT};
//!
//! let n = Normal::standard();
//! assert!((n.cdf(0.0) - 0.5).abs() < 1e-12);
//!
//! let t = StudentT::new(8.0).unwrap();
//! let p = t.two_sided_pvalue(-1.0);
//! assert!(p > 0.34 && p < 0.35);
//! ```
//!
//! # Hypothesis tests
//!
//! ```
//! use abstat::stats::mannwhitneyu;
//!
//! let r = mannwhitneyu(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
//! assert!((r.pvalue - 0.1).abs() < 1e-12);
//! ```

mod helpers;

// Core modules
mod continuous;
mod descriptive;
mod discrete;
mod distribution;
mod error;
mod hypothesis;
mod special;
mod types;

// Public API: Distribution traits and types
pub use distribution::{ContinuousDistribution, DiscreteDistribution, Distribution};
pub use error::{StatsError, StatsResult};
pub(crate) use error::{ensure_len, ensure_same_len};

// Public API: Continuous distributions
pub use continuous::{ChiSquared, FDistribution, Normal, StudentT};

// Public API: Discrete distributions
pub use discrete::Binomial;

// Public API: Descriptive statistics
pub use descriptive::{
    central_moment, cov, kurtosis, mean, median, skewness, std, trimmed_mean, var,
};
pub use helpers::{contains_nan, has_ties, rankdata, sorted, tie_counts, tie_term};

// Public API: Hypothesis tests
pub use hypothesis::{
    KS_EXACT_MAX_N, SHAPIRO_MAX_N, TTestResult, bartlett, binomtest, brunnermunzel, kolmogorov_sf,
    ks_pvalue, kstest_normal, kurtosistest, levene, mannwhitneyu, normaltest, shapiro, sign_test,
    skewtest, ttest_1samp, ttest_ind, ttest_rel, wilcoxon,
};

// Public API: Types
pub use types::{LeveneCenter, TestResult};
