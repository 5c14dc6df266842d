//! abstat - Statistics Toolkit for A/A and A/B Test Analysis
//!
//! abstat bundles the pieces an analyst reaches for when reading an experiment:
//! variance reduction with CUPED, diagnostic charts of p-value distributions and
//! sample comparisons, and a catalog of standard hypothesis tests that print a
//! plain-language verdict at a chosen significance level.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐
//! │    cuped     │  │     plot     │  │         catalog          │
//! │ (covariate   │  │ (plotly.js   │  │ (printed verdicts,       │
//! │  adjustment) │  │  figures)    │  │  TestReport)             │
//! └──────┬───────┘  └──────┬───────┘  └────────────┬─────────────┘
//!        │ uses            │ uses                   │ uses
//! ┌──────▼─────────────────▼────────────────────────▼─────────────┐
//! │                            stats                               │
//! │  (distributions, moments, ranks, hypothesis tests)             │
//! └───────────────────────────────┬────────────────────────────────┘
//!                                 │ special functions
//! ┌───────────────────────────────▼────────────────────────────────┐
//! │                            numr                                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cuped`] - CUPED adjustment of an outcome by a pre-period covariate
//! - [`plot`] - p-value histograms and ECDFs, overlaid histograms, scatter plots
//! - [`catalog`] - normality, variance and location tests with printed verdicts
//! - [`stats`] - the numerical core: distributions, descriptive statistics, tests
//!
//! # Logging
//!
//! Computations emit [`tracing`] events (`debug` for statistics, `warn` for
//! out-of-range sample sizes, `info` for rendered figures). No subscriber is
//! installed; the application decides where they go.
//!
//! # Example
//!
//! ```no_run
//! use abstat::catalog::{normality_test, ttest_ind};
//! use abstat::cuped;
//!
//! let pre = [10.2, 11.1, 9.8, 10.5, 12.0, 10.9, 11.4, 9.5, 10.1, 11.7];
//! let control = [10.9, 11.6, 10.1, 11.0, 12.8, 11.2, 12.1, 10.0, 10.6, 12.3];
//! let test = [11.5, 12.4, 10.9, 11.9, 13.1, 12.0, 12.6, 10.8, 11.5, 12.9];
//!
//! let control_adj = cuped(&pre, &control).unwrap();
//! let test_adj = cuped(&pre, &test).unwrap();
//!
//! normality_test(&control_adj, "control (CUPED)", 0.05).unwrap();
//! let report = ttest_ind(&control_adj, &test_adj, "control vs test", 0.05).unwrap();
//! assert!(report.pvalue() <= 1.0);
//! ```

pub mod catalog;
pub mod cuped;
pub mod plot;
pub mod stats;

// Re-export main types for convenience
pub use catalog::{Decision, TestReport, Verdict};
pub use cuped::{cuped, cuped_simplified, cuped_theta};
pub use stats::{LeveneCenter, StatsError, StatsResult, TestResult};
