//! Property-based tests for the verdict logic and p-value ranges.
//!
//! Properties tested:
//! 1. Every catalog report prints the conclusion matching `p-value > alpha`
//! 2. Test p-values stay inside [0, 1]
//! 3. CUPED keeps the outcome mean and agrees with the simplified form on
//!    centred covariates

use abstat::catalog::{self, Decision, EQUAL_SAMPLES, EQUAL_VARIANCES, TestReport};
use abstat::{cuped, cuped_simplified, stats};
use proptest::prelude::*;

fn sample(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, len)
}

fn assert_consistent(report: &TestReport, alpha: f64) {
    let text = report.to_string();
    for section in &report.sections {
        let p = section.result.pvalue;
        let expected = if p > alpha {
            Decision::FailToReject
        } else {
            Decision::Reject
        };
        assert_eq!(section.verdict.decision, expected);
        assert!(text.contains(&format!("{}\n", section.verdict.conclusion)));
    }
    assert!(text.ends_with("\n\n"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_two_sample_verdicts_follow_alpha(
        a in sample(5..30),
        b in sample(5..30),
        alpha in 0.0f64..1.0,
    ) {
        let reports = [
            catalog::ttest_ind(&a, &b, "a vs b", alpha),
            catalog::welch_ttest(&a, &b, "a vs b", alpha),
            catalog::mannwhitney_utest(&a, &b, "a vs b", alpha),
            catalog::brunner_munzel_test(&a, &b, "a vs b", alpha),
        ];
        for report in reports.iter().flatten() {
            assert_consistent(report, alpha);
            let conclusion = report.sections[0].verdict.conclusion;
            prop_assert!(
                conclusion == EQUAL_SAMPLES.fail_to_reject || conclusion == EQUAL_SAMPLES.reject
            );
        }

        for report in [
            catalog::bartlett_test(&a, &b, "a", "b", alpha),
            catalog::levenes_test(&a, &b, "a", "b", alpha),
        ]
        .iter()
        .flatten()
        {
            assert_consistent(report, alpha);
            let conclusion = report.sections[0].verdict.conclusion;
            prop_assert!(
                conclusion == EQUAL_VARIANCES.fail_to_reject
                    || conclusion == EQUAL_VARIANCES.reject
            );
        }
    }

    #[test]
    fn prop_paired_verdicts_follow_alpha(
        pairs in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 8..40),
        alpha in 0.0f64..1.0,
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let diffs: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x - y).collect();

        let reports = [
            catalog::ttest_rel(&a, &b, "paired", alpha),
            catalog::wilcoxon_test(&a, &b, "paired", alpha),
            catalog::sign_test(&diffs, "diffs", alpha),
            catalog::dagostino_skew_test(&diffs, "diffs", alpha),
            catalog::pearson_kurtosis_test(&diffs, "diffs", alpha),
            catalog::normality_test(&diffs, "diffs", alpha),
        ];
        for report in reports.iter().flatten() {
            assert_consistent(report, alpha);
        }
    }

    #[test]
    fn prop_ttest_pvalue_in_unit_interval(a in sample(2..25), b in sample(2..25)) {
        for equal_var in [true, false] {
            if let Ok(r) = stats::ttest_ind(&a, &b, equal_var) {
                prop_assert!((0.0..=1.0).contains(&r.pvalue), "p = {}", r.pvalue);
            }
        }
    }

    #[test]
    fn prop_rank_test_pvalues_in_unit_interval(a in sample(1..20), b in sample(1..20)) {
        if let Ok(r) = stats::mannwhitneyu(&a, &b) {
            prop_assert!((0.0..=1.0).contains(&r.pvalue));
        }
        if let Ok(r) = stats::sign_test(&a, 0.0) {
            prop_assert!((0.0..=1.0).contains(&r.pvalue));
        }
    }

    #[test]
    fn prop_cuped_preserves_mean(
        pairs in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 3..50),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Ok(adj) = cuped(&x, &y) {
            let diff = stats::mean(&adj) - stats::mean(&y);
            prop_assert!(diff.abs() < 1e-9, "mean shifted by {}", diff);
        }
    }

    #[test]
    fn prop_cuped_forms_agree_on_centred_covariate(
        pairs in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 3..50),
    ) {
        let (raw_x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let m = stats::mean(&raw_x);
        let x: Vec<f64> = raw_x.iter().map(|v| v - m).collect();
        if let (Ok(a), Ok(b)) = (cuped(&x, &y), cuped_simplified(&x, &y)) {
            for (u, v) in a.iter().zip(&b) {
                prop_assert!((u - v).abs() < 1e-8);
            }
        }
    }
}
