//! End-to-end A/B analysis: CUPED adjustment, catalog reports, rendered charts.

use abstat::catalog::{self, Decision};
use abstat::plot::{self, Figure, HistogramOptions, LayoutOptions, RenderOptions};
use abstat::stats::{ContinuousDistribution, Normal};
use abstat::{StatsError, cuped};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic, roughly normal sample: normal quantiles shuffled by a
/// fixed stride.
fn normal_sample(n: usize, mu: f64, sigma: f64) -> Vec<f64> {
    let z = Normal::standard();
    let quantiles: Vec<f64> = (0..n)
        .map(|i| z.ppf((i as f64 + 0.5) / n as f64).unwrap())
        .collect();
    (0..n)
        .map(|i| mu + sigma * quantiles[(i * 7) % n])
        .collect()
}

#[test]
fn cuped_then_catalog() {
    init_tracing();

    let n = 40;
    let pre = normal_sample(n, 100.0, 10.0);
    let noise = normal_sample(n, 0.0, 1.0);
    let control: Vec<f64> = pre.iter().zip(&noise).map(|(p, e)| 0.8 * p + e).collect();
    let test: Vec<f64> = pre
        .iter()
        .zip(noise.iter().rev())
        .map(|(p, e)| 0.8 * p + e + 1.5)
        .collect();

    // Raw outcomes are dominated by the pre-period spread
    let raw = catalog::ttest_ind(&control, &test, "raw", 0.05).unwrap();
    assert_eq!(raw.decision(), Some(Decision::FailToReject));

    let control_adj = cuped(&pre, &control).unwrap();
    let test_adj = cuped(&pre, &test).unwrap();
    let adjusted = catalog::ttest_ind(&control_adj, &test_adj, "cuped", 0.05).unwrap();
    assert_eq!(adjusted.decision(), Some(Decision::Reject));
    assert!(adjusted.pvalue() < raw.pvalue());

    let welch = catalog::welch_ttest(&control_adj, &test_adj, "cuped", 0.05).unwrap();
    assert_eq!(welch.decision(), Some(Decision::Reject));
}

#[test]
fn catalog_on_normal_data() {
    init_tracing();

    let a = normal_sample(60, 0.0, 1.0);
    let b = normal_sample(60, 0.0, 1.0);

    let normality = catalog::normality_test(&a, "a", 0.05).unwrap();
    assert_eq!(normality.sections.len(), 3);
    for section in &normality.sections {
        assert_eq!(section.verdict.decision, Decision::FailToReject);
    }

    let levene = catalog::levenes_test(&a, &b, "a", "b", 0.05).unwrap();
    assert_eq!(levene.decision(), Some(Decision::FailToReject));

    let mwu = catalog::mannwhitney_utest(&a, &b, "a vs b", 0.05).unwrap();
    assert!((mwu.pvalue() - 1.0).abs() < 1e-6);
}

#[test]
fn catalog_errors_surface_as_results() {
    let constant = [3.0; 10];
    assert!(matches!(
        catalog::normality_test(&constant, "flat", 0.05),
        Err(StatsError::DegenerateData { .. })
    ));
    assert!(matches!(
        catalog::wilcoxon_test(&[1.0, 2.0], &[1.0, 2.0, 3.0], "bad", 0.05),
        Err(StatsError::LengthMismatch { .. })
    ));
    assert!(matches!(
        cuped(&constant, &constant),
        Err(StatsError::DegenerateData { .. })
    ));
}

#[test]
fn render_figures_to_directory() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let render = RenderOptions::in_dir(dir.path());

    let pvalues: Vec<f64> = (0..200).map(|i| (i as f64 + 0.5) / 200.0).collect();
    let figures: Vec<Figure> = vec![
        plot::pvalues_histogram_figure(
            &pvalues,
            "AA-testing p-values",
            &HistogramOptions::default(),
            &LayoutOptions::default(),
        ),
        plot::pvalues_ecdf_figure(&pvalues, None, &LayoutOptions::default()).unwrap(),
        plot::compare_histograms_figure(
            &pvalues,
            "first",
            &pvalues,
            "second",
            "compare",
            &LayoutOptions::default(),
        ),
        plot::scatter_figure(&pvalues, "x", &pvalues, "y", None, &LayoutOptions::default())
            .unwrap(),
    ];

    let mut paths = Vec::new();
    for fig in &figures {
        let path = fig.show_with(&render).unwrap();
        assert!(path.starts_with(dir.path()));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(&render.plotly_js_url));
        assert!(html.contains("Plotly.newPlot"));
        paths.push(path);
    }
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), figures.len());
}

#[test]
fn render_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let render = RenderOptions::in_dir(dir.path().join("missing"));
    let fig = plot::pvalues_ecdf_figure(&[0.2, 0.4], None, &LayoutOptions::default()).unwrap();
    assert!(matches!(fig.show_with(&render), Err(StatsError::Io { .. })));
}
