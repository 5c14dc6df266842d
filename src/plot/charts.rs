//! Chart builders for p-value diagnostics and sample comparisons.
//!
//! `trace_*` functions return a single [`Trace`] for composing figures by hand.
//! `*_figure` functions return a complete [`Figure`]; `plot_*` functions build
//! the same figure and render it with [`Figure::show`].

use super::figure::{Axis, Figure, Histogram, Layout, Marker, Scatter, ScatterMode, Trace, XBins};
use super::options::{HistogramOptions, LayoutOptions};
use crate::stats::{StatsError, StatsResult, ensure_same_len, sorted};
use std::path::PathBuf;

/// Legend name of an ECDF trace when none is given.
pub const DEFAULT_ECDF_NAME: &str = "ECDF of p-values";

/// Title of a scatter plot when none is given.
pub const DEFAULT_SCATTER_TITLE: &str = "scatter plot";

/// Number of tick values per axis on ECDF plots.
const ECDF_GRID_LINES: usize = 11;

const GRID_COLOR: &str = "lightgrey";
const TRACE_OPACITY: f64 = 0.6;
const COMPARE_BINS: u32 = 100;
const SCATTER_MARKER_SIZE: u32 = 8;

/// Empirical CDF points: the sorted sample and i/n at the i-th value.
///
/// Repeated values keep one point each, so the last copy carries the full
/// cumulative share.
pub fn ecdf(sample: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let x = sorted(sample);
    let n = x.len() as f64;
    let y = (1..=x.len()).map(|i| i as f64 / n).collect();
    (x, y)
}

/// `num` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut v: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            v[num - 1] = end;
            v
        }
    }
}

/// Histogram of p-values on fixed bins over [0, 1].
pub fn trace_pvalues_histogram(pvalues: &[f64], name: &str, options: &HistogramOptions) -> Trace {
    Trace::Histogram(Histogram {
        x: pvalues.to_vec(),
        name: Some(name.to_string()),
        opacity: Some(TRACE_OPACITY),
        xbins: Some(XBins {
            start: 0.0,
            end: 1.0,
            size: options.bin_size,
        }),
        nbinsx: None,
    })
}

/// ECDF of p-values as a line trace.
pub fn trace_pvalues_ecdf(pvalues: &[f64], name: Option<&str>) -> Trace {
    let (x, y) = ecdf(pvalues);
    Trace::Scatter(Scatter {
        x,
        y,
        mode: ScatterMode::Lines,
        name: Some(name.unwrap_or(DEFAULT_ECDF_NAME).to_string()),
        marker: None,
    })
}

pub fn pvalues_histogram_figure(
    pvalues: &[f64],
    name: &str,
    options: &HistogramOptions,
    layout: &LayoutOptions,
) -> Figure {
    let trace = trace_pvalues_histogram(pvalues, name, options);
    let layout = Layout::new(name, layout).with_axes(Axis::titled("value"), Axis::titled("count"));
    Figure::new(vec![trace], layout)
}

/// ECDF figure with 11 ticks per axis: the x ticks span the data range
/// (rounded to one decimal), the y ticks span [0, 1].
pub fn pvalues_ecdf_figure(
    pvalues: &[f64],
    name: Option<&str>,
    layout: &LayoutOptions,
) -> StatsResult<Figure> {
    if pvalues.is_empty() {
        return Err(StatsError::EmptyData {
            context: "ECDF plot".to_string(),
        });
    }
    let name = name.unwrap_or(DEFAULT_ECDF_NAME);
    let lo = pvalues.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = pvalues.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let x_ticks = linspace(lo, hi, ECDF_GRID_LINES)
        .into_iter()
        .map(|v| (v * 10.0).round_ties_even() / 10.0)
        .collect();
    let y_ticks = linspace(0.0, 1.0, ECDF_GRID_LINES);

    let trace = trace_pvalues_ecdf(pvalues, Some(name));
    let layout = Layout::new(name, layout).with_axes(
        Axis::titled("value").with_ticks(x_ticks).with_grid(GRID_COLOR),
        Axis::titled("ECDF").with_ticks(y_ticks).with_grid(GRID_COLOR),
    );
    Ok(Figure::new(vec![trace], layout))
}

/// Two histograms overlaid on shared axes.
pub fn compare_histograms_figure(
    x: &[f64],
    x_label: &str,
    y: &[f64],
    y_label: &str,
    title: &str,
    layout: &LayoutOptions,
) -> Figure {
    let hist = |values: &[f64], label: &str| {
        Trace::Histogram(Histogram {
            x: values.to_vec(),
            name: Some(label.to_string()),
            opacity: Some(TRACE_OPACITY),
            xbins: None,
            nbinsx: Some(COMPARE_BINS),
        })
    };
    let mut layout =
        Layout::new(title, layout).with_axes(Axis::titled("Value"), Axis::titled("Count"));
    layout.barmode = Some("overlay".to_string());
    Figure::new(vec![hist(x, x_label), hist(y, y_label)], layout)
}

/// Marker scatter of paired values, axes titled by their labels.
pub fn scatter_figure(
    x: &[f64],
    x_label: &str,
    y: &[f64],
    y_label: &str,
    title: Option<&str>,
    layout: &LayoutOptions,
) -> StatsResult<Figure> {
    ensure_same_len(x, y, "scatter plot")?;
    let trace = Trace::Scatter(Scatter {
        x: x.to_vec(),
        y: y.to_vec(),
        mode: ScatterMode::Markers,
        name: None,
        marker: Some(Marker {
            size: SCATTER_MARKER_SIZE,
        }),
    });
    let layout = Layout::new(title.unwrap_or(DEFAULT_SCATTER_TITLE), layout).with_axes(
        Axis::titled(x_label).with_grid(GRID_COLOR),
        Axis::titled(y_label).with_grid(GRID_COLOR),
    );
    Ok(Figure::new(vec![trace], layout))
}

/// Render a p-value histogram and open it in the default viewer; returns the
/// path of the written page.
pub fn plot_pvalues_histogram(
    pvalues: &[f64],
    name: &str,
    options: &HistogramOptions,
) -> StatsResult<PathBuf> {
    pvalues_histogram_figure(pvalues, name, options, &LayoutOptions::default()).show()
}

/// Render a p-value ECDF and open it; returns the path of the written page.
pub fn plot_pvalues_ecdf(pvalues: &[f64], name: Option<&str>) -> StatsResult<PathBuf> {
    pvalues_ecdf_figure(pvalues, name, &LayoutOptions::default())?.show()
}

/// Render two overlaid histograms at the given size and open them.
pub fn plot_compare_histograms(
    x: &[f64],
    x_label: &str,
    y: &[f64],
    y_label: &str,
    title: &str,
    height: u32,
    width: u32,
) -> StatsResult<PathBuf> {
    let layout = LayoutOptions {
        height,
        width,
        ..LayoutOptions::default()
    };
    compare_histograms_figure(x, x_label, y, y_label, title, &layout).show()
}

/// Render and open a scatter plot; `title` defaults to `"scatter plot"`.
pub fn plot_scatter(
    x: &[f64],
    x_label: &str,
    y: &[f64],
    y_label: &str,
    title: Option<&str>,
) -> StatsResult<PathBuf> {
    scatter_figure(x, x_label, y, y_label, title, &LayoutOptions::default())?.show()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn to_value(fig: &Figure) -> Value {
        serde_json::from_str(&fig.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_ecdf_points() {
        let (x, y) = ecdf(&[0.3, 0.1, 0.4, 0.2]);
        assert_eq!(x, vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(y, vec![0.25, 0.5, 0.75, 1.0]);

        let (x, y) = ecdf(&[0.5, 0.5]);
        assert_eq!(x, vec![0.5, 0.5]);
        assert_eq!(y, vec![0.5, 1.0]);

        let (x, y) = ecdf(&[]);
        assert!(x.is_empty() && y.is_empty());
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        let v = linspace(0.0, 1.0, 11);
        assert_eq!(v.len(), 11);
        assert_eq!(v[10], 1.0);
    }

    #[test]
    fn test_pvalues_histogram_trace() {
        let t = trace_pvalues_histogram(&[0.01, 0.5], "AA p-values", &HistogramOptions::default());
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], json!("histogram"));
        assert_eq!(v["opacity"], json!(0.6));
        assert_eq!(v["name"], json!("AA p-values"));
        assert_eq!(v["xbins"], json!({"start": 0.0, "end": 1.0, "size": 0.05}));
        assert!(v.get("nbinsx").is_none());
    }

    #[test]
    fn test_pvalues_ecdf_trace_default_name() {
        let t = trace_pvalues_ecdf(&[0.2, 0.1], None);
        assert_eq!(t.name(), Some(DEFAULT_ECDF_NAME));
        match t {
            Trace::Scatter(s) => {
                assert_eq!(s.mode, ScatterMode::Lines);
                assert_eq!(s.x, vec![0.1, 0.2]);
                assert_eq!(s.y, vec![0.5, 1.0]);
            }
            Trace::Histogram(_) => panic!("expected a scatter trace"),
        }
    }

    #[test]
    fn test_pvalues_histogram_figure_layout() {
        let fig = pvalues_histogram_figure(
            &[0.2, 0.7],
            "AB p-values",
            &HistogramOptions { bin_size: 0.1 },
            &LayoutOptions::default(),
        );
        let v = to_value(&fig);
        assert_eq!(v["layout"]["template"], json!("plotly_dark"));
        assert_eq!(v["layout"]["title"]["text"], json!("AB p-values"));
        assert_eq!(v["layout"]["width"], json!(500));
        assert_eq!(v["layout"]["height"], json!(500));
        assert_eq!(v["layout"]["xaxis"]["title"]["text"], json!("value"));
        assert_eq!(v["layout"]["yaxis"]["title"]["text"], json!("count"));
        assert_eq!(v["data"][0]["xbins"]["size"], json!(0.1));
    }

    #[test]
    fn test_pvalues_ecdf_figure_ticks() {
        let fig = pvalues_ecdf_figure(&[0.03, 0.5, 0.97], None, &LayoutOptions::default()).unwrap();
        let x_axis = fig.layout.xaxis.as_ref().unwrap();
        let y_axis = fig.layout.yaxis.as_ref().unwrap();

        let x_ticks = x_axis.tickvals.as_ref().unwrap();
        assert_eq!(x_ticks.len(), 11);
        assert_eq!(x_ticks[0], 0.0);
        assert_eq!(x_ticks[10], 1.0);
        assert!(x_ticks.iter().all(|t| ((t * 10.0).round() - t * 10.0).abs() < 1e-9));

        let y_ticks = y_axis.tickvals.as_ref().unwrap();
        assert_eq!(y_ticks.len(), 11);
        assert_eq!(y_ticks[0], 0.0);
        assert_eq!(y_ticks[10], 1.0);

        assert_eq!(x_axis.tickmode.as_deref(), Some("array"));
        assert_eq!(x_axis.gridcolor.as_deref(), Some("lightgrey"));
        assert_eq!(y_axis.title.as_ref().unwrap().text, "ECDF");
        assert_eq!(fig.layout.title.as_ref().unwrap().text, DEFAULT_ECDF_NAME);

        assert!(matches!(
            pvalues_ecdf_figure(&[], None, &LayoutOptions::default()),
            Err(StatsError::EmptyData { .. })
        ));
    }

    #[test]
    fn test_compare_histograms_figure() {
        let layout = LayoutOptions {
            height: 300,
            width: 700,
            ..LayoutOptions::default()
        };
        let fig =
            compare_histograms_figure(&[1.0, 2.0], "control", &[2.0, 3.0], "test", "cmp", &layout);
        let v = to_value(&fig);
        assert_eq!(v["layout"]["barmode"], json!("overlay"));
        assert_eq!(v["layout"]["height"], json!(300));
        assert_eq!(v["layout"]["width"], json!(700));
        assert_eq!(v["layout"]["xaxis"]["title"]["text"], json!("Value"));
        assert_eq!(v["layout"]["yaxis"]["title"]["text"], json!("Count"));
        for (i, name) in ["control", "test"].iter().enumerate() {
            assert_eq!(v["data"][i]["type"], json!("histogram"));
            assert_eq!(v["data"][i]["name"], json!(name));
            assert_eq!(v["data"][i]["nbinsx"], json!(100));
            assert_eq!(v["data"][i]["opacity"], json!(0.6));
        }
    }

    #[test]
    fn test_scatter_figure() {
        let fig = scatter_figure(
            &[1.0, 2.0],
            "pre",
            &[3.0, 5.0],
            "post",
            None,
            &LayoutOptions::default(),
        )
        .unwrap();
        let v = to_value(&fig);
        assert_eq!(v["data"][0]["mode"], json!("markers"));
        assert_eq!(v["data"][0]["marker"]["size"], json!(8));
        assert_eq!(v["layout"]["title"]["text"], json!("scatter plot"));
        assert_eq!(v["layout"]["xaxis"]["title"]["text"], json!("pre"));
        assert_eq!(v["layout"]["yaxis"]["title"]["text"], json!("post"));
        assert_eq!(v["layout"]["xaxis"]["gridcolor"], json!("lightgrey"));

        assert!(matches!(
            scatter_figure(&[1.0], "a", &[1.0, 2.0], "b", Some("t"), &LayoutOptions::default()),
            Err(StatsError::LengthMismatch { .. })
        ));
    }
}
