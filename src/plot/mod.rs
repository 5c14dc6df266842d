//! Diagnostic charts for A/A and A/B analyses.
//!
//! Figures are plain serializable values in the plotly.js JSON schema. Under a
//! true null hypothesis p-values are uniform on [0, 1]: the histogram should be
//! flat and the ECDF should follow the diagonal.
//!
//! The `*_figure` builders only construct values. [`Figure::show_with`] writes
//! an HTML page, and the `plot_*` helpers (through [`Figure::show`]) also open
//! that page in the system's default viewer.
//!
//! # Example
//!
//! ```
//! use abstat::plot::{HistogramOptions, LayoutOptions, pvalues_histogram_figure};
//!
//! let pvalues = [0.12, 0.55, 0.03, 0.91, 0.47];
//! let fig = pvalues_histogram_figure(
//!     &pvalues,
//!     "AA-testing p-values",
//!     &HistogramOptions::default(),
//!     &LayoutOptions::default(),
//! );
//! let json = fig.to_json().unwrap();
//! assert!(json.contains("\"type\":\"histogram\""));
//! ```

mod charts;
mod figure;
mod options;

pub use charts::{
    DEFAULT_ECDF_NAME, DEFAULT_SCATTER_TITLE, compare_histograms_figure, ecdf, linspace,
    plot_compare_histograms, plot_pvalues_ecdf, plot_pvalues_histogram, plot_scatter,
    pvalues_ecdf_figure, pvalues_histogram_figure, scatter_figure, trace_pvalues_ecdf,
    trace_pvalues_histogram,
};
pub use figure::{
    Axis, Figure, Histogram, Layout, Marker, Scatter, ScatterMode, Title, Trace, XBins,
};
pub use options::{DEFAULT_PLOTLY_JS_URL, HistogramOptions, LayoutOptions, RenderOptions};
