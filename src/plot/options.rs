//! Options for building and rendering figures.

use std::path::PathBuf;

/// plotly.js bundle referenced by rendered pages.
pub const DEFAULT_PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Options for p-value histograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramOptions {
    /// Bin width on [0, 1]. Matching it to the significance level makes the
    /// type-I error rate readable off the first bin.
    pub bin_size: f64,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self { bin_size: 0.05 }
    }
}

/// Template and size shared by every figure.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub template: String,
    pub width: u32,
    pub height: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            template: "plotly_dark".to_string(),
            width: 500,
            height: 500,
        }
    }
}

/// Where and how figures are written by [`Figure::show_with`](super::Figure::show_with).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Directory for the HTML files; the system temp directory when `None`.
    pub output_dir: Option<PathBuf>,
    pub plotly_js_url: String,
    /// Hand the written page to the system's default viewer.
    pub open_viewer: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            plotly_js_url: DEFAULT_PLOTLY_JS_URL.to_string(),
            open_viewer: false,
        }
    }
}

impl RenderOptions {
    /// Write into `dir` instead of the temp directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Also open each written page in the default viewer.
    pub fn opening_viewer(mut self) -> Self {
        self.open_viewer = true;
        self
    }
}
