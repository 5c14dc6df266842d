//! Figure specification in the plotly.js JSON schema, and its HTML rendering.

use super::options::{LayoutOptions, RenderOptions};
use crate::stats::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

static FIGURE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Title object (`{"text": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

/// Fixed histogram binning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XBins {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

/// Marker styling for scatter traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: u32,
}

/// Drawing mode of a scatter trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScatterMode {
    Lines,
    Markers,
}

/// Histogram trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub x: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xbins: Option<XBins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbinsx: Option<u32>,
}

/// Scatter (line or marker) trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: ScatterMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

/// One chart element. Several traces compose into a [`Figure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Histogram(Histogram),
    Scatter(Scatter),
}

impl Trace {
    /// Trace name shown in the legend.
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Histogram(h) => h.name.as_deref(),
            Trace::Scatter(s) => s.name.as_deref(),
        }
    }
}

/// Axis settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

impl Axis {
    /// Axis with only a title.
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Show grid lines in `color`.
    pub fn with_grid(mut self, color: &str) -> Self {
        self.showgrid = Some(true);
        self.gridcolor = Some(color.to_string());
        self
    }

    /// Place ticks exactly at `values`.
    pub fn with_ticks(mut self, values: Vec<f64>) -> Self {
        self.tickmode = Some("array".to_string());
        self.tickvals = Some(values);
        self
    }
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

impl Layout {
    /// Layout with the given title and the template and size from `options`.
    pub fn new(title: &str, options: &LayoutOptions) -> Self {
        Self {
            template: options.template.clone(),
            title: Some(title.into()),
            width: options.width,
            height: options.height,
            barmode: None,
            xaxis: None,
            yaxis: None,
        }
    }

    pub fn with_axes(mut self, xaxis: Axis, yaxis: Axis) -> Self {
        self.xaxis = Some(xaxis);
        self.yaxis = Some(yaxis);
        self
    }
}

/// Traces plus layout: a complete chart specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Serialize to plotly.js JSON (`{"data": [...], "layout": {...}}`).
    pub fn to_json(&self) -> StatsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Standalone HTML page that loads plotly.js from `plotly_js_url` and
    /// draws the figure.
    pub fn to_html(&self, plotly_js_url: &str) -> StatsResult<String> {
        let data = serde_json::to_string(&self.data)?;
        let layout = serde_json::to_string(&self.layout)?;
        let title = self
            .layout
            .title
            .as_ref()
            .map(|t| escape_html(&t.text))
            .unwrap_or_default();

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str(&format!(
            "<script src=\"{}\"></script>\n",
            escape_html(plotly_js_url)
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str("<div id=\"figure\"></div>\n");
        html.push_str("<script>\n");
        html.push_str(&format!(
            "Plotly.newPlot(\"figure\", {}, {});\n",
            escape_script(&data),
            escape_script(&layout)
        ));
        html.push_str("</script>\n</body>\n</html>\n");
        Ok(html)
    }

    /// Write the page into the temp directory and open it in the default viewer.
    ///
    /// A viewer that fails to start is logged; the written path is returned
    /// either way.
    pub fn show(&self) -> StatsResult<PathBuf> {
        self.show_with(&RenderOptions::default().opening_viewer())
    }

    /// Write the HTML page into the configured directory and return its path,
    /// opening it only when [`RenderOptions::open_viewer`] is set.
    pub fn show_with(&self, options: &RenderOptions) -> StatsResult<PathBuf> {
        let dir = options
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let seq = FIGURE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("abstat-figure-{}-{}.html", std::process::id(), seq));

        let html = self.to_html(&options.plotly_js_url)?;
        std::fs::write(&path, html).map_err(|e| StatsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), traces = self.data.len(), "figure rendered");
        if options.open_viewer {
            if let Err(e) = opener::open(&path) {
                warn!(path = %path.display(), error = %e, "could not open figure viewer");
            }
        }
        Ok(path)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// JSON embedded in <script> must not close the tag early.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
