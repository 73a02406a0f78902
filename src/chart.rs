//! Chart specifications handed to the browser.
//!
//! A [`ChartSpec`] serialises to a Plotly figure (`{"data": [...], "layout": {...}}`)
//! so the page can pass it straight to `Plotly.react`.

use serde::Serialize;

/// A renderable chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

/// Proportion chart segments. Zero-valued segments are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// One colour group of a scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub legendgroup: String,
    pub mode: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl ChartSpec {
    /// Single-trace pie chart.
    pub fn pie(title: impl Into<String>, segments: Vec<(String, usize)>) -> Self {
        let (labels, values) = segments.into_iter().unzip();
        ChartSpec {
            data: vec![Trace::Pie(PieTrace { labels, values })],
            layout: Layout {
                title: Title::new(title),
                xaxis: None,
                yaxis: None,
                legend: None,
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// `(label, value)` pairs of the first pie trace, if any.
    pub fn segments(&self) -> Vec<(&str, usize)> {
        self.data
            .iter()
            .find_map(|t| match t {
                Trace::Pie(p) => Some(
                    p.labels
                        .iter()
                        .map(String::as_str)
                        .zip(p.values.iter().copied())
                        .collect(),
                ),
                Trace::Scatter(_) => None,
            })
            .unwrap_or_default()
    }

    /// All scatter points across every trace, as `(x, y)`.
    #[cfg(test)]
    pub fn points(&self) -> Vec<(f64, u8)> {
        self.data
            .iter()
            .filter_map(|t| match t {
                Trace::Scatter(s) => Some(s.x.iter().copied().zip(s.y.iter().copied())),
                Trace::Pie(_) => None,
            })
            .flatten()
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.data
            .iter()
            .map(|t| match t {
                Trace::Scatter(s) => s.x.len(),
                Trace::Pie(_) => 0,
            })
            .sum()
    }
}
