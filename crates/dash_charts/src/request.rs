//! Serializable chart requests
//!
//! A request bundles a chart kind, its records and the subset of options
//! that can be expressed as data (callbacks cannot). This is what the
//! `dash_render` binary reads from disk.

use crate::engine::ChartEngine;
use crate::error::{ChartError, ChartResult};
use crate::format::{format_number, ValueFormatter};
use crate::model::*;
use crate::options::*;
use crate::scene::{Container, LegendContainer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Options that survive serialization; each chart reads the fields it knows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub color: Option<Color>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Decimal places of bar value texts
    pub value_digits: Option<usize>,
    /// Appended to bar value texts, e.g. `"%"`
    pub value_suffix: Option<String>,
}

impl RequestOptions {
    fn value_formatter(&self) -> Option<ValueFormatter> {
        if self.value_digits.is_none() && self.value_suffix.is_none() {
            return None;
        }
        let digits = self.value_digits.unwrap_or(0);
        let suffix = self.value_suffix.clone().unwrap_or_default();
        Some(Arc::new(move |v: f64| format!("{}{}", format_number(Some(v), digits), suffix)))
    }
}

/// A chart to render, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRequest {
    Scatter {
        data: Vec<ScatterPoint>,
        #[serde(default)]
        options: RequestOptions,
    },
    Bar {
        data: Vec<BarDatum>,
        #[serde(default)]
        options: RequestOptions,
    },
    Line {
        data: Vec<LinePoint>,
        #[serde(default)]
        options: RequestOptions,
    },
    Radar {
        data: Vec<RadarMetric>,
        #[serde(default)]
        options: RequestOptions,
    },
    Pie {
        data: Vec<PieSlice>,
        #[serde(default)]
        options: RequestOptions,
    },
    BoxPlot {
        data: Vec<BoxRow>,
        #[serde(default)]
        options: RequestOptions,
    },
    Heatmap {
        data: HeatmapGrid,
        #[serde(default)]
        options: RequestOptions,
    },
    Sankey {
        data: SankeyData,
        #[serde(default)]
        options: RequestOptions,
    },
}

impl ChartRequest {
    /// Parse and validate a request
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartRequest::Scatter { .. } => "scatter",
            ChartRequest::Bar { .. } => "bar",
            ChartRequest::Line { .. } => "line",
            ChartRequest::Radar { .. } => "radar",
            ChartRequest::Pie { .. } => "pie",
            ChartRequest::BoxPlot { .. } => "box_plot",
            ChartRequest::Heatmap { .. } => "heatmap",
            ChartRequest::Sankey { .. } => "sankey",
        }
    }

    /// Reject sankey links that point past either node column
    ///
    /// Requests come from files, so a bad index is reported as an error
    /// here instead of reaching the renderer.
    pub fn validate(&self) -> ChartResult<()> {
        if let ChartRequest::Sankey { data, .. } = self {
            for (idx, link) in data.links.iter().enumerate() {
                if link.source_index >= data.left_labels.len() || link.target_index >= data.right_labels.len() {
                    return Err(ChartError::InvalidData(format!(
                        "sankey link {} references node ({}, {}) but columns have {} and {} nodes",
                        idx,
                        link.source_index,
                        link.target_index,
                        data.left_labels.len(),
                        data.right_labels.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Render into `container`; a pie also fills `legend` when given
    pub fn render(&self, engine: &ChartEngine, container: &mut Container, legend: Option<&mut LegendContainer>) {
        match self {
            ChartRequest::Scatter { data, options } => {
                let mut chart_options = ScatterOptions::new();
                chart_options.x_label = options.x_label.clone();
                chart_options.y_label = options.y_label.clone();
                engine.render_scatter(container, data, chart_options);
            }
            ChartRequest::Bar { data, options } => {
                let mut chart_options = BarOptions::new();
                chart_options.x_label = options.x_label.clone();
                chart_options.format = options.value_formatter();
                engine.render_bar(container, data, chart_options);
            }
            ChartRequest::Line { data, options } => {
                let mut chart_options = LineOptions::new();
                chart_options.color = options.color;
                chart_options.x_label = options.x_label.clone();
                chart_options.y_label = options.y_label.clone();
                engine.render_line(container, data, chart_options);
            }
            ChartRequest::Radar { data, options } => {
                let mut chart_options = RadarOptions::new();
                chart_options.color = options.color;
                engine.render_radar(container, data, chart_options);
            }
            ChartRequest::Pie { data, .. } => {
                let mut chart_options = PieOptions::new();
                chart_options.legend_container = legend;
                engine.render_pie(container, data, chart_options);
            }
            ChartRequest::BoxPlot { data, options } => {
                let mut chart_options = BoxPlotOptions::new();
                chart_options.x_label = options.x_label.clone();
                engine.render_box_plot(container, data, chart_options);
            }
            ChartRequest::Heatmap { data, options } => {
                let mut chart_options = HeatmapOptions::new();
                chart_options.color = options.color;
                engine.render_heatmap(container, data, chart_options);
            }
            ChartRequest::Sankey { data, options } => {
                let mut chart_options = SankeyOptions::new();
                chart_options.color = options.color;
                engine.render_sankey(container, data, chart_options);
            }
        }
    }
}
