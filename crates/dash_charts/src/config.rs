//! Engine configuration
//!
//! Layout constants and theme colors, loadable from a JSON file. Every
//! field has a default, so a partial file only overrides what it names.

use crate::error::{ChartError, ChartResult};
use crate::model::{Color, DASHBOARD_PALETTE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width and height of a chart in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Host size with `default` as the minimum on each axis
    ///
    /// A host reporting zero (or a non-finite size) gets the default.
    pub fn resolve(host: ChartSize, default: ChartSize) -> Self {
        let axis = |host: f64, default: f64| if host.is_finite() { host.max(default) } else { default };
        Self {
            width: axis(host.width, default.width),
            height: axis(host.height, default.height),
        }
    }
}

/// Geometry constants used by the layout calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub scatter_size: ChartSize,
    pub bar_size: ChartSize,
    pub line_size: ChartSize,
    /// Radar charts always use this size
    pub radar_size: ChartSize,
    pub pie_size: ChartSize,
    pub box_plot_size: ChartSize,
    /// Minimum heat-map size; the height grows with the row count
    pub heatmap_size: ChartSize,
    pub sankey_size: ChartSize,

    /// Padding around the plot area of scatter, line and box-plot charts
    pub cartesian_padding: f64,
    /// Number of tick intervals per cartesian axis
    pub axis_ticks: usize,
    pub axis_tick_length: f64,

    pub scatter_base_radius: f64,
    pub scatter_size_factor: f64,

    pub bar_padding: f64,
    /// Width of the label column left of the bars
    pub bar_label_column: f64,
    pub bar_inset: f64,
    pub bar_min_height: f64,
    pub bar_corner_radius: f64,
    pub bar_label_max_len: usize,
    pub value_text_gap: f64,

    pub line_marker_radius: f64,
    pub line_single_marker_radius: f64,
    pub single_label_offset: f64,

    pub radar_radius: f64,
    pub radar_label_offset: f64,

    pub pie_radius_margin: f64,
    pub pie_label_offset: f64,

    /// Box height as a fraction of the row height
    pub box_height_ratio: f64,
    pub box_label_gap: f64,

    pub heatmap_label_column: f64,
    pub heatmap_header: f64,
    pub heatmap_row_height: f64,
    pub heatmap_extra_height: f64,
    pub heatmap_cell_gap: f64,
    pub heatmap_col_label_max_len: usize,
    /// Fill opacity of an empty cell
    pub heatmap_alpha_floor: f64,
    /// Opacity added at full intensity
    pub heatmap_alpha_span: f64,

    /// Horizontal distance of each node column from its chart edge
    pub sankey_column_inset: f64,
    pub sankey_left_margin: f64,
    pub sankey_right_margin: f64,
    pub sankey_min_stroke: f64,
    pub sankey_max_stroke: f64,
    pub sankey_right_label_max_len: usize,
    pub sankey_label_gap: f64,

    /// Offset of the tooltip from the pointer, on both axes
    pub tooltip_offset: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            scatter_size: ChartSize::new(620.0, 340.0),
            bar_size: ChartSize::new(620.0, 340.0),
            line_size: ChartSize::new(620.0, 340.0),
            radar_size: ChartSize::new(360.0, 320.0),
            pie_size: ChartSize::new(520.0, 320.0),
            box_plot_size: ChartSize::new(520.0, 320.0),
            heatmap_size: ChartSize::new(720.0, 360.0),
            sankey_size: ChartSize::new(640.0, 360.0),
            cartesian_padding: 40.0,
            axis_ticks: 3,
            axis_tick_length: 4.0,
            scatter_base_radius: 4.0,
            scatter_size_factor: 0.02,
            bar_padding: 50.0,
            bar_label_column: 140.0,
            bar_inset: 4.0,
            bar_min_height: 6.0,
            bar_corner_radius: 6.0,
            bar_label_max_len: 16,
            value_text_gap: 6.0,
            line_marker_radius: 3.0,
            line_single_marker_radius: 6.0,
            single_label_offset: 8.0,
            radar_radius: 90.0,
            radar_label_offset: 10.0,
            pie_radius_margin: 20.0,
            pie_label_offset: 18.0,
            box_height_ratio: 0.4,
            box_label_gap: 6.0,
            heatmap_label_column: 140.0,
            heatmap_header: 60.0,
            heatmap_row_height: 26.0,
            heatmap_extra_height: 120.0,
            heatmap_cell_gap: 2.0,
            heatmap_col_label_max_len: 10,
            heatmap_alpha_floor: 0.15,
            heatmap_alpha_span: 0.7,
            sankey_column_inset: 120.0,
            sankey_left_margin: 60.0,
            sankey_right_margin: 40.0,
            sankey_min_stroke: 1.0,
            sankey_max_stroke: 13.0,
            sankey_right_label_max_len: 12,
            sankey_label_gap: 10.0,
            tooltip_offset: 12.0,
        }
    }
}

/// Colors and fonts used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    /// Optional full-size background rectangle
    pub background: Option<Color>,
    pub font_family: String,
    pub label_font_size: f64,
    pub tick_font_size: f64,
    pub value_font_size: f64,
    pub text_color: Color,
    pub muted_text_color: Color,
    pub value_text_color: Color,
    pub axis_color: Color,
    pub axis_width: f64,
    pub palette: Vec<Color>,
    pub scatter_color: Color,
    pub scatter_opacity: f64,
    pub line_color: Color,
    pub line_width: f64,
    pub radar_color: Color,
    pub radar_fill_alpha: f64,
    pub radar_stroke_width: f64,
    pub box_color: Color,
    pub box_fill_alpha: f64,
    pub median_color: Color,
    pub median_width: f64,
    pub whisker_color: Color,
    pub heatmap_color: Color,
    pub sankey_color: Color,
    pub sankey_alpha: f64,
    /// Text shown in place of a chart with no records
    pub placeholder_text: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: None,
            font_family: "sans-serif".to_string(),
            label_font_size: 11.0,
            tick_font_size: 10.0,
            value_font_size: 9.0,
            text_color: Color::rgb(232, 237, 245),
            muted_text_color: Color::rgb(169, 180, 197),
            value_text_color: Color::rgb(248, 230, 213),
            axis_color: Color::WHITE.with_alpha(0.25),
            axis_width: 1.0,
            palette: DASHBOARD_PALETTE.to_vec(),
            scatter_color: Color::rgb(240, 143, 95),
            scatter_opacity: 0.8,
            line_color: Color::rgb(100, 210, 196),
            line_width: 2.0,
            radar_color: Color::rgb(240, 143, 95),
            radar_fill_alpha: 0.3,
            radar_stroke_width: 2.0,
            box_color: Color::rgb(100, 210, 196),
            box_fill_alpha: 0.3,
            median_color: Color::rgb(240, 143, 95),
            median_width: 2.0,
            whisker_color: Color::WHITE.with_alpha(0.5),
            heatmap_color: Color::rgb(240, 143, 95),
            sankey_color: Color::rgb(100, 210, 196),
            sankey_alpha: 0.5,
            placeholder_text: "No data.".to_string(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutSettings,
    pub theme: ChartTheme,
}

impl EngineConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChartError::Serialization(e.to_string()))
    }

    /// Load from disk, or return defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No engine config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_json(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse engine config, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read engine config, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
