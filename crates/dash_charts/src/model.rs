//! Chart model types
//!
//! This module defines the colors and the input records accepted by each
//! chart kind. Records are plain data supplied by the dashboard; absent
//! numeric fields deserialize to zero and absent labels to the empty string.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};

/// RGBA color representation
///
/// Serialized as a hex string (`"#F08F5F"` or `"#F08F5F80"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Convert to hex string (with # prefix)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to CSS color string
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    /// Same color with the given opacity (0.0 - 1.0)
    pub fn with_alpha(&self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Opacity as a fraction
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
            .ok_or_else(|| ChartError::InvalidData(format!("invalid color: {value}")))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Dashboard palette used when a record carries no color of its own
pub const DASHBOARD_PALETTE: [Color; 8] = [
    Color::rgb(240, 143, 95),  // Coral
    Color::rgb(100, 210, 196), // Teal
    Color::rgb(242, 193, 78),  // Amber
    Color::rgb(107, 154, 196), // Steel blue
    Color::rgb(224, 108, 159), // Pink
    Color::rgb(195, 245, 132), // Lime
    Color::rgb(242, 143, 143), // Salmon
    Color::rgb(245, 208, 197), // Blush
];

/// Palette color for a record index, wrapping around
pub fn palette_color(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        return DASHBOARD_PALETTE[index % DASHBOARD_PALETTE.len()];
    }
    palette[index % palette.len()]
}

/// A point in a scatter plot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Optional magnitude, grows the marker radius
    pub size: Option<f64>,
    pub color: Option<Color>,
    pub label: String,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A single horizontal bar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: Option<Color>,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A point on a line chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

impl LinePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One spoke of a radar chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarMetric {
    pub label: String,
    pub value: f64,
    /// Text shown at the vertex instead of the formatted value
    pub display: Option<String>,
}

impl RadarMetric {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A pie slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Option<Color>,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// One category of a box-and-whisker chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxRow {
    pub label: String,
    pub p10: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub p90: f64,
}

impl BoxRow {
    pub fn new(label: impl Into<String>, p10: f64, q1: f64, median: f64, q3: f64, p90: f64) -> Self {
        Self {
            label: label.into(),
            p10,
            q1,
            median,
            q3,
            p90,
        }
    }

    /// The five summary values in ascending field order
    pub fn values(&self) -> [f64; 5] {
        [self.p10, self.q1, self.median, self.q3, self.p90]
    }
}

/// A 2-D intensity grid keyed by two label axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapGrid {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// Row-major values, `values[row][col]`
    pub values: Vec<Vec<f64>>,
}

impl HeatmapGrid {
    pub fn new(row_labels: Vec<String>, col_labels: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        Self {
            row_labels,
            col_labels,
            values,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_labels.len().max(self.values.len())
    }

    pub fn col_count(&self) -> usize {
        let widest = self.values.iter().map(Vec::len).max().unwrap_or(0);
        self.col_labels.len().max(widest)
    }

    /// Largest cell value, 0 for an empty grid
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max)
            .max(0.0)
    }
}

/// One cell of a heat-map, as handed to interaction callbacks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub row_label: String,
    pub col_label: String,
    pub value: f64,
}

/// A flow from a left-column node to a right-column node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyLink {
    pub source_index: usize,
    pub target_index: usize,
    pub value: f64,
}

impl SankeyLink {
    pub fn new(source_index: usize, target_index: usize, value: f64) -> Self {
        Self {
            source_index,
            target_index,
            value,
        }
    }
}

/// Two-column flow diagram input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyData {
    pub left_labels: Vec<String>,
    pub right_labels: Vec<String>,
    pub links: Vec<SankeyLink>,
}

impl SankeyData {
    pub fn new(left_labels: Vec<String>, right_labels: Vec<String>, links: Vec<SankeyLink>) -> Self {
        Self {
            left_labels,
            right_labels,
            links,
        }
    }
}
