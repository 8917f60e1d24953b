//! Per-chart options
//!
//! Each render entry point takes its own options struct. Every recognized
//! field is listed here and defaults to "not set"; the engine then applies
//! the documented fallback (theme color, default formatter, default hover
//! text).

use crate::format::ValueFormatter;
use crate::model::*;
use crate::scene::LegendContainer;
use std::sync::Arc;

/// Click callback, receives the original record and its input index
pub type SelectHandler<T> = Arc<dyn Fn(&T, usize) + Send + Sync>;

/// Hover text callback, replaces a chart's default tooltip text
pub type HoverHandler<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Type-erased select action bound to one record at render time
pub type BoundSelect = Arc<dyn Fn() + Send + Sync>;

/// The interaction contract for one chart: what to show on hover and what to call on click
pub struct Interactivity<T> {
    pub on_select: Option<SelectHandler<T>>,
    pub on_hover: Option<HoverHandler<T>>,
}

impl<T> Default for Interactivity<T> {
    fn default() -> Self {
        Self {
            on_select: None,
            on_hover: None,
        }
    }
}

impl<T> Clone for Interactivity<T> {
    fn clone(&self) -> Self {
        Self {
            on_select: self.on_select.clone(),
            on_hover: self.on_hover.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Interactivity<T> {
    /// Hover text for a record: the caller's handler, or the chart default
    pub fn hover_text(&self, record: &T, default: impl FnOnce() -> String) -> String {
        match &self.on_hover {
            Some(handler) => handler(record),
            None => default(),
        }
    }

    /// Bind the select handler to a copy of the record as it was at render time
    pub fn bind_select(&self, record: &T, index: usize) -> Option<BoundSelect> {
        let handler = self.on_select.clone()?;
        let record = record.clone();
        Some(Arc::new(move || handler(&record, index)))
    }
}

macro_rules! interaction_builders {
    ($options:ident, $record:ty) => {
        impl $options {
            /// Call `handler(record, index)` when a primitive is clicked
            pub fn on_select(mut self, handler: impl Fn(&$record, usize) + Send + Sync + 'static) -> Self {
                self.interaction.on_select = Some(Arc::new(handler));
                self
            }

            /// Use `handler(record)` as the tooltip text
            pub fn on_hover(mut self, handler: impl Fn(&$record) -> String + Send + Sync + 'static) -> Self {
                self.interaction.on_hover = Some(Arc::new(handler));
                self
            }
        }
    };
}

/// Options for [`crate::ChartEngine::render_scatter`]
#[derive(Clone, Default)]
pub struct ScatterOptions {
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub interaction: Interactivity<ScatterPoint>,
}

impl ScatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

interaction_builders!(ScatterOptions, ScatterPoint);

/// Options for [`crate::ChartEngine::render_bar`]
#[derive(Clone, Default)]
pub struct BarOptions {
    pub x_label: Option<String>,
    /// Formatter for the value text drawn at each bar end
    pub format: Option<ValueFormatter>,
    pub interaction: Interactivity<BarDatum>,
}

impl BarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn format(mut self, formatter: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(formatter));
        self
    }
}

interaction_builders!(BarOptions, BarDatum);

/// Options for [`crate::ChartEngine::render_line`]
#[derive(Clone, Default)]
pub struct LineOptions {
    /// Stroke and marker color
    pub color: Option<Color>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub interaction: Interactivity<LinePoint>,
}

impl LineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

interaction_builders!(LineOptions, LinePoint);

/// Options for [`crate::ChartEngine::render_radar`]
#[derive(Clone, Default)]
pub struct RadarOptions {
    /// Polygon stroke color; the fill is the same color at reduced opacity
    pub color: Option<Color>,
    pub interaction: Interactivity<RadarMetric>,
}

impl RadarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

interaction_builders!(RadarOptions, RadarMetric);

/// Options for [`crate::ChartEngine::render_pie`]
#[derive(Default)]
pub struct PieOptions<'a> {
    /// Secondary mount point filled with one swatch + label per slice
    pub legend_container: Option<&'a mut LegendContainer>,
    pub interaction: Interactivity<PieSlice>,
}

impl<'a> PieOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legend(mut self, legend: &'a mut LegendContainer) -> Self {
        self.legend_container = Some(legend);
        self
    }

    pub fn on_select(mut self, handler: impl Fn(&PieSlice, usize) + Send + Sync + 'static) -> Self {
        self.interaction.on_select = Some(Arc::new(handler));
        self
    }

    pub fn on_hover(mut self, handler: impl Fn(&PieSlice) -> String + Send + Sync + 'static) -> Self {
        self.interaction.on_hover = Some(Arc::new(handler));
        self
    }
}

/// Options for [`crate::ChartEngine::render_box_plot`]
#[derive(Clone, Default)]
pub struct BoxPlotOptions {
    pub x_label: Option<String>,
    pub interaction: Interactivity<BoxRow>,
}

impl BoxPlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }
}

interaction_builders!(BoxPlotOptions, BoxRow);

/// Options for [`crate::ChartEngine::render_heatmap`]
#[derive(Clone, Default)]
pub struct HeatmapOptions {
    /// Base cell color, blended by intensity
    pub color: Option<Color>,
    pub interaction: Interactivity<HeatmapCell>,
}

impl HeatmapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

interaction_builders!(HeatmapOptions, HeatmapCell);

/// Options for [`crate::ChartEngine::render_sankey`]
#[derive(Clone, Default)]
pub struct SankeyOptions {
    /// Link stroke color
    pub color: Option<Color>,
    pub interaction: Interactivity<SankeyLink>,
}

impl SankeyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

interaction_builders!(SankeyOptions, SankeyLink);
