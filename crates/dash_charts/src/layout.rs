//! Chart layout calculations
//!
//! This module turns records into pixel geometry for each chart kind. It
//! is pure: no colors, no container, no callbacks. Every `calculate_*`
//! returns `None` when there is nothing to draw, which the engine turns
//! into the "no data" placeholder.

use crate::config::{ChartSize, LayoutSettings};
use crate::format::{format_number, truncate_label};
use crate::geometry::*;
use crate::model::*;
use crate::scale::{Domain, LinearScale};
use crate::scene::TextAnchor;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Distance of x tick labels below the x axis
const TICK_LABEL_OFFSET: f64 = 12.0;
/// Gap between the y axis and its tick labels
const Y_TICK_LABEL_GAP: f64 = 6.0;
/// Distance of the x caption from the bottom edge
const CAPTION_BOTTOM_GAP: f64 = 6.0;
/// Baseline of the y caption
const CAPTION_TOP: f64 = 12.0;
/// Nudge that centers 10-11px text vertically on a row
const ROW_TEXT_BASELINE: f64 = 4.0;
/// Gap between a row label and the plot
const ROW_LABEL_GAP: f64 = 8.0;
/// Gap between heat-map labels and the grid
const GRID_LABEL_GAP: f64 = 10.0;

/// A piece of text placed in layout coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayout {
    pub position: LayoutPoint,
    pub text: String,
    pub anchor: TextAnchor,
}

impl TextLayout {
    pub fn new(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Self {
            position: LayoutPoint::new(x, y),
            text: text.into(),
            anchor,
        }
    }
}

/// A straight segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLayout {
    pub start: LayoutPoint,
    pub end: LayoutPoint,
}

impl SegmentLayout {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: LayoutPoint::new(x1, y1),
            end: LayoutPoint::new(x2, y2),
        }
    }
}

/// Layout for one axis tick: its mark and its label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTickLayout {
    pub mark: SegmentLayout,
    pub label: TextLayout,
    pub value: f64,
}

/// Layout for the x/y axes of a cartesian chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxesLayout {
    pub lines: Vec<SegmentLayout>,
    pub x_ticks: Vec<AxisTickLayout>,
    pub y_ticks: Vec<AxisTickLayout>,
    pub x_caption: Option<TextLayout>,
    pub y_caption: Option<TextLayout>,
}

/// Layout for a scatter marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterMarkerLayout {
    pub center: LayoutPoint,
    pub radius: f64,
    /// Index of the originating record
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterLayout {
    pub size: ChartSize,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub axes: AxesLayout,
    pub markers: Vec<ScatterMarkerLayout>,
}

/// Layout for one horizontal bar and its texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub bounds: LayoutRect,
    /// Full-width slot allotted to this bar
    pub band: LayoutRect,
    /// Truncated label in the left column
    pub label: TextLayout,
    /// Anchor point of the value text at the bar end
    pub value_position: LayoutPoint,
    pub value: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartLayout {
    pub size: ChartSize,
    pub scale: LinearScale,
    pub band_height: f64,
    pub bars: Vec<BarLayout>,
    pub x_caption: Option<TextLayout>,
}

impl BarChartLayout {
    /// Width available to a bar of the maximum value
    pub fn bar_area_width(&self) -> f64 {
        let (start, end) = self.scale.range();
        end - start
    }
}

/// Layout for a line chart marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMarkerLayout {
    pub center: LayoutPoint,
    pub radius: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartLayout {
    pub size: ChartSize,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub axes: AxesLayout,
    /// Connected points in input order; `None` with fewer than two points
    pub path: Option<Vec<LayoutPoint>>,
    pub markers: Vec<LineMarkerLayout>,
    /// Value label drawn next to a lone point
    pub single_label: Option<TextLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarLayout {
    pub size: ChartSize,
    pub center: LayoutPoint,
    pub radius: f64,
    pub max_value: f64,
    /// Angle of each spoke, starting at 12 o'clock and moving clockwise
    pub angles: Vec<f64>,
    pub axis_labels: Vec<TextLayout>,
    /// Closed polygon vertices, one per metric in input order
    pub vertices: Vec<LayoutPoint>,
    pub value_labels: Vec<TextLayout>,
}

/// Layout for a pie slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSliceLayout {
    pub start_angle: f64,
    pub sweep: f64,
    pub mid_angle: f64,
    /// Share of the total, 0.0 - 1.0
    pub fraction: f64,
    pub large_arc: bool,
    pub path: String,
    pub label: TextLayout,
    pub index: usize,
}

impl PieSliceLayout {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    pub size: ChartSize,
    pub center: LayoutPoint,
    pub radius: f64,
    pub total: f64,
    pub slices: Vec<PieSliceLayout>,
}

/// Layout for one box-and-whisker row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxRowLayout {
    pub band: LayoutRect,
    pub box_bounds: LayoutRect,
    pub median: SegmentLayout,
    pub whisker: SegmentLayout,
    pub label: TextLayout,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotLayout {
    pub size: ChartSize,
    pub scale: LinearScale,
    pub row_height: f64,
    pub axes: AxesLayout,
    pub rows: Vec<BoxRowLayout>,
}

/// Layout for one heat-map cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCellLayout {
    pub bounds: LayoutRect,
    pub row: usize,
    pub col: usize,
    pub value: f64,
    /// `value / max`, 0 when the max is 0
    pub intensity: f64,
    /// Fill opacity derived from the intensity
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapLayout {
    pub size: ChartSize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub max_value: f64,
    pub row_labels: Vec<TextLayout>,
    pub col_labels: Vec<TextLayout>,
    pub cells: Vec<HeatmapCellLayout>,
}

/// Layout for one flow link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLinkLayout {
    pub curve: CubicCurve,
    pub thickness: f64,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLayout {
    pub size: ChartSize,
    pub left_x: f64,
    pub right_x: f64,
    pub max_value: f64,
    pub left_nodes: Vec<TextLayout>,
    pub right_nodes: Vec<TextLayout>,
    pub links: Vec<SankeyLinkLayout>,
}

/// Layout calculator for charts
#[derive(Debug, Clone, Default)]
pub struct ChartLayoutCalculator {
    pub settings: LayoutSettings,
}

impl ChartLayoutCalculator {
    /// Create a new layout calculator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn calculate_scatter(
        &self,
        points: &[ScatterPoint],
        host: ChartSize,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> Option<ScatterLayout> {
        let s = &self.settings;
        let x_domain = Domain::from_values(points.iter().map(|p| p.x))?;
        let y_domain = Domain::from_values(points.iter().map(|p| p.y))?;
        let size = ChartSize::resolve(host, s.scatter_size);
        let (x_scale, y_scale) = self.cartesian_scales(size, x_domain, y_domain);

        let markers = points
            .iter()
            .enumerate()
            .map(|(index, point)| ScatterMarkerLayout {
                center: LayoutPoint::new(x_scale.map(point.x), y_scale.map(point.y)),
                radius: s.scatter_base_radius + point.size.unwrap_or(0.0) * s.scatter_size_factor,
                index,
            })
            .collect();

        Some(ScatterLayout {
            size,
            x_scale,
            y_scale,
            axes: self.calculate_axes(size, x_domain, y_domain, x_label, y_label),
            markers,
        })
    }

    pub fn calculate_bar(&self, bars: &[BarDatum], host: ChartSize, x_label: Option<&str>) -> Option<BarChartLayout> {
        if bars.is_empty() {
            return None;
        }
        let s = &self.settings;
        let size = ChartSize::resolve(host, s.bar_size);
        let max_value = Domain::from_values(bars.iter().map(|b| b.value)).map_or(0.0, |d| d.max.max(0.0));
        let scale = LinearScale::new(0.0, max_value, s.bar_label_column, size.width - s.bar_padding);
        let band_height = (size.height - s.bar_padding * 2.0) / bars.len() as f64;

        let bars = bars
            .iter()
            .enumerate()
            .map(|(index, bar)| {
                let y = s.bar_padding + index as f64 * band_height;
                let text_y = y + band_height / 2.0 + ROW_TEXT_BASELINE;
                let end = scale.map(bar.value);
                let width = (end - s.bar_label_column).max(0.0);
                BarLayout {
                    bounds: LayoutRect::new(
                        s.bar_label_column,
                        y + s.bar_inset,
                        width,
                        s.bar_min_height.max(band_height - 2.0 * s.bar_inset),
                    ),
                    band: LayoutRect::new(0.0, y, size.width, band_height),
                    label: TextLayout::new(
                        s.bar_label_column - ROW_LABEL_GAP,
                        text_y,
                        truncate_label(&bar.label, s.bar_label_max_len),
                        TextAnchor::End,
                    ),
                    value_position: LayoutPoint::new(s.bar_label_column + width + s.value_text_gap, text_y),
                    value: bar.value,
                    index,
                }
            })
            .collect();

        Some(BarChartLayout {
            size,
            scale,
            band_height,
            bars,
            x_caption: x_label
                .filter(|l| !l.is_empty())
                .map(|l| self.x_caption(size, s.bar_padding, l)),
        })
    }

    pub fn calculate_line(
        &self,
        points: &[LinePoint],
        host: ChartSize,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> Option<LineChartLayout> {
        let s = &self.settings;
        let x_domain = Domain::from_values(points.iter().map(|p| p.x))?;
        let y_domain = Domain::from_values(points.iter().map(|p| p.y))?;
        let size = ChartSize::resolve(host, s.line_size);
        let (x_scale, y_scale) = self.cartesian_scales(size, x_domain, y_domain);

        let centers: Vec<LayoutPoint> = points
            .iter()
            .map(|p| LayoutPoint::new(x_scale.map(p.x), y_scale.map(p.y)))
            .collect();
        let single = centers.len() == 1;
        let radius = if single { s.line_single_marker_radius } else { s.line_marker_radius };

        let markers = centers
            .iter()
            .enumerate()
            .map(|(index, &center)| LineMarkerLayout { center, radius, index })
            .collect();

        let single_label = if single {
            let c = centers[0];
            Some(TextLayout::new(
                c.x + s.single_label_offset,
                c.y - s.single_label_offset,
                format_number(Some(points[0].y), 0),
                TextAnchor::Start,
            ))
        } else {
            None
        };

        Some(LineChartLayout {
            size,
            x_scale,
            y_scale,
            axes: self.calculate_axes(size, x_domain, y_domain, x_label, y_label),
            path: if single { None } else { Some(centers) },
            markers,
            single_label,
        })
    }

    pub fn calculate_radar(&self, metrics: &[RadarMetric]) -> Option<RadarLayout> {
        if metrics.is_empty() {
            return None;
        }
        let s = &self.settings;
        let size = s.radar_size;
        let center = LayoutPoint::new(size.width / 2.0, size.height / 2.0);
        let radius = s.radar_radius;
        let max_value = Domain::from_values(metrics.iter().map(|m| m.value))
            .map(|d| d.max)
            .filter(|&m| m != 0.0)
            .unwrap_or(1.0);

        let count = metrics.len() as f64;
        let angles: Vec<f64> = (0..metrics.len())
            .map(|idx| TAU * idx as f64 / count - FRAC_PI_2)
            .collect();

        let axis_labels = metrics
            .iter()
            .zip(&angles)
            .map(|(metric, &angle)| {
                let p = polar_point(center, radius + s.radar_label_offset, angle);
                TextLayout::new(p.x, p.y, metric.label.clone(), TextAnchor::Middle)
            })
            .collect();

        let vertices: Vec<LayoutPoint> = metrics
            .iter()
            .zip(&angles)
            .map(|(metric, &angle)| polar_point(center, metric.value / max_value * radius, angle))
            .collect();

        let value_labels = metrics
            .iter()
            .zip(&vertices)
            .map(|(metric, v)| {
                let text = metric
                    .display
                    .clone()
                    .unwrap_or_else(|| format_number(Some(metric.value), 2));
                TextLayout::new(v.x, v.y, text, TextAnchor::Middle)
            })
            .collect();

        Some(RadarLayout {
            size,
            center,
            radius,
            max_value,
            angles,
            axis_labels,
            vertices,
            value_labels,
        })
    }

    pub fn calculate_pie(&self, slices: &[PieSlice], host: ChartSize) -> Option<PieLayout> {
        if slices.is_empty() {
            return None;
        }
        let s = &self.settings;
        let size = ChartSize::resolve(host, s.pie_size);
        let center = LayoutPoint::new(size.width / 2.0, size.height / 2.0);
        let radius = (size.width.min(size.height) / 2.0 - s.pie_radius_margin).max(0.0);
        let sum: f64 = slices.iter().map(|slice| slice.value).sum();
        let total = if sum == 0.0 || sum.is_nan() { 1.0 } else { sum };

        let mut angle = -FRAC_PI_2;
        let mut layouts = Vec::with_capacity(slices.len());
        for (index, slice) in slices.iter().enumerate() {
            let fraction = slice.value / total;
            let sweep = fraction * TAU;
            let mid_angle = angle + sweep / 2.0;
            let label_at = polar_point(center, radius + s.pie_label_offset, mid_angle);
            layouts.push(PieSliceLayout {
                start_angle: angle,
                sweep,
                mid_angle,
                fraction,
                large_arc: sweep > std::f64::consts::PI,
                path: slice_path(center, radius, angle, sweep),
                label: TextLayout::new(
                    label_at.x,
                    label_at.y,
                    format!("{}%", format_number(Some(fraction * 100.0), 1)),
                    TextAnchor::Middle,
                ),
                index,
            });
            angle += sweep;
        }

        Some(PieLayout {
            size,
            center,
            radius,
            total,
            slices: layouts,
        })
    }

    pub fn calculate_box_plot(&self, rows: &[BoxRow], host: ChartSize, x_label: Option<&str>) -> Option<BoxPlotLayout> {
        let s = &self.settings;
        let domain = Domain::from_values(rows.iter().flat_map(|r| r.values()))?;
        let size = ChartSize::resolve(host, s.box_plot_size);
        let p = s.cartesian_padding;
        let scale = LinearScale::from_domain(domain, p, size.width - p);
        let row_height = (size.height - p * 2.0) / rows.len() as f64;
        let half_box = row_height * s.box_height_ratio / 2.0;

        let layouts = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let top = p + index as f64 * row_height;
                let cy = top + row_height / 2.0;
                let (q1, q3) = (scale.map(row.q1), scale.map(row.q3));
                let median_x = scale.map(row.median);
                BoxRowLayout {
                    band: LayoutRect::new(0.0, top, size.width, row_height),
                    box_bounds: LayoutRect::new(q1.min(q3), cy - half_box, (q3 - q1).abs(), half_box * 2.0),
                    median: SegmentLayout::new(median_x, cy - half_box, median_x, cy + half_box),
                    whisker: SegmentLayout::new(scale.map(row.p10), cy, scale.map(row.p90), cy),
                    label: TextLayout::new(p - s.box_label_gap, cy + ROW_TEXT_BASELINE, row.label.clone(), TextAnchor::End),
                    index,
                }
            })
            .collect();

        let rows_domain = Domain::new(0.0, rows.len() as f64);
        Some(BoxPlotLayout {
            size,
            scale,
            row_height,
            axes: self.calculate_axes(size, domain, rows_domain, x_label, None),
            rows: layouts,
        })
    }

    pub fn calculate_heatmap(&self, grid: &HeatmapGrid, host: ChartSize) -> Option<HeatmapLayout> {
        let rows = grid.row_count();
        let cols = grid.col_count();
        if grid.values.is_empty() || cols == 0 {
            return None;
        }
        let s = &self.settings;
        let height = s.heatmap_size.height.max(rows as f64 * s.heatmap_row_height + s.heatmap_extra_height);
        let width = ChartSize::resolve(ChartSize::new(host.width, 0.0), s.heatmap_size).width;
        let size = ChartSize::new(width, height);

        let left = s.heatmap_label_column;
        let top = s.heatmap_header;
        let cell_width = (width - left * 1.1) / cols as f64;
        let cell_height = (height - top * 1.2) / rows as f64;
        let max_value = grid.max_value();

        let row_labels = grid
            .row_labels
            .iter()
            .enumerate()
            .map(|(r, label)| {
                TextLayout::new(
                    left - GRID_LABEL_GAP,
                    top + r as f64 * cell_height + cell_height / 2.0 + ROW_TEXT_BASELINE,
                    label.clone(),
                    TextAnchor::End,
                )
            })
            .collect();

        let col_labels = grid
            .col_labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                TextLayout::new(
                    left + c as f64 * cell_width + cell_width / 2.0,
                    top - GRID_LABEL_GAP,
                    truncate_label(label, s.heatmap_col_label_max_len),
                    TextAnchor::Middle,
                )
            })
            .collect();

        let mut cells = Vec::new();
        for (r, row) in grid.values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let intensity = heat_intensity(value, max_value);
                cells.push(HeatmapCellLayout {
                    bounds: LayoutRect::new(
                        left + c as f64 * cell_width,
                        top + r as f64 * cell_height,
                        (cell_width - s.heatmap_cell_gap).max(0.0),
                        (cell_height - s.heatmap_cell_gap).max(0.0),
                    ),
                    row: r,
                    col: c,
                    value,
                    intensity,
                    alpha: s.heatmap_alpha_floor + intensity * s.heatmap_alpha_span,
                });
            }
        }

        Some(HeatmapLayout {
            size,
            cell_width,
            cell_height,
            max_value,
            row_labels,
            col_labels,
            cells,
        })
    }

    pub fn calculate_sankey(&self, data: &SankeyData, host: ChartSize) -> Option<SankeyLayout> {
        if data.links.is_empty() {
            return None;
        }
        let s = &self.settings;
        let size = ChartSize::resolve(host, s.sankey_size);
        let left_x = s.sankey_column_inset;
        let right_x = size.width - s.sankey_column_inset;
        let left_y = column_positions(data.left_labels.len(), s.sankey_left_margin, size.height);
        let right_y = column_positions(data.right_labels.len(), s.sankey_right_margin, size.height);
        let max_value = data.links.iter().map(|l| l.value).fold(0.0, f64::max);

        let left_nodes = data
            .left_labels
            .iter()
            .zip(&left_y)
            .map(|(label, &y)| TextLayout::new(left_x - s.sankey_label_gap, y, label.to_uppercase(), TextAnchor::End))
            .collect();

        let right_nodes = data
            .right_labels
            .iter()
            .zip(&right_y)
            .map(|(label, &y)| {
                TextLayout::new(
                    right_x + s.sankey_label_gap,
                    y,
                    truncate_label(label, s.sankey_right_label_max_len),
                    TextAnchor::Start,
                )
            })
            .collect();

        let mut links = Vec::with_capacity(data.links.len());
        for (index, link) in data.links.iter().enumerate() {
            debug_assert!(
                link.source_index < left_y.len() && link.target_index < right_y.len(),
                "sankey link {} references node ({}, {}) outside {}x{} columns",
                index,
                link.source_index,
                link.target_index,
                left_y.len(),
                right_y.len()
            );
            let (Some(&y1), Some(&y2)) = (left_y.get(link.source_index), right_y.get(link.target_index)) else {
                tracing::warn!(
                    "Skipping sankey link {}: node index ({}, {}) out of range",
                    index,
                    link.source_index,
                    link.target_index
                );
                continue;
            };
            links.push(SankeyLinkLayout {
                curve: CubicCurve::horizontal_link(LayoutPoint::new(left_x, y1), LayoutPoint::new(right_x, y2)),
                thickness: link_thickness(link.value, max_value, s.sankey_min_stroke, s.sankey_max_stroke),
                index,
            });
        }

        Some(SankeyLayout {
            size,
            left_x,
            right_x,
            max_value,
            left_nodes,
            right_nodes,
            links,
        })
    }

    fn cartesian_scales(&self, size: ChartSize, x: Domain, y: Domain) -> (LinearScale, LinearScale) {
        let p = self.settings.cartesian_padding;
        (
            LinearScale::from_domain(x, p, size.width - p),
            LinearScale::from_domain(y, size.height - p, p),
        )
    }

    fn x_caption(&self, size: ChartSize, padding: f64, text: &str) -> TextLayout {
        TextLayout::new(size.width - padding, size.height - CAPTION_BOTTOM_GAP, text, TextAnchor::End)
    }

    /// Axis lines, evenly spaced ticks and optional captions
    pub fn calculate_axes(
        &self,
        size: ChartSize,
        x: Domain,
        y: Domain,
        x_label: Option<&str>,
        y_label: Option<&str>,
    ) -> AxesLayout {
        let s = &self.settings;
        let p = s.cartesian_padding;
        let ticks = s.axis_ticks.max(1);
        let bottom = size.height - p;
        let plot_width = size.width - p * 2.0;
        let plot_height = size.height - p * 2.0;

        let x_values = LinearScale::from_domain(x, p, size.width - p).ticks(ticks);
        let x_ticks = x_values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let px = p + plot_width * (i as f64 / ticks as f64);
                AxisTickLayout {
                    mark: SegmentLayout::new(px, bottom, px, bottom + s.axis_tick_length),
                    label: TextLayout::new(px, bottom + TICK_LABEL_OFFSET, format_number(Some(value), 1), TextAnchor::Middle),
                    value,
                }
            })
            .collect();

        let y_values = LinearScale::from_domain(y, bottom, p).ticks(ticks);
        let y_ticks = y_values
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let py = bottom - plot_height * (i as f64 / ticks as f64);
                AxisTickLayout {
                    mark: SegmentLayout::new(p - s.axis_tick_length, py, p, py),
                    label: TextLayout::new(
                        p - Y_TICK_LABEL_GAP,
                        py + ROW_TEXT_BASELINE,
                        format_number(Some(value), 1),
                        TextAnchor::End,
                    ),
                    value,
                }
            })
            .collect();

        AxesLayout {
            lines: vec![
                SegmentLayout::new(p, bottom, size.width - p, bottom),
                SegmentLayout::new(p, bottom, p, p),
            ],
            x_ticks,
            y_ticks,
            x_caption: x_label.filter(|l| !l.is_empty()).map(|l| self.x_caption(size, p, l)),
            y_caption: y_label
                .filter(|l| !l.is_empty())
                .map(|l| TextLayout::new(p, CAPTION_TOP, l, TextAnchor::Start)),
        }
    }
}

/// `value / max`, or 0 when the max is not positive
pub fn heat_intensity(value: f64, max_value: f64) -> f64 {
    if max_value > 0.0 {
        value / max_value
    } else {
        0.0
    }
}

/// Stroke width interpolated between `min` and `max` by `value / max_value`
pub fn link_thickness(value: f64, max_value: f64, min: f64, max: f64) -> f64 {
    if max_value > 0.0 {
        min + value / max_value * (max - min)
    } else {
        min
    }
}

/// Evenly spaced node positions between `margin` and `height - margin`
fn column_positions(count: usize, margin: f64, height: f64) -> Vec<f64> {
    let gaps = if count > 1 { (count - 1) as f64 } else { 1.0 };
    let step = (height - margin * 2.0) / gaps;
    (0..count).map(|idx| margin + idx as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const NO_HOST: ChartSize = ChartSize::new(0.0, 0.0);

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_scatter_single_point_sits_at_range_min() {
        let calculator = ChartLayoutCalculator::new();
        let points = vec![ScatterPoint::new(5.0, 5.0).with_label("P1")];
        let layout = calculator.calculate_scatter(&points, NO_HOST, None, None).unwrap();

        let marker = &layout.markers[0];
        assert_eq!(marker.center.x, 40.0);
        assert_eq!(marker.center.y, 340.0 - 40.0);
        assert!(marker.center.x.is_finite() && marker.center.y.is_finite());
        assert_eq!(marker.radius, 4.0);
    }

    #[test]
    fn test_scatter_independent_domains_and_radius() {
        let calculator = ChartLayoutCalculator::new();
        let points = vec![
            ScatterPoint::new(0.0, 100.0).with_size(500.0),
            ScatterPoint::new(10.0, 200.0),
        ];
        let layout = calculator.calculate_scatter(&points, NO_HOST, None, None).unwrap();

        assert_eq!(layout.markers[0].center, LayoutPoint::new(40.0, 300.0));
        assert_eq!(layout.markers[1].center, LayoutPoint::new(580.0, 40.0));
        assert_eq!(layout.markers[0].radius, 14.0);
        assert_eq!(layout.markers[1].radius, 4.0);
    }

    #[test]
    fn test_empty_inputs_have_no_layout() {
        let calculator = ChartLayoutCalculator::new();
        assert!(calculator.calculate_scatter(&[], NO_HOST, None, None).is_none());
        assert!(calculator.calculate_bar(&[], NO_HOST, None).is_none());
        assert!(calculator.calculate_line(&[], NO_HOST, None, None).is_none());
        assert!(calculator.calculate_radar(&[]).is_none());
        assert!(calculator.calculate_pie(&[], NO_HOST).is_none());
        assert!(calculator.calculate_box_plot(&[], NO_HOST, None).is_none());
        assert!(calculator.calculate_heatmap(&HeatmapGrid::default(), NO_HOST).is_none());
        assert!(calculator.calculate_sankey(&SankeyData::default(), NO_HOST).is_none());
    }

    #[test]
    fn test_single_bar_fills_bar_area() {
        let calculator = ChartLayoutCalculator::new();
        let layout = calculator
            .calculate_bar(&[BarDatum::new("A", 10.0)], NO_HOST, None)
            .unwrap();

        assert_eq!(layout.bars.len(), 1);
        assert_eq!(layout.bar_area_width(), 620.0 - 50.0 - 140.0);
        assert_eq!(layout.bars[0].bounds.width, layout.bar_area_width());
        assert_eq!(layout.bars[0].bounds.x, 140.0);
    }

    #[test]
    fn test_bars_keep_input_order_and_uniform_bands() {
        let calculator = ChartLayoutCalculator::new();
        let bars = vec![
            BarDatum::new("low", 1.0),
            BarDatum::new("high", 4.0),
            BarDatum::new("mid", 2.0),
        ];
        let layout = calculator.calculate_bar(&bars, NO_HOST, Some("Games")).unwrap();

        assert_eq!(layout.band_height, 80.0);
        let ys: Vec<f64> = layout.bars.iter().map(|b| b.band.y).collect();
        assert_eq!(ys, vec![50.0, 130.0, 210.0]);
        assert_eq!(layout.bars[1].label.text, "high");
        assert!(layout.bars[1].bounds.width > layout.bars[2].bounds.width);
        assert_eq!(layout.bars[0].bounds.height, 72.0);
        assert_eq!(layout.x_caption.as_ref().unwrap().text, "Games");
    }

    #[test]
    fn test_negative_bars_stay_inside_chart() {
        let calculator = ChartLayoutCalculator::new();
        let bars = vec![BarDatum::new("a", -5.0), BarDatum::new("b", -1.0)];
        let layout = calculator.calculate_bar(&bars, NO_HOST, None).unwrap();

        assert_eq!(layout.scale.domain(), Domain::new(0.0, 0.0));
        assert!(layout.bars.iter().all(|b| b.bounds.width == 0.0));
        assert_eq!(layout.bars[0].value_position.x, 140.0 + 6.0);

        let mixed = vec![BarDatum::new("a", -5.0), BarDatum::new("b", 10.0)];
        let layout = calculator.calculate_bar(&mixed, NO_HOST, None).unwrap();
        assert_eq!(layout.bars[0].bounds.width, 0.0);
        assert_eq!(layout.bars[1].bounds.width, 430.0);
    }

    #[test]
    fn test_bar_label_truncated() {
        let calculator = ChartLayoutCalculator::new();
        let bars = vec![BarDatum::new("Twisted Fate the Card Master", 3.0)];
        let layout = calculator.calculate_bar(&bars, NO_HOST, None).unwrap();
        assert_eq!(layout.bars[0].label.text, "Twisted Fate ...");
        assert_eq!(layout.bars[0].label.anchor, TextAnchor::End);
    }

    #[test]
    fn test_bar_min_height_with_many_bars() {
        let calculator = ChartLayoutCalculator::new();
        let bars: Vec<BarDatum> = (0..100).map(|i| BarDatum::new(format!("b{i}"), i as f64)).collect();
        let layout = calculator.calculate_bar(&bars, NO_HOST, None).unwrap();
        assert!(layout.bars.iter().all(|b| b.bounds.height == 6.0));
    }

    #[test]
    fn test_line_path_in_input_order() {
        let calculator = ChartLayoutCalculator::new();
        let points = vec![LinePoint::new(3.0, 1.0), LinePoint::new(1.0, 2.0), LinePoint::new(2.0, 3.0)];
        let layout = calculator.calculate_line(&points, NO_HOST, None, None).unwrap();

        let path = layout.path.unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].x, 580.0);
        assert_eq!(path[1].x, 40.0);
        assert!(layout.markers.iter().all(|m| m.radius == 3.0));
        assert!(layout.single_label.is_none());
    }

    #[test]
    fn test_line_single_point_fallback() {
        let calculator = ChartLayoutCalculator::new();
        let layout = calculator
            .calculate_line(&[LinePoint::new(2024.0, 57.6)], NO_HOST, None, None)
            .unwrap();

        assert!(layout.path.is_none());
        assert_eq!(layout.markers.len(), 1);
        assert_eq!(layout.markers[0].radius, 6.0);
        let label = layout.single_label.unwrap();
        assert_eq!(label.text, "58");
        assert_eq!(label.position, LayoutPoint::new(48.0, 292.0));
    }

    #[test]
    fn test_radar_vertices_clockwise_from_top() {
        let calculator = ChartLayoutCalculator::new();
        let metrics = vec![
            RadarMetric::new("KDA", 4.0),
            RadarMetric::new("GPM", 2.0),
            RadarMetric::new("DPM", 4.0).with_display("4k"),
            RadarMetric::new("VS", 1.0),
        ];
        let layout = calculator.calculate_radar(&metrics).unwrap();

        assert_eq!(layout.size, ChartSize::new(360.0, 320.0));
        assert_eq!(layout.max_value, 4.0);
        assert_close(layout.vertices[0].x, 180.0);
        assert_close(layout.vertices[0].y, 160.0 - 90.0);
        assert_close(layout.vertices[1].x, 180.0 + 45.0);
        assert_close(layout.vertices[1].y, 160.0);
        assert_close(layout.vertices[2].y, 160.0 + 90.0);
        assert_close(layout.axis_labels[0].position.y, 160.0 - 100.0);
        assert_eq!(layout.value_labels[0].text, "4.00");
        assert_eq!(layout.value_labels[2].text, "4k");
    }

    #[test]
    fn test_radar_zero_max_falls_back_to_one() {
        let calculator = ChartLayoutCalculator::new();
        let layout = calculator
            .calculate_radar(&[RadarMetric::new("a", 0.0), RadarMetric::new("b", 0.0)])
            .unwrap();
        assert_eq!(layout.max_value, 1.0);
        assert!(layout.vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    }

    #[test]
    fn test_pie_slice_angles() {
        let calculator = ChartLayoutCalculator::new();
        let slices = vec![PieSlice::new("X", 1.0), PieSlice::new("Y", 3.0)];
        let layout = calculator.calculate_pie(&slices, NO_HOST).unwrap();

        assert_close(layout.slices[0].sweep, PI / 2.0);
        assert_close(layout.slices[1].sweep, 3.0 * PI / 2.0);
        assert_close(layout.slices[0].start_angle, -PI / 2.0);
        assert_close(layout.slices[1].start_angle, layout.slices[0].end_angle());
        assert!(!layout.slices[0].large_arc);
        assert!(layout.slices[1].large_arc);
        assert_eq!(layout.slices[0].label.text, "25.0%");
        assert_eq!(layout.slices[1].label.text, "75.0%");
        assert_eq!(layout.radius, 140.0);
    }

    #[test]
    fn test_pie_zero_total_does_not_produce_nan() {
        let calculator = ChartLayoutCalculator::new();
        let layout = calculator
            .calculate_pie(&[PieSlice::new("a", 0.0), PieSlice::new("b", 0.0)], NO_HOST)
            .unwrap();
        assert_eq!(layout.total, 1.0);
        assert!(layout.slices.iter().all(|s| s.sweep == 0.0 && !s.path.contains("NaN")));
    }

    #[test]
    fn test_box_plot_rows() {
        let calculator = ChartLayoutCalculator::new();
        let rows = vec![
            BoxRow::new("top", 0.0, 10.0, 20.0, 30.0, 40.0),
            BoxRow::new("mid", 20.0, 30.0, 40.0, 50.0, 60.0),
        ];
        let layout = calculator.calculate_box_plot(&rows, NO_HOST, Some("Gold")).unwrap();

        assert_eq!(layout.scale.domain(), Domain::new(0.0, 60.0));
        assert_eq!(layout.row_height, 120.0);
        let first = &layout.rows[0];
        assert_eq!(first.whisker.start, LayoutPoint::new(40.0, 100.0));
        assert_close(first.whisker.end.x, 40.0 + 440.0 * 40.0 / 60.0);
        assert_close(first.box_bounds.height, 48.0);
        assert_close(first.box_bounds.y, 76.0);
        assert_eq!(first.median.start.x, first.median.end.x);
        assert_eq!(layout.rows[1].band.y, 160.0);
        assert_eq!(layout.axes.x_caption.as_ref().unwrap().text, "Gold");
        assert_eq!(layout.axes.y_ticks.last().unwrap().value, 2.0);
    }

    #[test]
    fn test_heatmap_grid_sizing() {
        let calculator = ChartLayoutCalculator::new();
        let grid = HeatmapGrid::new(
            vec!["LCK".into(), "LPL".into()],
            vec!["Ahri".into(), "Orianna".into(), "Azir".into()],
            vec![vec![0.0, 5.0, 10.0], vec![2.5, 0.0, 0.0]],
        );
        let layout = calculator.calculate_heatmap(&grid, NO_HOST).unwrap();

        assert_eq!(layout.size, ChartSize::new(720.0, 360.0));
        assert_close(layout.cell_width, (720.0 - 154.0) / 3.0);
        assert_close(layout.cell_height, (360.0 - 72.0) / 2.0);
        assert_eq!(layout.cells.len(), 6);
        assert_eq!(layout.cells[0].intensity, 0.0);
        assert_close(layout.cells[0].alpha, 0.15);
        assert_eq!(layout.cells[2].intensity, 1.0);
        assert_close(layout.cells[2].alpha, 0.85);
        assert_eq!(layout.cells[3].intensity, 0.25);
    }

    #[test]
    fn test_heatmap_height_grows_with_rows() {
        let calculator = ChartLayoutCalculator::new();
        let rows = 20;
        let grid = HeatmapGrid::new(
            (0..rows).map(|r| format!("L{r}")).collect(),
            vec!["c".into()],
            vec![vec![1.0]; rows],
        );
        let layout = calculator.calculate_heatmap(&grid, ChartSize::new(1000.0, 100.0)).unwrap();
        assert_eq!(layout.size, ChartSize::new(1000.0, 20.0 * 26.0 + 120.0));
    }

    #[test]
    fn test_heatmap_all_zero_values() {
        let calculator = ChartLayoutCalculator::new();
        let grid = HeatmapGrid::new(vec!["a".into()], vec!["b".into()], vec![vec![0.0]]);
        let layout = calculator.calculate_heatmap(&grid, NO_HOST).unwrap();
        assert_eq!(layout.max_value, 0.0);
        assert_eq!(layout.cells[0].intensity, 0.0);
    }

    #[test]
    fn test_sankey_thickness_proportional() {
        let calculator = ChartLayoutCalculator::new();
        let data = SankeyData::new(
            vec!["top".into()],
            vec!["A".into(), "B".into()],
            vec![SankeyLink::new(0, 0, 5.0), SankeyLink::new(0, 1, 10.0)],
        );
        let layout = calculator.calculate_sankey(&data, NO_HOST).unwrap();

        let (first, second) = (layout.links[0].thickness, layout.links[1].thickness);
        assert!(second > first);
        assert_close((first - 1.0) / (second - 1.0), 0.5);
        assert_eq!(second, 13.0);
        assert_eq!(layout.left_nodes[0].text, "TOP");
        assert_eq!(layout.left_nodes[0].position.y, 60.0);
        assert_eq!(layout.right_nodes[1].position.y, 320.0);
        assert_eq!(layout.links[1].curve.end, LayoutPoint::new(520.0, 320.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside")]
    fn test_sankey_out_of_range_link_fails_fast() {
        let calculator = ChartLayoutCalculator::new();
        let data = SankeyData::new(vec!["a".into()], vec!["b".into()], vec![SankeyLink::new(0, 3, 1.0)]);
        calculator.calculate_sankey(&data, NO_HOST);
    }

    #[test]
    fn test_axes_ticks_and_captions() {
        let calculator = ChartLayoutCalculator::new();
        let axes = calculator.calculate_axes(
            ChartSize::new(620.0, 340.0),
            Domain::new(0.0, 3.0),
            Domain::new(10.0, 40.0),
            Some("Gold"),
            Some("Damage"),
        );

        assert_eq!(axes.lines.len(), 2);
        assert_eq!(axes.x_ticks.len(), 4);
        let x_labels: Vec<&str> = axes.x_ticks.iter().map(|t| t.label.text.as_str()).collect();
        assert_eq!(x_labels, vec!["0.0", "1.0", "2.0", "3.0"]);
        assert_eq!(axes.y_ticks[3].label.text, "40.0");
        let y_values: Vec<f64> = axes.y_ticks.iter().map(|t| t.value).collect();
        assert_eq!(y_values, LinearScale::new(10.0, 40.0, 300.0, 40.0).ticks(3));
        assert_eq!(axes.y_ticks[3].mark.start.y, 40.0);
        assert_eq!(axes.x_caption.unwrap().position, LayoutPoint::new(580.0, 334.0));
        assert_eq!(axes.y_caption.unwrap().position, LayoutPoint::new(40.0, 12.0));
    }

    #[test]
    fn test_column_positions() {
        assert_eq!(column_positions(1, 60.0, 360.0), vec![60.0]);
        assert_eq!(column_positions(3, 40.0, 360.0), vec![40.0, 180.0, 320.0]);
    }

    proptest! {
        #[test]
        fn prop_bar_width_monotonic_in_value(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)) {
            let calculator = ChartLayoutCalculator::new();
            let bars: Vec<BarDatum> = values.iter().map(|&v| BarDatum::new("b", v)).collect();
            let layout = calculator.calculate_bar(&bars, NO_HOST, None).unwrap();
            for a in &layout.bars {
                prop_assert!(a.bounds.width >= 0.0);
                prop_assert!(a.bounds.right() <= layout.size.width);
                for b in &layout.bars {
                    if a.value > b.value {
                        prop_assert!(a.bounds.width >= b.bounds.width);
                    }
                }
            }
        }

        #[test]
        fn prop_all_negative_bars_have_zero_width(values in prop::collection::vec(-1.0e6f64..-1.0e-3, 1..40)) {
            let calculator = ChartLayoutCalculator::new();
            let bars: Vec<BarDatum> = values.iter().map(|&v| BarDatum::new("b", v)).collect();
            let layout = calculator.calculate_bar(&bars, NO_HOST, None).unwrap();
            prop_assert!(layout.bars.iter().all(|b| b.bounds.width == 0.0));
        }

        #[test]
        fn prop_pie_angles_sum_to_full_turn(values in prop::collection::vec(0.001f64..1.0e6, 1..30)) {
            let calculator = ChartLayoutCalculator::new();
            let slices: Vec<PieSlice> = values.iter().map(|&v| PieSlice::new("s", v)).collect();
            let layout = calculator.calculate_pie(&slices, NO_HOST).unwrap();
            let sum: f64 = layout.slices.iter().map(|s| s.sweep).sum();
            prop_assert!((sum - TAU).abs() < 1e-9);
            for (idx, slice) in layout.slices.iter().enumerate() {
                prop_assert_eq!(slice.index, idx);
            }
        }

        #[test]
        fn prop_heatmap_intensity_bounds(values in prop::collection::vec(0.0f64..1.0e4, 1..50)) {
            let calculator = ChartLayoutCalculator::new();
            let grid = HeatmapGrid::new(vec!["r".into()], vec!["c".into(); values.len()], vec![values.clone()]);
            let layout = calculator.calculate_heatmap(&grid, NO_HOST).unwrap();
            let max = layout.max_value;
            for cell in &layout.cells {
                if cell.value == 0.0 {
                    prop_assert_eq!(cell.intensity, 0.0);
                }
                if max > 0.0 && cell.value == max {
                    prop_assert_eq!(cell.intensity, 1.0);
                    prop_assert!((cell.alpha - 0.85).abs() < 1e-12);
                }
            }
        }
    }
}
