//! Chart rendering
//!
//! This module turns computed layouts into scenes: themed primitives plus
//! the hover and click targets that sit on top of them.

use crate::config::{ChartSize, ChartTheme, LayoutSettings};
use crate::format::{format_number, format_with};
use crate::layout::*;
use crate::model::*;
use crate::options::*;
use crate::scene::*;

/// Extra pointer reach around thin sankey links
const LINK_HIT_SLOP: f64 = 3.0;
/// Pointer reach around radar vertices
const VERTEX_HIT_RADIUS: f64 = 6.0;

/// Chart renderer
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    pub theme: ChartTheme,
    pub settings: LayoutSettings,
}

impl ChartRenderer {
    /// Create a new renderer
    pub fn new(theme: ChartTheme, settings: LayoutSettings) -> Self {
        Self { theme, settings }
    }

    /// Empty scene carrying the theme's page settings
    fn scene(&self, size: ChartSize) -> Scene {
        let mut scene = Scene::new(size);
        scene.background = self.theme.background;
        scene.font_family = self.theme.font_family.clone();
        scene.tooltip_offset = self.settings.tooltip_offset;
        scene
    }

    pub fn render_scatter(
        &self,
        layout: &ScatterLayout,
        points: &[ScatterPoint],
        interaction: &Interactivity<ScatterPoint>,
    ) -> Scene {
        let mut scene = self.scene(layout.size);
        self.render_axes(&mut scene, &layout.axes);

        for (marker, point) in layout.markers.iter().zip(points) {
            let label = interaction.hover_text(point, || point.label.clone());
            scene.push_interactive(
                Primitive::Circle {
                    cx: marker.center.x,
                    cy: marker.center.y,
                    r: marker.radius,
                    fill: point.color.unwrap_or(self.theme.scatter_color),
                    opacity: self.theme.scatter_opacity,
                },
                HitRegion::Circle {
                    center: marker.center,
                    radius: marker.radius,
                },
                label,
                interaction.bind_select(point, marker.index),
            );
        }

        scene
    }

    pub fn render_bar(&self, layout: &BarChartLayout, bars: &[BarDatum], options: &BarOptions) -> Scene {
        let mut scene = self.scene(layout.size);
        if let Some(caption) = &layout.x_caption {
            self.push_text(&mut scene, caption, self.theme.muted_text_color, self.theme.label_font_size);
        }

        for (bar, datum) in layout.bars.iter().zip(bars) {
            let label = options.interaction.hover_text(datum, || {
                format!("{}: {}", datum.label, format_with(options.format.as_ref(), datum.value, 0))
            });
            scene.push_interactive(
                Primitive::Rect {
                    x: bar.bounds.x,
                    y: bar.bounds.y,
                    width: bar.bounds.width,
                    height: bar.bounds.height,
                    corner_radius: self.settings.bar_corner_radius,
                    fill: datum.color.unwrap_or_else(|| palette_color(&self.theme.palette, bar.index)),
                    stroke: None,
                },
                HitRegion::Rect(bar.band),
                label,
                options.interaction.bind_select(datum, bar.index),
            );

            scene.push(
                SceneNode::new(self.text_primitive(&bar.label, self.theme.text_color, self.theme.label_font_size))
                    .with_title(datum.label.clone()),
            );
            scene.push(SceneNode::new(Primitive::Text {
                x: bar.value_position.x,
                y: bar.value_position.y,
                text: format_with(options.format.as_ref(), datum.value, 0),
                font_size: self.theme.label_font_size,
                fill: self.theme.muted_text_color,
                anchor: TextAnchor::Start,
            }));
        }

        scene
    }

    pub fn render_line(&self, layout: &LineChartLayout, points: &[LinePoint], options: &LineOptions) -> Scene {
        let mut scene = self.scene(layout.size);
        let color = options.color.unwrap_or(self.theme.line_color);
        self.render_axes(&mut scene, &layout.axes);

        if let Some(path) = &layout.path {
            scene.push(SceneNode::new(Primitive::Polyline {
                points: path.iter().map(|p| (p.x, p.y)).collect(),
                stroke: color,
                stroke_width: self.theme.line_width,
            }));
        }

        for (marker, point) in layout.markers.iter().zip(points) {
            let label = options
                .interaction
                .hover_text(point, || format!("{}: {}", point.x, format_number(Some(point.y), 2)));
            scene.push_interactive(
                Primitive::Circle {
                    cx: marker.center.x,
                    cy: marker.center.y,
                    r: marker.radius,
                    fill: color,
                    opacity: 1.0,
                },
                HitRegion::Circle {
                    center: marker.center,
                    radius: marker.radius,
                },
                label,
                options.interaction.bind_select(point, marker.index),
            );
        }

        if let Some(single) = &layout.single_label {
            self.push_text(&mut scene, single, self.theme.text_color, self.theme.label_font_size);
        }

        scene
    }

    pub fn render_radar(&self, layout: &RadarLayout, metrics: &[RadarMetric], options: &RadarOptions) -> Scene {
        let mut scene = self.scene(layout.size);
        let color = options.color.unwrap_or(self.theme.radar_color);

        for label in &layout.axis_labels {
            self.push_text(&mut scene, label, self.theme.muted_text_color, self.theme.tick_font_size);
        }

        scene.push(SceneNode::new(Primitive::Polygon {
            points: layout.vertices.iter().map(|p| (p.x, p.y)).collect(),
            fill: color.with_alpha(self.theme.radar_fill_alpha),
            stroke: Some(color),
            stroke_width: Some(self.theme.radar_stroke_width),
        }));

        for (idx, (text, metric)) in layout.value_labels.iter().zip(metrics).enumerate() {
            let label = options.interaction.hover_text(metric, || format!("{}: {}", metric.label, text.text));
            scene.push_interactive(
                self.text_primitive(text, self.theme.value_text_color, self.theme.value_font_size),
                HitRegion::Circle {
                    center: layout.vertices[idx],
                    radius: VERTEX_HIT_RADIUS,
                },
                label,
                options.interaction.bind_select(metric, idx),
            );
        }

        scene
    }

    /// Pie scene plus one legend entry per slice
    pub fn render_pie(
        &self,
        layout: &PieLayout,
        slices: &[PieSlice],
        interaction: &Interactivity<PieSlice>,
    ) -> (Scene, Vec<LegendEntry>) {
        let mut scene = self.scene(layout.size);
        let mut legend = Vec::with_capacity(slices.len());

        for (slice_layout, slice) in layout.slices.iter().zip(slices) {
            let fill = slice
                .color
                .unwrap_or_else(|| palette_color(&self.theme.palette, slice_layout.index));
            let label = interaction.hover_text(slice, || format!("{}: {}", slice.label, slice.value));
            scene.push_interactive(
                Primitive::Path {
                    d: slice_layout.path.clone(),
                    fill: Some(fill),
                    stroke: None,
                    stroke_width: None,
                },
                HitRegion::Sector {
                    center: layout.center,
                    radius: layout.radius,
                    start_angle: slice_layout.start_angle,
                    sweep: slice_layout.sweep,
                },
                label,
                interaction.bind_select(slice, slice_layout.index),
            );
            self.push_text(&mut scene, &slice_layout.label, self.theme.text_color, self.theme.tick_font_size);

            legend.push(LegendEntry {
                swatch: fill,
                label: format!("{} ({})", slice.label, slice.value),
            });
        }

        (scene, legend)
    }

    pub fn render_box_plot(
        &self,
        layout: &BoxPlotLayout,
        rows: &[BoxRow],
        interaction: &Interactivity<BoxRow>,
    ) -> Scene {
        let mut scene = self.scene(layout.size);
        let theme = &self.theme;

        for (row_layout, row) in layout.rows.iter().zip(rows) {
            let label = interaction.hover_text(row, || {
                let [p10, q1, median, q3, p90] = row.values().map(|v| format_number(Some(v), 1));
                format!("{}: {p10} / {q1} / {median} / {q3} / {p90}", row.label)
            });
            let bounds = row_layout.box_bounds;
            scene.push_interactive(
                Primitive::Rect {
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: bounds.height,
                    corner_radius: 0.0,
                    fill: theme.box_color.with_alpha(theme.box_fill_alpha),
                    stroke: Some(theme.box_color),
                },
                HitRegion::Rect(row_layout.band),
                label,
                interaction.bind_select(row, row_layout.index),
            );
            self.push_segment(&mut scene, &row_layout.median, theme.median_color, theme.median_width);
            self.push_segment(&mut scene, &row_layout.whisker, theme.whisker_color, 1.0);
            self.push_text(&mut scene, &row_layout.label, theme.text_color, theme.label_font_size);
        }

        self.render_axes(&mut scene, &layout.axes);
        scene
    }

    pub fn render_heatmap(&self, layout: &HeatmapLayout, grid: &HeatmapGrid, options: &HeatmapOptions) -> Scene {
        let mut scene = self.scene(layout.size);
        let color = options.color.unwrap_or(self.theme.heatmap_color);

        for label in &layout.row_labels {
            self.push_text(&mut scene, label, self.theme.text_color, self.theme.label_font_size);
        }
        for (label, full) in layout.col_labels.iter().zip(&grid.col_labels) {
            scene.push(
                SceneNode::new(self.text_primitive(label, self.theme.muted_text_color, self.theme.tick_font_size))
                    .with_title(full.clone()),
            );
        }

        for cell in &layout.cells {
            let record = HeatmapCell {
                row: cell.row,
                col: cell.col,
                row_label: grid.row_labels.get(cell.row).cloned().unwrap_or_default(),
                col_label: grid.col_labels.get(cell.col).cloned().unwrap_or_default(),
                value: cell.value,
            };
            let label = options.interaction.hover_text(&record, || {
                format!("{} / {}: {}", record.row_label, record.col_label, record.value)
            });
            let select = options
                .interaction
                .bind_select(&record, cell.row * layout_columns(grid) + cell.col);
            scene.push_interactive(
                Primitive::Rect {
                    x: cell.bounds.x,
                    y: cell.bounds.y,
                    width: cell.bounds.width,
                    height: cell.bounds.height,
                    corner_radius: 0.0,
                    fill: color.with_alpha(cell.alpha),
                    stroke: None,
                },
                HitRegion::Rect(cell.bounds),
                label,
                select,
            );
        }

        scene
    }

    pub fn render_sankey(&self, layout: &SankeyLayout, data: &SankeyData, options: &SankeyOptions) -> Scene {
        let mut scene = self.scene(layout.size);
        let stroke = options
            .color
            .unwrap_or(self.theme.sankey_color)
            .with_alpha(self.theme.sankey_alpha);

        for link_layout in &layout.links {
            let link = &data.links[link_layout.index];
            let label = options.interaction.hover_text(link, || {
                format!(
                    "{} -> {}: {}",
                    data.left_labels[link.source_index], data.right_labels[link.target_index], link.value
                )
            });
            scene.push_interactive(
                Primitive::Path {
                    d: link_layout.curve.to_path(),
                    fill: None,
                    stroke: Some(stroke),
                    stroke_width: Some(link_layout.thickness),
                },
                HitRegion::Stroke {
                    curve: link_layout.curve,
                    tolerance: link_layout.thickness / 2.0 + LINK_HIT_SLOP,
                },
                label,
                options.interaction.bind_select(link, link_layout.index),
            );
        }

        for node in &layout.left_nodes {
            self.push_text(&mut scene, node, self.theme.text_color, self.theme.label_font_size);
        }
        for node in &layout.right_nodes {
            self.push_text(&mut scene, node, self.theme.muted_text_color, self.theme.label_font_size);
        }

        scene
    }

    fn render_axes(&self, scene: &mut Scene, axes: &AxesLayout) {
        let theme = &self.theme;
        for line in &axes.lines {
            self.push_segment(scene, line, theme.axis_color, theme.axis_width);
        }

        for tick in axes.x_ticks.iter().chain(&axes.y_ticks) {
            self.push_segment(scene, &tick.mark, theme.axis_color, theme.axis_width);
            self.push_text(scene, &tick.label, theme.muted_text_color, theme.tick_font_size);
        }

        for caption in axes.x_caption.iter().chain(&axes.y_caption) {
            self.push_text(scene, caption, theme.muted_text_color, theme.label_font_size);
        }
    }

    fn text_primitive(&self, text: &TextLayout, fill: Color, font_size: f64) -> Primitive {
        Primitive::Text {
            x: text.position.x,
            y: text.position.y,
            text: text.text.clone(),
            font_size,
            fill,
            anchor: text.anchor,
        }
    }

    fn push_text(&self, scene: &mut Scene, text: &TextLayout, fill: Color, font_size: f64) {
        scene.push(SceneNode::new(self.text_primitive(text, fill, font_size)));
    }

    fn push_segment(&self, scene: &mut Scene, segment: &SegmentLayout, stroke: Color, width: f64) {
        scene.push(SceneNode::new(Primitive::Line {
            x1: segment.start.x,
            y1: segment.start.y,
            x2: segment.end.x,
            y2: segment.end.y,
            stroke,
            stroke_width: width,
        }));
    }
}

/// Cells per row when flattening a cell position into a select index
fn layout_columns(grid: &HeatmapGrid) -> usize {
    grid.col_count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const NO_HOST: ChartSize = ChartSize::new(0.0, 0.0);

    fn renderer() -> ChartRenderer {
        ChartRenderer::default()
    }

    fn count_texts(scene: &Scene) -> usize {
        scene.texts().len()
    }

    #[test]
    fn test_render_scatter_defaults() {
        let points = vec![
            ScatterPoint::new(1.0, 2.0).with_label("Ahri"),
            ScatterPoint::new(3.0, 4.0).with_color(Color::rgb(1, 2, 3)),
        ];
        let layout = ChartLayoutCalculator::new()
            .calculate_scatter(&points, NO_HOST, Some("Win"), None)
            .unwrap();
        let scene = renderer().render_scatter(&layout, &points, &Interactivity::default());

        assert_eq!(scene.interactions.len(), 2);
        assert_eq!(scene.interactions[0].label, "Ahri");
        assert!(scene.interactions.iter().all(|i| i.select.is_none()));
        match &scene.nodes[scene.interactions[1].node].primitive {
            Primitive::Circle { fill, opacity, .. } => {
                assert_eq!(*fill, Color::rgb(1, 2, 3));
                assert_eq!(*opacity, 0.8);
            }
            other => panic!("expected circle, got {other:?}"),
        }
        // two axis lines, 8 tick marks, 8 tick labels, 1 caption, 2 markers
        assert_eq!(scene.nodes.len(), 2 + 8 + 8 + 1 + 2);
    }

    #[test]
    fn test_render_bar_uses_palette_and_formatter() {
        let bars = vec![
            BarDatum::new("Ahri", 12.0),
            BarDatum::new("Zed", 7.5).with_color(Color::rgb(9, 9, 9)),
        ];
        let options = BarOptions::new().format(|v| format!("{v:.1}%"));
        let layout = ChartLayoutCalculator::new().calculate_bar(&bars, NO_HOST, None).unwrap();
        let scene = renderer().render_bar(&layout, &bars, &options);

        let fills: Vec<Color> = scene
            .nodes
            .iter()
            .filter_map(|n| match n.primitive {
                Primitive::Rect { fill, .. } => Some(fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![DASHBOARD_PALETTE[0], Color::rgb(9, 9, 9)]);
        assert_eq!(scene.texts(), vec!["Ahri", "12.0%", "Zed", "7.5%"]);
        assert_eq!(scene.interactions[1].label, "Zed: 7.5%");
    }

    #[test]
    fn test_render_bar_default_value_text() {
        let bars = vec![BarDatum::new("Ahri", 12.4)];
        let layout = ChartLayoutCalculator::new().calculate_bar(&bars, NO_HOST, None).unwrap();
        let scene = renderer().render_bar(&layout, &bars, &BarOptions::new());
        assert_eq!(scene.texts(), vec!["Ahri", "12"]);
    }

    #[test]
    fn test_render_line_hover_and_color() {
        let points = vec![LinePoint::new(2023.0, 51.234), LinePoint::new(2024.0, 53.0)];
        let options = LineOptions::new().color(Color::rgb(1, 1, 1));
        let layout = ChartLayoutCalculator::new()
            .calculate_line(&points, NO_HOST, None, None)
            .unwrap();
        let scene = renderer().render_line(&layout, &points, &options);

        assert_eq!(scene.interactions[0].label, "2023: 51.23");
        let polyline = scene
            .nodes
            .iter()
            .find(|n| matches!(n.primitive, Primitive::Polyline { .. }))
            .unwrap();
        match &polyline.primitive {
            Primitive::Polyline { stroke, points, .. } => {
                assert_eq!(*stroke, Color::rgb(1, 1, 1));
                assert_eq!(points.len(), 2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_render_radar_polygon() {
        let metrics = vec![
            RadarMetric::new("KDA", 3.0),
            RadarMetric::new("CS", 6.0),
            RadarMetric::new("Vision", 1.5),
        ];
        let layout = ChartLayoutCalculator::new().calculate_radar(&metrics).unwrap();
        let scene = renderer().render_radar(&layout, &metrics, &RadarOptions::new());

        let polygons: Vec<&Primitive> = scene
            .nodes
            .iter()
            .map(|n| &n.primitive)
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
            .collect();
        assert_eq!(polygons.len(), 1);
        if let Primitive::Polygon { points, fill, .. } = polygons[0] {
            assert_eq!(points.len(), 3);
            assert!(fill.a < 255);
        }
        assert_eq!(count_texts(&scene), 6);
        assert_eq!(scene.interactions[1].label, "CS: 6.00");
    }

    #[test]
    fn test_render_pie_legend_entries() {
        let slices = vec![
            PieSlice::new("Blue", 12.0),
            PieSlice::new("Red", 4.5).with_color(Color::rgb(200, 0, 0)),
        ];
        let layout = ChartLayoutCalculator::new().calculate_pie(&slices, NO_HOST).unwrap();
        let (scene, legend) = renderer().render_pie(&layout, &slices, &Interactivity::default());

        assert_eq!(scene.interactions.len(), 2);
        assert_eq!(scene.interactions[1].label, "Red: 4.5");
        assert_eq!(legend[0].label, "Blue (12)");
        assert_eq!(legend[0].swatch, DASHBOARD_PALETTE[0]);
        assert_eq!(legend[1].swatch, Color::rgb(200, 0, 0));
    }

    #[test]
    fn test_render_box_plot_draws_axes_last() {
        let rows = vec![BoxRow::new("TOP", 1.0, 2.0, 3.0, 4.0, 5.0)];
        let layout = ChartLayoutCalculator::new()
            .calculate_box_plot(&rows, NO_HOST, None)
            .unwrap();
        let scene = renderer().render_box_plot(&layout, &rows, &Interactivity::default());

        assert!(matches!(scene.nodes[0].primitive, Primitive::Rect { .. }));
        assert_eq!(scene.interactions[0].label, "TOP: 1.0 / 2.0 / 3.0 / 4.0 / 5.0");
        assert_eq!(scene.texts()[0], "TOP");
    }

    #[test]
    fn test_render_heatmap_select_index() {
        let selected = Arc::new(AtomicUsize::new(usize::MAX));
        let sink = selected.clone();
        let grid = HeatmapGrid::new(
            vec!["LCK".into(), "LPL".into()],
            vec!["Ahri".into(), "Azir".into()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        );
        let options = HeatmapOptions::new().on_select(move |cell, idx| {
            assert_eq!(cell.row_label, "LPL");
            sink.store(idx, Ordering::SeqCst);
        });
        let layout = ChartLayoutCalculator::new().calculate_heatmap(&grid, NO_HOST).unwrap();
        let scene = renderer().render_heatmap(&layout, &grid, &options);

        assert_eq!(scene.interactions[2].label, "LPL / Ahri: 3");
        (scene.interactions[3].select.as_ref().unwrap())();
        assert_eq!(selected.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_render_sankey_hover_text() {
        let data = SankeyData::new(
            vec!["top".into(), "jungle".into()],
            vec!["Ahri".into()],
            vec![SankeyLink::new(1, 0, 4.0)],
        );
        let layout = ChartLayoutCalculator::new().calculate_sankey(&data, NO_HOST).unwrap();
        let scene = renderer().render_sankey(&layout, &data, &SankeyOptions::new());

        assert_eq!(scene.interactions[0].label, "jungle -> Ahri: 4");
        assert_eq!(scene.texts(), vec!["TOP", "JUNGLE", "Ahri"]);
    }
}
