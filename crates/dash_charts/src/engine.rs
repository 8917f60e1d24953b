//! Chart engine
//!
//! One entry point per chart kind. Each call reads the host size once,
//! computes the layout, builds the complete scene and only then swaps it
//! into the container. Empty input shows the placeholder text instead.

use crate::config::EngineConfig;
use crate::layout::ChartLayoutCalculator;
use crate::model::*;
use crate::options::*;
use crate::render::ChartRenderer;
use crate::scene::{Container, ContainerContent, LegendEntry, Scene};

/// Renders charts into containers
#[derive(Debug, Clone, Default)]
pub struct ChartEngine {
    calculator: ChartLayoutCalculator,
    renderer: ChartRenderer,
}

impl ChartEngine {
    /// Create an engine with the default layout and theme
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            calculator: ChartLayoutCalculator::with_settings(config.layout.clone()),
            renderer: ChartRenderer::new(config.theme, config.layout),
        }
    }

    /// The geometry builders, usable without a container
    pub fn calculator(&self) -> &ChartLayoutCalculator {
        &self.calculator
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn render_scatter(&self, container: &mut Container, points: &[ScatterPoint], options: ScatterOptions) {
        let scene = self
            .calculator
            .calculate_scatter(
                points,
                container.host_size(),
                options.x_label.as_deref(),
                options.y_label.as_deref(),
            )
            .map(|layout| self.renderer.render_scatter(&layout, points, &options.interaction));
        self.mount(container, "scatter", points.len(), scene);
    }

    pub fn render_bar(&self, container: &mut Container, bars: &[BarDatum], options: BarOptions) {
        let scene = self
            .calculator
            .calculate_bar(bars, container.host_size(), options.x_label.as_deref())
            .map(|layout| self.renderer.render_bar(&layout, bars, &options));
        self.mount(container, "bar", bars.len(), scene);
    }

    pub fn render_line(&self, container: &mut Container, points: &[LinePoint], options: LineOptions) {
        let scene = self
            .calculator
            .calculate_line(
                points,
                container.host_size(),
                options.x_label.as_deref(),
                options.y_label.as_deref(),
            )
            .map(|layout| self.renderer.render_line(&layout, points, &options));
        self.mount(container, "line", points.len(), scene);
    }

    pub fn render_radar(&self, container: &mut Container, metrics: &[RadarMetric], options: RadarOptions) {
        let scene = self
            .calculator
            .calculate_radar(metrics)
            .map(|layout| self.renderer.render_radar(&layout, metrics, &options));
        self.mount(container, "radar", metrics.len(), scene);
    }

    /// Render a pie and, when a legend container is supplied, replace its entries
    pub fn render_pie(&self, container: &mut Container, slices: &[PieSlice], options: PieOptions<'_>) {
        let PieOptions {
            legend_container,
            interaction,
        } = options;

        let (scene, entries) = match self.calculator.calculate_pie(slices, container.host_size()) {
            Some(layout) => {
                let (scene, entries) = self.renderer.render_pie(&layout, slices, &interaction);
                (Some(scene), entries)
            }
            None => (None, Vec::<LegendEntry>::new()),
        };

        self.mount(container, "pie", slices.len(), scene);
        if let Some(legend) = legend_container {
            legend.replace(entries);
        }
    }

    pub fn render_box_plot(&self, container: &mut Container, rows: &[BoxRow], options: BoxPlotOptions) {
        let scene = self
            .calculator
            .calculate_box_plot(rows, container.host_size(), options.x_label.as_deref())
            .map(|layout| self.renderer.render_box_plot(&layout, rows, &options.interaction));
        self.mount(container, "box_plot", rows.len(), scene);
    }

    /// Render a heat-map; the chart height follows the row count
    pub fn render_heatmap(&self, container: &mut Container, grid: &HeatmapGrid, options: HeatmapOptions) {
        let scene = self
            .calculator
            .calculate_heatmap(grid, container.host_size())
            .map(|layout| self.renderer.render_heatmap(&layout, grid, &options));
        self.mount(container, "heatmap", grid.values.len(), scene);
    }

    pub fn render_sankey(&self, container: &mut Container, data: &SankeyData, options: SankeyOptions) {
        let scene = self
            .calculator
            .calculate_sankey(data, container.host_size())
            .map(|layout| self.renderer.render_sankey(&layout, data, &options));
        self.mount(container, "sankey", data.links.len(), scene);
    }

    /// Swap the finished scene (or the placeholder) into the container
    fn mount(&self, container: &mut Container, kind: &str, records: usize, scene: Option<Scene>) {
        match scene {
            Some(scene) => {
                tracing::debug!(
                    "Rendered {} chart: {} records, {}x{}, {} nodes, {} targets",
                    kind,
                    records,
                    scene.width,
                    scene.height,
                    scene.nodes.len(),
                    scene.interactions.len()
                );
                container.replace(ContainerContent::Chart(scene));
            }
            None => {
                tracing::debug!("No data for {} chart, showing placeholder", kind);
                container.replace(ContainerContent::Placeholder(self.renderer.theme.placeholder_text.clone()));
            }
        }
    }
}

/// Render a scatter plot with the default engine
pub fn render_scatter(container: &mut Container, points: &[ScatterPoint], options: ScatterOptions) {
    ChartEngine::new().render_scatter(container, points, options)
}

/// Render a horizontal bar chart with the default engine
pub fn render_bar(container: &mut Container, bars: &[BarDatum], options: BarOptions) {
    ChartEngine::new().render_bar(container, bars, options)
}

/// Render a line chart with the default engine
pub fn render_line(container: &mut Container, points: &[LinePoint], options: LineOptions) {
    ChartEngine::new().render_line(container, points, options)
}

/// Render a radar chart with the default engine
pub fn render_radar(container: &mut Container, metrics: &[RadarMetric], options: RadarOptions) {
    ChartEngine::new().render_radar(container, metrics, options)
}

/// Render a pie chart with the default engine
pub fn render_pie(container: &mut Container, slices: &[PieSlice], options: PieOptions<'_>) {
    ChartEngine::new().render_pie(container, slices, options)
}

/// Render a box plot with the default engine
pub fn render_box_plot(container: &mut Container, rows: &[BoxRow], options: BoxPlotOptions) {
    ChartEngine::new().render_box_plot(container, rows, options)
}

/// Render a heat-map with the default engine
pub fn render_heatmap(container: &mut Container, grid: &HeatmapGrid, options: HeatmapOptions) {
    ChartEngine::new().render_heatmap(container, grid, options)
}

/// Render a sankey diagram with the default engine
pub fn render_sankey(container: &mut Container, data: &SankeyData, options: SankeyOptions) {
    ChartEngine::new().render_sankey(container, data, options)
}
