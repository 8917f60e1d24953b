//! Scene graph and mount points
//!
//! A [`Scene`] is the complete output of one render: drawable primitives
//! plus the interactive regions laid over them. A [`Container`] owns at most
//! one scene at a time and routes pointer events to it.

use crate::config::ChartSize;
use crate::error::ChartResult;
use crate::geometry::*;
use crate::model::Color;
use crate::options::BoundSelect;
use crate::svg::SvgWriter;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Value of the SVG `text-anchor` attribute
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A drawable element of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        fill: Color,
        stroke: Option<Color>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
        stroke_width: f64,
    },
    /// Open polyline, never filled
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Color,
        stroke_width: f64,
    },
    /// Closed shape
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Color,
        stroke: Option<Color>,
        stroke_width: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
        opacity: f64,
    },
    /// SVG path data
    Path {
        d: String,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: Option<f64>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: Color,
        anchor: TextAnchor,
    },
}

/// A primitive with an optional hover title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub primitive: Primitive,
    pub title: Option<String>,
}

impl SceneNode {
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive, title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Area that reacts to the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum HitRegion {
    Circle { center: LayoutPoint, radius: f64 },
    Rect(LayoutRect),
    /// Pie slice sweeping clockwise from `start_angle`
    Sector {
        center: LayoutPoint,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Band of `tolerance` pixels on either side of a curve
    Stroke { curve: CubicCurve, tolerance: f64 },
}

impl HitRegion {
    pub fn contains(&self, point: LayoutPoint) -> bool {
        match self {
            HitRegion::Circle { center, radius } => point.distance_to(*center) <= *radius,
            HitRegion::Rect(rect) => rect.contains(point),
            HitRegion::Sector {
                center,
                radius,
                start_angle,
                sweep,
            } => {
                if point.distance_to(*center) > *radius || *sweep <= 0.0 {
                    return false;
                }
                if *sweep >= TAU {
                    return true;
                }
                let angle = (point.y - center.y).atan2(point.x - center.x);
                normalize_angle(angle - start_angle) <= *sweep
            }
            HitRegion::Stroke { curve, tolerance } => curve.distance_to(point) <= *tolerance,
        }
    }
}

/// An interactive target registered by a render
#[derive(Clone)]
pub struct Interaction {
    /// Index of the scene node this target belongs to
    pub node: usize,
    pub region: HitRegion,
    /// Tooltip text
    pub label: String,
    pub select: Option<BoundSelect>,
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("node", &self.node)
            .field("region", &self.region)
            .field("label", &self.label)
            .field("selectable", &self.select.is_some())
            .finish()
    }
}

/// The floating tooltip of a container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub visible: bool,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Output of one chart render
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Option<Color>,
    pub font_family: String,
    /// Tooltip distance from the pointer
    pub tooltip_offset: f64,
    pub nodes: Vec<SceneNode>,
    pub interactions: Vec<Interaction>,
}

impl Scene {
    pub fn new(size: ChartSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            font_family: "sans-serif".to_string(),
            ..Default::default()
        }
    }

    /// Append a node and return its index
    pub fn push(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Append a node that reacts to hover and click
    pub fn push_interactive(
        &mut self,
        primitive: Primitive,
        region: HitRegion,
        label: String,
        select: Option<BoundSelect>,
    ) -> usize {
        let node = self.push(SceneNode::new(primitive).with_title(label.clone()));
        self.interactions.push(Interaction {
            node,
            region,
            label,
            select,
        });
        node
    }

    /// Top-most interaction under `point`
    pub fn hit_test(&self, point: LayoutPoint) -> Option<&Interaction> {
        self.interactions.iter().rev().find(|i| i.region.contains(point))
    }

    /// All text content in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match &n.primitive {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// What a container currently shows
#[derive(Debug, Clone, Default)]
pub enum ContainerContent {
    #[default]
    Empty,
    /// Text shown instead of a chart
    Placeholder(String),
    Chart(Scene),
}

/// Mount point for exactly one chart at a time
#[derive(Debug, Default)]
pub struct Container {
    host: ChartSize,
    content: ContainerContent,
    tooltip: Tooltip,
    generation: u64,
}

impl Container {
    /// Create a container whose host reports `width` x `height`
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            host: ChartSize::new(width, height),
            ..Default::default()
        }
    }

    /// Size reported by the host, read once per render
    pub fn host_size(&self) -> ChartSize {
        self.host
    }

    /// Size of the mounted chart, or the host size when no chart is shown
    ///
    /// A heat-map grows past the host height with its row count; the host
    /// size itself is never changed by a render.
    pub fn size(&self) -> ChartSize {
        match &self.content {
            ContainerContent::Chart(scene) => ChartSize::new(scene.width, scene.height),
            _ => self.host,
        }
    }

    /// Swap in new content, dropping the previous scene with all its callbacks
    pub fn replace(&mut self, content: ContainerContent) {
        self.content = content;
        self.tooltip = Tooltip::default();
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.replace(ContainerContent::Empty);
    }

    /// Number of content replacements so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn content(&self) -> &ContainerContent {
        &self.content
    }

    pub fn scene(&self) -> Option<&Scene> {
        match &self.content {
            ContainerContent::Chart(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    /// Visible text of the container, joined by newlines
    pub fn text(&self) -> String {
        match &self.content {
            ContainerContent::Empty => String::new(),
            ContainerContent::Placeholder(text) => text.clone(),
            ContainerContent::Chart(scene) => scene.texts().join("\n"),
        }
    }

    /// Number of drawn children
    pub fn child_count(&self) -> usize {
        match &self.content {
            ContainerContent::Empty => 0,
            ContainerContent::Placeholder(_) => 1,
            ContainerContent::Chart(scene) => scene.nodes.len(),
        }
    }

    /// Number of registered pointer targets
    pub fn listener_count(&self) -> usize {
        self.scene().map_or(0, |scene| scene.interactions.len())
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Show the tooltip of the target under the pointer, or hide it
    ///
    /// Returns whether a target was hit.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let hit = self
            .scene()
            .and_then(|scene| scene.hit_test(LayoutPoint::new(x, y)).map(|i| (i.label.clone(), scene.tooltip_offset)));
        match hit {
            Some((text, offset)) => {
                self.tooltip = Tooltip {
                    visible: true,
                    text,
                    x: x + offset,
                    y: y + offset,
                };
                true
            }
            None => {
                self.tooltip.visible = false;
                false
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.visible = false;
    }

    /// Fire the select callback of the target under the pointer
    ///
    /// Returns whether a callback ran.
    pub fn click(&self, x: f64, y: f64) -> bool {
        let select = self
            .scene()
            .and_then(|scene| scene.hit_test(LayoutPoint::new(x, y)))
            .and_then(|i| i.select.clone());
        match select {
            Some(select) => {
                select();
                true
            }
            None => false,
        }
    }

    /// Serialize the current content as a standalone SVG document
    pub fn to_svg(&self) -> ChartResult<String> {
        self.write_svg(&SvgWriter::new())
    }

    pub fn write_svg(&self, writer: &SvgWriter) -> ChartResult<String> {
        match &self.content {
            ContainerContent::Chart(scene) => writer.write_scene(scene),
            ContainerContent::Placeholder(text) => writer.write_placeholder(self.host, text),
            ContainerContent::Empty => writer.write_placeholder(self.host, ""),
        }
    }
}

/// One swatch-and-label row of a legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub swatch: Color,
    pub label: String,
}

/// Secondary mount point holding a chart legend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendContainer {
    entries: Vec<LegendEntry>,
    generation: u64,
}

impl LegendContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries at once
    pub fn replace(&mut self, entries: Vec<LegendEntry>) {
        self.entries = entries;
        self.generation += 1;
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| crate::error::ChartError::Serialization(e.to_string()))
    }
}
