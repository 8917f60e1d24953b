//! SVG writer for rendered scenes
//!
//! Serializes a [`Scene`] into a standalone SVG document. Hover texts are
//! written as `<title>` children so they survive outside the engine.

use crate::config::ChartSize;
use crate::error::{ChartError, ChartResult};
use crate::model::Color;
use crate::scene::*;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Writer for SVG documents
pub struct SvgWriter {
    /// Decimal places kept for coordinates
    precision: usize,
    /// Indent nested elements
    indent: bool,
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgWriter {
    pub fn new() -> Self {
        Self {
            precision: 2,
            indent: false,
        }
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Write a full scene
    pub fn write_scene(&self, scene: &Scene) -> ChartResult<String> {
        let mut writer = self.writer();
        let size = ChartSize::new(scene.width, scene.height);
        emit(&mut writer, Event::Start(self.root(size, Some(&scene.font_family))))?;

        if let Some(background) = scene.background {
            let mut rect = BytesStart::new("rect");
            rect.push_attribute(("width", self.num(scene.width).as_str()));
            rect.push_attribute(("height", self.num(scene.height).as_str()));
            push_paint(&mut rect, "fill", background);
            emit(&mut writer, Event::Empty(rect))?;
        }

        for node in &scene.nodes {
            self.write_node(&mut writer, node)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("svg")))?;
        finish(writer)
    }

    /// Write a document holding only a line of text
    pub fn write_placeholder(&self, size: ChartSize, text: &str) -> ChartResult<String> {
        let mut writer = self.writer();
        emit(&mut writer, Event::Start(self.root(size, None)))?;

        if !text.is_empty() {
            let mut elem = BytesStart::new("text");
            elem.push_attribute(("x", "8"));
            elem.push_attribute(("y", "20"));
            elem.push_attribute(("class", "muted"));
            emit(&mut writer, Event::Start(elem))?;
            emit(&mut writer, Event::Text(BytesText::new(text)))?;
            emit(&mut writer, Event::End(BytesEnd::new("text")))?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("svg")))?;
        finish(writer)
    }

    fn writer(&self) -> Writer<Cursor<Vec<u8>>> {
        if self.indent {
            Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
        } else {
            Writer::new(Cursor::new(Vec::new()))
        }
    }

    fn root(&self, size: ChartSize, font_family: Option<&str>) -> BytesStart<'static> {
        let (width, height) = (self.num(size.width), self.num(size.height));
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NAMESPACE));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        root.push_attribute(("viewBox", format!("0 0 {} {}", width, height).as_str()));
        if let Some(family) = font_family {
            root.push_attribute(("font-family", family));
        }
        root
    }

    fn write_node<W: std::io::Write>(&self, writer: &mut Writer<W>, node: &SceneNode) -> ChartResult<()> {
        let (elem, name, content) = self.element(&node.primitive);

        if node.title.is_none() && content.is_none() {
            return emit(writer, Event::Empty(elem));
        }

        emit(writer, Event::Start(elem))?;
        if let Some(title) = &node.title {
            emit(writer, Event::Start(BytesStart::new("title")))?;
            emit(writer, Event::Text(BytesText::new(title)))?;
            emit(writer, Event::End(BytesEnd::new("title")))?;
        }
        if let Some(text) = content {
            emit(writer, Event::Text(BytesText::new(text)))?;
        }
        emit(writer, Event::End(BytesEnd::new(name)))
    }

    /// Start tag, tag name and text content of a primitive
    fn element<'p>(&self, primitive: &'p Primitive) -> (BytesStart<'static>, &'static str, Option<&'p str>) {
        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                corner_radius,
                fill,
                stroke,
            } => {
                let mut elem = BytesStart::new("rect");
                self.push_nums(&mut elem, &[("x", *x), ("y", *y), ("width", *width), ("height", *height)]);
                if *corner_radius > 0.0 {
                    self.push_nums(&mut elem, &[("rx", *corner_radius)]);
                }
                push_paint(&mut elem, "fill", *fill);
                if let Some(stroke) = stroke {
                    push_paint(&mut elem, "stroke", *stroke);
                }
                (elem, "rect", None)
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                let mut elem = BytesStart::new("line");
                self.push_nums(&mut elem, &[("x1", *x1), ("y1", *y1), ("x2", *x2), ("y2", *y2)]);
                push_paint(&mut elem, "stroke", *stroke);
                self.push_nums(&mut elem, &[("stroke-width", *stroke_width)]);
                (elem, "line", None)
            }
            Primitive::Polyline {
                points,
                stroke,
                stroke_width,
            } => {
                let mut elem = BytesStart::new("polyline");
                elem.push_attribute(("points", self.points(points).as_str()));
                elem.push_attribute(("fill", "none"));
                push_paint(&mut elem, "stroke", *stroke);
                self.push_nums(&mut elem, &[("stroke-width", *stroke_width)]);
                (elem, "polyline", None)
            }
            Primitive::Polygon {
                points,
                fill,
                stroke,
                stroke_width,
            } => {
                let mut elem = BytesStart::new("polygon");
                elem.push_attribute(("points", self.points(points).as_str()));
                push_paint(&mut elem, "fill", *fill);
                if let Some(stroke) = stroke {
                    push_paint(&mut elem, "stroke", *stroke);
                }
                if let Some(width) = stroke_width {
                    self.push_nums(&mut elem, &[("stroke-width", *width)]);
                }
                (elem, "polygon", None)
            }
            Primitive::Circle { cx, cy, r, fill, opacity } => {
                let mut elem = BytesStart::new("circle");
                self.push_nums(&mut elem, &[("cx", *cx), ("cy", *cy), ("r", *r)]);
                push_paint(&mut elem, "fill", *fill);
                if *opacity < 1.0 {
                    self.push_nums(&mut elem, &[("opacity", *opacity)]);
                }
                (elem, "circle", None)
            }
            Primitive::Path {
                d,
                fill,
                stroke,
                stroke_width,
            } => {
                let mut elem = BytesStart::new("path");
                elem.push_attribute(("d", d.as_str()));
                match fill {
                    Some(fill) => push_paint(&mut elem, "fill", *fill),
                    None => elem.push_attribute(("fill", "none")),
                }
                if let Some(stroke) = stroke {
                    push_paint(&mut elem, "stroke", *stroke);
                }
                if let Some(width) = stroke_width {
                    self.push_nums(&mut elem, &[("stroke-width", *width)]);
                }
                (elem, "path", None)
            }
            Primitive::Text {
                x,
                y,
                text,
                font_size,
                fill,
                anchor,
            } => {
                let mut elem = BytesStart::new("text");
                self.push_nums(&mut elem, &[("x", *x), ("y", *y), ("font-size", *font_size)]);
                push_paint(&mut elem, "fill", *fill);
                if *anchor != TextAnchor::Start {
                    elem.push_attribute(("text-anchor", anchor.as_svg()));
                }
                (elem, "text", Some(text.as_str()))
            }
        }
    }

    fn push_nums(&self, elem: &mut BytesStart<'_>, attrs: &[(&str, f64)]) {
        for (name, value) in attrs {
            elem.push_attribute((*name, self.num(*value).as_str()));
        }
    }

    fn points(&self, points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|(x, y)| format!("{},{}", self.num(*x), self.num(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fixed precision with trailing zeros removed
    fn num(&self, value: f64) -> String {
        let text = format!("{:.*}", self.precision, value);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            text.as_str()
        };
        if text == "-0" {
            "0".to_string()
        } else {
            text.to_string()
        }
    }
}

/// `fill`/`stroke` as hex plus a separate opacity when translucent
fn push_paint(elem: &mut BytesStart<'_>, attr: &str, color: Color) {
    let opaque = Color::rgb(color.r, color.g, color.b);
    elem.push_attribute((attr, opaque.to_hex().as_str()));
    if color.a != 255 {
        let opacity = format!("{:.3}", color.alpha());
        elem.push_attribute((format!("{attr}-opacity").as_str(), opacity.as_str()));
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> ChartResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ChartError::Serialization(e.to_string()))
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> ChartResult<String> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ChartError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new(ChartSize::new(100.0, 50.0));
        scene.push(
            SceneNode::new(Primitive::Rect {
                x: 10.0,
                y: 5.5,
                width: 30.0,
                height: 12.0,
                corner_radius: 6.0,
                fill: Color::rgb(240, 143, 95),
                stroke: None,
            })
            .with_title("Ahri & <Zed>"),
        );
        scene.push(SceneNode::new(Primitive::Text {
            x: 8.0,
            y: 20.0,
            text: "Gold".to_string(),
            font_size: 11.0,
            fill: Color::WHITE,
            anchor: TextAnchor::End,
        }));
        scene.push(SceneNode::new(Primitive::Line {
            x1: 0.0,
            y1: 1.0 / 3.0,
            x2: 100.0,
            y2: 0.0,
            stroke: Color::WHITE.with_alpha(0.5),
            stroke_width: 1.0,
        }));
        scene
    }

    #[test]
    fn test_write_scene() {
        let svg = SvgWriter::new().write_scene(&scene()).unwrap();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"50\""));
        assert!(svg.contains("viewBox=\"0 0 100 50\""));
        assert!(svg.contains("<rect x=\"10\" y=\"5.5\" width=\"30\" height=\"12\" rx=\"6\" fill=\"#F08F5F\">"));
        assert!(svg.contains("<title>Ahri &amp; &lt;Zed&gt;</title></rect>"));
        assert!(svg.contains("text-anchor=\"end\">Gold</text>"));
        assert!(svg.contains("y1=\"0.33\""));
        assert!(svg.contains("stroke-opacity=\"0.502\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_write_placeholder() {
        let svg = SvgWriter::new()
            .write_placeholder(ChartSize::new(0.0, 0.0), "No data.")
            .unwrap();
        assert!(svg.contains(">No data.</text>"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_background_rect() {
        let mut scene = scene();
        scene.background = Some(Color::rgb(16, 20, 28));
        let svg = SvgWriter::new().write_scene(&scene).unwrap();
        assert!(svg.contains("<rect width=\"100\" height=\"50\" fill=\"#10141C\"/>"));
    }

    #[test]
    fn test_indent_nests_elements() {
        let flat = SvgWriter::new().write_scene(&scene()).unwrap();
        assert!(!flat.contains('\n'));

        let pretty = SvgWriter::new().indent(true).write_scene(&scene()).unwrap();
        assert!(pretty.contains("\n  <rect"));
        assert!(pretty.contains("\n    <title>"));
    }

    #[test]
    fn test_number_formatting() {
        let writer = SvgWriter::new();
        assert_eq!(writer.num(40.0), "40");
        assert_eq!(writer.num(12.346), "12.35");
        assert_eq!(writer.num(-0.001), "0");
        assert_eq!(writer.precision(0).num(7.6), "8");
    }
}
