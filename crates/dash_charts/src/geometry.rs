//! Layout geometry primitives
//!
//! Rectangles, points and the SVG path builders shared by the chart layouts.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside (edges included)
    pub fn contains(&self, point: LayoutPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: LayoutPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point at `angle` radians (0 = 3 o'clock, clockwise in screen space) and `radius` from `center`
pub fn polar_point(center: LayoutPoint, radius: f64, angle: f64) -> LayoutPoint {
    LayoutPoint::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Normalize an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// SVG path for a pie slice sweeping clockwise from `start_angle` by `sweep`
///
/// The large-arc flag is set when the sweep exceeds π. A full-circle sweep
/// is split into two half arcs since a single arc cannot start and end at
/// the same point.
pub fn slice_path(center: LayoutPoint, radius: f64, start_angle: f64, sweep: f64) -> String {
    let start = polar_point(center, radius, start_angle);
    if sweep >= TAU - 1e-9 {
        let opposite = polar_point(center, radius, start_angle + PI);
        return format!(
            "M {} {} A {} {} 0 1 1 {} {} A {} {} 0 1 1 {} {} Z",
            start.x, start.y,
            radius, radius, opposite.x, opposite.y,
            radius, radius, start.x, start.y
        );
    }

    let end = polar_point(center, radius, start_angle + sweep);
    let large_arc = if sweep > PI { 1 } else { 0 };
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        center.x, center.y,
        start.x, start.y,
        radius, radius, large_arc, end.x, end.y
    )
}

/// A cubic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    pub start: LayoutPoint,
    pub control1: LayoutPoint,
    pub control2: LayoutPoint,
    pub end: LayoutPoint,
}

impl CubicCurve {
    /// Horizontal S-curve between two points with both control points at the mid x
    pub fn horizontal_link(start: LayoutPoint, end: LayoutPoint) -> Self {
        let mid_x = (start.x + end.x) / 2.0;
        Self {
            start,
            control1: LayoutPoint::new(mid_x, start.y),
            control2: LayoutPoint::new(mid_x, end.y),
            end,
        }
    }

    pub fn point_at(&self, t: f64) -> LayoutPoint {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        LayoutPoint::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// Approximate distance from `point` to the curve, sampled as a polyline
    pub fn distance_to(&self, point: LayoutPoint) -> f64 {
        const SAMPLES: usize = 32;
        let mut best = f64::INFINITY;
        let mut prev = self.start;
        for i in 1..=SAMPLES {
            let next = self.point_at(i as f64 / SAMPLES as f64);
            best = best.min(segment_distance(point, prev, next));
            prev = next;
        }
        best
    }

    pub fn to_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x, self.start.y,
            self.control1.x, self.control1.y,
            self.control2.x, self.control2.y,
            self.end.x, self.end.y
        )
    }
}

/// Distance from `point` to the segment `a`-`b`
pub fn segment_distance(point: LayoutPoint, a: LayoutPoint, b: LayoutPoint) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return point.distance_to(a);
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    point.distance_to(LayoutPoint::new(a.x + t * dx, a.y + t * dy))
}
