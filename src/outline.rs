//! Closed outlines made of line segments and elliptical arcs.
//!
//! Every builder emits its outline counter-clockwise with y up, so the
//! outward normal of a line is its direction rotated -90° and a
//! counter-clockwise arc bulges outward. Segments store both endpoints; the
//! end of segment `i` is the start of segment `i + 1`, and the last segment
//! ends where the first begins.

use crate::types::{BBox, UnitVec, Vertex};
use glam::{DVec2, dvec2};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Tolerance for "same point" comparisons, in inches
pub const EPSILON: f64 = 1e-9;

/// An axis-aligned elliptical arc. Angles are radians from +x; an arc with
/// `end_angle < start_angle` runs clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arc {
    pub center: Vertex,
    pub radius_x: f64,
    pub radius_y: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn circular(center: Vertex, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            center,
            radius_x: radius,
            radius_y: radius,
            start_angle,
            end_angle,
        }
    }

    pub fn point_at(&self, angle: f64) -> Vertex {
        self.center + dvec2(self.radius_x * angle.cos(), self.radius_y * angle.sin())
    }

    pub fn start(&self) -> Vertex {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> Vertex {
        self.point_at(self.end_angle)
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.sweep() >= 0.0
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn midpoint(&self) -> Vertex {
        self.point_at(self.mid_angle())
    }

    /// Outward normal at `angle`, given the outline runs counter-clockwise.
    ///
    /// A convex arc (counter-clockwise) faces away from its center; a concave
    /// one faces toward it.
    pub fn outward_normal_at(&self, angle: f64) -> UnitVec {
        // gradient of the implicit ellipse equation
        let radial = dvec2(
            angle.cos() / self.radius_x.max(EPSILON),
            angle.sin() / self.radius_y.max(EPSILON),
        );
        let normal = UnitVec::normalized(radial).unwrap_or(UnitVec::RIGHT);
        if self.is_counter_clockwise() { normal } else { -normal }
    }

    /// Same arc with both semi-axes grown outward by `distance`
    /// (shrunk for a concave arc).
    pub fn offset(&self, distance: f64) -> Arc {
        let signed = if self.is_counter_clockwise() { distance } else { -distance };
        Arc {
            radius_x: self.radius_x + signed,
            radius_y: self.radius_y + signed,
            ..*self
        }
    }

    /// Arc length, exact for circles and integrated for ellipses
    pub fn length(&self) -> f64 {
        if (self.radius_x - self.radius_y).abs() < EPSILON {
            return self.radius_x * self.sweep().abs();
        }
        const STEPS: usize = 256;
        let step = self.sweep() / STEPS as f64;
        (0..STEPS)
            .map(|i| {
                let a = self.point_at(self.start_angle + step * i as f64);
                let b = self.point_at(self.start_angle + step * (i + 1) as f64);
                a.distance(b)
            })
            .sum()
    }

    /// Tight bounds: endpoints plus every axis extreme inside the sweep
    pub fn bbox(&self) -> BBox {
        let (lo, hi) = if self.is_counter_clockwise() {
            (self.start_angle, self.end_angle)
        } else {
            (self.end_angle, self.start_angle)
        };
        let mut bbox = BBox::new();
        bbox.expand_point(self.point_at(lo));
        bbox.expand_point(self.point_at(hi));
        let mut k = (lo / FRAC_PI_2).ceil();
        while k * FRAC_PI_2 <= hi {
            bbox.expand_point(self.point_at(k * FRAC_PI_2));
            k += 1.0;
        }
        bbox
    }

    pub fn is_full_circle(&self) -> bool {
        (self.sweep().abs() - TAU).abs() < EPSILON
    }

    /// Apply `p * scale + translate`
    pub fn transformed(&self, scale: f64, translate: DVec2) -> Arc {
        Arc {
            center: self.center * scale + translate,
            radius_x: self.radius_x * scale,
            radius_y: self.radius_y * scale,
            ..*self
        }
    }
}

/// One piece of an outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Line { start: Vertex, end: Vertex },
    Arc(Arc),
}

impl Segment {
    pub fn line(start: Vertex, end: Vertex) -> Self {
        Segment::Line { start, end }
    }

    pub fn start(&self) -> Vertex {
        match self {
            Segment::Line { start, .. } => *start,
            Segment::Arc(arc) => arc.start(),
        }
    }

    pub fn end(&self) -> Vertex {
        match self {
            Segment::Line { end, .. } => *end,
            Segment::Arc(arc) => arc.end(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Segment::Line { start, end } => start.distance(*end),
            Segment::Arc(arc) => arc.length(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        match self {
            Segment::Line { start, end } => start.distance(*end) < EPSILON,
            Segment::Arc(arc) => arc.sweep().abs() < EPSILON,
        }
    }

    pub fn midpoint(&self) -> Vertex {
        match self {
            Segment::Line { start, end } => (*start + *end) / 2.0,
            Segment::Arc(arc) => arc.midpoint(),
        }
    }

    /// Unit direction of travel for a line, `None` for arcs and zero-length lines
    pub fn direction(&self) -> Option<UnitVec> {
        match self {
            Segment::Line { start, end } => UnitVec::normalized(*end - *start),
            Segment::Arc(_) => None,
        }
    }

    /// Outward normal at the segment's midpoint
    pub fn outward_normal(&self) -> Option<UnitVec> {
        match self {
            Segment::Line { .. } => self.direction().map(UnitVec::right_normal),
            Segment::Arc(arc) => Some(arc.outward_normal_at(arc.mid_angle())),
        }
    }

    /// Point `distance` inches along a line from its start (or its end when
    /// `from_end` is set)
    pub fn point_along(&self, distance: f64, from_end: bool) -> Vertex {
        match self {
            Segment::Line { start, end } => {
                let (from, to) = if from_end { (*end, *start) } else { (*start, *end) };
                match UnitVec::normalized(to - from) {
                    Some(dir) => from + dir.as_dvec2() * distance,
                    None => from,
                }
            }
            Segment::Arc(arc) => {
                let radius = (arc.radius_x + arc.radius_y) / 2.0;
                let delta = if radius > EPSILON { distance / radius } else { 0.0 };
                let delta = delta.copysign(arc.sweep());
                if from_end {
                    arc.point_at(arc.end_angle - delta)
                } else {
                    arc.point_at(arc.start_angle + delta)
                }
            }
        }
    }

    /// Point at fraction `t` of the way from start to end
    pub fn point_at_fraction(&self, t: f64) -> Vertex {
        match self {
            Segment::Line { start, end } => start.lerp(*end, t),
            Segment::Arc(arc) => arc.point_at(arc.start_angle + arc.sweep() * t),
        }
    }

    pub fn bbox(&self) -> BBox {
        match self {
            Segment::Line { start, end } => [*start, *end].into_iter().collect(),
            Segment::Arc(arc) => arc.bbox(),
        }
    }

    pub fn transformed(&self, scale: f64, translate: DVec2) -> Segment {
        match self {
            Segment::Line { start, end } => Segment::Line {
                start: *start * scale + translate,
                end: *end * scale + translate,
            },
            Segment::Arc(arc) => Segment::Arc(arc.transformed(scale, translate)),
        }
    }
}

/// A closed path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Outline {
    segments: Vec<Segment>,
}

impl Outline {
    /// Close a polygon through `vertices`
    pub fn polygon(vertices: &[Vertex]) -> Outline {
        let segments = vertices
            .iter()
            .enumerate()
            .map(|(i, &start)| Segment::line(start, vertices[(i + 1) % vertices.len()]))
            .collect();
        Outline { segments }
    }

    /// Wrap segments that already chain end to start
    pub fn from_segments(segments: Vec<Segment>) -> Outline {
        Outline { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Vertex `i` is where segment `i` starts
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        self.segments.get(index).map(Segment::start)
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.segments.iter().map(Segment::start).collect()
    }

    /// True when every segment is a straight line
    pub fn is_polygon(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Line { .. }))
    }

    /// Every segment ends where the next begins, and the last closes the path
    pub fn is_closed(&self) -> bool {
        let n = self.segments.len();
        n > 0
            && (0..n).all(|i| {
                self.segments[i]
                    .end()
                    .distance(self.segments[(i + 1) % n].start())
                    < 1e-6
            })
    }

    /// Signed area (shoelace over the segment chords plus arc sectors);
    /// positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Line { start, end } => start.perp_dot(*end) / 2.0,
                Segment::Arc(arc) => {
                    // integral of (x dy - y dx)/2 along the arc
                    let (a, b) = (arc.start_angle, arc.end_angle);
                    let c = arc.center;
                    let (rx, ry) = (arc.radius_x, arc.radius_y);
                    let sector = rx * ry * (b - a);
                    let cross = c.x * ry * (b.sin() - a.sin()) + c.y * rx * (a.cos() - b.cos());
                    (sector + cross) / 2.0
                }
            })
            .sum()
    }

    pub fn bbox(&self) -> BBox {
        let mut bbox = BBox::new();
        for segment in &self.segments {
            bbox.expand_bbox(&segment.bbox());
        }
        bbox
    }

    pub fn transformed(&self, scale: f64, translate: DVec2) -> Outline {
        Outline {
            segments: self
                .segments
                .iter()
                .map(|segment| segment.transformed(scale, translate))
                .collect(),
        }
    }
}
