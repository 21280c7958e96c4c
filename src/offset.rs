//! Offset contour generation for piping.
//!
//! The piping contour keeps the base outline's segment count and order, so
//! vertex `i` of the piping outline is the offset image of vertex `i` of the
//! base outline. Tie anchors rely on that correspondence.
//!
//! Joints between two lines move along the averaged outward normal of the
//! two edges, scaled so each offset edge lands exactly `margin` from its base
//! edge. Arcs keep their center and change both semi-axes by the margin;
//! where an arc meets a line, the joint is their intersection.

use crate::log::{trace, warn};
use crate::outline::{Arc, EPSILON, Outline, Segment};
use crate::types::{Length, UnitVec, Vertex};
use glam::DVec2;
use std::f64::consts::TAU;

/// Below this the averaged normal is nearly perpendicular to an edge
/// (a hairpin) and the miter would run off to infinity.
const MIN_MITER_COS: f64 = 1e-3;

/// Offset every segment of `outline` outward by `margin`.
pub fn offset_outline(outline: &Outline, margin: Length) -> Outline {
    let m = margin.raw();
    let segments = outline.segments();
    let n = segments.len();
    if n == 0 || m == 0.0 {
        return outline.clone();
    }

    let joints: Vec<Joint> = (0..n).map(|i| joint(segments, i, m)).collect();

    let offset = (0..n)
        .map(|i| {
            let (start, end) = (&joints[i], &joints[(i + 1) % n]);
            match &segments[i] {
                Segment::Line { .. } => Segment::line(start.point, end.point),
                Segment::Arc(arc) => {
                    let grown = grow_arc(arc, m);
                    let start_angle = start.angle_on(Side::Next, i).unwrap_or(arc.start_angle);
                    let end_angle = end.angle_on(Side::Prev, i).unwrap_or(arc.end_angle);
                    Segment::Arc(Arc {
                        start_angle,
                        end_angle,
                        ..grown
                    })
                }
            }
        })
        .collect();

    Outline::from_segments(offset)
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    Prev,
    Next,
}

/// Where two offset segments meet, plus the parameter angle on any arc
/// taking part
struct Joint {
    point: Vertex,
    prev_angle: Option<(usize, f64)>,
    next_angle: Option<(usize, f64)>,
}

impl Joint {
    fn at(point: Vertex) -> Self {
        Joint {
            point,
            prev_angle: None,
            next_angle: None,
        }
    }

    fn angle_on(&self, side: Side, segment: usize) -> Option<f64> {
        let slot = match side {
            Side::Prev => self.prev_angle,
            Side::Next => self.next_angle,
        };
        slot.filter(|(index, _)| *index == segment).map(|(_, angle)| angle)
    }
}

fn grow_arc(arc: &Arc, m: f64) -> Arc {
    let grown = arc.offset(m);
    if grown.radius_x < EPSILON || grown.radius_y < EPSILON {
        warn!(?arc, margin = m, "piping margin collapses a concave arc");
        Arc {
            radius_x: grown.radius_x.max(EPSILON),
            radius_y: grown.radius_y.max(EPSILON),
            ..grown
        }
    } else {
        grown
    }
}

/// Nearest non-degenerate segment ending at vertex `i`, walking backwards
fn previous_live(segments: &[Segment], i: usize) -> Option<usize> {
    let n = segments.len();
    (1..=n)
        .map(|back| (i + n - back) % n)
        .find(|&j| !segments[j].is_degenerate())
}

/// Nearest non-degenerate segment starting at vertex `i`, walking forwards
fn next_live(segments: &[Segment], i: usize) -> Option<usize> {
    let n = segments.len();
    (0..n).map(|ahead| (i + ahead) % n).find(|&j| !segments[j].is_degenerate())
}

/// Offset of vertex `i`, where segment `i - 1` hands over to segment `i`
fn joint(segments: &[Segment], i: usize, m: f64) -> Joint {
    let corner = segments[i].start();
    let (Some(prev), Some(next)) = (previous_live(segments, i), next_live(segments, i)) else {
        return Joint::at(corner);
    };

    match (&segments[prev], &segments[next]) {
        (Segment::Line { .. }, Segment::Line { .. }) => {
            let (Some(n_in), Some(n_out)) = (
                segments[prev].outward_normal(),
                segments[next].outward_normal(),
            ) else {
                return Joint::at(corner);
            };
            Joint::at(corner + miter(n_in, n_out, m))
        }
        (line @ Segment::Line { .. }, Segment::Arc(arc)) => {
            let grown = grow_arc(arc, m);
            let angle = line_arc_angle(line, m, &grown, arc.start_angle);
            Joint {
                point: grown.point_at(angle),
                prev_angle: None,
                next_angle: Some((next, angle)),
            }
        }
        (Segment::Arc(arc), line @ Segment::Line { .. }) => {
            let grown = grow_arc(arc, m);
            let angle = line_arc_angle(line, m, &grown, arc.end_angle);
            Joint {
                point: grown.point_at(angle),
                prev_angle: Some((prev, angle)),
                next_angle: None,
            }
        }
        (Segment::Arc(a), Segment::Arc(b)) => {
            let incoming = grow_arc(a, m);
            let outgoing = grow_arc(b, m);
            let point = outgoing.point_at(b.start_angle);
            if incoming.point_at(a.end_angle).distance(point) > 1e-6 {
                warn!(joint = i, "arcs meet at a corner; piping joint is approximate");
            }
            Joint {
                point,
                prev_angle: Some((prev, a.end_angle)),
                next_angle: Some((next, b.start_angle)),
            }
        }
    }
}

/// Displacement of a line-line corner: along the averaged normal, long enough
/// that both offset edges sit exactly `m` away.
fn miter(n_in: UnitVec, n_out: UnitVec, m: f64) -> DVec2 {
    match UnitVec::normalized(n_in.as_dvec2() + n_out.as_dvec2()) {
        Some(direction) => {
            let cos = direction.dot(n_in);
            let distance = if cos > MIN_MITER_COS { m / cos } else { m };
            direction.as_dvec2() * distance
        }
        None => n_in.as_dvec2() * m,
    }
}

/// Parameter angle where the offset copy of `line` crosses the offset arc,
/// choosing the crossing nearest `near`. Falls back to `near` itself (the
/// arc's own offset endpoint) when they do not meet.
fn line_arc_angle(line: &Segment, m: f64, arc: &Arc, near: f64) -> f64 {
    let Some(normal) = line.outward_normal() else {
        return near;
    };
    let n = normal.as_dvec2();
    let anchor = line.start() + n * m;

    // n · (center + (rx cos θ, ry sin θ) - anchor) = 0
    let a = n.x * arc.radius_x;
    let b = n.y * arc.radius_y;
    let c = n.dot(anchor - arc.center);
    let r = a.hypot(b);
    if r < EPSILON {
        return near;
    }
    let ratio = c / r;
    if ratio.abs() > 1.0 + 1e-9 {
        warn!(ratio, "offset line misses offset arc; using arc endpoint");
        return near;
    }
    let phi = b.atan2(a);
    let spread = ratio.clamp(-1.0, 1.0).acos();

    let candidates = [phi + spread, phi - spread].map(|theta| unwrap_near(theta, near));
    let best = if (candidates[0] - near).abs() <= (candidates[1] - near).abs() {
        candidates[0]
    } else {
        candidates[1]
    };
    trace!(near, best, "line/arc piping joint");
    best
}

/// Shift `theta` by whole turns to lie within half a turn of `reference`
fn unwrap_near(theta: f64, reference: f64) -> f64 {
    theta + TAU * ((reference - theta) / TAU).round()
}

/// Perpendicular distance from `p` to the infinite line through `segment`
pub fn distance_to_line(p: Vertex, segment: &Segment) -> Option<f64> {
    let direction = segment.direction()?;
    let normal = direction.right_normal().as_dvec2();
    Some(normal.dot(p - segment.start()).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;
    use std::f64::consts::{FRAC_PI_2, PI};

    const M: Length = Length::inches(0.5);

    fn assert_near(actual: Option<Vertex>, expected: Vertex) {
        let actual = actual.expect("vertex exists");
        assert!(
            actual.distance(expected) < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn assert_offset_edges(base: &Outline, piped: &Outline, m: f64) {
        assert_eq!(base.len(), piped.len());
        for (i, (b, p)) in base.segments().iter().zip(piped.segments()).enumerate() {
            if b.is_degenerate() {
                continue;
            }
            for q in [p.start(), p.end()] {
                let d = distance_to_line(q, b).unwrap();
                assert!((d - m).abs() < 1e-9, "edge {i}: distance {d}, expected {m}");
            }
        }
    }

    // ==================== polygon tests ====================

    #[test]
    fn rectangle_grows_by_margin_on_every_side() {
        let base = Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(24.0, 0.0),
            dvec2(24.0, 18.0),
            dvec2(0.0, 18.0),
        ]);
        let piped = offset_outline(&base, M);
        assert!(piped.is_closed());
        assert_near(piped.vertex(0), dvec2(-0.5, -0.5));
        assert_near(piped.vertex(2), dvec2(24.5, 18.5));
        assert_offset_edges(&base, &piped, 0.5);
    }

    #[test]
    fn sharp_corners_keep_edge_distance() {
        let s = 20.0;
        let base = Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(s, 0.0),
            dvec2(s / 2.0, s * 3f64.sqrt() / 2.0),
        ]);
        let piped = offset_outline(&base, M);
        assert_offset_edges(&base, &piped, 0.5);
        // 60° corner: miter is twice the margin
        let moved = piped.vertex(0).unwrap().distance(base.vertex(0).unwrap());
        assert!((moved - 1.0).abs() < 1e-9);
    }

    #[test]
    fn concave_corner_moves_into_notch() {
        // L-shape with a 10x5 notch cut from the lower right
        let base = Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(20.0, 0.0),
            dvec2(20.0, 5.0),
            dvec2(30.0, 5.0),
            dvec2(30.0, 15.0),
            dvec2(0.0, 15.0),
        ]);
        let piped = offset_outline(&base, M);
        assert_near(piped.vertex(2), dvec2(20.5, 4.5));
        assert_offset_edges(&base, &piped, 0.5);
    }

    #[test]
    fn zero_length_edges_are_skipped() {
        // notch of zero depth: vertices 1 and 2 coincide
        let base = Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(20.0, 0.0),
            dvec2(20.0, 0.0),
            dvec2(30.0, 0.0),
            dvec2(30.0, 15.0),
            dvec2(0.0, 15.0),
        ]);
        let piped = offset_outline(&base, M);
        assert_eq!(piped.len(), 6);
        for v in piped.vertices() {
            assert!(v.x.is_finite() && v.y.is_finite());
        }
        assert_near(piped.vertex(1), dvec2(20.0, -0.5));
        assert_near(piped.vertex(2), dvec2(20.0, -0.5));
        assert_offset_edges(&base, &piped, 0.5);
    }

    #[test]
    fn zero_margin_is_identity() {
        let base = Outline::polygon(&[dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(0.0, 1.0)]);
        assert_eq!(offset_outline(&base, Length::ZERO), base);
    }

    // ==================== arc tests ====================

    #[test]
    fn circle_radius_grows() {
        let base = Outline::from_segments(vec![Segment::Arc(Arc::circular(
            dvec2(20.0, 20.0),
            20.0,
            0.0,
            TAU,
        ))]);
        let piped = offset_outline(&base, M);
        match piped.segment(0) {
            Some(Segment::Arc(arc)) => {
                assert_eq!(arc.radius_x, 20.5);
                assert_eq!(arc.start_angle, 0.0);
                assert_eq!(arc.end_angle, TAU);
            }
            other => panic!("expected arc, got {other:?}"),
        }
        assert!(piped.is_closed());
    }

    #[test]
    fn semicircle_chord_meets_grown_arc() {
        let r = 10.0;
        let base = Outline::from_segments(vec![
            Segment::line(dvec2(0.0, 0.0), dvec2(2.0 * r, 0.0)),
            Segment::Arc(Arc::circular(dvec2(r, 0.0), r, 0.0, PI)),
        ]);
        let piped = offset_outline(&base, M);
        assert!(piped.is_closed());

        let chord = piped.segment(0).unwrap();
        assert!((chord.start().y + 0.5).abs() < 1e-9);
        assert!((chord.end().y + 0.5).abs() < 1e-9);

        match piped.segment(1) {
            Some(Segment::Arc(arc)) => {
                assert_eq!(arc.radius_x, r + 0.5);
                assert!(arc.start_angle < 0.0);
                assert!(arc.end_angle > PI);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn ellipse_cap_stays_tangent_to_sides() {
        let (w, s, cap) = (20.0, 18.0, 6.0);
        let base = Outline::from_segments(vec![
            Segment::line(dvec2(0.0, 0.0), dvec2(w, 0.0)),
            Segment::line(dvec2(w, 0.0), dvec2(w, s)),
            Segment::Arc(Arc {
                center: dvec2(w / 2.0, s),
                radius_x: w / 2.0,
                radius_y: cap,
                start_angle: 0.0,
                end_angle: PI,
            }),
            Segment::line(dvec2(0.0, s), dvec2(0.0, 0.0)),
        ]);
        let piped = offset_outline(&base, M);
        assert!(piped.is_closed());
        match piped.segment(2) {
            Some(Segment::Arc(arc)) => {
                assert!((arc.radius_x - 10.5).abs() < 1e-12);
                assert!((arc.radius_y - 6.5).abs() < 1e-12);
                assert!(arc.start_angle.abs() < 1e-6);
                assert!((arc.end_angle - PI).abs() < 1e-6);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn concave_arc_shrinks() {
        let (r, big) = (10.0, 30.0);
        let base = Outline::from_segments(vec![
            Segment::line(dvec2(r, 0.0), dvec2(big, 0.0)),
            Segment::Arc(Arc::circular(DVec2::ZERO, big, 0.0, FRAC_PI_2)),
            Segment::line(dvec2(0.0, big), dvec2(0.0, r)),
            Segment::Arc(Arc::circular(DVec2::ZERO, r, FRAC_PI_2, 0.0)),
        ]);
        let piped = offset_outline(&base, M);
        assert!(piped.is_closed());
        match (piped.segment(1), piped.segment(3)) {
            (Some(Segment::Arc(outer)), Some(Segment::Arc(inner))) => {
                assert_eq!(outer.radius_x, 30.5);
                assert_eq!(inner.radius_x, 9.5);
                assert!(inner.start_angle > FRAC_PI_2);
                assert!(inner.end_angle < 0.0);
            }
            other => panic!("expected arcs, got {other:?}"),
        }
        // the radial sides moved out to x = -m and y = -m
        assert!((piped.segment(2).unwrap().start().x + 0.5).abs() < 1e-9);
        assert!((piped.segment(0).unwrap().start().y + 0.5).abs() < 1e-9);
    }
}
