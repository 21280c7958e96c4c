//! Tie offsets and tie anchor resolution.

use super::{TieAnchor, TieMark, TieRole};
use crate::errors::AccessoryPlacementError;
use crate::log::{debug, warn};
use crate::outline::{Outline, Segment};
use crate::spec::RequestedOffset;
use crate::types::{Length, Vertex};
use glam::dvec2;

/// What a family needs to turn tie options into roles
pub struct TieContext<'a> {
    /// The physical cushion edge; offsets are measured here
    pub base: &'a Outline,
    pub from_corner: Option<&'a RequestedOffset>,
    pub along_length: Option<&'a RequestedOffset>,
    pub along_width: Option<&'a RequestedOffset>,
    pub corner_offset: Length,
    pub min_edge: Length,
}

impl TieContext<'_> {
    pub fn edge_length(&self, edge: usize) -> Length {
        Length::inches(self.base.segment(edge).map_or(0.0, Segment::length))
    }

    /// Distance from the corner for ties on `edge`, from `tie_offset_from_corner`
    pub fn corner_distance(
        &self,
        option: &str,
        edge: usize,
        default: Length,
    ) -> Result<Length, AccessoryPlacementError> {
        resolve_offset(
            option,
            self.edge_length(edge),
            self.from_corner,
            default,
            self.min_edge,
        )
    }

    /// The usual family default: the corner offset, capped at half the edge
    pub fn default_corner_distance(&self, edge: usize) -> Length {
        self.corner_offset.min(self.edge_length(edge).half())
    }
}

/// Pick the distance of a tie from its corner.
///
/// A requested value is used when it is finite, non-negative and strictly
/// less than half the edge. Anything else falls back to `default`, which is
/// itself kept between zero and the edge midpoint.
pub fn resolve_offset(
    option: &str,
    edge_length: Length,
    requested: Option<&RequestedOffset>,
    default: Length,
    min_edge: Length,
) -> Result<Length, AccessoryPlacementError> {
    if edge_length < min_edge {
        return Err(AccessoryPlacementError::EdgeTooShort {
            option: option.to_string(),
            edge_length,
            minimum: min_edge,
        });
    }

    let half = edge_length.half();
    let fallback = default.max(Length::ZERO).min(half);
    match requested {
        Some(RequestedOffset::Inches(v)) if *v >= 0.0 && *v < half.raw() => Ok(Length::inches(*v)),
        Some(_) => {
            warn!(
                option,
                ?requested,
                edge = edge_length.raw(),
                fallback = fallback.raw(),
                "tie offset out of range; using family default"
            );
            Ok(fallback)
        }
        None => {
            debug!(option, fallback = fallback.raw(), "no tie offset given; using family default");
            Ok(fallback)
        }
    }
}

/// Resolve roles against the outline the ties are sewn to.
///
/// `anchor_outline` is the piping outline when piping is on. It has the same
/// segment layout as `base`, so roles carry over by index. A role naming a
/// segment that either outline lacks is an error.
pub fn place_ties(
    roles: &[TieRole],
    base: &Outline,
    anchor_outline: &Outline,
) -> Result<Vec<TieMark>, AccessoryPlacementError> {
    let segment = |outline: &Outline, index: usize| -> Result<Segment, AccessoryPlacementError> {
        outline.segment(index).copied().ok_or(AccessoryPlacementError::MissingSegment {
            index,
            segments: outline.len(),
        })
    };

    roles
        .iter()
        .map(|role| {
            let (anchor, distance_label) = match role.anchor {
                TieAnchor::Vertex(index) => (segment(anchor_outline, index)?.start(), None),
                TieAnchor::EdgeFraction { edge, t } => {
                    let point = segment(base, edge)?.point_at_fraction(t);
                    (carry_over(point, &segment(anchor_outline, edge)?), None)
                }
                TieAnchor::EdgeOffset {
                    edge,
                    distance,
                    from_end,
                } => {
                    let point = segment(base, edge)?.point_along(distance.raw(), from_end);
                    (
                        carry_over(point, &segment(anchor_outline, edge)?),
                        Some(distance.to_string()),
                    )
                }
                TieAnchor::ArcAngle { edge, angle } => {
                    let point = match segment(anchor_outline, edge)? {
                        Segment::Arc(arc) => arc.point_at(angle),
                        line => line.midpoint(),
                    };
                    (point, None)
                }
                TieAnchor::Interior(point) => (point, None),
            };
            Ok(TieMark {
                anchor,
                direction: role.direction,
                label: "Tie".to_string(),
                distance_label,
            })
        })
        .collect()
}

/// Move a point on a base edge onto the matching anchoring edge.
///
/// Lines project perpendicularly; arcs keep the point's parameter angle.
fn carry_over(point: Vertex, target: &Segment) -> Vertex {
    match target {
        Segment::Line { start, end } => {
            let along = *end - *start;
            let len_sq = along.length_squared();
            if len_sq == 0.0 {
                *start
            } else {
                *start + along * ((point - *start).dot(along) / len_sq)
            }
        }
        Segment::Arc(arc) => {
            let rel = point - arc.center;
            let angle = (rel.y / arc.radius_y).atan2(rel.x / arc.radius_x);
            arc.point_at(angle)
        }
    }
}

/// Clamp an interior coordinate into `(0, extent)`, else use `default`
pub fn interior_coordinate(requested: Option<&RequestedOffset>, extent: Length, default: Length) -> f64 {
    match requested.and_then(RequestedOffset::inches) {
        Some(v) if v > 0.0 && v < extent.raw() => v,
        Some(_) => {
            warn!(?requested, extent = extent.raw(), "backside tie offset outside the face");
            default.raw()
        }
        None => default.raw(),
    }
}

/// Two points mirrored across the middle of a `length` × `width` face
pub fn backside_points(ctx: &TieContext<'_>, length: Length, width: Length) -> [Vertex; 2] {
    let x = interior_coordinate(ctx.along_length, length.half(), length / 4.0);
    let y = interior_coordinate(ctx.along_width, width, width.half());
    [dvec2(x, y), dvec2(length.raw() - x, y)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessories::TieDirection;
    use crate::outline::{Arc, Segment};
    use glam::{DVec2, dvec2};
    use std::f64::consts::FRAC_PI_2;

    fn rectangle() -> Outline {
        Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(24.0, 0.0),
            dvec2(24.0, 10.0),
            dvec2(0.0, 10.0),
        ])
    }

    const MIN: Length = Length::inches(1.0);

    // ==================== offset resolution tests ====================

    #[test]
    fn requested_offset_inside_half_edge_is_used() {
        let requested = RequestedOffset::Inches(3.0);
        let d = resolve_offset("4 side", Length::inches(10.0), Some(&requested), Length::inches(2.0), MIN);
        assert_eq!(d, Ok(Length::inches(3.0)));
    }

    #[test]
    fn offset_at_or_past_midpoint_falls_back() {
        for v in [5.0, 20.0, -1.0] {
            let requested = RequestedOffset::Inches(v);
            let d = resolve_offset("4 side", Length::inches(10.0), Some(&requested), Length::inches(2.0), MIN);
            assert_eq!(d, Ok(Length::inches(2.0)), "requested {v}");
        }
    }

    #[test]
    fn invalid_text_falls_back() {
        let requested = RequestedOffset::Invalid("about four".into());
        let d = resolve_offset("2 back", Length::inches(30.0), Some(&requested), Length::inches(4.0), MIN);
        assert_eq!(d, Ok(Length::inches(4.0)));
    }

    #[test]
    fn default_never_passes_midpoint() {
        let d = resolve_offset("2 side", Length::inches(6.0), None, Length::inches(4.0), MIN);
        assert_eq!(d, Ok(Length::inches(3.0)));
    }

    #[test]
    fn short_edge_is_an_error() {
        let err = resolve_offset("2 side", Length::inches(0.5), None, Length::inches(4.0), MIN).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r#"cannot place "2 side" ties: edge is 0.5" long, minimum is 1""#);
    }

    // ==================== placement tests ====================

    #[test]
    fn offset_ties_carry_distance_label() {
        let base = rectangle();
        let roles = [
            TieRole::offset(1, Length::inches(2.0), false, TieDirection::Right),
            TieRole::offset(1, Length::inches(2.0), true, TieDirection::Right),
        ];
        let marks = place_ties(&roles, &base, &base).unwrap();
        assert_eq!(marks[0].anchor, dvec2(24.0, 2.0));
        assert_eq!(marks[1].anchor, dvec2(24.0, 8.0));
        assert_eq!(marks[0].distance_label.as_deref(), Some("2\""));
        assert_eq!(marks[0].label, "Tie");
    }

    #[test]
    fn ties_follow_the_piping_outline() {
        let base = rectangle();
        let piping = crate::offset::offset_outline(&base, Length::inches(0.5));
        let roles = [
            TieRole::vertex(2, TieDirection::Right),
            TieRole::offset(0, Length::inches(4.0), false, TieDirection::Down),
            TieRole::fraction(2, 0.5, TieDirection::Up),
        ];
        let marks = place_ties(&roles, &base, &piping).unwrap();
        assert!(marks[0].anchor.distance(dvec2(24.5, 10.5)) < 1e-9);
        assert!(marks[1].anchor.distance(dvec2(4.0, -0.5)) < 1e-9);
        assert!(marks[2].anchor.distance(dvec2(12.0, 10.5)) < 1e-9);
    }

    #[test]
    fn arc_ties_use_the_anchor_arc() {
        let base = Outline::from_segments(vec![Segment::Arc(Arc::circular(
            dvec2(10.0, 10.0),
            10.0,
            0.0,
            std::f64::consts::TAU,
        ))]);
        let piping = crate::offset::offset_outline(&base, Length::inches(0.5));
        let marks = place_ties(&[TieRole::arc(0, FRAC_PI_2, TieDirection::Up)], &base, &piping).unwrap();
        assert!(marks[0].anchor.distance(dvec2(10.0, 20.5)) < 1e-9);
    }

    #[test]
    fn role_past_the_last_segment_is_rejected() {
        let base = rectangle();
        let roles = [
            TieRole::vertex(0, TieDirection::Down),
            TieRole::fraction(7, 0.5, TieDirection::Up),
        ];
        let err = place_ties(&roles, &base, &base).unwrap_err();
        assert_eq!(err, AccessoryPlacementError::MissingSegment { index: 7, segments: 4 });
        insta::assert_snapshot!(err.to_string(), @"tie anchored on segment 7, but the outline has 4 segments");
    }

    #[test]
    fn backside_defaults_to_quarter_points() {
        let base = rectangle();
        let ctx = TieContext {
            base: &base,
            from_corner: None,
            along_length: None,
            along_width: Some(&RequestedOffset::Inches(40.0)),
            corner_offset: Length::inches(4.0),
            min_edge: MIN,
        };
        let [a, b] = backside_points(&ctx, Length::inches(24.0), Length::inches(10.0));
        assert_eq!(a, dvec2(6.0, 5.0));
        assert_eq!(b, dvec2(18.0, 5.0));
        assert_ne!(a, DVec2::ZERO);
    }
}
