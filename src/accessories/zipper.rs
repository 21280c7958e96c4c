//! Zipper placement: each mark runs parallel to its edge, just outside it.

use super::{ZipperMark, ZipperPath, ZipperRole};
use crate::errors::AccessoryPlacementError;
use crate::outline::{Arc, Outline, Segment};
use crate::types::Length;

/// Offset every zipper edge by `offset` along its own outward normal.
///
/// Lines shift sideways; arcs change radius. `option` names the zipper choice
/// in errors.
pub fn place_zippers(
    option: &str,
    roles: &[ZipperRole],
    base: &Outline,
    offset: Length,
) -> Result<Vec<ZipperMark>, AccessoryPlacementError> {
    let degenerate = || AccessoryPlacementError::DegenerateEdge {
        option: option.to_string(),
    };

    roles
        .iter()
        .map(|role| {
            let segment = match role.path {
                ZipperPath::Edge(edge) => {
                    let segment = base.segment(edge).ok_or_else(degenerate)?;
                    shift(segment, offset).ok_or_else(degenerate)?
                }
                ZipperPath::ArcSpan {
                    edge,
                    start_angle,
                    end_angle,
                } => match base.segment(edge) {
                    Some(Segment::Arc(arc)) => Segment::Arc(
                        Arc {
                            start_angle,
                            end_angle,
                            ..*arc
                        }
                        .offset(offset.raw()),
                    ),
                    _ => return Err(degenerate()),
                },
            };
            Ok(ZipperMark {
                label_anchor: segment.midpoint(),
                segment,
                label: role.label.to_string(),
            })
        })
        .collect()
}

fn shift(segment: &Segment, offset: Length) -> Option<Segment> {
    if segment.is_degenerate() {
        return None;
    }
    match segment {
        Segment::Line { start, end } => {
            let normal = segment.outward_normal()?;
            let d = normal * offset;
            Some(Segment::line(*start + d, *end + d))
        }
        Segment::Arc(arc) => Some(Segment::Arc(arc.offset(offset.raw()))),
    }
}
