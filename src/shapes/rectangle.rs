use super::{CushionShape, options};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options, ties};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::dvec2;

accessory_options! {
    pub enum RectangleTie: Ties {
        TwoSideShort => ["2 side", "2 side short"],
        TwoSideLong => ["2 side long"],
        FourSideShort => ["4 side", "4 side short"],
        FourSideLong => ["4 side long"],
        FourCorner => ["4 corner"],
        TwoBackside => ["2 backside", "2 back side"],
    }
}

accessory_options! {
    pub enum RectangleZipper: Zipper {
        LongSide => ["long side", "long"],
        ShortSide => ["short side", "short"],
    }
}

// Edges, counter-clockwise from the origin
const BOTTOM: usize = 0;
const RIGHT: usize = 1;
const TOP: usize = 2;
const LEFT: usize = 3;

/// `length` runs along x, `width` along y
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    length: Length,
    width: Length,
    ties: Option<RectangleTie>,
    zipper: Option<RectangleZipper>,
}

impl Rectangle {
    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::Rectangle)?;
        Ok(Rectangle {
            length: spec.require("length")?,
            width: spec.require("width")?,
            ties,
            zipper,
        })
    }

    /// The two short edges, then the two long ones
    fn sides(&self) -> ([usize; 2], [usize; 2]) {
        if self.width <= self.length {
            ([RIGHT, LEFT], [TOP, BOTTOM])
        } else {
            ([TOP, BOTTOM], [RIGHT, LEFT])
        }
    }
}

fn outward(edge: usize) -> TieDirection {
    match edge {
        BOTTOM => TieDirection::Down,
        RIGHT => TieDirection::Right,
        TOP => TieDirection::Up,
        _ => TieDirection::Left,
    }
}

/// Left and top edges run backwards, so their lower/left corner is the end
fn lower_left_is_end(edge: usize) -> bool {
    matches!(edge, TOP | LEFT)
}

impl CushionShape for Rectangle {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Rectangle
    }

    fn outline(&self) -> Outline {
        let (l, w) = (self.length.raw(), self.width.raw());
        Outline::polygon(&[dvec2(0.0, 0.0), dvec2(l, 0.0), dvec2(l, w), dvec2(0.0, w)])
    }

    fn tie_roles(&self, ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let Some(tie) = self.ties else {
            return Ok(Vec::new());
        };
        let (short, long) = self.sides();
        let short_side = self.length.min(self.width);

        // two-side ties sit on one edge each, measured from the lower/left corner
        let two_side = |edges: [usize; 2]| -> Result<Vec<TieRole>, AccessoryPlacementError> {
            edges
                .into_iter()
                .map(|edge| {
                    let distance = ctx.corner_distance(tie.name(), edge, ctx.edge_length(edge).half())?;
                    Ok(TieRole::offset(edge, distance, lower_left_is_end(edge), outward(edge)))
                })
                .collect()
        };

        match tie {
            RectangleTie::TwoSideShort => two_side(short),
            RectangleTie::TwoSideLong => two_side(long),
            RectangleTie::FourSideShort | RectangleTie::FourSideLong => {
                let edges = if tie == RectangleTie::FourSideShort { short } else { long };
                let mut roles = Vec::new();
                for edge in edges {
                    let default = (short_side * 0.2).min(ctx.corner_offset);
                    let distance = ctx.corner_distance(tie.name(), edge, default)?;
                    roles.push(TieRole::offset(edge, distance, false, outward(edge)));
                    roles.push(TieRole::offset(edge, distance, true, outward(edge)));
                }
                Ok(roles)
            }
            RectangleTie::FourCorner => Ok(vec![
                TieRole::vertex(0, TieDirection::Left),
                TieRole::vertex(1, TieDirection::Right),
                TieRole::vertex(2, TieDirection::Right),
                TieRole::vertex(3, TieDirection::Left),
            ]),
            RectangleTie::TwoBackside => Ok(ties::backside_points(ctx, self.length, self.width)
                .into_iter()
                .map(|p| TieRole::interior(p, TieDirection::Up))
                .collect()),
        }
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let (short, long) = self.sides();
        match self.zipper {
            Some(RectangleZipper::LongSide) => vec![ZipperRole::edge(long[0])],
            Some(RectangleZipper::ShortSide) => vec![ZipperRole::edge(short[0])],
            None => Vec::new(),
        }
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        vec![
            LabelRole::edge(BOTTOM, self.length),
            LabelRole::edge(LEFT, self.width),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![("Length", self.length), ("Width", self.width)]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(RectangleTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(RectangleZipper::name)
    }
}
