//! L- and T-shaped cushions: orthogonal polygons with a notch for an ear.

use super::{CushionShape, options, require_less};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::dvec2;

/// Dimensions shared by both shapes
#[derive(Debug, Clone, Copy, PartialEq)]
struct Notched {
    length: Length,
    top_width: Length,
    bottom_width: Length,
    ear: Length,
}

impl Notched {
    fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let length = spec.require("length")?;
        let ear = spec.require("ear")?;
        require_less("ear", ear, "length", length)?;
        Ok(Notched {
            length,
            top_width: spec.require("top_width")?,
            bottom_width: spec.require("bottom_width")?,
            ear,
        })
    }

    fn rows(&self) -> Vec<(&'static str, Length)> {
        vec![
            ("Length", self.length),
            ("Top Width", self.top_width),
            ("Bottom Width", self.bottom_width),
            ("Ear", self.ear),
        ]
    }
}

// ============================================================================
// L-shape
// ============================================================================

accessory_options! {
    pub enum LShapeTie: Ties {
        TwoCornerAlongLength => ["2 corner along length", "2 corner along the length"],
        TwoLengthSide => ["2 length side", "2 side along length"],
        TwoAlongWidth => ["2 along the width", "2 along width"],
        ThreeCorner => ["3 corner"],
    }
}

accessory_options! {
    pub enum LShapeZipper: Zipper {
        Length => ["length"],
        TopWidth => ["top width"],
        BottomWidth => ["bottom width"],
    }
}

/// Full `bottom_width` on the left, stepping down to `top_width` over the
/// last `ear` inches on the right:
/// `(0,0) (L-ear,0) (L-ear,eh) (L,eh) (L,bottom) (0,bottom)`
#[derive(Debug, Clone, PartialEq)]
pub struct LShape {
    dims: Notched,
    ties: Option<LShapeTie>,
    zipper: Option<LShapeZipper>,
}

impl LShape {
    const BOTTOM: usize = 0;
    const EAR: usize = 2;
    const RIGHT: usize = 3;
    const TOP: usize = 4;
    const LEFT: usize = 5;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::LShape)?;
        Ok(LShape {
            dims: Notched::from_spec(spec)?,
            ties,
            zipper,
        })
    }

    /// Height of the step where the ear starts
    fn ear_height(&self) -> Length {
        self.dims.bottom_width - self.dims.top_width
    }
}

impl CushionShape for LShape {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::LShape
    }

    fn outline(&self) -> Outline {
        let Notched {
            length, bottom_width, ear, ..
        } = self.dims;
        let (l, b, ear) = (length.raw(), bottom_width.raw(), ear.raw());
        let eh = self.ear_height().raw();
        Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(l - ear, 0.0),
            dvec2(l - ear, eh),
            dvec2(l, eh),
            dvec2(l, b),
            dvec2(0.0, b),
        ])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(LShapeTie::TwoCornerAlongLength) => vec![
                TieRole::vertex(4, TieDirection::Up),
                TieRole::vertex(5, TieDirection::Up),
            ],
            Some(LShapeTie::TwoLengthSide) => vec![
                TieRole::fraction(Self::TOP, 0.25, TieDirection::Up),
                TieRole::fraction(Self::TOP, 0.75, TieDirection::Up),
            ],
            Some(LShapeTie::TwoAlongWidth) => vec![
                TieRole::fraction(Self::RIGHT, 0.25, TieDirection::Right),
                TieRole::fraction(Self::RIGHT, 0.75, TieDirection::Right),
            ],
            Some(LShapeTie::ThreeCorner) => vec![
                TieRole::vertex(0, TieDirection::Left),
                TieRole::vertex(4, TieDirection::Right),
                TieRole::vertex(5, TieDirection::Left),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(LShapeZipper::Length) => vec![ZipperRole::edge(Self::TOP)],
            Some(LShapeZipper::TopWidth) => vec![ZipperRole::edge(Self::RIGHT)],
            Some(LShapeZipper::BottomWidth) => vec![ZipperRole::edge(Self::LEFT)],
            None => Vec::new(),
        }
    }

    fn labels(&self, outline: &Outline) -> Vec<LabelRole> {
        vec![
            LabelRole::edge(Self::TOP, self.dims.length),
            LabelRole::edge(Self::RIGHT, self.dims.top_width),
            LabelRole::edge(Self::LEFT, self.dims.bottom_width),
            LabelRole::edge(Self::EAR, self.dims.ear),
            LabelRole::measured(outline, Self::BOTTOM),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        self.dims.rows()
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(LShapeTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(LShapeZipper::name)
    }
}

// ============================================================================
// T-shape
// ============================================================================

accessory_options! {
    pub enum TShapeTie: Ties {
        TwoCornerTopWidth => ["2 corner top width"],
        TwoCornerBottomWidth => ["2 corner bottom width", "2 corner"],
        TwoSideAlongLength => ["2 side along length", "2 side"],
        FourCorner => ["4 corner"],
    }
}

accessory_options! {
    pub enum TShapeZipper: Zipper {
        TopWidth => ["top width"],
        BottomWidth => ["bottom width"],
        Ear => ["ear"],
        Length => ["length"],
    }
}

/// A `top_width` head `ear` inches deep on the left, with a centered
/// `bottom_width` stem running out to `length`
#[derive(Debug, Clone, PartialEq)]
pub struct TShape {
    dims: Notched,
    ties: Option<TShapeTie>,
    zipper: Option<TShapeZipper>,
}

impl TShape {
    const HEAD_BOTTOM: usize = 0;
    const STEM_BOTTOM: usize = 2;
    const STEM_END: usize = 3;
    const STEM_TOP: usize = 4;
    const HEAD_TOP: usize = 6;
    const HEAD_SIDE: usize = 7;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::TShape)?;
        Ok(TShape {
            dims: Notched::from_spec(spec)?,
            ties,
            zipper,
        })
    }

    /// How far the head overhangs the stem on each side
    fn overhang(&self) -> Length {
        (self.dims.top_width - self.dims.bottom_width).half()
    }
}

impl CushionShape for TShape {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::TShape
    }

    fn outline(&self) -> Outline {
        let (l, top, ear) = (self.dims.length.raw(), self.dims.top_width.raw(), self.dims.ear.raw());
        let n = self.overhang().raw();
        Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(ear, 0.0),
            dvec2(ear, n),
            dvec2(l, n),
            dvec2(l, top - n),
            dvec2(ear, top - n),
            dvec2(ear, top),
            dvec2(0.0, top),
        ])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(TShapeTie::TwoCornerTopWidth) => vec![
                TieRole::vertex(0, TieDirection::Left),
                TieRole::vertex(7, TieDirection::Left),
            ],
            Some(TShapeTie::TwoCornerBottomWidth) => vec![
                TieRole::vertex(3, TieDirection::Right),
                TieRole::vertex(4, TieDirection::Right),
            ],
            Some(TShapeTie::TwoSideAlongLength) => vec![
                TieRole::fraction(Self::STEM_TOP, 0.5, TieDirection::Up),
                TieRole::fraction(Self::STEM_BOTTOM, 0.5, TieDirection::Down),
            ],
            Some(TShapeTie::FourCorner) => vec![
                TieRole::vertex(0, TieDirection::Left),
                TieRole::vertex(3, TieDirection::Right),
                TieRole::vertex(4, TieDirection::Right),
                TieRole::vertex(7, TieDirection::Left),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let edges: &[usize] = match self.zipper {
            Some(TShapeZipper::TopWidth) => &[Self::HEAD_SIDE],
            Some(TShapeZipper::BottomWidth) => &[Self::STEM_END],
            Some(TShapeZipper::Ear) => &[Self::HEAD_BOTTOM],
            Some(TShapeZipper::Length) => &[Self::HEAD_TOP, Self::STEM_TOP],
            None => &[],
        };
        edges.iter().copied().map(ZipperRole::edge).collect()
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let mid = self.dims.top_width.raw() / 2.0;
        vec![
            LabelRole::edge(Self::HEAD_SIDE, self.dims.top_width),
            LabelRole::edge(Self::STEM_END, self.dims.bottom_width),
            LabelRole::edge(Self::HEAD_BOTTOM, self.dims.ear),
            LabelRole::chord(dvec2(0.0, mid), dvec2(self.dims.length.raw(), mid), self.dims.length)
                .captioned("Length"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        self.dims.rows()
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(TShapeTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(TShapeZipper::name)
    }
}
