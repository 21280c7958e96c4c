use super::{CushionShape, options};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::dvec2;

accessory_options! {
    pub enum EquilateralTie: Ties {
        TwoCorner => ["2 corner"],
        TwoSide => ["2 side"],
        ThreeCorner => ["3 corner"],
    }
}

accessory_options! {
    pub enum EquilateralZipper: Zipper {
        Side => ["side", "yes"],
    }
}

/// Three equal sides, flat side down
#[derive(Debug, Clone, PartialEq)]
pub struct EquilateralTriangle {
    side: Length,
    ties: Option<EquilateralTie>,
    zipper: Option<EquilateralZipper>,
}

impl EquilateralTriangle {
    const BASE: usize = 0;
    const LEFT: usize = 2;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::EquilateralTriangle)?;
        Ok(EquilateralTriangle {
            side: spec.require("side")?,
            ties,
            zipper,
        })
    }

    pub fn height(&self) -> Length {
        self.side * (3.0f64.sqrt() / 2.0)
    }
}

impl CushionShape for EquilateralTriangle {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::EquilateralTriangle
    }

    fn outline(&self) -> Outline {
        let (s, h) = (self.side.raw(), self.height().raw());
        Outline::polygon(&[dvec2(0.0, 0.0), dvec2(s, 0.0), dvec2(s / 2.0, h)])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let base_corners = [
            TieRole::vertex(0, TieDirection::Left),
            TieRole::vertex(1, TieDirection::Right),
        ];
        let roles = match self.ties {
            None => Vec::new(),
            Some(EquilateralTie::TwoCorner) => base_corners.to_vec(),
            Some(EquilateralTie::TwoSide) => vec![
                TieRole::fraction(Self::BASE, 0.25, TieDirection::Down),
                TieRole::fraction(Self::BASE, 0.75, TieDirection::Down),
            ],
            Some(EquilateralTie::ThreeCorner) => {
                let mut roles = base_corners.to_vec();
                roles.push(TieRole::vertex(2, TieDirection::Up));
                roles
            }
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(EquilateralZipper::Side) => vec![ZipperRole::edge(Self::LEFT)],
            None => Vec::new(),
        }
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let x = self.side.raw() / 2.0;
        vec![
            LabelRole::edge(Self::BASE, self.side),
            LabelRole::chord(dvec2(x, 0.0), dvec2(x, self.height().raw()), self.height()).captioned("Height"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![("Side", self.side)]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(EquilateralTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(EquilateralZipper::name)
    }
}

// ============================================================================
// Right triangle
// ============================================================================

accessory_options! {
    pub enum RightTriangleTie: Ties {
        TwoCorner => ["2 corner"],
        TwoSide => ["2 side"],
    }
}

accessory_options! {
    pub enum RightTriangleZipper: Zipper {
        Width => ["width", "bottom"],
        Length => ["length", "side"],
        Hypotenuse => ["hypotenuse", "angled", "angled side"],
    }
}

/// Right angle at the origin, `width` along x and `length` up y
#[derive(Debug, Clone, PartialEq)]
pub struct RightTriangle {
    width: Length,
    length: Length,
    ties: Option<RightTriangleTie>,
    zipper: Option<RightTriangleZipper>,
}

impl RightTriangle {
    const BOTTOM: usize = 0;
    const HYPOTENUSE: usize = 1;
    const LEFT: usize = 2;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::RightTriangle)?;
        Ok(RightTriangle {
            width: spec.require("width")?,
            length: spec.require("length")?,
            ties,
            zipper,
        })
    }
}

impl CushionShape for RightTriangle {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::RightTriangle
    }

    fn outline(&self) -> Outline {
        let (w, l) = (self.width.raw(), self.length.raw());
        Outline::polygon(&[dvec2(0.0, 0.0), dvec2(w, 0.0), dvec2(0.0, l)])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(RightTriangleTie::TwoCorner) => vec![
                TieRole::vertex(1, TieDirection::Right),
                TieRole::vertex(2, TieDirection::Up),
            ],
            Some(RightTriangleTie::TwoSide) => vec![
                TieRole::fraction(Self::BOTTOM, 0.5, TieDirection::Down),
                TieRole::fraction(Self::LEFT, 0.5, TieDirection::Left),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let edge = match self.zipper {
            Some(RightTriangleZipper::Width) => Self::BOTTOM,
            Some(RightTriangleZipper::Length) => Self::LEFT,
            Some(RightTriangleZipper::Hypotenuse) => Self::HYPOTENUSE,
            None => return Vec::new(),
        };
        vec![ZipperRole::edge(edge)]
    }

    fn labels(&self, outline: &Outline) -> Vec<LabelRole> {
        vec![
            LabelRole::edge(Self::BOTTOM, self.width),
            LabelRole::edge(Self::LEFT, self.length),
            LabelRole::measured(outline, Self::HYPOTENUSE),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![("Width", self.width), ("Length", self.length)]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(RightTriangleTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(RightTriangleZipper::name)
    }
}
