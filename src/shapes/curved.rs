//! Cushions with a curved side: the elliptical-capped `Curved` and the
//! quarter-annulus `CurvedSector`.

use super::{CushionShape, options, require_less};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::{Arc, Outline, Segment};
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::{DVec2, dvec2};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

accessory_options! {
    pub enum CurvedTie: Ties {
        TwoFrontCorner => ["2 front corner", "2 corner"],
        TwoCurvedEdge => ["2 curved edge", "2 curve edge"],
        FourCorner => ["4 corner"],
    }
}

accessory_options! {
    pub enum CurvedZipper: Zipper {
        FrontSide => ["front side", "front"],
        CurvedSide => ["curved side", "curved"],
    }
}

/// A `width` × `side_length` block capped by a half ellipse that brings the
/// middle to `middle_length`
#[derive(Debug, Clone, PartialEq)]
pub struct Curved {
    width: Length,
    side: Length,
    middle: Length,
    ties: Option<CurvedTie>,
    zipper: Option<CurvedZipper>,
}

impl Curved {
    const FRONT: usize = 0;
    const RIGHT: usize = 1;
    const CAP: usize = 2;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::Curved)?;
        let side = spec.require("side_length")?;
        let middle = spec.require("middle_length")?;
        require_less("side_length", side, "middle_length", middle)?;
        Ok(Curved {
            width: spec.require("width")?,
            side,
            middle,
            ties,
            zipper,
        })
    }

    /// How far the cap bulges past the straight sides
    pub fn cap_height(&self) -> Length {
        self.middle - self.side
    }
}

impl CushionShape for Curved {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Curved
    }

    fn outline(&self) -> Outline {
        let (w, s) = (self.width.raw(), self.side.raw());
        let cap = Arc {
            center: dvec2(w / 2.0, s),
            radius_x: w / 2.0,
            radius_y: self.cap_height().raw(),
            start_angle: 0.0,
            end_angle: PI,
        };
        Outline::from_segments(vec![
            Segment::line(dvec2(0.0, 0.0), dvec2(w, 0.0)),
            Segment::line(dvec2(w, 0.0), dvec2(w, s)),
            Segment::Arc(cap),
            Segment::line(dvec2(0.0, s), dvec2(0.0, 0.0)),
        ])
    }

    fn tie_roles(&self, ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let Some(tie) = self.ties else {
            return Ok(Vec::new());
        };
        let roles = match tie {
            CurvedTie::TwoFrontCorner => {
                let distance = ctx.corner_distance(tie.name(), Self::FRONT, Length::ZERO)?;
                vec![
                    TieRole::offset(Self::FRONT, distance, false, TieDirection::Down),
                    TieRole::offset(Self::FRONT, distance, true, TieDirection::Down),
                ]
            }
            CurvedTie::TwoCurvedEdge => vec![
                TieRole::arc(Self::CAP, FRAC_PI_4, TieDirection::Right),
                TieRole::arc(Self::CAP, 3.0 * FRAC_PI_4, TieDirection::Left),
            ],
            CurvedTie::FourCorner => vec![
                TieRole::vertex(0, TieDirection::Down),
                TieRole::vertex(1, TieDirection::Down),
                TieRole::vertex(2, TieDirection::Right),
                TieRole::vertex(3, TieDirection::Left),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(CurvedZipper::FrontSide) => vec![ZipperRole::edge(Self::FRONT)],
            Some(CurvedZipper::CurvedSide) => vec![ZipperRole::edge(Self::CAP)],
            None => Vec::new(),
        }
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let (x, s, m) = (self.width.raw() / 2.0, self.side.raw(), self.middle.raw());
        vec![
            LabelRole::edge(Self::FRONT, self.width),
            LabelRole::edge(Self::RIGHT, self.side),
            LabelRole::chord(dvec2(x, 0.0), dvec2(x, m), self.middle).captioned("Middle"),
            LabelRole::chord(dvec2(x, s), dvec2(x, m), self.cap_height()).captioned("Curve"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![
            ("Width", self.width),
            ("Side Length", self.side),
            ("Middle Length", self.middle),
        ]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(CurvedTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(CurvedZipper::name)
    }
}

// ============================================================================
// Curved sector
// ============================================================================

accessory_options! {
    /// Sector cushions take no ties
    pub enum SectorTie: Ties {}
}

accessory_options! {
    pub enum SectorZipper: Zipper {
        LongSide => ["long side", "long", "back"],
        ShortSide => ["short side", "short", "front"],
    }
}

/// A quarter annulus around the origin between the front (inner) and back
/// (outer) curves
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedSector {
    front_straight: Length,
    back_straight: Length,
    front_curved: Length,
    back_curved: Length,
    ties: Option<SectorTie>,
    zipper: Option<SectorZipper>,
}

impl CurvedSector {
    const BOTTOM_END: usize = 0;
    const OUTER: usize = 1;
    const LEFT_END: usize = 2;
    const INNER: usize = 3;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::CurvedSector)?;
        let front_curved = spec.require("front_width_curved")?;
        let back_curved = spec.require("back_width_curved")?;
        require_less("front_width_curved", front_curved, "back_width_curved", back_curved)?;
        Ok(CurvedSector {
            front_straight: spec.require("front_width_straight")?,
            back_straight: spec.require("back_width_straight")?,
            front_curved,
            back_curved,
            ties,
            zipper,
        })
    }

    fn radii(&self) -> (f64, f64) {
        (self.front_curved.raw() / 2.0, self.back_curved.raw() / 2.0)
    }
}

impl CushionShape for CurvedSector {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::CurvedSector
    }

    fn outline(&self) -> Outline {
        let (r, big_r) = self.radii();
        Outline::from_segments(vec![
            Segment::line(dvec2(r, 0.0), dvec2(big_r, 0.0)),
            Segment::Arc(Arc::circular(DVec2::ZERO, big_r, 0.0, FRAC_PI_2)),
            Segment::line(dvec2(0.0, big_r), dvec2(0.0, r)),
            Segment::Arc(Arc::circular(DVec2::ZERO, r, FRAC_PI_2, 0.0)),
        ])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        match self.ties {
            None => Ok(Vec::new()),
            Some(tie) => match tie {},
        }
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(SectorZipper::LongSide) => vec![ZipperRole::edge(Self::OUTER)],
            Some(SectorZipper::ShortSide) => vec![ZipperRole::edge(Self::INNER)],
            None => Vec::new(),
        }
    }

    fn labels(&self, outline: &Outline) -> Vec<LabelRole> {
        vec![
            LabelRole::measured(outline, Self::OUTER),
            LabelRole::measured(outline, Self::INNER),
            LabelRole::measured(outline, Self::BOTTOM_END),
            LabelRole::measured(outline, Self::LEFT_END),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![
            ("Front Width Straight", self.front_straight),
            ("Back Width Straight", self.back_straight),
            ("Front Width Curved", self.front_curved),
            ("Back Width Curved", self.back_curved),
        ]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(SectorTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(SectorZipper::name)
    }
}
