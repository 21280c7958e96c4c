//! Right trapezoid bolsters and the left/right cushions cut the same way.

use super::{CushionShape, canonical_pair, options};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::dvec2;

accessory_options! {
    pub enum BolsterTie: Ties {
        TwoCorner => ["2 corner"],
        TwoSide => ["2 side"],
    }
}

accessory_options! {
    pub enum BolsterZipper: Zipper {
        ShortSide => ["short side", "top"],
        LongSide => ["long side", "bottom", "bottom length"],
        Angled => ["angled", "angled side"],
    }
}

/// Which side the square edge is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BolsterHand {
    /// Square on the left, slant on the right
    Right,
    /// Square on the right, slant on the left
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bolster {
    hand: BolsterHand,
    top: Length,
    bottom: Length,
    height: Length,
    /// Tapered bolsters take their thickness from `length`
    thickness: Option<Length>,
    tapered: bool,
    ties: Option<BolsterTie>,
    zipper: Option<BolsterZipper>,
}

impl Bolster {
    const BOTTOM: usize = 0;
    const RIGHT: usize = 1;
    const TOP: usize = 2;
    const LEFT: usize = 3;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::RightTrapezoidBolster)?;
        let tapered = spec.has_positive("top_thickness") && spec.has_positive("bottom_thickness");
        let (top, bottom, height, thickness) = if tapered {
            (
                spec.require("top_thickness")?,
                spec.require("bottom_thickness")?,
                spec.require("height")?,
                spec.optional("length"),
            )
        } else {
            (
                spec.require("top_width")?,
                spec.require("bottom_width")?,
                spec.require("length")?,
                None,
            )
        };
        let (top, bottom) = canonical_pair(top, bottom);
        let hand = if spec.name_contains("left") {
            BolsterHand::Left
        } else {
            BolsterHand::Right
        };
        Ok(Bolster {
            hand,
            top,
            bottom,
            height,
            thickness,
            tapered,
            ties,
            zipper,
        })
    }

    pub fn hand(&self) -> BolsterHand {
        self.hand
    }

    fn angled_edge(&self) -> usize {
        match self.hand {
            BolsterHand::Right => Self::RIGHT,
            BolsterHand::Left => Self::LEFT,
        }
    }

    fn square_edge(&self) -> usize {
        match self.hand {
            BolsterHand::Right => Self::LEFT,
            BolsterHand::Left => Self::RIGHT,
        }
    }
}

impl CushionShape for Bolster {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::RightTrapezoidBolster
    }

    fn outline(&self) -> Outline {
        let (t, b, h) = (self.top.raw(), self.bottom.raw(), self.height.raw());
        match self.hand {
            BolsterHand::Right => Outline::polygon(&[dvec2(0.0, 0.0), dvec2(b, 0.0), dvec2(t, h), dvec2(0.0, h)]),
            BolsterHand::Left => Outline::polygon(&[dvec2(0.0, 0.0), dvec2(b, 0.0), dvec2(b, h), dvec2(b - t, h)]),
        }
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(BolsterTie::TwoCorner) => vec![
                TieRole::vertex(0, TieDirection::Down),
                TieRole::vertex(1, TieDirection::Down),
            ],
            Some(BolsterTie::TwoSide) => vec![
                TieRole::fraction(Self::RIGHT, 0.5, TieDirection::Right),
                TieRole::fraction(Self::LEFT, 0.5, TieDirection::Left),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let edge = match self.zipper {
            Some(BolsterZipper::ShortSide) => Self::TOP,
            Some(BolsterZipper::LongSide) => Self::BOTTOM,
            Some(BolsterZipper::Angled) => self.angled_edge(),
            None => return Vec::new(),
        };
        vec![ZipperRole::edge(edge)]
    }

    fn labels(&self, outline: &Outline) -> Vec<LabelRole> {
        vec![
            LabelRole::edge(Self::BOTTOM, self.bottom),
            LabelRole::edge(Self::TOP, self.top),
            LabelRole::edge(self.square_edge(), self.height),
            LabelRole::measured(outline, self.angled_edge()),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        if self.tapered {
            vec![
                ("Top Thickness", self.top),
                ("Bottom Thickness", self.bottom),
                ("Height", self.height),
            ]
        } else {
            vec![
                ("Top Width", self.top),
                ("Bottom Width", self.bottom),
                ("Length", self.height),
            ]
        }
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(BolsterTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(BolsterZipper::name)
    }

    fn thickness(&self, spec: &CushionSpec) -> Option<Length> {
        self.thickness.or_else(|| spec.thickness())
    }
}
