//! Round and semi-round cushions.

use super::{CushionShape, options};
use crate::accessories::{
    AccessoryOption, TieContext, TieDirection, TieRole, ZipperPath, ZipperRole, accessory_options,
};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::{Arc, Outline, Segment};
use crate::spec::CushionSpec;
use crate::types::{Length, Vertex};
use glam::dvec2;
use std::f64::consts::{FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI, TAU};

accessory_options! {
    pub enum RoundTie: Ties {
        FourEvenlySpaced => ["4 evenly spaced", "4 evenly spaced around"],
        TwoMiddle => ["2 middle"],
        TwoBack => ["2 back"],
    }
}

accessory_options! {
    pub enum RoundZipper: Zipper {
        OneThirdSide => ["1/3 side", "one third", "1/3", "yes"],
    }
}

/// One full circle of `diameter`, centered at `(r, r)`
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    diameter: Length,
    ties: Option<RoundTie>,
    zipper: Option<RoundZipper>,
}

impl Round {
    const RIM: usize = 0;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::Round)?;
        Ok(Round {
            diameter: spec.require("diameter")?,
            ties,
            zipper,
        })
    }

    fn radius(&self) -> Length {
        self.diameter.half()
    }

    fn center(&self) -> Vertex {
        let r = self.radius().raw();
        dvec2(r, r)
    }
}

impl CushionShape for Round {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Round
    }

    fn outline(&self) -> Outline {
        Outline::from_segments(vec![Segment::Arc(Arc::circular(
            self.center(),
            self.radius().raw(),
            0.0,
            TAU,
        ))])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(RoundTie::FourEvenlySpaced) => vec![
                TieRole::arc(Self::RIM, FRAC_PI_4, TieDirection::Right),
                TieRole::arc(Self::RIM, 3.0 * FRAC_PI_4, TieDirection::Left),
                TieRole::arc(Self::RIM, 5.0 * FRAC_PI_4, TieDirection::Left),
                TieRole::arc(Self::RIM, 7.0 * FRAC_PI_4, TieDirection::Right),
            ],
            Some(RoundTie::TwoMiddle) => vec![
                TieRole::arc(Self::RIM, 0.0, TieDirection::Right),
                TieRole::arc(Self::RIM, PI, TieDirection::Left),
            ],
            Some(RoundTie::TwoBack) => {
                let c = self.center();
                let r = self.radius().raw();
                vec![
                    TieRole::interior(dvec2(c.x - r / 2.0, c.y - r / 4.0), TieDirection::Down),
                    TieRole::interior(dvec2(c.x + r / 2.0, c.y - r / 4.0), TieDirection::Down),
                ]
            }
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(RoundZipper::OneThirdSide) => vec![ZipperRole {
                path: ZipperPath::ArcSpan {
                    edge: Self::RIM,
                    start_angle: FRAC_PI_6,
                    end_angle: PI - FRAC_PI_6,
                },
                label: "Zipper (1/3 Side)",
            }],
            None => Vec::new(),
        }
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let c = self.center();
        let r = self.radius().raw();
        vec![
            LabelRole::chord(dvec2(0.0, c.y), dvec2(2.0 * r, c.y), self.diameter).captioned("Diameter"),
            LabelRole::chord(c, dvec2(c.x, c.y - r), self.radius()).captioned("Radius"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![("Diameter", self.diameter)]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(RoundTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(RoundZipper::name)
    }
}

// ============================================================================
// Semi-round
// ============================================================================

accessory_options! {
    pub enum SemiRoundTie: Ties {
        TwoCurveEdge => ["2 curve edge", "2 curved edge"],
        TwoFlatCorner => ["2 flat corner"],
        FourCorner => ["4 corner"],
    }
}

accessory_options! {
    pub enum SemiRoundZipper: Zipper {
        TopCurved => ["top curved", "curved"],
        BottomStraight => ["bottom straight", "straight"],
    }
}

/// A flat chord of `diameter` along y = 0, capped by a half circle
#[derive(Debug, Clone, PartialEq)]
pub struct SemiRound {
    diameter: Length,
    ties: Option<SemiRoundTie>,
    zipper: Option<SemiRoundZipper>,
}

impl SemiRound {
    const CHORD: usize = 0;
    const CURVE: usize = 1;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::SemiRound)?;
        Ok(SemiRound {
            diameter: spec.require("diameter")?,
            ties,
            zipper,
        })
    }

    fn radius(&self) -> Length {
        self.diameter.half()
    }
}

impl CushionShape for SemiRound {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::SemiRound
    }

    fn outline(&self) -> Outline {
        let (d, r) = (self.diameter.raw(), self.radius().raw());
        Outline::from_segments(vec![
            Segment::line(dvec2(0.0, 0.0), dvec2(d, 0.0)),
            Segment::Arc(Arc::circular(dvec2(r, 0.0), r, 0.0, PI)),
        ])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let curve = [
            TieRole::arc(Self::CURVE, FRAC_PI_3, TieDirection::Right),
            TieRole::arc(Self::CURVE, 2.0 * FRAC_PI_3, TieDirection::Left),
        ];
        let flat = [
            TieRole::vertex(0, TieDirection::Down),
            TieRole::vertex(1, TieDirection::Down),
        ];
        let roles = match self.ties {
            None => Vec::new(),
            Some(SemiRoundTie::TwoCurveEdge) => curve.to_vec(),
            Some(SemiRoundTie::TwoFlatCorner) => flat.to_vec(),
            Some(SemiRoundTie::FourCorner) => flat.into_iter().chain(curve).collect(),
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        match self.zipper {
            Some(SemiRoundZipper::TopCurved) => vec![ZipperRole::edge(Self::CURVE)],
            Some(SemiRoundZipper::BottomStraight) => vec![ZipperRole::edge(Self::CHORD)],
            None => Vec::new(),
        }
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let r = self.radius().raw();
        vec![
            LabelRole::edge(Self::CHORD, self.diameter).captioned("Diameter"),
            LabelRole::chord(dvec2(r, 0.0), dvec2(r, r), self.radius()).captioned("Radius"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![("Diameter", self.diameter)]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(SemiRoundTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(SemiRoundZipper::name)
    }
}
