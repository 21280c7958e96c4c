//! Isosceles trapezoids, plain and with clipped top corners.

use super::{CushionShape, canonical_pair, options, require_less};
use crate::accessories::{AccessoryOption, TieContext, TieDirection, TieRole, ZipperRole, accessory_options};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use glam::dvec2;

accessory_options! {
    pub enum TrapezoidTie: Ties {
        TwoSide => ["2 side"],
        TwoBack => ["2 back"],
        TwoTop => ["2 top"],
        TwoCorner => ["2 corner"],
        FourCorner => ["4 corner"],
    }
}

accessory_options! {
    pub enum TrapezoidZipper: Zipper {
        ShortSide => ["short side", "short", "top"],
        LongSide => ["long side", "long", "bottom"],
        AngledSide => ["angled side", "angled", "angle side"],
        ShortPlusAngled => ["short plus angled", "short side plus angled side", "top plus angled"],
    }
}

/// Two ties on one edge, `distance` in from each end
fn both_ends(edge: usize, distance: Length, direction: TieDirection) -> [TieRole; 2] {
    [
        TieRole::offset(edge, distance, false, direction),
        TieRole::offset(edge, distance, true, direction),
    ]
}

// ============================================================================
// Trapezoid
// ============================================================================

/// `(0,0) (b,0) (o+t,h) (o,h)` with `o = (b - t) / 2`
#[derive(Debug, Clone, PartialEq)]
pub struct Trapezoid {
    top: Length,
    bottom: Length,
    height: Length,
    ties: Option<TrapezoidTie>,
    zipper: Option<TrapezoidZipper>,
}

impl Trapezoid {
    const BOTTOM: usize = 0;
    const RIGHT_SLANT: usize = 1;
    const TOP: usize = 2;
    const LEFT_SLANT: usize = 3;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::Trapezoid)?;
        let (top, bottom) = canonical_pair(spec.require("top_base")?, spec.require("bottom_base")?);
        Ok(Trapezoid {
            top,
            bottom,
            height: spec.require("height")?,
            ties,
            zipper,
        })
    }

    fn inset(&self) -> Length {
        (self.bottom - self.top).half()
    }

    pub fn slant(&self) -> Length {
        self.inset().hypot(self.height)
    }
}

impl CushionShape for Trapezoid {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::Trapezoid
    }

    fn outline(&self) -> Outline {
        let (t, b, h, o) = (self.top.raw(), self.bottom.raw(), self.height.raw(), self.inset().raw());
        Outline::polygon(&[dvec2(0.0, 0.0), dvec2(b, 0.0), dvec2(o + t, h), dvec2(o, h)])
    }

    fn tie_roles(&self, ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let Some(tie) = self.ties else {
            return Ok(Vec::new());
        };
        let distance =
            |edge: usize| ctx.corner_distance(tie.name(), edge, ctx.default_corner_distance(edge));

        let roles = match tie {
            TrapezoidTie::TwoSide => vec![
                TieRole::offset(Self::RIGHT_SLANT, distance(Self::RIGHT_SLANT)?, false, TieDirection::Right),
                TieRole::offset(Self::LEFT_SLANT, distance(Self::LEFT_SLANT)?, true, TieDirection::Left),
            ],
            TrapezoidTie::TwoBack => both_ends(Self::BOTTOM, distance(Self::BOTTOM)?, TieDirection::Down).to_vec(),
            TrapezoidTie::TwoTop => both_ends(Self::TOP, distance(Self::TOP)?, TieDirection::Up).to_vec(),
            TrapezoidTie::TwoCorner => vec![
                TieRole::vertex(0, TieDirection::Down),
                TieRole::vertex(1, TieDirection::Down),
            ],
            TrapezoidTie::FourCorner => vec![
                TieRole::vertex(0, TieDirection::Down),
                TieRole::vertex(1, TieDirection::Down),
                TieRole::vertex(2, TieDirection::Up),
                TieRole::vertex(3, TieDirection::Up),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let edges: &[usize] = match self.zipper {
            Some(TrapezoidZipper::ShortSide) => &[Self::TOP],
            Some(TrapezoidZipper::LongSide) => &[Self::BOTTOM],
            Some(TrapezoidZipper::AngledSide) => &[Self::RIGHT_SLANT],
            Some(TrapezoidZipper::ShortPlusAngled) => &[Self::TOP, Self::RIGHT_SLANT],
            None => &[],
        };
        edges.iter().copied().map(ZipperRole::edge).collect()
    }

    fn labels(&self, _outline: &Outline) -> Vec<LabelRole> {
        let o = self.inset().raw();
        vec![
            LabelRole::edge(Self::TOP, self.top),
            LabelRole::edge(Self::BOTTOM, self.bottom),
            LabelRole::edge(Self::RIGHT_SLANT, self.slant()),
            LabelRole::chord(dvec2(o, 0.0), dvec2(o, self.height.raw()), self.height).captioned("Height"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![
            ("Top Base", self.top),
            ("Bottom Base", self.bottom),
            ("Height", self.height),
        ]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(TrapezoidTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(TrapezoidZipper::name)
    }
}

// ============================================================================
// Clipped trapezoid
// ============================================================================

accessory_options! {
    pub enum ClippedTie: Ties {
        TwoBack => ["2 back"],
        TwoCorner => ["2 corner"],
        TwoSide => ["2 side"],
        FourCorner => ["4 corner"],
    }
}

accessory_options! {
    pub enum ClippedZipper: Zipper {
        LongSide => ["long side", "long"],
        ShortSide => ["short side", "short"],
        AngleSide => ["angle side", "angled side", "angled"],
        TopPlusAngled => ["top plus angled", "short plus angled"],
    }
}

/// A `bottom` × `height` block whose top corners are cut so each angled edge
/// rises `edge` over a run of `(bottom - top) / 2`:
/// `(0,0) (b,0) (b,h-e) (o+t,h) (o,h) (0,h-e)`
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedTrapezoid {
    top: Length,
    bottom: Length,
    height: Length,
    edge: Length,
    ties: Option<ClippedTie>,
    zipper: Option<ClippedZipper>,
}

impl ClippedTrapezoid {
    const BOTTOM: usize = 0;
    const RIGHT_SIDE: usize = 1;
    const RIGHT_ANGLED: usize = 2;
    const TOP: usize = 3;
    const LEFT_ANGLED: usize = 4;
    const LEFT_SIDE: usize = 5;

    pub fn from_spec(spec: &CushionSpec) -> Result<Self, DiagramError> {
        let (ties, zipper) = options(spec, ShapeFamily::ClippedTrapezoid)?;
        let (top, bottom) = canonical_pair(spec.require("top_width")?, spec.require("bottom_width")?);
        let height = spec.require("height")?;
        let edge = spec.require("edge")?;
        require_less("edge", edge, "height", height)?;
        Ok(ClippedTrapezoid {
            top,
            bottom,
            height,
            edge,
            ties,
            zipper,
        })
    }

    fn inset(&self) -> Length {
        (self.bottom - self.top).half()
    }

    /// Length of each clipped corner edge
    pub fn angled_edge(&self) -> Length {
        self.edge.hypot(self.inset())
    }
}

impl CushionShape for ClippedTrapezoid {
    fn family(&self) -> ShapeFamily {
        ShapeFamily::ClippedTrapezoid
    }

    fn outline(&self) -> Outline {
        let (t, b, h, e) = (self.top.raw(), self.bottom.raw(), self.height.raw(), self.edge.raw());
        let o = self.inset().raw();
        Outline::polygon(&[
            dvec2(0.0, 0.0),
            dvec2(b, 0.0),
            dvec2(b, h - e),
            dvec2(o + t, h),
            dvec2(o, h),
            dvec2(0.0, h - e),
        ])
    }

    fn tie_roles(&self, _ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError> {
        let roles = match self.ties {
            None => Vec::new(),
            Some(ClippedTie::TwoBack) => vec![
                TieRole::fraction(Self::BOTTOM, 1.0 / 3.0, TieDirection::Down),
                TieRole::fraction(Self::BOTTOM, 2.0 / 3.0, TieDirection::Down),
            ],
            Some(ClippedTie::TwoCorner) => vec![
                TieRole::vertex(4, TieDirection::Up),
                TieRole::vertex(3, TieDirection::Up),
            ],
            Some(ClippedTie::TwoSide) => vec![
                TieRole::fraction(Self::RIGHT_ANGLED, 0.5, TieDirection::Right),
                TieRole::fraction(Self::LEFT_ANGLED, 0.5, TieDirection::Left),
            ],
            Some(ClippedTie::FourCorner) => vec![
                TieRole::vertex(0, TieDirection::Down),
                TieRole::vertex(1, TieDirection::Down),
                TieRole::vertex(3, TieDirection::Up),
                TieRole::vertex(4, TieDirection::Up),
            ],
        };
        Ok(roles)
    }

    fn zipper_roles(&self) -> Vec<ZipperRole> {
        let edges: &[usize] = match self.zipper {
            Some(ClippedZipper::LongSide) => &[Self::BOTTOM],
            Some(ClippedZipper::ShortSide) => &[Self::TOP],
            Some(ClippedZipper::AngleSide) => &[Self::LEFT_ANGLED],
            Some(ClippedZipper::TopPlusAngled) => &[Self::TOP, Self::LEFT_ANGLED],
            None => &[],
        };
        edges.iter().copied().map(ZipperRole::edge).collect()
    }

    fn labels(&self, outline: &Outline) -> Vec<LabelRole> {
        let x = self.bottom.raw() / 2.0;
        vec![
            LabelRole::edge(Self::TOP, self.top),
            LabelRole::edge(Self::BOTTOM, self.bottom),
            LabelRole::edge(Self::RIGHT_ANGLED, self.angled_edge()),
            LabelRole::measured(outline, Self::RIGHT_SIDE),
            LabelRole::measured(outline, Self::LEFT_SIDE),
            LabelRole::chord(dvec2(x, 0.0), dvec2(x, self.height.raw()), self.height).captioned("Height"),
        ]
    }

    fn dimension_rows(&self) -> Vec<(&'static str, Length)> {
        vec![
            ("Top Width", self.top),
            ("Bottom Width", self.bottom),
            ("Height", self.height),
            ("Edge", self.edge),
        ]
    }

    fn tie_option(&self) -> Option<&'static str> {
        self.ties.map(ClippedTie::name)
    }

    fn zipper_option(&self) -> Option<&'static str> {
        self.zipper.map(ClippedZipper::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessories::TieAnchor;
    use crate::shapes::test_support::{assert_well_formed, spec};
    use crate::spec::RequestedOffset;
    use serde_json::json;

    // ==================== trapezoid tests ====================

    #[test]
    fn swapped_bases_give_the_same_outline() {
        let swapped = Trapezoid::from_spec(&spec(json!({"top_base": 114, "bottom_base": 59, "height": 26}))).unwrap();
        let canonical = Trapezoid::from_spec(&spec(json!({"top_base": 59, "bottom_base": 114, "height": 26}))).unwrap();
        assert_eq!(swapped.outline(), canonical.outline());
        assert_well_formed(&canonical.outline());
        assert_eq!(canonical.outline().vertex(3), Some(dvec2(27.5, 26.0)));
    }

    #[test]
    fn slant_is_derived_from_vertices() {
        let trap = Trapezoid::from_spec(&spec(json!({"top_base": 114, "bottom_base": 59, "height": 26}))).unwrap();
        insta::assert_snapshot!(trap.slant().to_string(), @r#"37.85""#);
        let measured = trap.outline().segment(Trapezoid::RIGHT_SLANT).unwrap().length();
        assert!((measured - trap.slant().raw()).abs() < 1e-9);
    }

    #[test]
    fn side_ties_default_to_corner_offset() {
        let trap = Trapezoid::from_spec(&spec(json!({
            "top_base": 59, "bottom_base": 114, "height": 26, "ties": "2 Side Ties"
        })))
        .unwrap();
        let outline = trap.outline();
        let bad = RequestedOffset::Invalid("n/a".into());
        let ctx = TieContext {
            base: &outline,
            from_corner: Some(&bad),
            along_length: None,
            along_width: None,
            corner_offset: Length::inches(4.0),
            min_edge: Length::inches(1.0),
        };
        let roles = trap.tie_roles(&ctx).unwrap();
        assert_eq!(roles.len(), 2);
        for role in roles {
            match role.anchor {
                TieAnchor::EdgeOffset { distance, .. } => assert_eq!(distance, Length::inches(4.0)),
                other => panic!("unexpected anchor {other:?}"),
            }
        }
    }

    #[test]
    fn composite_zipper_uses_two_edges() {
        let trap = Trapezoid::from_spec(&spec(json!({
            "top_base": 59, "bottom_base": 114, "height": 26, "zipper": "Short Plus Angled"
        })))
        .unwrap();
        assert_eq!(
            trap.zipper_roles(),
            vec![ZipperRole::edge(Trapezoid::TOP), ZipperRole::edge(Trapezoid::RIGHT_SLANT)]
        );
        assert_eq!(trap.zipper_option(), Some("short plus angled"));
    }

    // ==================== clipped trapezoid tests ====================

    #[test]
    fn clipped_angled_edge() {
        let clipped = ClippedTrapezoid::from_spec(&spec(json!({
            "bottom_width": 80, "top_width": 50, "height": 30, "edge": 10
        })))
        .unwrap();
        let outline = clipped.outline();
        assert_well_formed(&outline);
        assert_eq!(outline.len(), 6);
        insta::assert_snapshot!(clipped.angled_edge().to_string(), @r#"18.03""#);
        let left = outline.segment(ClippedTrapezoid::LEFT_ANGLED).unwrap().length();
        assert!((left - 325f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn clip_must_be_below_height() {
        let err = ClippedTrapezoid::from_spec(&spec(json!({
            "bottom_width": 80, "top_width": 50, "height": 10, "edge": 10
        })))
        .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r#"dimension `edge` is inconsistent: 10" must be less than height (10")"#);
    }

    #[test]
    fn clipped_back_ties_at_thirds() {
        let clipped = ClippedTrapezoid::from_spec(&spec(json!({
            "bottom_width": 90, "top_width": 50, "height": 30, "edge": 10, "ties": "2 Back"
        })))
        .unwrap();
        let outline = clipped.outline();
        let ctx = TieContext {
            base: &outline,
            from_corner: None,
            along_length: None,
            along_width: None,
            corner_offset: Length::inches(4.0),
            min_edge: Length::inches(1.0),
        };
        let marks = crate::accessories::place_ties(&clipped.tie_roles(&ctx).unwrap(), &outline, &outline).unwrap();
        assert!(marks[0].anchor.distance(dvec2(30.0, 0.0)) < 1e-9);
        assert!(marks[1].anchor.distance(dvec2(60.0, 0.0)) < 1e-9);
    }

    // ==================== order form wording tests ====================

    #[test]
    fn trapezoid_accepts_order_form_zippers() {
        let cases = [
            ("Short Side", "short side"),
            ("Long Side", "long side"),
            ("Angled Side", "angled side"),
            ("ShortPlusAngled", "short plus angled"),
        ];
        for (raw, name) in cases {
            let trap = Trapezoid::from_spec(&spec(json!({
                "top_base": 59, "bottom_base": 114, "height": 26, "zipper": raw
            })))
            .unwrap();
            assert_eq!(trap.zipper_option(), Some(name), "{raw}");
        }
    }

    #[test]
    fn clipped_trapezoid_accepts_order_form_options() {
        let zippers = [
            ("long side", "long side"),
            ("short side", "short side"),
            ("angle side", "angle side"),
            ("TopPlusAngled", "top plus angled"),
        ];
        for (raw, name) in zippers {
            let clipped = ClippedTrapezoid::from_spec(&spec(json!({
                "top_width": 50, "bottom_width": 80, "height": 30, "edge": 10, "zipper": raw
            })))
            .unwrap();
            assert_eq!(clipped.zipper_option(), Some(name), "{raw}");
        }
        for raw in ["2 back", "2 side", "2 corner", "4 corner"] {
            let clipped = ClippedTrapezoid::from_spec(&spec(json!({
                "top_width": 50, "bottom_width": 80, "height": 30, "edge": 10, "ties": raw
            })))
            .unwrap();
            assert_eq!(clipped.tie_option(), Some(raw));
        }
    }
}
