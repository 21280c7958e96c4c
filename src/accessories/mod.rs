//! Tie and zipper placement.
//!
//! Each shape family names its accessories as *roles*: an outline vertex, a
//! point part-way along an edge, an angle on an arc, or an interior point.
//! Roles are pure data in base-outline terms. [`ties::place_ties`] and
//! [`zipper::place_zippers`] turn them into concrete marks.

pub mod ties;
pub mod zipper;

use crate::classify::ShapeFamily;
use crate::errors::{AccessoryKind, UnknownAccessoryOptionError};
use crate::outline::Segment;
use crate::types::{Length, UnitVec, Vertex};
use glam::DVec2;
use serde::Serialize;
use std::f64::consts::FRAC_PI_6;

pub use ties::{TieContext, place_ties};
pub use zipper::place_zippers;

/// Spellings that mean "no accessory" for every family
const NONE_SPELLINGS: &[&str] = &["", "no", "none"];

/// Canonical form of an accessory option string.
///
/// Splits CamelCase words, lower-cases, treats `-` and `_` as spaces,
/// collapses whitespace and drops every "tie", "ties" or "zipper" word, so
/// "4 Ties Evenly Spaced" reads "4 evenly spaced" and "ShortPlusAngled"
/// reads "short plus angled". Plural "corners" reads "corner".
pub fn normalize_option(raw: &str) -> String {
    let mut spaced = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars() {
        if prev_lower && c.is_uppercase() {
            spaced.push(' ');
        }
        prev_lower = c.is_lowercase();
        spaced.push(c);
    }
    let lowered = spaced.to_lowercase().replace(['-', '_'], " ");
    lowered
        .split_whitespace()
        .filter(|word| !matches!(*word, "ties" | "tie" | "zipper"))
        .map(|word| if word == "corners" { "corner" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A closed set of accessory choices for one family
pub trait AccessoryOption: Copy + PartialEq + 'static {
    const KIND: AccessoryKind;
    /// Normalized spellings, each mapped to its choice. The first spelling of
    /// a choice is its display name.
    const CHOICES: &'static [(&'static str, Self)];

    /// Resolve a raw option string; `None` means no accessory.
    fn parse(raw: Option<&str>, family: ShapeFamily) -> Result<Option<Self>, UnknownAccessoryOptionError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        let key = normalize_option(raw);
        if NONE_SPELLINGS.contains(&key.as_str()) {
            return Ok(None);
        }
        Self::CHOICES
            .iter()
            .find(|(spelling, _)| *spelling == key)
            .map(|&(_, choice)| Some(choice))
            .ok_or_else(|| UnknownAccessoryOptionError::new(Self::KIND, Some(family), raw, &Self::spellings()))
    }

    fn spellings() -> Vec<&'static str> {
        Self::CHOICES.iter().map(|(spelling, _)| *spelling).collect()
    }

    /// Display name of this choice
    fn name(self) -> &'static str {
        Self::CHOICES
            .iter()
            .find(|(_, choice)| *choice == self)
            .map_or("", |(spelling, _)| *spelling)
    }
}

/// Declare an option enum together with its [`AccessoryOption`] table.
macro_rules! accessory_options {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $kind:ident {
            $( $variant:ident => [$($spelling:literal),+ $(,)?] ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),*
        }

        impl $crate::accessories::AccessoryOption for $name {
            const KIND: $crate::errors::AccessoryKind = $crate::errors::AccessoryKind::$kind;
            const CHOICES: &'static [(&'static str, Self)] = &[
                $( $( ($spelling, $name::$variant), )+ )*
            ];
        }
    };
}

pub(crate) use accessory_options;

// ============================================================================
// Ties
// ============================================================================

/// Way a tie's V mark opens, away from the cushion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TieDirection {
    Up,
    Down,
    Left,
    Right,
}

impl TieDirection {
    pub fn unit_vec(self) -> UnitVec {
        match self {
            TieDirection::Up => UnitVec::UP,
            TieDirection::Down => UnitVec::DOWN,
            TieDirection::Left => UnitVec::LEFT,
            TieDirection::Right => UnitVec::RIGHT,
        }
    }
}

/// Where a tie sits, in terms of the base outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TieAnchor {
    /// Vertex `i` (the start of segment `i`)
    Vertex(usize),
    /// Fraction `t` of the way along an edge
    EdgeFraction { edge: usize, t: f64 },
    /// A resolved distance from one end of an edge
    EdgeOffset {
        edge: usize,
        distance: Length,
        from_end: bool,
    },
    /// Parameter angle on an arc edge
    ArcAngle { edge: usize, angle: f64 },
    /// A point on the cushion face, not on the outline
    Interior(Vertex),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieRole {
    pub anchor: TieAnchor,
    pub direction: TieDirection,
}

impl TieRole {
    pub fn new(anchor: TieAnchor, direction: TieDirection) -> Self {
        TieRole { anchor, direction }
    }

    pub fn vertex(index: usize, direction: TieDirection) -> Self {
        TieRole::new(TieAnchor::Vertex(index), direction)
    }

    pub fn fraction(edge: usize, t: f64, direction: TieDirection) -> Self {
        TieRole::new(TieAnchor::EdgeFraction { edge, t }, direction)
    }

    pub fn offset(edge: usize, distance: Length, from_end: bool, direction: TieDirection) -> Self {
        TieRole::new(
            TieAnchor::EdgeOffset {
                edge,
                distance,
                from_end,
            },
            direction,
        )
    }

    pub fn arc(edge: usize, angle: f64, direction: TieDirection) -> Self {
        TieRole::new(TieAnchor::ArcAngle { edge, angle }, direction)
    }

    pub fn interior(point: Vertex, direction: TieDirection) -> Self {
        TieRole::new(TieAnchor::Interior(point), direction)
    }
}

/// A resolved tie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TieMark {
    pub anchor: Vertex,
    pub direction: TieDirection,
    pub label: String,
    /// Distance from the corner, when the tie was placed by offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

impl TieMark {
    /// End points of the two V-mark arms, each `arm` long and 30° either
    /// side of the tie direction.
    pub fn prongs(&self, arm: f64) -> [Vertex; 2] {
        let dir = self.direction.unit_vec().as_dvec2();
        [FRAC_PI_6, -FRAC_PI_6].map(|angle| self.anchor + DVec2::from_angle(angle).rotate(dir) * arm)
    }

    pub(crate) fn transformed(&self, scale: f64, translate: DVec2) -> TieMark {
        TieMark {
            anchor: self.anchor * scale + translate,
            ..self.clone()
        }
    }
}

// ============================================================================
// Zippers
// ============================================================================

/// Which part of the base outline a zipper runs along
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZipperPath {
    /// A whole edge
    Edge(usize),
    /// Part of an arc edge, between two parameter angles
    ArcSpan {
        edge: usize,
        start_angle: f64,
        end_angle: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZipperRole {
    pub path: ZipperPath,
    pub label: &'static str,
}

impl ZipperRole {
    pub const LABEL: &'static str = "Zipper";

    pub fn edge(edge: usize) -> Self {
        ZipperRole {
            path: ZipperPath::Edge(edge),
            label: Self::LABEL,
        }
    }
}

/// A resolved zipper: a line or arc beside the edge it represents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipperMark {
    pub segment: Segment,
    pub label: String,
    pub label_anchor: Vertex,
}

impl ZipperMark {
    pub(crate) fn transformed(&self, scale: f64, translate: DVec2) -> ZipperMark {
        ZipperMark {
            segment: self.segment.transformed(scale, translate),
            label: self.label.clone(),
            label_anchor: self.label_anchor * scale + translate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    accessory_options! {
        enum Sample: Ties {
            TwoSide => ["2 side", "2 side short"],
            FourCorner => ["4 corner"],
        }
    }

    // ==================== normalization tests ====================

    #[test]
    fn normalize_strips_suffix_and_separators() {
        assert_eq!(normalize_option("4 Corner Ties"), "4 corner");
        assert_eq!(normalize_option("  2-Side_Short  Tie "), "2 side short");
        assert_eq!(normalize_option("Long Side Zipper"), "long side");
        assert_eq!(normalize_option("No Ties"), "no");
        assert_eq!(normalize_option("1/3 Side"), "1/3 side");
    }

    #[test]
    fn normalize_handles_order_form_wording() {
        assert_eq!(normalize_option("4 Ties Evenly Spaced"), "4 evenly spaced");
        assert_eq!(normalize_option("2 ties along the width"), "2 along the width");
        assert_eq!(normalize_option("2 Side ties-along length"), "2 side along length");
        assert_eq!(normalize_option("ShortPlusAngled"), "short plus angled");
        assert_eq!(normalize_option("TopPlusAngled"), "top plus angled");
        assert_eq!(normalize_option("4 corners"), "4 corner");
        assert_eq!(normalize_option("Ties"), "");
    }

    // ==================== option parsing tests ====================

    #[test]
    fn parse_accepts_aliases() {
        let parsed = Sample::parse(Some("2 Side Short Ties"), ShapeFamily::Rectangle).unwrap();
        assert_eq!(parsed, Some(Sample::TwoSide));
        assert_eq!(Sample::TwoSide.name(), "2 side");
    }

    #[test]
    fn parse_none_spellings() {
        for raw in [None, Some(""), Some("No Ties"), Some("none")] {
            assert_eq!(Sample::parse(raw, ShapeFamily::Rectangle).unwrap(), None);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Sample::parse(Some("3 Corner"), ShapeFamily::Rectangle).unwrap_err();
        assert_eq!(err.kind, AccessoryKind::Ties);
        assert_eq!(err.value, "3 Corner");
        insta::assert_snapshot!(
            err.expected.unwrap_or_default(),
            @"expected one of: 2 side, 2 side short, 4 corner"
        );
    }

    // ==================== mark tests ====================

    #[test]
    fn prongs_open_along_direction() {
        let mark = TieMark {
            anchor: dvec2(0.0, 0.0),
            direction: TieDirection::Up,
            label: "Tie".into(),
            distance_label: None,
        };
        let [a, b] = mark.prongs(2.0);
        assert!(a.y > 1.7 && b.y > 1.7);
        assert!((a.x + b.x).abs() < 1e-12);
        assert!((a.length() - 2.0).abs() < 1e-12);
    }
}
