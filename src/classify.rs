//! Shape classification from the set of dimensions present in a spec.
//!
//! Order forms never say which shape they describe; the shape is implied by
//! which dimensions were filled in. [`RULES`] is the single ordered table of
//! `(required keys, family)` pairs. The first rule whose keys are all present
//! and positive wins, so more specific shapes sit above more general ones.

use crate::errors::ShapeClassificationError;
use crate::log::debug;
use crate::spec::CushionSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of supported cushion geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFamily {
    Rectangle,
    Trapezoid,
    ClippedTrapezoid,
    LShape,
    TShape,
    Round,
    SemiRound,
    Curved,
    CurvedSector,
    EquilateralTriangle,
    RightTriangle,
    RightTrapezoidBolster,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 12] = [
        ShapeFamily::Rectangle,
        ShapeFamily::Trapezoid,
        ShapeFamily::ClippedTrapezoid,
        ShapeFamily::LShape,
        ShapeFamily::TShape,
        ShapeFamily::Round,
        ShapeFamily::SemiRound,
        ShapeFamily::Curved,
        ShapeFamily::CurvedSector,
        ShapeFamily::EquilateralTriangle,
        ShapeFamily::RightTriangle,
        ShapeFamily::RightTrapezoidBolster,
    ];

    /// Lower-case name used in messages
    pub fn name(self) -> &'static str {
        match self {
            ShapeFamily::Rectangle => "rectangle",
            ShapeFamily::Trapezoid => "trapezoid",
            ShapeFamily::ClippedTrapezoid => "clipped trapezoid",
            ShapeFamily::LShape => "L-shape",
            ShapeFamily::TShape => "T-shape",
            ShapeFamily::Round => "round",
            ShapeFamily::SemiRound => "semi-round",
            ShapeFamily::Curved => "curved",
            ShapeFamily::CurvedSector => "curved sector",
            ShapeFamily::EquilateralTriangle => "equilateral triangle",
            ShapeFamily::RightTriangle => "right triangle",
            ShapeFamily::RightTrapezoidBolster => "right trapezoid bolster",
        }
    }

    /// Title-case name for the spec sheet
    pub fn title(self) -> &'static str {
        match self {
            ShapeFamily::Rectangle => "Rectangle",
            ShapeFamily::Trapezoid => "Trapezoid",
            ShapeFamily::ClippedTrapezoid => "Clipped Trapezoid",
            ShapeFamily::LShape => "L-Shape",
            ShapeFamily::TShape => "T-Shape",
            ShapeFamily::Round => "Round",
            ShapeFamily::SemiRound => "Semi-Round",
            ShapeFamily::Curved => "Curved",
            ShapeFamily::CurvedSector => "Curved Sector",
            ShapeFamily::EquilateralTriangle => "Equilateral Triangle",
            ShapeFamily::RightTriangle => "Right Triangle",
            ShapeFamily::RightTrapezoidBolster => "Right Trapezoid Bolster",
        }
    }
}

impl fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the classification table
pub struct Rule {
    /// Keys that must all be present and strictly positive
    pub required: &'static [&'static str],
    /// Family reported when this rule is the closest miss
    pub nominal: ShapeFamily,
    /// Picks the family once the keys are satisfied
    pub select: fn(&CushionSpec) -> ShapeFamily,
}

impl Rule {
    pub fn matches(&self, spec: &CushionSpec) -> bool {
        self.required.iter().all(|key| spec.has_positive(key))
    }

    fn missing(&self, spec: &CushionSpec) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|key| !spec.has_positive(key))
            .collect()
    }
}

/// Priority-ordered classification table. Earlier rows win.
pub static RULES: &[Rule] = &[
    Rule {
        required: &["length", "top_width", "bottom_width", "ear", "thickness"],
        nominal: ShapeFamily::LShape,
        select: |spec| {
            if spec.dimension("top_width") > spec.dimension("bottom_width") {
                ShapeFamily::TShape
            } else {
                ShapeFamily::LShape
            }
        },
    },
    Rule {
        required: &["diameter", "thickness"],
        nominal: ShapeFamily::Round,
        select: |spec| {
            if spec.name_contains("semi") {
                ShapeFamily::SemiRound
            } else {
                ShapeFamily::Round
            }
        },
    },
    Rule {
        required: &[
            "front_width_straight",
            "back_width_straight",
            "thickness",
            "front_width_curved",
            "back_width_curved",
        ],
        nominal: ShapeFamily::CurvedSector,
        select: |_| ShapeFamily::CurvedSector,
    },
    Rule {
        required: &["top_thickness", "bottom_thickness", "height", "length"],
        nominal: ShapeFamily::RightTrapezoidBolster,
        select: |_| ShapeFamily::RightTrapezoidBolster,
    },
    Rule {
        required: &["width", "side_length", "middle_length"],
        nominal: ShapeFamily::Curved,
        select: |_| ShapeFamily::Curved,
    },
    Rule {
        required: &["side", "thickness"],
        nominal: ShapeFamily::EquilateralTriangle,
        select: |_| ShapeFamily::EquilateralTriangle,
    },
    Rule {
        required: &["top_width", "bottom_width", "length"],
        nominal: ShapeFamily::RightTrapezoidBolster,
        select: |_| ShapeFamily::RightTrapezoidBolster,
    },
    Rule {
        required: &["top_width", "bottom_width", "height", "edge"],
        nominal: ShapeFamily::ClippedTrapezoid,
        select: |_| ShapeFamily::ClippedTrapezoid,
    },
    Rule {
        required: &["top_base", "bottom_base", "height"],
        nominal: ShapeFamily::Trapezoid,
        select: |_| ShapeFamily::Trapezoid,
    },
    Rule {
        required: &["width", "length", "thickness"],
        nominal: ShapeFamily::Rectangle,
        select: |spec| {
            if spec.name_contains("triangle") {
                ShapeFamily::RightTriangle
            } else {
                ShapeFamily::Rectangle
            }
        },
    },
];

/// Infer the shape family of a spec.
///
/// On failure, the error names the rule with the fewest missing keys
/// (earliest rule on ties) and lists exactly those keys.
pub fn classify(spec: &CushionSpec) -> Result<ShapeFamily, ShapeClassificationError> {
    if let Some(rule) = RULES.iter().find(|rule| rule.matches(spec)) {
        let family = (rule.select)(spec);
        debug!(%family, name = spec.name(), "classified cushion");
        return Ok(family);
    }

    let closest = RULES
        .iter()
        .map(|rule| (rule, rule.missing(spec)))
        .min_by_key(|(_, missing)| missing.len());

    match closest {
        Some((rule, missing)) => Err(ShapeClassificationError::new(rule.nominal, missing)),
        None => Err(ShapeClassificationError::new(ShapeFamily::Rectangle, Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> CushionSpec {
        CushionSpec::from_value(value).unwrap()
    }

    // ==================== family selection tests ====================

    #[test]
    fn rectangle_and_right_triangle_share_keys() {
        let fields = json!({"length": 24, "width": 18, "thickness": 2});
        assert_eq!(classify(&spec(fields)).unwrap(), ShapeFamily::Rectangle);

        let named = json!({"cushion_name": "Corner Triangle", "length": 24, "width": 18, "thickness": 2});
        assert_eq!(classify(&spec(named)).unwrap(), ShapeFamily::RightTriangle);
    }

    #[test]
    fn l_and_t_split_on_widths() {
        let l = json!({"length": 80, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3});
        assert_eq!(classify(&spec(l)).unwrap(), ShapeFamily::LShape);

        let t = json!({"length": 80, "top_width": 40, "bottom_width": 20, "ear": 25, "thickness": 3});
        assert_eq!(classify(&spec(t)).unwrap(), ShapeFamily::TShape);
    }

    #[test]
    fn round_and_semi_round_split_on_name() {
        let round = json!({"diameter": 40, "thickness": 2});
        assert_eq!(classify(&spec(round)).unwrap(), ShapeFamily::Round);

        let semi = json!({"cushion_name": "Semi Round Seat", "diameter": 40, "thickness": 2});
        assert_eq!(classify(&spec(semi)).unwrap(), ShapeFamily::SemiRound);
    }

    #[test]
    fn every_other_family_has_a_rule() {
        let cases = [
            (json!({"top_base": 59, "bottom_base": 114, "height": 26}), ShapeFamily::Trapezoid),
            (
                json!({"top_width": 50, "bottom_width": 80, "height": 30, "edge": 10}),
                ShapeFamily::ClippedTrapezoid,
            ),
            (json!({"width": 20, "side_length": 18, "middle_length": 24}), ShapeFamily::Curved),
            (
                json!({
                    "front_width_straight": 40, "back_width_straight": 60, "thickness": 3,
                    "front_width_curved": 44, "back_width_curved": 66, "length": 20
                }),
                ShapeFamily::CurvedSector,
            ),
            (json!({"side": 20, "thickness": 2}), ShapeFamily::EquilateralTriangle),
            (
                json!({"top_width": 10, "bottom_width": 20, "length": 30}),
                ShapeFamily::RightTrapezoidBolster,
            ),
            (
                json!({"top_thickness": 4, "bottom_thickness": 8, "height": 20, "length": 2}),
                ShapeFamily::RightTrapezoidBolster,
            ),
        ];
        for (fields, expected) in cases {
            assert_eq!(classify(&spec(fields.clone())).unwrap(), expected, "{fields}");
        }
    }

    // ==================== priority tests ====================

    #[test]
    fn clipped_trapezoid_beats_plain_trapezoid() {
        let both = json!({
            "top_width": 50, "bottom_width": 80, "height": 30, "edge": 10,
            "top_base": 50, "bottom_base": 80
        });
        assert_eq!(classify(&spec(both)).unwrap(), ShapeFamily::ClippedTrapezoid);
    }

    #[test]
    fn l_shape_beats_bolster() {
        let both = json!({"length": 80, "top_width": 20, "bottom_width": 30, "ear": 25, "thickness": 3});
        assert_eq!(classify(&spec(both)).unwrap(), ShapeFamily::LShape);
    }

    #[test]
    fn zero_counts_as_absent() {
        let fields = json!({"length": 24, "width": 0, "thickness": 2});
        let err = classify(&spec(fields)).unwrap_err();
        // round is the earliest rule one key short
        assert_eq!(err.closest, ShapeFamily::Round);
        assert_eq!(err.missing, vec!["diameter"]);
    }

    // ==================== failure tests ====================

    #[test]
    fn failure_names_closest_rule() {
        let err = classify(&spec(json!({"top_base": 20, "height": 10}))).unwrap_err();
        assert_eq!(err.closest, ShapeFamily::Trapezoid);
        assert_eq!(err.missing, vec!["bottom_base"]);
    }

    #[test]
    fn empty_spec_reports_first_smallest_rule() {
        let err = classify(&spec(json!({}))).unwrap_err();
        assert_eq!(err.closest, ShapeFamily::Round);
        assert_eq!(err.missing, vec!["diameter", "thickness"]);
    }
}
