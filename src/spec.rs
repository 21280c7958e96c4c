//! The cushion specification: a flat field→value mapping from an order form.
//!
//! Dimensions are coerced here, once, so everything downstream can assume
//! finite non-negative inches. Accessory strings stay raw until the shape
//! family is known; piping is normalized immediately because its meaning does
//! not depend on the shape.

use crate::errors::{AccessoryKind, DiagramError, InvalidDimensionError, UnknownAccessoryOptionError};
use crate::types::Length;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Every numeric field that participates in classification or geometry.
pub const DIMENSION_FIELDS: &[&str] = &[
    "length",
    "width",
    "thickness",
    "top_width",
    "bottom_width",
    "ear",
    "diameter",
    "top_base",
    "bottom_base",
    "height",
    "edge",
    "side",
    "side_length",
    "middle_length",
    "front_width_straight",
    "back_width_straight",
    "front_width_curved",
    "back_width_curved",
    "top_thickness",
    "bottom_thickness",
];

const DEFAULT_NAME: &str = "Cushion";

/// Whether a piping contour is sewn around the cushion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Piping {
    #[default]
    Off,
    On,
}

impl Piping {
    pub const ACCEPTED: &'static [&'static str] = &["yes", "y", "true", "piping", "no", "n", "false", "none"];

    pub fn is_enabled(self) -> bool {
        self == Piping::On
    }

    fn parse(value: &Value) -> Result<Piping, UnknownAccessoryOptionError> {
        let reject =
            || UnknownAccessoryOptionError::new(AccessoryKind::Piping, None, json_text(value), Self::ACCEPTED);
        match value {
            Value::Null => Ok(Piping::Off),
            Value::Bool(true) => Ok(Piping::On),
            Value::Bool(false) => Ok(Piping::Off),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "piping" => Ok(Piping::On),
                "no" | "n" | "false" | "none" | "" => Ok(Piping::Off),
                _ => Err(reject()),
            },
            _ => Err(reject()),
        }
    }
}

/// A tie offset as the order form supplied it.
///
/// Offsets are deliberately lenient: an unusable value falls back to the
/// family default during placement instead of failing the whole diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestedOffset {
    Inches(f64),
    Invalid(String),
}

impl RequestedOffset {
    /// The numeric value, if there is one
    pub fn inches(&self) -> Option<f64> {
        match self {
            RequestedOffset::Inches(v) => Some(*v),
            RequestedOffset::Invalid(_) => None,
        }
    }

    fn parse(value: &Value) -> Option<RequestedOffset> {
        match value {
            Value::Null => None,
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Some(RequestedOffset::Inches(v)),
                _ => Some(RequestedOffset::Invalid(n.to_string())),
            },
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(RequestedOffset::Inches(v)),
                    _ => Some(RequestedOffset::Invalid(trimmed.to_string())),
                }
            }
            other => Some(RequestedOffset::Invalid(other.to_string())),
        }
    }
}

/// One cushion from an order. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CushionSpec {
    name: String,
    dimensions: BTreeMap<&'static str, f64>,
    fill: String,
    fabric: String,
    piping: Piping,
    ties: Option<String>,
    zipper: Option<String>,
    quantity: u32,
    tie_offset_from_corner: Option<RequestedOffset>,
    tie_offset_length: Option<RequestedOffset>,
    tie_offset_width: Option<RequestedOffset>,
}

impl CushionSpec {
    /// Parse a spec from JSON text holding one object
    pub fn from_json_str(source: &str) -> Result<CushionSpec, DiagramError> {
        let value: Value = serde_json::from_str(source)?;
        CushionSpec::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<CushionSpec, DiagramError> {
        match value {
            Value::Object(map) => CushionSpec::from_map(&map),
            _ => Err(DiagramError::NotAnObject),
        }
    }

    /// Build a spec from a field map, coercing every known dimension.
    ///
    /// Fails on the first non-numeric or negative dimension.
    pub fn from_map(map: &Map<String, Value>) -> Result<CushionSpec, DiagramError> {
        let mut dimensions = BTreeMap::new();
        for &field in DIMENSION_FIELDS {
            let Some(value) = map.get(field) else {
                continue;
            };
            if let Some(v) = coerce_dimension(field, value)? {
                dimensions.insert(field, v);
            }
        }

        let name = text_field(map, &["cushion_name"]).unwrap_or_else(|| DEFAULT_NAME.to_string());
        let piping = lookup(map, &["piping", "pipe"])
            .map(Piping::parse)
            .transpose()?
            .unwrap_or_default();

        Ok(CushionSpec {
            name,
            dimensions,
            fill: text_field(map, &["fill"]).unwrap_or_default(),
            fabric: text_field(map, &["fabric", "fabric_collection"]).unwrap_or_default(),
            piping,
            ties: text_field(map, &["ties"]),
            zipper: text_field(map, &["zipper"]),
            quantity: coerce_quantity(lookup(map, &["quantity"]))?,
            tie_offset_from_corner: lookup(map, &["tie_offset_from_corner", "tie_offset_from_base"])
                .and_then(RequestedOffset::parse),
            tie_offset_length: lookup(map, &["tie_offset_length"]).and_then(RequestedOffset::parse),
            tie_offset_width: lookup(map, &["tie_offset_width"]).and_then(RequestedOffset::parse),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive substring test on the cushion name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Raw coerced value of a dimension, zero included
    pub fn dimension(&self, field: &str) -> Option<f64> {
        self.dimensions.get(field).copied()
    }

    /// True when the field is present and strictly positive
    pub fn has_positive(&self, field: &str) -> bool {
        self.dimension(field).is_some_and(|v| v > 0.0)
    }

    /// A dimension the current shape cannot do without
    pub fn require(&self, field: &str) -> Result<Length, InvalidDimensionError> {
        let value = self.dimension(field).ok_or_else(|| InvalidDimensionError::Missing {
            field: field.to_string(),
        })?;
        Length::try_positive(value).map_err(|_| InvalidDimensionError::NonPositive {
            field: field.to_string(),
            value,
        })
    }

    /// A dimension that is used when present and positive
    pub fn optional(&self, field: &str) -> Option<Length> {
        self.dimension(field)
            .and_then(|v| Length::try_positive(v).ok())
    }

    pub fn thickness(&self) -> Option<Length> {
        self.optional("thickness")
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn fabric(&self) -> &str {
        &self.fabric
    }

    pub fn piping(&self) -> Piping {
        self.piping
    }

    pub fn ties(&self) -> Option<&str> {
        self.ties.as_deref()
    }

    pub fn zipper(&self) -> Option<&str> {
        self.zipper.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn tie_offset_from_corner(&self) -> Option<&RequestedOffset> {
        self.tie_offset_from_corner.as_ref()
    }

    pub fn tie_offset_length(&self) -> Option<&RequestedOffset> {
        self.tie_offset_length.as_ref()
    }

    pub fn tie_offset_width(&self) -> Option<&RequestedOffset> {
        self.tie_offset_width.as_ref()
    }
}

impl TryFrom<Map<String, Value>> for CushionSpec {
    type Error = DiagramError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        CushionSpec::from_map(&map)
    }
}

/// First key present (and not null) among `keys`
fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let text = json_text(lookup(map, keys)?);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn not_numeric(field: &str, value: &Value) -> InvalidDimensionError {
    InvalidDimensionError::NotNumeric {
        field: field.to_string(),
        value: json_text(value),
    }
}

fn coerce_number(field: &str, value: &Value) -> Result<Option<f64>, InvalidDimensionError> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(not_numeric(field, value)),
    }
}

fn coerce_dimension(field: &'static str, value: &Value) -> Result<Option<f64>, InvalidDimensionError> {
    let parsed = coerce_number(field, value)?;
    if let Some(v) = parsed {
        if v < 0.0 {
            return Err(InvalidDimensionError::NonPositive {
                field: field.to_string(),
                value: v,
            });
        }
    }
    Ok(parsed)
}

fn coerce_quantity(value: Option<&Value>) -> Result<u32, InvalidDimensionError> {
    let Some(value) = value else {
        return Ok(1);
    };
    let Some(v) = coerce_number("quantity", value)? else {
        return Ok(1);
    };
    if v <= 0.0 {
        return Err(InvalidDimensionError::NonPositive {
            field: "quantity".to_string(),
            value: v,
        });
    }
    if v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return Err(not_numeric("quantity", value));
    }
    Ok(v as u32)
}
