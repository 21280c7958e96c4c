//! Error types with rich diagnostics using miette
//!
//! Every failure names the offending field or option so the order-confirmation
//! layer can point a human at the right cell of the order form.

use crate::classify::ShapeFamily;
use crate::types::{Length, NumericError};
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Classification Errors
// ============================================================================

/// No shape family matches the dimensions present in a spec.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("unable to determine cushion shape: missing key dimensions {}", .missing.join(", "))]
#[diagnostic(code(cushion::classify::no_match))]
pub struct ShapeClassificationError {
    /// Family whose rule came closest to matching
    pub closest: ShapeFamily,
    /// Keys that rule still needs, each as a positive number
    pub missing: Vec<&'static str>,
    #[help]
    pub suggestion: Option<String>,
}

impl ShapeClassificationError {
    pub fn new(closest: ShapeFamily, missing: Vec<&'static str>) -> Self {
        let suggestion = Some(format!(
            "closest match is {closest}; give every listed dimension a positive value"
        ));
        Self {
            closest,
            missing,
            suggestion,
        }
    }
}

// ============================================================================
// Dimension Errors
// ============================================================================

/// A numeric field is missing, malformed or geometrically impossible
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InvalidDimensionError {
    #[error("missing required dimension `{field}`")]
    #[diagnostic(code(cushion::dimension::missing))]
    Missing { field: String },

    #[error("dimension `{field}` is not numeric: {value:?}")]
    #[diagnostic(
        code(cushion::dimension::not_numeric),
        help("dimensions are inches, given as a JSON number or a numeric string")
    )]
    NotNumeric { field: String, value: String },

    #[error("dimension `{field}` must be positive, got {value}")]
    #[diagnostic(code(cushion::dimension::non_positive))]
    NonPositive { field: String, value: f64 },

    #[error("dimension `{field}` is inconsistent: {reason}")]
    #[diagnostic(code(cushion::dimension::degenerate))]
    Degenerate { field: String, reason: String },
}

impl InvalidDimensionError {
    /// The field the error is about
    pub fn field(&self) -> &str {
        match self {
            InvalidDimensionError::Missing { field }
            | InvalidDimensionError::NotNumeric { field, .. }
            | InvalidDimensionError::NonPositive { field, .. }
            | InvalidDimensionError::Degenerate { field, .. } => field,
        }
    }

    pub(crate) fn degenerate(field: &str, reason: impl Into<String>) -> Self {
        InvalidDimensionError::Degenerate {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Accessory Errors
// ============================================================================

/// Which accessory field an option string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryKind {
    Ties,
    Zipper,
    Piping,
}

impl fmt::Display for AccessoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessoryKind::Ties => write!(f, "ties"),
            AccessoryKind::Zipper => write!(f, "zipper"),
            AccessoryKind::Piping => write!(f, "piping"),
        }
    }
}

/// An option string that does not name any choice for the resolved family
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error(
    "unknown {kind} option {value:?} for {}",
    .family.map(ShapeFamily::name).unwrap_or("any cushion")
)]
#[diagnostic(code(cushion::accessory::unknown_option))]
pub struct UnknownAccessoryOptionError {
    pub kind: AccessoryKind,
    pub family: Option<ShapeFamily>,
    pub value: String,
    #[help]
    pub expected: Option<String>,
}

impl UnknownAccessoryOptionError {
    pub fn new(
        kind: AccessoryKind,
        family: Option<ShapeFamily>,
        value: impl Into<String>,
        accepted: &[&str],
    ) -> Self {
        let expected = if accepted.is_empty() {
            None
        } else {
            Some(format!("expected one of: {}", accepted.join(", ")))
        };
        Self {
            kind,
            family,
            value: value.into(),
            expected,
        }
    }
}

/// A recognized accessory that cannot be placed on this particular outline
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum AccessoryPlacementError {
    #[error("cannot place {option:?} ties: edge is {edge_length} long, minimum is {minimum}")]
    #[diagnostic(
        code(cushion::accessory::edge_too_short),
        help("choose a tie option on a longer edge, or no ties")
    )]
    EdgeTooShort {
        option: String,
        edge_length: Length,
        minimum: Length,
    },

    #[error("cannot place {option:?} zipper on a zero-length edge")]
    #[diagnostic(code(cushion::accessory::degenerate_edge))]
    DegenerateEdge { option: String },

    #[error("tie anchored on segment {index}, but the outline has {segments} segments")]
    #[diagnostic(code(cushion::accessory::missing_segment))]
    MissingSegment { index: usize, segments: usize },
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be positive and finite, got {width} x {height}")]
    #[diagnostic(code(cushion::config::viewport))]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid {name}: {source}")]
    #[diagnostic(code(cushion::config::length))]
    InvalidLength {
        name: &'static str,
        #[source]
        source: NumericError,
    },
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Everything `layout` can fail with
#[derive(Error, Diagnostic, Debug)]
pub enum DiagramError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Classification(#[from] ShapeClassificationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Dimension(#[from] InvalidDimensionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    AccessoryOption(#[from] UnknownAccessoryOptionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Placement(#[from] AccessoryPlacementError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("cushion spec is not valid JSON")]
    #[diagnostic(code(cushion::spec::json))]
    Json(#[from] serde_json::Error),

    #[error("cushion spec must be a JSON object")]
    #[diagnostic(code(cushion::spec::not_an_object))]
    NotAnObject,

    #[error("outline has an empty bounding box")]
    #[diagnostic(code(cushion::viewport::empty_geometry))]
    EmptyGeometry,
}
