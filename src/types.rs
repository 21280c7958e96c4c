//! Strongly-typed numeric primitives for cushion geometry.
//!
//! User-facing quantities (dimensions, margins, offsets) travel as [`Length`],
//! which is always real-world inches. Positions are glam `DVec2` values in the
//! same unit until the viewport transform, the one place where drawing units
//! appear.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point on an outline, in inches (y up).
pub type Vertex = DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in inches
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length from inches (const-friendly, unchecked).
    /// Use `try_positive` for user-provided values.
    #[inline]
    pub const fn inches(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_new(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Length::try_non_negative(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(len)
        }
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    #[inline]
    pub fn half(self) -> Length {
        Length(self.0 / 2.0)
    }

    /// Get the raw value in inches (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// The bare number, rounded to two decimals with trailing zeros trimmed
    pub fn decimal(self) -> String {
        let rounded = (self.0 * 100.0).round() / 100.0;
        let text = format!("{rounded:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        // -0.004 rounds to "-0"
        if text == "-0" { "0".to_string() } else { text.to_string() }
    }

    /// Hypotenuse of a right triangle with legs `self` and `other`
    pub fn hypot(self, other: Length) -> Length {
        Length(self.0.hypot(other.0))
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

/// Inches rounded to two decimals, trailing zeros trimmed: `24"`, `37.85"`.
impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\"", self.decimal())
    }
}

/// A unit direction vector (dimensionless, normalized), y up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UnitVec(DVec2);

impl UnitVec {
    pub const UP: UnitVec = UnitVec(DVec2::new(0.0, 1.0));
    pub const DOWN: UnitVec = UnitVec(DVec2::new(0.0, -1.0));
    pub const LEFT: UnitVec = UnitVec(DVec2::new(-1.0, 0.0));
    pub const RIGHT: UnitVec = UnitVec(DVec2::new(1.0, 0.0));

    /// Normalize a vector. Returns None if the input has (near) zero length.
    pub fn normalized(v: DVec2) -> Option<Self> {
        v.try_normalize().map(UnitVec)
    }

    /// Rotate -90°: the outward normal of an edge walked counter-clockwise.
    pub fn right_normal(self) -> UnitVec {
        UnitVec(DVec2::new(self.0.y, -self.0.x))
    }

    pub fn dot(self, other: UnitVec) -> f64 {
        self.0.dot(other.0)
    }

    pub fn x(self) -> f64 { self.0.x }

    pub fn y(self) -> f64 { self.0.y }

    pub fn as_dvec2(self) -> DVec2 { self.0 }
}

impl Neg for UnitVec {
    type Output = UnitVec;
    fn neg(self) -> UnitVec { UnitVec(-self.0) }
}

/// Multiply a unit vector by a length to get a displacement
impl Mul<Length> for UnitVec {
    type Output = DVec2;
    fn mul(self, len: Length) -> DVec2 {
        self.0 * len.0
    }
}

/// Axis-aligned bounding box in inches
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BBox {
    pub min: Vertex,
    pub max: Vertex,
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: Vertex) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn expand_bbox(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    pub fn width(&self) -> Length { Length(self.max.x - self.min.x) }

    pub fn height(&self) -> Length { Length(self.max.y - self.min.y) }

    pub fn center(&self) -> Vertex {
        (self.min + self.max) / 2.0
    }
}

impl Default for BBox {
    fn default() -> Self {
        BBox::new()
    }
}

impl FromIterator<Vertex> for BBox {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        let mut bbox = BBox::new();
        for p in iter {
            bbox.expand_point(p);
        }
        bbox
    }
}
