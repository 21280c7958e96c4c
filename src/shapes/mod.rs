//! Cushion shapes
//!
//! Each family is its own type that knows how to:
//! - Build its base outline from the spec's dimensions
//! - Name where its ties and zippers go
//! - Say which lengths deserve a dimension label

mod bolster;
mod curved;
mod orthogonal;
mod rectangle;
mod round;
mod trapezoid;
mod triangle;

pub use bolster::{Bolster, BolsterHand};
pub use curved::{Curved, CurvedSector};
pub use orthogonal::{LShape, TShape};
pub use rectangle::Rectangle;
pub use round::{Round, SemiRound};
pub use trapezoid::{ClippedTrapezoid, Trapezoid};
pub use triangle::{EquilateralTriangle, RightTriangle};

use crate::accessories::{AccessoryOption, TieContext, TieRole, ZipperRole};
use crate::annotate::LabelRole;
use crate::classify::ShapeFamily;
use crate::errors::{AccessoryPlacementError, DiagramError, InvalidDimensionError, UnknownAccessoryOptionError};
use crate::outline::Outline;
use crate::spec::CushionSpec;
use crate::types::Length;
use enum_dispatch::enum_dispatch;

/// Common behavior for all cushion shapes
#[enum_dispatch]
pub trait CushionShape {
    fn family(&self) -> ShapeFamily;

    /// Base outline in inches, counter-clockwise
    fn outline(&self) -> Outline;

    /// Where the requested ties go, in base-outline terms. Empty for no ties.
    fn tie_roles(&self, ctx: &TieContext<'_>) -> Result<Vec<TieRole>, AccessoryPlacementError>;

    /// Edges carrying the requested zipper. Empty for no zipper.
    fn zipper_roles(&self) -> Vec<ZipperRole>;

    /// Lengths worth labelling on `outline` (the base outline)
    fn labels(&self, outline: &Outline) -> Vec<LabelRole>;

    /// User-facing dimensions for the spec sheet, in display order
    fn dimension_rows(&self) -> Vec<(&'static str, Length)>;

    /// Display name of the tie choice, if any
    fn tie_option(&self) -> Option<&'static str>;

    /// Display name of the zipper choice, if any
    fn zipper_option(&self) -> Option<&'static str>;

    /// Cushion thickness for the thickness callout and the sheet
    fn thickness(&self, spec: &CushionSpec) -> Option<Length> {
        spec.thickness()
    }
}

/// One cushion of any family
#[enum_dispatch(CushionShape)]
#[derive(Debug, Clone, PartialEq)]
pub enum Cushion {
    Rectangle(Rectangle),
    Trapezoid(Trapezoid),
    ClippedTrapezoid(ClippedTrapezoid),
    LShape(LShape),
    TShape(TShape),
    Round(Round),
    SemiRound(SemiRound),
    Curved(Curved),
    CurvedSector(CurvedSector),
    EquilateralTriangle(EquilateralTriangle),
    RightTriangle(RightTriangle),
    Bolster(Bolster),
}

impl Cushion {
    /// Build the shape for an already classified spec
    pub fn from_spec(family: ShapeFamily, spec: &CushionSpec) -> Result<Cushion, DiagramError> {
        let cushion = match family {
            ShapeFamily::Rectangle => Rectangle::from_spec(spec)?.into(),
            ShapeFamily::Trapezoid => Trapezoid::from_spec(spec)?.into(),
            ShapeFamily::ClippedTrapezoid => ClippedTrapezoid::from_spec(spec)?.into(),
            ShapeFamily::LShape => LShape::from_spec(spec)?.into(),
            ShapeFamily::TShape => TShape::from_spec(spec)?.into(),
            ShapeFamily::Round => Round::from_spec(spec)?.into(),
            ShapeFamily::SemiRound => SemiRound::from_spec(spec)?.into(),
            ShapeFamily::Curved => Curved::from_spec(spec)?.into(),
            ShapeFamily::CurvedSector => CurvedSector::from_spec(spec)?.into(),
            ShapeFamily::EquilateralTriangle => EquilateralTriangle::from_spec(spec)?.into(),
            ShapeFamily::RightTriangle => RightTriangle::from_spec(spec)?.into(),
            ShapeFamily::RightTrapezoidBolster => Bolster::from_spec(spec)?.into(),
        };
        Ok(cushion)
    }
}

/// Parse the spec's tie and zipper strings for `family`
pub(crate) fn options<T, Z>(
    spec: &CushionSpec,
    family: ShapeFamily,
) -> Result<(Option<T>, Option<Z>), UnknownAccessoryOptionError>
where
    T: AccessoryOption,
    Z: AccessoryOption,
{
    Ok((T::parse(spec.ties(), family)?, Z::parse(spec.zipper(), family)?))
}

/// Order two parallel sides so the first is the shorter
pub(crate) fn canonical_pair(short: Length, long: Length) -> (Length, Length) {
    if short > long { (long, short) } else { (short, long) }
}

/// `field` must be strictly less than `limit`
pub(crate) fn require_less(
    field: &str,
    value: Length,
    limit_name: &str,
    limit: Length,
) -> Result<(), InvalidDimensionError> {
    if value < limit {
        Ok(())
    } else {
        Err(InvalidDimensionError::degenerate(
            field,
            format!("{value} must be less than {limit_name} ({limit})"),
        ))
    }
}
