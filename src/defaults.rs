//! Default sizes and settings (all in real-world inches)

use crate::types::Length as Inches;

/// Distance from the cushion edge to the piping cord
pub const PIPING_MARGIN: Inches = Inches::inches(0.5);
/// Tie distance from a corner when the order gives none
pub const TIE_CORNER_OFFSET: Inches = Inches::inches(4.0);
/// Gap between an edge and the zipper line drawn beside it
pub const ZIPPER_OFFSET: Inches = Inches::inches(1.0);
/// Inset of dimension labels from their edge
pub const LABEL_OFFSET: Inches = Inches::inches(1.0);
pub const THICKNESS_LABEL_OFFSET: Inches = Inches::inches(3.0);
/// Shortest edge a tie can be sewn onto
pub const MIN_TIE_EDGE: Inches = Inches::inches(1.0);
pub const SHEET_WRAP_WIDTH: Inches = Inches::inches(4.5);
pub const CHARWID: f64 = 0.08;
