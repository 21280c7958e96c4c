//! Fitting real-world geometry into the caller's viewport.
//!
//! This is the only place device units appear. Everything before it works in
//! inches; everything after it is `p * scale + translate`.

use crate::config::{Viewport, ViewportAnchor};
use crate::errors::DiagramError;
use crate::log::debug;
use crate::types::{BBox, Vertex};
use glam::{DVec2, dvec2};

/// Uniform scale followed by a translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    /// Where real-world (0, 0) lands
    pub translate: DVec2,
}

impl ViewportTransform {
    /// Largest uniform scale that keeps `bbox` inside `viewport`.
    ///
    /// A box that is flat in one direction is fitted on the other alone.
    pub fn fit(bbox: &BBox, viewport: &Viewport) -> Result<Self, DiagramError> {
        if bbox.is_empty() {
            return Err(DiagramError::EmptyGeometry);
        }
        let size = dvec2(bbox.width().raw(), bbox.height().raw());
        let ratios = [(viewport.max_width, size.x), (viewport.max_height, size.y)];
        let scale = ratios
            .iter()
            .filter(|(_, extent)| *extent > 0.0)
            .map(|(limit, extent)| limit / extent)
            .fold(f64::INFINITY, f64::min);
        if !scale.is_finite() {
            return Err(DiagramError::EmptyGeometry);
        }

        let translate = match viewport.anchor {
            ViewportAnchor::Center => {
                let room = dvec2(viewport.max_width, viewport.max_height) - size * scale;
                viewport.origin + room / 2.0 - bbox.min * scale
            }
            ViewportAnchor::BottomLeft => viewport.origin - bbox.min * scale,
        };
        debug!(scale, ?translate, "fitted viewport");
        Ok(ViewportTransform { scale, translate })
    }

    pub fn apply(&self, p: Vertex) -> Vertex {
        p * self.scale + self.translate
    }
}
