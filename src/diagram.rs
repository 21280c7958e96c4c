//! The layout pipeline and the value it produces.

use crate::accessories::{TieContext, TieMark, ZipperMark, place_ties, place_zippers};
use crate::annotate::{DimensionLabel, annotate, thickness_label};
use crate::classify::{ShapeFamily, classify};
use crate::config::EngineConfig;
use crate::errors::DiagramError;
use crate::log::debug;
use crate::offset::offset_outline;
use crate::outline::Outline;
use crate::shapes::{Cushion, CushionShape};
use crate::sheet::SpecSheet;
use crate::spec::CushionSpec;
use crate::types::{BBox, Vertex};
use crate::viewport::ViewportTransform;
use serde::Serialize;

/// A fully resolved cushion diagram in viewport coordinates.
///
/// Renderers paint it as-is: every point, radius and offset has already been
/// scaled, and nothing in it refers back to inches except label text and
/// `DimensionLabel::value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub family: ShapeFamily,
    pub outline: Outline,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piping_outline: Option<Outline>,
    pub tie_marks: Vec<TieMark>,
    pub zipper_marks: Vec<ZipperMark>,
    pub dimension_labels: Vec<DimensionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_label: Option<DimensionLabel>,
    pub sheet: SpecSheet,
    /// Viewport units per inch
    pub scale: f64,
    /// Where real-world (0, 0) lands
    pub viewport_origin: Vertex,
}

/// Turn one cushion spec into a diagram.
///
/// Nothing is returned unless every stage succeeds.
pub fn layout(spec: &CushionSpec, config: &EngineConfig) -> Result<Diagram, DiagramError> {
    config.validate()?;

    let family = classify(spec)?;
    let cushion = Cushion::from_spec(family, spec)?;
    let outline = cushion.outline();

    let piping_outline = spec
        .piping()
        .is_enabled()
        .then(|| offset_outline(&outline, config.piping_margin));
    let anchor_outline = piping_outline.as_ref().unwrap_or(&outline);
    debug!(
        %family,
        on_piping = piping_outline.is_some(),
        segments = outline.len(),
        "built outline"
    );

    let ctx = TieContext {
        base: &outline,
        from_corner: spec.tie_offset_from_corner(),
        along_length: spec.tie_offset_length(),
        along_width: spec.tie_offset_width(),
        corner_offset: config.tie_corner_offset,
        min_edge: config.min_tie_edge,
    };
    let tie_marks = place_ties(&cushion.tie_roles(&ctx)?, &outline, anchor_outline)?;

    let zipper_name = cushion.zipper_option().unwrap_or("zipper");
    let zipper_marks = place_zippers(zipper_name, &cushion.zipper_roles(), &outline, config.zipper_offset)?;

    let dimension_labels = annotate(&cushion.labels(&outline), &outline, config.label_offset);

    let mut bbox = outline.bbox();
    if let Some(piping) = &piping_outline {
        bbox.expand_bbox(&piping.bbox());
    }
    let thickness_label = thickness_label(cushion.thickness(spec), &bbox, config.thickness_label_offset);

    let ViewportTransform { scale, translate } = fit(&bbox, config)?;

    Ok(Diagram {
        family,
        outline: outline.transformed(scale, translate),
        piping_outline: piping_outline.map(|piping| piping.transformed(scale, translate)),
        tie_marks: tie_marks.iter().map(|mark| mark.transformed(scale, translate)).collect(),
        zipper_marks: zipper_marks.iter().map(|mark| mark.transformed(scale, translate)).collect(),
        dimension_labels: dimension_labels
            .iter()
            .map(|label| label.transformed(scale, translate))
            .collect(),
        thickness_label: thickness_label.map(|label| label.transformed(scale, translate)),
        sheet: SpecSheet::build(spec, &cushion, &config.sheet),
        scale,
        viewport_origin: translate,
    })
}

fn fit(bbox: &BBox, config: &EngineConfig) -> Result<ViewportTransform, DiagramError> {
    let fit = ViewportTransform::fit(bbox, &config.viewport)?;
    debug!(scale = fit.scale, width = %bbox.width(), height = %bbox.height(), "scaled to viewport");
    Ok(fit)
}
