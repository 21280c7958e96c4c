//! Dimension labels.
//!
//! Families describe *what* to label as [`LabelRole`]s. This module decides
//! where the text goes: at the midpoint of the labelled edge or chord, pulled
//! `label_offset` inside the outline.

use crate::outline::{Outline, Segment};
use crate::types::{BBox, Length, UnitVec, Vertex};
use glam::{DVec2, dvec2};
use serde::Serialize;

/// The geometry a label measures
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelSite {
    /// An edge of the base outline
    Edge(usize),
    /// An interior line that is not an edge, such as a height or diameter
    Chord { from: Vertex, to: Vertex },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelRole {
    pub site: LabelSite,
    pub value: Length,
    pub caption: Option<&'static str>,
}

impl LabelRole {
    pub fn edge(edge: usize, value: Length) -> Self {
        LabelRole {
            site: LabelSite::Edge(edge),
            value,
            caption: None,
        }
    }

    /// Label the edge with its own measured length
    pub fn measured(outline: &Outline, edge: usize) -> Self {
        let value = outline.segment(edge).map_or(0.0, Segment::length);
        LabelRole::edge(edge, Length::inches(value))
    }

    pub fn chord(from: Vertex, to: Vertex, value: Length) -> Self {
        LabelRole {
            site: LabelSite::Chord { from, to },
            value,
            caption: None,
        }
    }

    pub fn captioned(mut self, caption: &'static str) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn text(&self) -> String {
        match self.caption {
            Some(caption) => format!("{caption}: {}", self.value),
            None => self.value.to_string(),
        }
    }
}

/// A resolved label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLabel {
    /// Midpoint of the measured edge or chord
    pub anchor: Vertex,
    /// Where the text goes
    pub position: Vertex,
    pub text: String,
    /// Signed distance from anchor to position along the outward normal;
    /// negative is inside the outline
    pub perpendicular_offset: f64,
    /// The measured length, in inches
    pub value: f64,
}

impl DimensionLabel {
    pub(crate) fn transformed(&self, scale: f64, translate: DVec2) -> DimensionLabel {
        DimensionLabel {
            anchor: self.anchor * scale + translate,
            position: self.position * scale + translate,
            text: self.text.clone(),
            perpendicular_offset: self.perpendicular_offset * scale,
            value: self.value,
        }
    }
}

pub fn annotate(roles: &[LabelRole], base: &Outline, label_offset: Length) -> Vec<DimensionLabel> {
    let inset = -label_offset.raw();
    roles
        .iter()
        .filter_map(|role| {
            let (anchor, normal) = match role.site {
                LabelSite::Edge(edge) => {
                    let segment = base.segment(edge)?;
                    (segment.midpoint(), segment.outward_normal())
                }
                LabelSite::Chord { from, to } => {
                    ((from + to) / 2.0, UnitVec::normalized(to - from).map(UnitVec::right_normal))
                }
            };
            let position = normal.map_or(anchor, |n| anchor + n.as_dvec2() * inset);
            Some(DimensionLabel {
                anchor,
                position,
                text: role.text(),
                perpendicular_offset: if normal.is_some() { inset } else { 0.0 },
                value: role.value.raw(),
            })
        })
        .collect()
}

/// `Thickness: 2"`, to the left of the outline at mid height
pub fn thickness_label(thickness: Option<Length>, bbox: &BBox, offset: Length) -> Option<DimensionLabel> {
    let thickness = thickness?;
    if bbox.is_empty() {
        return None;
    }
    let anchor = dvec2(bbox.min.x, bbox.center().y);
    Some(DimensionLabel {
        anchor,
        position: anchor - dvec2(offset.raw(), 0.0),
        text: format!("Thickness: {thickness}"),
        perpendicular_offset: offset.raw(),
        value: thickness.raw(),
    })
}
