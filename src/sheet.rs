//! The key/value table printed beside each diagram.

use crate::config::SheetConfig;
use crate::shapes::{Cushion, CushionShape};
use crate::spec::CushionSpec;
use crate::text::wrap;
use crate::types::Length;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecRow {
    pub label: String,
    /// The value, already wrapped to the sheet column
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecSheet {
    pub title: String,
    pub rows: Vec<SpecRow>,
}

impl SpecSheet {
    pub fn build(spec: &CushionSpec, cushion: &Cushion, config: &SheetConfig) -> SpecSheet {
        let mut entries: Vec<(String, String)> = vec![("Shape".into(), cushion.family().title().into())];
        entries.extend(
            cushion
                .dimension_rows()
                .into_iter()
                .map(|(label, value)| (label.to_string(), inches(value))),
        );
        if let Some(thickness) = cushion.thickness(spec) {
            entries.push(("Thickness".into(), inches(thickness)));
        }
        entries.push(("Fill".into(), spec.fill().into()));
        entries.push(("Fabric".into(), spec.fabric().into()));
        entries.push(("Zipper".into(), chosen(cushion.zipper_option(), spec.zipper())));
        let piping = if spec.piping().is_enabled() { "Yes" } else { "No" };
        entries.push(("Piping".into(), piping.into()));
        entries.push(("Ties".into(), chosen(cushion.tie_option(), spec.ties())));

        let width = config.wrap_width.raw();
        SpecSheet {
            title: format!("{} (Quantity: {})", spec.name(), spec.quantity()),
            rows: entries
                .into_iter()
                .map(|(label, value)| SpecRow {
                    label,
                    lines: wrap(&value, width, config.charwid),
                })
                .collect(),
        }
    }

    /// Look a row up by label
    pub fn row(&self, label: &str) -> Option<&SpecRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

fn inches(value: Length) -> String {
    format!("{} inches", value.decimal())
}

/// The order's own wording when an option was recognized, "No" otherwise
fn chosen(option: Option<&'static str>, raw: Option<&str>) -> String {
    match (option, raw) {
        (Some(_), Some(raw)) => raw.trim().to_string(),
        (Some(name), None) => name.to_string(),
        (None, _) => "No".to_string(),
    }
}
