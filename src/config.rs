//! Engine configuration: the caller's viewport plus every overridable constant.

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::{Length, Vertex};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Where the scaled diagram sits inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportAnchor {
    /// Centered in the viewport rectangle
    #[default]
    Center,
    /// Bounding box minimum corner on the viewport origin
    BottomLeft,
}

/// The drawing area a diagram must fit, in caller (device) units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub max_width: f64,
    pub max_height: f64,
    #[serde(default)]
    pub origin: Vertex,
    #[serde(default)]
    pub anchor: ViewportAnchor,
}

impl Viewport {
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Viewport {
            max_width,
            max_height,
            origin: DVec2::ZERO,
            anchor: ViewportAnchor::Center,
        }
    }

    pub fn with_origin(mut self, origin: Vertex) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_anchor(mut self, anchor: ViewportAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Spec sheet text layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Column width values are wrapped to
    #[serde(default = "default_wrap_width")]
    pub wrap_width: Length,
    /// Width of an average character, in inches
    #[serde(default = "default_charwid")]
    pub charwid: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            wrap_width: defaults::SHEET_WRAP_WIDTH,
            charwid: defaults::CHARWID,
        }
    }
}

/// Everything `layout` needs besides the spec itself.
///
/// Only the viewport is mandatory; JSON input may omit every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_piping_margin")]
    pub piping_margin: Length,
    #[serde(default = "default_tie_corner_offset")]
    pub tie_corner_offset: Length,
    #[serde(default = "default_zipper_offset")]
    pub zipper_offset: Length,
    #[serde(default = "default_label_offset")]
    pub label_offset: Length,
    #[serde(default = "default_thickness_label_offset")]
    pub thickness_label_offset: Length,
    #[serde(default = "default_min_tie_edge")]
    pub min_tie_edge: Length,
    #[serde(default)]
    pub sheet: SheetConfig,
}

fn default_piping_margin() -> Length {
    defaults::PIPING_MARGIN
}
fn default_tie_corner_offset() -> Length {
    defaults::TIE_CORNER_OFFSET
}
fn default_zipper_offset() -> Length {
    defaults::ZIPPER_OFFSET
}
fn default_label_offset() -> Length {
    defaults::LABEL_OFFSET
}
fn default_thickness_label_offset() -> Length {
    defaults::THICKNESS_LABEL_OFFSET
}
fn default_min_tie_edge() -> Length {
    defaults::MIN_TIE_EDGE
}
fn default_wrap_width() -> Length {
    defaults::SHEET_WRAP_WIDTH
}
fn default_charwid() -> f64 {
    defaults::CHARWID
}

impl EngineConfig {
    pub fn new(viewport: Viewport) -> Self {
        EngineConfig {
            viewport,
            piping_margin: defaults::PIPING_MARGIN,
            tie_corner_offset: defaults::TIE_CORNER_OFFSET,
            zipper_offset: defaults::ZIPPER_OFFSET,
            label_offset: defaults::LABEL_OFFSET,
            thickness_label_offset: defaults::THICKNESS_LABEL_OFFSET,
            min_tie_edge: defaults::MIN_TIE_EDGE,
            sheet: SheetConfig::default(),
        }
    }

    pub fn with_piping_margin(mut self, margin: Length) -> Self {
        self.piping_margin = margin;
        self
    }

    pub fn with_tie_corner_offset(mut self, offset: Length) -> Self {
        self.tie_corner_offset = offset;
        self
    }

    pub fn with_zipper_offset(mut self, offset: Length) -> Self {
        self.zipper_offset = offset;
        self
    }

    pub fn with_label_offset(mut self, offset: Length) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn with_thickness_label_offset(mut self, offset: Length) -> Self {
        self.thickness_label_offset = offset;
        self
    }

    pub fn with_min_tie_edge(mut self, length: Length) -> Self {
        self.min_tie_edge = length;
        self
    }

    pub fn with_sheet(mut self, sheet: SheetConfig) -> Self {
        self.sheet = sheet;
        self
    }

    /// Reject values no diagram could be drawn with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Viewport {
            max_width,
            max_height,
            origin,
            ..
        } = self.viewport;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(max_width) || !positive(max_height) || !origin.is_finite() {
            return Err(ConfigError::InvalidViewport {
                width: max_width,
                height: max_height,
            });
        }

        let lengths = [
            ("piping_margin", self.piping_margin),
            ("tie_corner_offset", self.tie_corner_offset),
            ("zipper_offset", self.zipper_offset),
            ("label_offset", self.label_offset),
            ("thickness_label_offset", self.thickness_label_offset),
            ("min_tie_edge", self.min_tie_edge),
            ("sheet.wrap_width", self.sheet.wrap_width),
        ];
        for (name, length) in lengths {
            Length::try_non_negative(length.raw())
                .map_err(|source| ConfigError::InvalidLength { name, source })?;
        }
        Length::try_positive(self.sheet.charwid).map_err(|source| ConfigError::InvalidLength {
            name: "sheet.charwid",
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn defaults_follow_constants() {
        let config = EngineConfig::new(Viewport::new(3.5, 4.25));
        assert_eq!(config.piping_margin, Length::inches(0.5));
        assert_eq!(config.tie_corner_offset, Length::inches(4.0));
        assert_eq!(config.viewport.anchor, ViewportAnchor::Center);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_needs_only_the_viewport() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"viewport": {"max_width": 3.5, "max_height": 4.25}}"#).unwrap();
        assert_eq!(config, EngineConfig::new(Viewport::new(3.5, 4.25)));

        let config: EngineConfig = serde_json::from_str(
            r#"{
                "viewport": {"max_width": 10, "max_height": 8, "origin": [1, 2], "anchor": "bottom_left"},
                "piping_margin": 0.25,
                "sheet": {"charwid": 0.1}
            }"#,
        )
        .unwrap();
        assert_eq!(config.viewport.origin, DVec2::new(1.0, 2.0));
        assert_eq!(config.viewport.anchor, ViewportAnchor::BottomLeft);
        assert_eq!(config.piping_margin, Length::inches(0.25));
        assert_eq!(config.sheet.wrap_width, defaults::SHEET_WRAP_WIDTH);
        assert_eq!(config.sheet.charwid, 0.1);
    }

    #[test]
    fn validate_rejects_bad_viewport() {
        let config = EngineConfig::new(Viewport::new(0.0, 4.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidViewport {
                width: 0.0,
                height: 4.0
            })
        );
        assert!(EngineConfig::new(Viewport::new(f64::INFINITY, 4.0)).validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_margin() {
        let config = EngineConfig::new(Viewport::new(3.0, 4.0)).with_piping_margin(Length::inches(-0.5));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidLength {
                name: "piping_margin",
                source: NumericError::Negative
            })
        );
    }

    #[test]
    fn zero_margin_is_allowed() {
        let config = EngineConfig::new(Viewport::new(3.0, 4.0)).with_piping_margin(Length::ZERO);
        assert!(config.validate().is_ok());
    }
}
