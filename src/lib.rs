//! Layout engine for custom-upholstery cushion diagrams.
//!
//! Give it the dimensions and options from an order form and it returns a
//! [`Diagram`]: the cushion outline, an optional piping contour, tie and
//! zipper marks, dimension labels and the spec sheet, all scaled into the
//! caller's viewport. Painting is left to the caller.
//!
//! ```no_run
//! use cushion_diagram::{EngineConfig, Viewport, layout_json};
//!
//! let config = EngineConfig::new(Viewport::new(3.5, 4.25));
//! let diagram = layout_json(r#"{"length": 24, "width": 18, "thickness": 2}"#, &config)?;
//! println!("scale {}", diagram.scale);
//! # Ok::<(), miette::Report>(())
//! ```

pub mod accessories;
pub mod annotate;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod diagram;
pub mod errors;
pub mod log;
pub mod offset;
pub mod outline;
pub mod shapes;
pub mod sheet;
pub mod spec;
pub mod text;
pub mod types;
pub mod viewport;

pub use accessories::{TieDirection, TieMark, ZipperMark};
pub use annotate::DimensionLabel;
pub use classify::{ShapeFamily, classify};
pub use config::{EngineConfig, SheetConfig, Viewport, ViewportAnchor};
pub use diagram::{Diagram, layout};
pub use errors::{
    AccessoryPlacementError, ConfigError, DiagramError, InvalidDimensionError, ShapeClassificationError,
    UnknownAccessoryOptionError,
};
pub use offset::offset_outline;
pub use outline::{Arc, Outline, Segment};
pub use sheet::{SpecRow, SpecSheet};
pub use spec::CushionSpec;
pub use types::{Length, Vertex};

/// Lay out a cushion given as a JSON object.
///
/// Returns the diagram on success, or an error with diagnostics.
pub fn layout_json(source: &str, config: &EngineConfig) -> Result<Diagram, miette::Report> {
    let spec = CushionSpec::from_json_str(source)?;
    Ok(layout(&spec, config)?)
}
