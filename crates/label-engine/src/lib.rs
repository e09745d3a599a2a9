//! Label rasterization for scan-to-label printing.
//!
//! Turns a product code, name, and price into a fixed-size RGB label:
//! Code 128 encoding, width-constrained text, and mm→pixel sizing at a
//! configurable DPI.

pub mod barcode;
pub mod fonts;
pub mod render;
pub mod spec;
pub mod text;
pub mod units;

// Re-exports for convenience
pub use barcode::{BarcodeMatrix, EncodeError, Symbology, encode};
pub use fonts::{FontError, LabelFonts};
pub use render::{LabelLayout, LabelRenderer, RenderError, RenderedLabel};
pub use spec::{InvalidSpecError, LabelSpec, MAX_CANVAS_PX, Orientation};
pub use text::{ELLIPSIS, TextFace, TextStyle, Weight};

/// Default rasterization density, matching common 8 dots/mm thermal heads.
pub const DEFAULT_DPI: u32 = 203;
