//! Physical page layout and single-page print jobs for rendered labels.
//!
//! Converts label millimeters into point-based page geometry, fits raster
//! labels onto it (the same rule drives screen previews), and hands exactly
//! one page to a print surface.

pub mod lpr;
pub mod pipeline;
pub mod planner;
pub mod preview;
pub mod raster;
pub mod surface;

// Re-exports for convenience
pub use lpr::LprSurface;
pub use pipeline::{LabelPage, PrintError, print_one};
pub use planner::{MARGIN_MM, PageGeometry, Placement, Rect, fit, plan};
pub use preview::render_preview;
pub use raster::RasterSurface;
pub use surface::{PageCanvas, PageStatus, PrintSubsystemError, PrintSurface, Printable};
