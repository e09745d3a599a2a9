//! Print surface contract: a page size, a drawing context per page, and a
//! page source that says when the document ends.

use image::RgbImage;

use crate::planner::{PageGeometry, Rect};

/// Answer from a page source for a given page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Exists,
    NoSuchPage,
}

/// Drawing context for one page, addressed in points.
pub trait PageCanvas {
    /// Draw `image` scaled into `area`.
    fn draw_image(&mut self, image: &RgbImage, area: Rect);
}

/// Source of pages handed to a surface.
pub trait Printable {
    /// Paint page `index` onto `canvas`, or report that it does not exist.
    fn print_page(&self, canvas: &mut dyn PageCanvas, index: usize) -> PageStatus;
}

/// Physical or virtual output device.
pub trait PrintSurface {
    /// Request pages from `job` until it answers [`PageStatus::NoSuchPage`].
    fn print(&mut self, geometry: &PageGeometry, job: &dyn Printable)
    -> Result<(), PrintSubsystemError>;
}

/// Failure reported by the platform print subsystem, text preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PrintSubsystemError {
    message: String,
}

impl PrintSubsystemError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
