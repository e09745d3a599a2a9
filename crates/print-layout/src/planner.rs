//! Page geometry in points and aspect-preserving placement.

use label_engine::units::{self, MM_PER_INCH, POINTS_PER_INCH};
use label_engine::{InvalidSpecError, LabelSpec, Orientation};
use tracing::debug;

/// Hardware margin kept blank on every side of the page.
pub const MARGIN_MM: f64 = 2.0;

/// Axis-aligned rectangle; units depend on context (points on a page, pixels in a preview).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Page size and imageable area, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f64,
    pub height_pt: f64,
    pub imageable: Rect,
    pub orientation: Orientation,
}

impl PageGeometry {
    pub fn width_mm(&self) -> f64 {
        self.width_pt / POINTS_PER_INCH * MM_PER_INCH
    }

    pub fn height_mm(&self) -> f64 {
        self.height_pt / POINTS_PER_INCH * MM_PER_INCH
    }
}

/// Where and how large an image is drawn inside a target rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Placement {
    pub fn area(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.draw_width, self.draw_height)
    }
}

/// Build the page for a label, inset by [`MARGIN_MM`] on all sides.
///
/// Fails when either dimension is no larger than twice the margin.
pub fn plan(spec: &LabelSpec) -> Result<PageGeometry, InvalidSpecError> {
    let (width_mm, height_mm) = match spec.orientation() {
        Orientation::Portrait => (spec.width_mm(), spec.height_mm()),
        Orientation::Landscape => (spec.height_mm(), spec.width_mm()),
    };
    if width_mm <= 2.0 * MARGIN_MM || height_mm <= 2.0 * MARGIN_MM {
        return Err(InvalidSpecError::NoImageableArea {
            width_mm,
            height_mm,
            margin_mm: MARGIN_MM,
        });
    }

    let width_pt = units::mm_to_points(width_mm);
    let height_pt = units::mm_to_points(height_mm);
    let margin_pt = units::mm_to_points(MARGIN_MM);
    let imageable = Rect::new(
        margin_pt,
        margin_pt,
        width_pt - 2.0 * margin_pt,
        height_pt - 2.0 * margin_pt,
    );

    debug!(width_pt, height_pt, margin_pt, "Page geometry planned");
    Ok(PageGeometry {
        width_pt,
        height_pt,
        imageable,
        orientation: spec.orientation(),
    })
}

/// Scale `image_width` × `image_height` to fit `area` and center it.
///
/// `scale = min(area.w / w, area.h / h)`. The drawn size and the centering
/// offsets are rounded to whole units with `f64::round` (halves away from
/// zero), so an odd leftover puts the extra unit after the image.
pub fn fit(image_width: u32, image_height: u32, area: Rect) -> Placement {
    let (w, h) = (f64::from(image_width.max(1)), f64::from(image_height.max(1)));
    let scale = (area.width / w).min(area.height / h);

    let draw_width = (w * scale).round();
    let draw_height = (h * scale).round();
    Placement {
        scale,
        draw_width,
        draw_height,
        offset_x: area.x + ((area.width - draw_width) / 2.0).round(),
        offset_y: area.y + ((area.height - draw_height) / 2.0).round(),
    }
}
