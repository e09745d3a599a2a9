//! On-screen preview using the same fit rule as the printed page.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use label_engine::RenderedLabel;

use crate::planner::{Rect, fit};

/// Scale `label` into a white `viewport_width` × `viewport_height` image, centered.
///
/// Nearest-neighbour resampling keeps bar edges hard.
pub fn render_preview(label: &RenderedLabel, viewport_width: u32, viewport_height: u32) -> RgbImage {
    let mut view = RgbImage::from_pixel(viewport_width, viewport_height, Rgb([255, 255, 255]));
    if viewport_width == 0 || viewport_height == 0 {
        return view;
    }

    let area = Rect::sized(f64::from(viewport_width), f64::from(viewport_height));
    let placement = fit(label.width(), label.height(), area);
    let scaled = imageops::resize(
        label.image(),
        placement.draw_width.max(1.0) as u32,
        placement.draw_height.max(1.0) as u32,
        FilterType::Nearest,
    );
    imageops::overlay(&mut view, &scaled, placement.offset_x as i64, placement.offset_y as i64);
    view
}
