//! Physical-unit conversions: millimeters, typographic points, device pixels.

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters to points (1 mm = 72/25.4 pt).
pub fn mm_to_points(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Millimeters to whole device pixels at `dpi`, rounded to nearest.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * f64::from(dpi)).round().max(0.0) as u32
}

/// Points to fractional device pixels at `dpi`.
pub fn points_to_px(points: f64, dpi: u32) -> f64 {
    points / POINTS_PER_INCH * f64::from(dpi)
}

/// Device pixels at `dpi` to points.
pub fn px_to_points(px: f64, dpi: u32) -> f64 {
    px / f64::from(dpi) * POINTS_PER_INCH
}
