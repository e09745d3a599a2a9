//! Text measurement and drawing for label fields.
//!
//! [`TextFace`] is the seam between layout and glyph rendering; the
//! production implementation is [`LabelFonts`] (ab_glyph + imageproc).

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::fonts::LabelFonts;

/// Marker appended to names trimmed to fit.
pub const ELLIPSIS: &str = "...";

/// Ink color for all label text and bars.
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Font size (em size in pixels) and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Regular,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Bold,
        }
    }
}

/// Measures and draws single lines of text.
pub trait TextFace {
    /// Advance width of `text` in whole pixels.
    fn measure(&self, text: &str, style: TextStyle) -> u32;

    /// Distance from the top of the line to the baseline, in pixels.
    fn ascent(&self, style: TextStyle) -> f32;

    /// Draw `text` with its baseline at `baseline`, starting at `x`.
    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, style: TextStyle);
}

/// Shorten `text` so it measures no wider than `max_width`.
///
/// Characters are removed from the end until the remainder fits, then the
/// last three kept characters become [`ELLIPSIS`]. If three or fewer remain
/// the marker is returned alone. Text that already fits is returned as is.
pub fn fit_to_width(face: &impl TextFace, text: &str, max_width: u32, style: TextStyle) -> String {
    if face.measure(text, style) <= max_width {
        return text.to_string();
    }

    let mut kept: Vec<char> = text.chars().collect();
    while !kept.is_empty() && face.measure(&kept.iter().collect::<String>(), style) > max_width {
        kept.pop();
    }

    if kept.len() <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }
    kept.truncate(kept.len() - ELLIPSIS.len());
    let mut out: String = kept.into_iter().collect();
    out.push_str(ELLIPSIS);
    out
}

/// Scale for an em size in pixels; falls back to a raw pixel height.
fn px_scale(font: &FontVec, size: f32) -> PxScale {
    font.pt_to_px_scale(size).unwrap_or(PxScale::from(size))
}

/// Measure the pixel width of a string at the given font and size.
fn measure_text_width(font: &FontVec, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

impl TextFace for LabelFonts {
    fn measure(&self, text: &str, style: TextStyle) -> u32 {
        if text.is_empty() {
            return 0;
        }
        let (font, synthetic) = self.face_for(style.weight);
        let width = measure_text_width(font, px_scale(font, style.size), text);
        if synthetic { width + 1 } else { width }
    }

    fn ascent(&self, style: TextStyle) -> f32 {
        let (font, _) = self.face_for(style.weight);
        font.as_scaled(px_scale(font, style.size)).ascent()
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let (font, synthetic) = self.face_for(style.weight);
        let scale = px_scale(font, style.size);
        // imageproc positions glyphs from the top of the line.
        let top = baseline - font.as_scaled(scale).ascent().round() as i32;

        draw_text_mut(canvas, INK, x, top, scale, font, text);
        if synthetic {
            // Double-strike with a 1px offset when no bold face is loaded.
            draw_text_mut(canvas, INK, x + 1, top, scale, font, text);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fixed-advance face that draws each glyph as a solid block.
    pub(crate) struct BlockFace;

    impl BlockFace {
        fn advance(style: TextStyle) -> u32 {
            let base = (style.size * 0.6).round() as u32;
            match style.weight {
                Weight::Regular => base,
                Weight::Bold => base + 1,
            }
        }
    }

    impl TextFace for BlockFace {
        fn measure(&self, text: &str, style: TextStyle) -> u32 {
            text.chars().count() as u32 * Self::advance(style)
        }

        fn ascent(&self, style: TextStyle) -> f32 {
            (style.size * 0.8).round()
        }

        fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, style: TextStyle) {
            let advance = Self::advance(style) as i32;
            let top = baseline - self.ascent(style) as i32;
            for (i, ch) in text.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let gx = x + i as i32 * advance;
                for py in top.max(0)..baseline.min(canvas.height() as i32) {
                    for px in (gx + 1).max(0)..(gx + advance - 1).min(canvas.width() as i32) {
                        canvas.put_pixel(px as u32, py as u32, INK);
                    }
                }
            }
        }
    }

    #[test]
    fn fitting_text_is_untouched() {
        let style = TextStyle::bold(10.0);
        assert_eq!(fit_to_width(&BlockFace, "Cable", 100, style), "Cable");
    }

    #[test]
    fn long_text_is_trimmed_with_marker() {
        // 7px per bold glyph: 10 glyphs fit in 70px.
        let style = TextStyle::bold(10.0);
        let out = fit_to_width(&BlockFace, "USB Cable 1m braided", 70, style);
        assert_eq!(out, "USB Cab...");
        assert!(out.chars().count() < "USB Cable 1m braided".chars().count());
    }

    #[test]
    fn trimming_counts_characters_not_bytes() {
        let style = TextStyle::regular(10.0);
        let out = fit_to_width(&BlockFace, "ÄÖÜäöüßÄÖÜ", 36, style);
        assert_eq!(out, "ÄÖÜ...");
    }

    #[test]
    fn tiny_width_yields_bare_marker() {
        let style = TextStyle::regular(10.0);
        assert_eq!(fit_to_width(&BlockFace, "Widget", 12, style), ELLIPSIS);
        assert_eq!(fit_to_width(&BlockFace, "Widget", 0, style), ELLIPSIS);
    }

    #[test]
    fn empty_text_fits() {
        assert_eq!(fit_to_width(&BlockFace, "", 0, TextStyle::regular(10.0)), "");
    }
}
