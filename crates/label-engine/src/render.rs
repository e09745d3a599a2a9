//! Label composition.
//!
//! Layout (all offsets derived from the canvas size):
//! ```text
//! ┌──────────────────────────────────┐
//! │ Product name...        Rs 650.00 │  bold, ~h/10
//! │                                  │
//! │  ║│║║ │║│║║│ ║│║ ║║│║ │║║│ ║║│  │  barcode band: 28%..78% of h
//! │  ║│║║ │║│║║│ ║│║ ║║│║ │║║│ ║║│  │
//! │             ABC-1001             │  regular, ~h/11
//! └──────────────────────────────────┘
//! ```

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::barcode::{BarcodeMatrix, EncodeError};
use crate::spec::LabelSpec;
use crate::text::{self, INK, TextFace, TextStyle};

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

const MIN_PAD: u32 = 10;
const MIN_HEADER_SIZE: u32 = 14;
const MIN_CODE_SIZE: u32 = 12;
const BARCODE_TOP_RATIO: f64 = 0.28;
const BARCODE_HEIGHT_RATIO: f64 = 0.50;

/// Pixel geometry of a label canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub width: u32,
    pub height: u32,
    pub pad: u32,
    /// Font size for the name and price line.
    pub header_size: f32,
    /// Font size for the human-readable code under the barcode.
    pub code_size: f32,
    pub barcode_top: u32,
    pub barcode_height: u32,
    pub barcode_width: u32,
}

impl LabelLayout {
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let pad = MIN_PAD.max(width / 40);
        Self {
            width,
            height,
            pad,
            header_size: MIN_HEADER_SIZE.max(height / 10) as f32,
            code_size: MIN_CODE_SIZE.max(height / 11) as f32,
            barcode_top: (f64::from(height) * BARCODE_TOP_RATIO) as u32,
            barcode_height: (f64::from(height) * BARCODE_HEIGHT_RATIO) as u32,
            barcode_width: width.saturating_sub(2 * pad),
        }
    }

    pub fn for_spec(spec: &LabelSpec) -> Self {
        Self::for_canvas(spec.pixel_width(), spec.pixel_height())
    }

    /// Maximum width available to the name.
    pub fn text_width(&self) -> u32 {
        self.width.saturating_sub(2 * self.pad)
    }

    fn header_style(&self) -> TextStyle {
        TextStyle::bold(self.header_size)
    }

    fn code_style(&self) -> TextStyle {
        TextStyle::regular(self.code_size)
    }
}

/// A finished label raster. Never modified after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    image: RgbImage,
}

impl RenderedLabel {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}

impl From<RgbImage> for RenderedLabel {
    fn from(image: RgbImage) -> Self {
        Self { image }
    }
}

/// Renders labels with a given text face.
#[derive(Debug)]
pub struct LabelRenderer<F> {
    face: F,
}

impl<F: TextFace> LabelRenderer<F> {
    pub fn new(face: F) -> Self {
        Self { face }
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    /// Render one label. Identical inputs produce pixel-identical output.
    pub fn render(
        &self,
        code: &str,
        name: &str,
        price: &str,
        spec: &LabelSpec,
    ) -> Result<RenderedLabel, RenderError> {
        let layout = LabelLayout::for_spec(spec);
        if layout.width == 0 || layout.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: layout.width,
                height: layout.height,
            });
        }

        // Encode before allocating the canvas: an unencodable code yields no image at all.
        let barcode = spec
            .symbology()
            .encode(code, layout.barcode_width, layout.barcode_height)?;

        let mut canvas = RgbImage::from_pixel(layout.width, layout.height, PAPER);
        self.draw_name(&mut canvas, &layout, name);
        self.draw_price(&mut canvas, &layout, price, spec.currency_marker());
        draw_barcode(&mut canvas, &barcode, &layout);
        self.draw_code(&mut canvas, &layout, code);

        debug!(
            code,
            width = layout.width,
            height = layout.height,
            module_px = barcode.module_px(),
            "Label rendered"
        );
        Ok(RenderedLabel { image: canvas })
    }

    /// The name as it will be drawn, trimmed with an ellipsis if too wide.
    pub fn fitted_name(&self, layout: &LabelLayout, name: &str) -> String {
        text::fit_to_width(&self.face, name.trim(), layout.text_width(), layout.header_style())
    }

    fn header_baseline(&self, layout: &LabelLayout) -> i32 {
        layout.pad as i32 + self.face.ascent(layout.header_style()).round() as i32
    }

    fn draw_name(&self, canvas: &mut RgbImage, layout: &LabelLayout, name: &str) {
        let fitted = self.fitted_name(layout, name);
        let baseline = self.header_baseline(layout);
        self.face
            .draw(canvas, &fitted, layout.pad as i32, baseline, layout.header_style());
    }

    fn draw_price(&self, canvas: &mut RgbImage, layout: &LabelLayout, price: &str, marker: &str) {
        let Some(text) = price_text(price, marker) else {
            return;
        };
        let style = layout.header_style();
        let width = self.face.measure(&text, style) as i32;
        let x = layout.width as i32 - layout.pad as i32 - width;
        let baseline = self.header_baseline(layout);
        self.face.draw(canvas, &text, x, baseline, style);
    }

    fn draw_code(&self, canvas: &mut RgbImage, layout: &LabelLayout, code: &str) {
        let style = layout.code_style();
        let width = self.face.measure(code, style) as i32;
        let x = (layout.width as i32 - width) / 2;
        let baseline = layout.height as i32 - layout.pad as i32;
        self.face.draw(canvas, code, x, baseline, style);
    }
}

/// Price as displayed: prefixed with the currency marker unless it already
/// carries it. `None` for an empty price.
pub fn price_text(price: &str, marker: &str) -> Option<String> {
    let price = price.trim();
    if price.is_empty() {
        return None;
    }
    if marker.is_empty() || price.starts_with(marker) {
        Some(price.to_string())
    } else {
        Some(format!("{marker} {price}"))
    }
}

/// Paint the matrix horizontally centered in the barcode band, clipped to the canvas.
fn draw_barcode(canvas: &mut RgbImage, barcode: &BarcodeMatrix, layout: &LabelLayout) {
    let left = (layout.width as i32 - barcode.width() as i32) / 2;
    let top = layout.barcode_top as i32;
    for (x, len) in barcode.dark_runs() {
        let bar = Rect::at(left + x as i32, top).of_size(len, barcode.height());
        draw_filled_rect_mut(canvas, bar, INK);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Barcode encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid label canvas {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}
