//! Label configuration: physical size, density, orientation, currency marker.

use crate::barcode::Symbology;
use crate::units;

/// Page orientation handed to the print surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    /// Media fed rotated; the page's width and height are swapped.
    Landscape,
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

/// Fixed-per-run label configuration.
///
/// Constructed through [`LabelSpec::new`], which guarantees a canvas of at
/// least one pixel in each direction.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    width_mm: f64,
    height_mm: f64,
    dpi: u32,
    orientation: Orientation,
    symbology: Symbology,
    currency_marker: String,
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            width_mm: 58.0,
            height_mm: 40.0,
            dpi: crate::DEFAULT_DPI,
            orientation: Orientation::Portrait,
            symbology: Symbology::Code128,
            currency_marker: "Rs".into(),
        }
    }
}

/// Longest canvas side accepted, in pixels.
pub const MAX_CANVAS_PX: u32 = 16_384;

impl LabelSpec {
    pub fn new(width_mm: f64, height_mm: f64, dpi: u32) -> Result<Self, InvalidSpecError> {
        check_dimension("width", width_mm)?;
        check_dimension("height", height_mm)?;
        if dpi == 0 {
            return Err(InvalidSpecError::InvalidDpi(dpi));
        }

        let longest_px = width_mm.max(height_mm) / units::MM_PER_INCH * f64::from(dpi);
        if longest_px.round() > f64::from(MAX_CANVAS_PX) {
            return Err(InvalidSpecError::CanvasTooLarge {
                width_mm,
                height_mm,
                dpi,
                max_px: MAX_CANVAS_PX,
            });
        }

        let (width_px, height_px) = (units::mm_to_px(width_mm, dpi), units::mm_to_px(height_mm, dpi));
        if width_px == 0 || height_px == 0 {
            return Err(InvalidSpecError::EmptyCanvas {
                width_px,
                height_px,
            });
        }

        Ok(Self {
            width_mm,
            height_mm,
            dpi,
            ..Self::default()
        })
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Prefix added to prices that do not already start with it. Empty disables it.
    pub fn with_currency_marker(mut self, marker: impl Into<String>) -> Self {
        self.currency_marker = marker.into();
        self
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn currency_marker(&self) -> &str {
        &self.currency_marker
    }

    /// Canvas width: `round(width_mm / 25.4 × dpi)`.
    pub fn pixel_width(&self) -> u32 {
        units::mm_to_px(self.width_mm, self.dpi)
    }

    /// Canvas height: `round(height_mm / 25.4 × dpi)`.
    pub fn pixel_height(&self) -> u32 {
        units::mm_to_px(self.height_mm, self.dpi)
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), InvalidSpecError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidSpecError::NonPositiveDimension { field, value })
    }
}

/// Label dimensions that cannot produce a usable canvas or page.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSpecError {
    #[error("Label {field} must be a positive number of millimeters, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },

    #[error("DPI must be greater than 0, got {0}")]
    InvalidDpi(u32),

    #[error("Label rounds to an empty canvas ({width_px}x{height_px} px)")]
    EmptyCanvas { width_px: u32, height_px: u32 },

    #[error("Label {width_mm}x{height_mm} mm at {dpi} dpi exceeds {max_px} px per side")]
    CanvasTooLarge {
        width_mm: f64,
        height_mm: f64,
        dpi: u32,
        max_px: u32,
    },

    #[error(
        "Label {width_mm}x{height_mm} mm leaves no imageable area inside a {margin_mm} mm margin"
    )]
    NoImageableArea {
        width_mm: f64,
        height_mm: f64,
        margin_mm: f64,
    },
}
