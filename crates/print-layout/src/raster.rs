//! Virtual printer that keeps every page as an RGB raster.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use label_engine::units;
use tracing::debug;

use crate::planner::{PageGeometry, Rect};
use crate::surface::{PageCanvas, PageStatus, PrintSubsystemError, PrintSurface, Printable};

/// Upper bound on pages requested from a single job.
pub const MAX_PAGES: usize = 64;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

/// Rasterizes pages at a device DPI (`px = pt × dpi / 72`).
#[derive(Debug, Clone)]
pub struct RasterSurface {
    dpi: u32,
    pages: Vec<RgbImage>,
}

impl RasterSurface {
    pub fn new(dpi: u32) -> Self {
        Self {
            dpi: dpi.max(1),
            pages: Vec::new(),
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn pages(&self) -> &[RgbImage] {
        &self.pages
    }

    pub fn take_pages(&mut self) -> Vec<RgbImage> {
        std::mem::take(&mut self.pages)
    }

    /// Write every page as `<stem>-<n>.png` under `dir`, returning the paths.
    pub fn save_pages(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, image::ImageError> {
        std::fs::create_dir_all(dir)?;
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let path = dir.join(format!("{stem}-{}.png", i + 1));
                page.save(&path)?;
                Ok(path)
            })
            .collect()
    }

    fn to_px(&self, points: f64) -> f64 {
        units::points_to_px(points, self.dpi)
    }
}

impl PrintSurface for RasterSurface {
    fn print(
        &mut self,
        geometry: &PageGeometry,
        job: &dyn Printable,
    ) -> Result<(), PrintSubsystemError> {
        let width = self.to_px(geometry.width_pt).round().max(1.0) as u32;
        let height = self.to_px(geometry.height_pt).round().max(1.0) as u32;

        for index in 0..MAX_PAGES {
            let mut page = RasterPage {
                image: RgbImage::from_pixel(width, height, PAPER),
                dpi: self.dpi,
            };
            match job.print_page(&mut page, index) {
                PageStatus::Exists => {
                    debug!(index, width, height, dpi = self.dpi, "Rasterized page");
                    self.pages.push(page.image);
                }
                PageStatus::NoSuchPage => return Ok(()),
            }
        }
        Err(PrintSubsystemError::new(format!(
            "print job did not end within {MAX_PAGES} pages"
        )))
    }
}

struct RasterPage {
    image: RgbImage,
    dpi: u32,
}

impl PageCanvas for RasterPage {
    fn draw_image(&mut self, image: &RgbImage, area: Rect) {
        let to_px = |pt: f64| units::points_to_px(pt, self.dpi).round();
        let width = to_px(area.width).max(1.0) as u32;
        let height = to_px(area.height).max(1.0) as u32;
        let scaled = imageops::resize(image, width, height, FilterType::Nearest);
        imageops::overlay(
            &mut self.image,
            &scaled,
            to_px(area.x) as i64,
            to_px(area.y) as i64,
        );
    }
}
