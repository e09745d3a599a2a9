//! Spooler-backed printing through CUPS `lpr`.

use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info};

use crate::planner::PageGeometry;
use crate::raster::RasterSurface;
use crate::surface::{PrintSubsystemError, PrintSurface, Printable};

/// Sends each rasterized page to a named CUPS queue.
#[derive(Debug, Clone)]
pub struct LprSurface {
    printer: String,
    dpi: u32,
    spool_dir: PathBuf,
}

impl LprSurface {
    pub fn new(printer: impl Into<String>, dpi: u32) -> Self {
        Self {
            printer: printer.into(),
            dpi,
            spool_dir: std::env::temp_dir().join("label-station-print"),
        }
    }

    /// Directory for the temporary page file handed to `lpr`.
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = dir.into();
        self
    }

    pub fn printer(&self) -> &str {
        &self.printer
    }

    fn submit(&self, file: &std::path::Path, media: &str) -> Result<(), PrintSubsystemError> {
        let output = Command::new("lpr")
            .arg("-P")
            .arg(&self.printer)
            .arg("-o")
            .arg(format!("media={media}"))
            .arg(file)
            .output()
            .map_err(|e| PrintSubsystemError::new(format!("Failed to run lpr: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrintSubsystemError::new(format!(
                "lpr failed: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

static NEXT_JOB: AtomicU64 = AtomicU64::new(0);

/// Spool file name for one page, unique across processes sharing the spool dir
/// and across jobs within this process.
fn spool_file_name(job: u64, page: usize) -> String {
    format!("label-{}-{job}-{page}.png", std::process::id())
}

/// CUPS custom media name for the page, e.g. `Custom.58x40mm`.
pub fn media_name(geometry: &PageGeometry) -> String {
    format!(
        "Custom.{:.0}x{:.0}mm",
        geometry.width_mm(),
        geometry.height_mm()
    )
}

impl PrintSurface for LprSurface {
    fn print(
        &mut self,
        geometry: &PageGeometry,
        job: &dyn Printable,
    ) -> Result<(), PrintSubsystemError> {
        let mut raster = RasterSurface::new(self.dpi);
        raster.print(geometry, job)?;

        std::fs::create_dir_all(&self.spool_dir).map_err(|e| {
            PrintSubsystemError::new(format!("Failed to create spool dir: {e}"))
        })?;
        let media = media_name(geometry);
        let job_id = NEXT_JOB.fetch_add(1, Ordering::Relaxed);

        for (index, page) in raster.take_pages().into_iter().enumerate() {
            let file = self.spool_dir.join(spool_file_name(job_id, index));
            page.save(&file).map_err(|e| {
                PrintSubsystemError::new(format!("Failed to write spool file: {e}"))
            })?;

            let result = self.submit(&file, &media);
            let _ = std::fs::remove_file(&file);
            match result {
                Ok(()) => info!(printer = %self.printer, %media, index, "Page sent to lpr"),
                Err(e) => {
                    error!(printer = %self.printer, error = %e, "lpr submission failed");
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label_engine::{LabelSpec, Orientation};

    use crate::planner::plan;

    #[test]
    fn media_name_uses_whole_millimeters() {
        let geometry = plan(&LabelSpec::default()).unwrap();
        assert_eq!(media_name(&geometry), "Custom.58x40mm");
    }

    #[test]
    fn landscape_media_is_swapped() {
        let spec = LabelSpec::default().with_orientation(Orientation::Landscape);
        assert_eq!(media_name(&plan(&spec).unwrap()), "Custom.40x58mm");
    }

    #[test]
    fn spool_names_carry_pid_and_job() {
        let pid = std::process::id();
        assert_eq!(spool_file_name(3, 0), format!("label-{pid}-3-0.png"));
        assert_ne!(spool_file_name(3, 0), spool_file_name(4, 0));
        assert_ne!(spool_file_name(3, 0), spool_file_name(3, 1));
    }
}
