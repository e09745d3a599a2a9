//! One label, one page.

use image::RgbImage;
use label_engine::{InvalidSpecError, LabelSpec, RenderedLabel};
use tracing::{error, info};

use crate::planner::{self, Placement};
use crate::surface::{PageCanvas, PageStatus, PrintSubsystemError, PrintSurface, Printable};

/// Single-page document holding a label and where it goes on the page.
#[derive(Debug, Clone, Copy)]
pub struct LabelPage<'a> {
    image: &'a RgbImage,
    placement: Placement,
}

impl<'a> LabelPage<'a> {
    pub fn new(image: &'a RgbImage, placement: Placement) -> Self {
        Self { image, placement }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }
}

impl Printable for LabelPage<'_> {
    fn print_page(&self, canvas: &mut dyn PageCanvas, index: usize) -> PageStatus {
        if index > 0 {
            return PageStatus::NoSuchPage;
        }
        canvas.draw_image(self.image, self.placement.area());
        PageStatus::Exists
    }
}

/// Print `label` as exactly one page on `surface`.
///
/// Subsystem failures are returned as-is; the caller decides whether to resubmit.
pub fn print_one<S>(label: &RenderedLabel, spec: &LabelSpec, surface: &mut S) -> Result<(), PrintError>
where
    S: PrintSurface + ?Sized,
{
    let geometry = planner::plan(spec)?;
    let placement = planner::fit(label.width(), label.height(), geometry.imageable);
    let page = LabelPage::new(label.image(), placement);

    surface.print(&geometry, &page).map_err(|e| {
        error!(error = %e, "Print subsystem rejected label");
        e
    })?;
    info!(
        width_pt = geometry.width_pt,
        height_pt = geometry.height_pt,
        scale = placement.scale,
        "Label printed"
    );
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("Invalid label spec: {0}")]
    InvalidSpec(#[from] InvalidSpecError),

    #[error("Print failed: {0}")]
    Subsystem(#[from] PrintSubsystemError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{PageGeometry, Rect};

    #[derive(Default)]
    struct RecordingCanvas {
        areas: Vec<Rect>,
    }

    impl PageCanvas for RecordingCanvas {
        fn draw_image(&mut self, _image: &RgbImage, area: Rect) {
            self.areas.push(area);
        }
    }

    #[test]
    fn only_first_page_exists() {
        let image = RgbImage::new(480, 330);
        let placement = planner::fit(480, 330, Rect::sized(400.0, 300.0));
        let page = LabelPage::new(&image, placement);
        let mut canvas = RecordingCanvas::default();

        assert_eq!(page.print_page(&mut canvas, 0), PageStatus::Exists);
        assert_eq!(page.print_page(&mut canvas, 1), PageStatus::NoSuchPage);
        assert_eq!(page.print_page(&mut canvas, 7), PageStatus::NoSuchPage);
        assert_eq!(canvas.areas, vec![Rect::new(0.0, 13.0, 400.0, 275.0)]);
    }

    struct Rejecting {
        calls: usize,
    }

    impl PrintSurface for Rejecting {
        fn print(
            &mut self,
            _geometry: &PageGeometry,
            _job: &dyn Printable,
        ) -> Result<(), PrintSubsystemError> {
            self.calls += 1;
            Err(PrintSubsystemError::new("printer offline"))
        }
    }

    fn blank_label() -> RenderedLabel {
        RenderedLabel::from(RgbImage::new(464, 320))
    }

    #[test]
    fn subsystem_failure_is_not_retried() {
        let mut surface = Rejecting { calls: 0 };
        let err = print_one(&blank_label(), &LabelSpec::default(), &mut surface).unwrap_err();
        match err {
            PrintError::Subsystem(e) => assert_eq!(e.message(), "printer offline"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(surface.calls, 1);
    }

    #[test]
    fn invalid_spec_never_reaches_surface() {
        let mut surface = Rejecting { calls: 0 };
        let spec = LabelSpec::new(3.0, 40.0, 203).unwrap();
        let err = print_one(&blank_label(), &spec, &mut surface).unwrap_err();
        assert!(matches!(err, PrintError::InvalidSpec(_)));
        assert_eq!(surface.calls, 0);
    }
}
