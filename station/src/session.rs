//! Scan session: lookup, render, and print driven by explicit calls.

use image::RgbImage;
use label_engine::{LabelRenderer, LabelSpec, RenderError, RenderedLabel, TextFace};
use print_layout::{PrintError, PrintSurface, print_one, render_preview};
use product_catalog::{CatalogLoadError, Product, SharedCatalog};
use tracing::{debug, info, warn};

use crate::catalog_source::CatalogSource;
use crate::scan_log::{ScanLog, ScanRecord};

/// Name shown for codes missing from the catalog.
pub const NOT_FOUND_NAME: &str = "(NOT FOUND)";

/// The fields a label is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    pub code: String,
    pub name: String,
    pub price: String,
    pub found: bool,
}

impl LabelContent {
    /// Found: the product's name and price. Not found: placeholder name, empty price.
    pub fn from_lookup(code: &str, product: Option<&Product>) -> Self {
        match product {
            Some(p) => Self {
                code: code.to_string(),
                name: p.name.clone(),
                price: p.price.clone(),
                found: true,
            },
            None => Self {
                code: code.to_string(),
                name: NOT_FOUND_NAME.to_string(),
                price: String::new(),
                found: false,
            },
        }
    }
}

/// Result of feeding one line of scanner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Empty after trimming; nothing was looked up.
    Ignored,
    Scanned(LabelContent),
}

/// One operator station: a catalog, a renderer, and the label last shown.
pub struct LabelStation<F> {
    catalog: SharedCatalog,
    source: CatalogSource,
    renderer: LabelRenderer<F>,
    spec: LabelSpec,
    current: Option<LabelContent>,
    last_label: Option<RenderedLabel>,
    scan_log: ScanLog,
}

impl<F: TextFace> LabelStation<F> {
    pub fn new(
        catalog: SharedCatalog,
        source: CatalogSource,
        renderer: LabelRenderer<F>,
        spec: LabelSpec,
    ) -> Self {
        Self {
            catalog,
            source,
            renderer,
            spec,
            current: None,
            last_label: None,
            scan_log: ScanLog::new(),
        }
    }

    pub fn with_scan_log(mut self, scan_log: ScanLog) -> Self {
        self.scan_log = scan_log;
        self
    }

    pub fn spec(&self) -> &LabelSpec {
        &self.spec
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Content of the most recent scan, including manual price edits.
    pub fn current(&self) -> Option<&LabelContent> {
        self.current.as_ref()
    }

    /// The last label that rendered successfully.
    pub fn last_label(&self) -> Option<&RenderedLabel> {
        self.last_label.as_ref()
    }

    pub fn scan_log(&self) -> &ScanLog {
        &self.scan_log
    }

    pub fn scan_log_mut(&mut self) -> &mut ScanLog {
        &mut self.scan_log
    }

    /// Handle one scan: trim, look up, log, render.
    ///
    /// A render failure leaves the previous label in place and is returned
    /// after the scan has been logged.
    pub fn on_scan(&mut self, raw: &str) -> Result<ScanOutcome, StationError> {
        let code = raw.trim();
        if code.is_empty() {
            debug!("Empty scan ignored");
            return Ok(ScanOutcome::Ignored);
        }

        let catalog = self.catalog.snapshot();
        let product = catalog.lookup(code);
        match product {
            Some(p) => info!(code, name = %p.name, "Product found"),
            None => info!(code, "Product not found"),
        }
        self.scan_log.append(ScanRecord::now(code, product));

        let content = LabelContent::from_lookup(code, product);
        self.current = Some(content.clone());
        self.render_current()?;
        Ok(ScanOutcome::Scanned(content))
    }

    /// Override the price of the current label and re-render it.
    pub fn set_manual_price(&mut self, price: &str) -> Result<&RenderedLabel, StationError> {
        let content = self.current.as_mut().ok_or(StationError::NothingScanned)?;
        content.price = price.trim().to_string();
        info!(code = %content.code, price = %content.price, "Manual price set");
        self.render_current()
    }

    /// Re-read the catalog source and republish it.
    pub fn reload_catalog(&mut self) -> Result<usize, StationError> {
        let table = self.source.reload_into(&self.catalog)?;
        Ok(table.len())
    }

    /// Print the last rendered label as one page on `surface`.
    pub fn print<S>(&self, surface: &mut S) -> Result<(), StationError>
    where
        S: PrintSurface + ?Sized,
    {
        let label = self.last_label.as_ref().ok_or(StationError::NothingToPrint)?;
        print_one(label, &self.spec, surface)?;
        Ok(())
    }

    /// Preview of the last label scaled into a viewport.
    pub fn preview(&self, viewport_width: u32, viewport_height: u32) -> Option<RgbImage> {
        self.last_label
            .as_ref()
            .map(|label| render_preview(label, viewport_width, viewport_height))
    }

    fn render_current(&mut self) -> Result<&RenderedLabel, StationError> {
        let Some(content) = &self.current else {
            return Err(StationError::NothingScanned);
        };
        match self
            .renderer
            .render(&content.code, &content.name, &content.price, &self.spec)
        {
            Ok(label) => Ok(self.last_label.insert(label)),
            Err(e) => {
                warn!(code = %content.code, error = %e, "Label render failed, keeping previous label");
                Err(e.into())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Nothing scanned yet")]
    NothingScanned,

    #[error("No label to print. Scan first.")]
    NothingToPrint,

    #[error("Preview failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("Catalog reload failed: {0}")]
    Catalog(#[from] CatalogLoadError),
}
