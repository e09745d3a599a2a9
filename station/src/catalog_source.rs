//! Where the product catalog comes from, in priority order.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use product_catalog::{CatalogLoadError, ProductCatalog, SharedCatalog};
use tracing::info;

/// Sample catalog compiled into the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../resources/products.csv");

/// File name looked up in the working directory.
pub const LOCAL_CATALOG_FILE: &str = "products.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Path from `PRODUCTS_CSV`.
    Configured(PathBuf),
    /// `products.csv` in the working directory.
    Local(PathBuf),
    Bundled,
}

impl CatalogSource {
    /// Pick a source relative to the current working directory.
    pub fn resolve(configured: Option<&Path>) -> Self {
        Self::resolve_in(configured, Path::new("."))
    }

    /// Configured path, then `<dir>/products.csv` if it is a file, then the bundled sample.
    pub fn resolve_in(configured: Option<&Path>, dir: &Path) -> Self {
        if let Some(path) = configured {
            return Self::Configured(path.to_path_buf());
        }
        let local = dir.join(LOCAL_CATALOG_FILE);
        if local.is_file() {
            return Self::Local(local);
        }
        Self::Bundled
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Configured(p) | Self::Local(p) => Some(p),
            Self::Bundled => None,
        }
    }

    pub fn load(&self) -> Result<ProductCatalog, CatalogLoadError> {
        let catalog = match self.path() {
            Some(path) => ProductCatalog::load(path)?,
            None => ProductCatalog::parse(BUNDLED_CATALOG),
        };
        info!(source = %self, count = catalog.len(), "Catalog source loaded");
        Ok(catalog)
    }

    /// Re-read this source into `shared`. On failure the published table is kept.
    pub fn reload_into(
        &self,
        shared: &SharedCatalog,
    ) -> Result<Arc<ProductCatalog>, CatalogLoadError> {
        match self.path() {
            Some(path) => shared.reload(path),
            None => {
                shared.publish(ProductCatalog::parse(BUNDLED_CATALOG));
                Ok(shared.snapshot())
            }
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured(p) => write!(f, "{} (PRODUCTS_CSV)", p.display()),
            Self::Local(p) => write!(f, "{}", p.display()),
            Self::Bundled => f.write_str("bundled sample catalog"),
        }
    }
}
