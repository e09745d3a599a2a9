//! Product table for scan-to-label lookups.
//!
//! Parses the `code,name,price` CSV export, keeps the code→product mapping,
//! and publishes whole-table snapshots so reloads never expose partial state.

mod parse;
pub mod shared;

use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

pub use parse::DELIMITER;
pub use shared::SharedCatalog;

/// A single product row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub code: String,
    pub name: String,
    /// Display string, never parsed as currency.
    pub price: String,
}

/// Counters collected while parsing a catalog source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub loaded: usize,
    /// Malformed records (too few fields or empty code). Blank lines are not counted.
    pub skipped: usize,
}

/// Code→product mapping built in one pass and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<String, Product>,
    stats: LoadStats,
}

impl ProductCatalog {
    /// An empty catalog (used when no product file is present).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog file.
    ///
    /// A missing file yields an empty catalog; any other I/O failure, including
    /// invalid UTF-8, is a [`CatalogLoadError`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "Product file not found, using empty catalog");
                return Ok(Self::empty());
            }
            Err(source) => {
                return Err(CatalogLoadError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let catalog = Self::from_reader(std::io::BufReader::new(file)).map_err(|e| match e {
            CatalogLoadError::Read { line, source, .. } => CatalogLoadError::Read {
                path: Some(path.to_path_buf()),
                line,
                source,
            },
            other => other,
        })?;

        info!(
            path = %path.display(),
            loaded = catalog.stats.loaded,
            skipped = catalog.stats.skipped,
            "Product catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, CatalogLoadError> {
        let (products, stats) = parse::read_records(reader)?;
        Ok(Self { products, stats })
    }

    /// Parse a catalog held in memory. Infallible because no I/O is involved.
    pub fn parse(text: &str) -> Self {
        let (products, stats) = parse::parse_lines(text.lines());
        Self { products, stats }
    }

    /// Exact, case-sensitive lookup on the trimmed input.
    ///
    /// `None` is the normal "not found" result, not a failure.
    pub fn lookup(&self, code: &str) -> Option<&Product> {
        self.products.get(code.trim())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

/// Failure to read an existing catalog source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to open product file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read product data at line {line}{}: {source}", describe_path(.path.as_deref()))]
    Read {
        path: Option<PathBuf>,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

fn describe_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" of {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "code,name,price\nABC-1001,USB Cable 1m,650.00\n";

    #[test]
    fn lookup_finds_loaded_product() {
        let catalog = ProductCatalog::parse(SAMPLE);
        let product = catalog.lookup("ABC-1001").unwrap();
        assert_eq!(
            product,
            &Product {
                code: "ABC-1001".into(),
                name: "USB Cable 1m".into(),
                price: "650.00".into(),
            }
        );
        assert!(catalog.lookup("XYZ").is_none());
    }

    #[test]
    fn lookup_trims_input_but_is_case_sensitive() {
        let catalog = ProductCatalog::parse(SAMPLE);
        assert!(catalog.lookup("  ABC-1001\t").is_some());
        assert!(catalog.lookup("abc-1001").is_none());
    }

    #[test]
    fn missing_file_is_an_empty_catalog() {
        let path = std::env::temp_dir().join("product-catalog-does-not-exist.csv");
        let catalog = ProductCatalog::load(&path).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.stats(), LoadStats::default());
    }

    #[test]
    fn invalid_utf8_is_a_load_error() {
        let bytes: &[u8] = b"code,name,price\nA1,\xff\xfe,10\n";
        let err = ProductCatalog::from_reader(bytes).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Read { line: 2, .. }));
    }
}
