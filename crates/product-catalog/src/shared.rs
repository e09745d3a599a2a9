//! Republishable catalog handle.
//!
//! Readers take an `Arc` snapshot and look up without holding any lock.
//! Reloads build a complete new table first and swap the reference only on
//! success, so a reader sees either the old table or the new one.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::{CatalogLoadError, ProductCatalog};

#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    current: Arc<ArcSwap<ProductCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(catalog)),
        }
    }

    /// The table published at the time of the call. Lock-free.
    pub fn snapshot(&self) -> Arc<ProductCatalog> {
        self.current.load_full()
    }

    /// Replace the published table wholesale. Returns the previous one.
    pub fn publish(&self, catalog: ProductCatalog) -> Arc<ProductCatalog> {
        self.current.swap(Arc::new(catalog))
    }

    /// Load `path` and publish it. On failure the current table stays in place.
    ///
    /// Returns the table this call published, even if another publish has
    /// already replaced it.
    pub fn reload(&self, path: impl AsRef<Path>) -> Result<Arc<ProductCatalog>, CatalogLoadError> {
        let path = path.as_ref();
        match ProductCatalog::load(path) {
            Ok(catalog) => {
                let table = Arc::new(catalog);
                self.current.store(Arc::clone(&table));
                info!(path = %path.display(), count = table.len(), "Product catalog republished");
                Ok(table)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Catalog reload failed, keeping previous table");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_survives_publish() {
        let shared = SharedCatalog::new(ProductCatalog::parse("code,name,price\nA1,Old,1\n"));
        let before = shared.snapshot();

        shared.publish(ProductCatalog::parse("code,name,price\nB2,New,2\n"));
        let after = shared.snapshot();

        assert_eq!(before.lookup("A1").unwrap().name, "Old");
        assert!(before.lookup("B2").is_none());
        assert!(after.lookup("A1").is_none());
        assert_eq!(after.lookup("B2").unwrap().name, "New");
    }

    #[test]
    fn clones_share_the_published_table() {
        let shared = SharedCatalog::default();
        let other = shared.clone();
        shared.publish(ProductCatalog::parse("code,name,price\nA1,Widget,1\n"));
        assert_eq!(other.snapshot().len(), 1);
    }

    #[test]
    fn publish_returns_the_replaced_table() {
        let shared = SharedCatalog::new(ProductCatalog::parse("code,name,price\nA1,Old,1\n"));
        let previous = shared.publish(ProductCatalog::empty());
        assert_eq!(previous.lookup("A1").unwrap().name, "Old");
        assert!(shared.snapshot().is_empty());
    }

    #[test]
    fn concurrent_readers_never_see_partial_tables() {
        let small = "code,name,price\nA1,a,1\n";
        let large: String = std::iter::once("code,name,price".to_string())
            .chain((0..200).map(|i| format!("C{i},n{i},{i}")))
            .collect::<Vec<_>>()
            .join("\n");

        let shared = SharedCatalog::new(ProductCatalog::parse(small));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let len = shared.snapshot().len();
                        assert!(len == 1 || len == 200, "observed partial table of {len}");
                    }
                })
            })
            .collect();

        for i in 0..50 {
            let text = if i % 2 == 0 { large.as_str() } else { small };
            shared.publish(ProductCatalog::parse(text));
        }
        for r in readers {
            r.join().unwrap();
        }
    }
}
