//! Scan-to-label station: wires the catalog, label renderer, and print
//! pipeline behind a line-oriented front end.

pub mod bootstrap;
pub mod catalog_source;
pub mod config;
pub mod frontend;
pub mod scan_log;
pub mod session;

pub use bootstrap::init_station;
pub use catalog_source::CatalogSource;
pub use config::{ConfigError, StationConfig};
pub use frontend::{Command, Frontend};
pub use scan_log::{ScanLog, ScanRecord};
pub use session::{LabelContent, LabelStation, NOT_FOUND_NAME, ScanOutcome, StationError};
