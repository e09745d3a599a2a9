use label_engine::{LabelFonts, LabelRenderer};
use product_catalog::SharedCatalog;

use crate::catalog_source::CatalogSource;
use crate::config::StationConfig;
use crate::scan_log::ScanLog;
use crate::session::LabelStation;

/// Foundation init: environment, config, fonts, catalog (fatal on error).
pub fn init_station() -> Result<(LabelStation<LabelFonts>, StationConfig), anyhow::Error> {
    load_dotenv();
    let config = StationConfig::from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let fonts = LabelFonts::load(config.font_path.as_deref(), config.bold_font_path.as_deref())?;
    if !fonts.has_bold_face() {
        tracing::warn!("No bold font found, synthesizing bold for name and price");
    }

    let source = CatalogSource::resolve(config.products_csv.as_deref());
    let catalog = source.load()?;
    let stats = catalog.stats();
    tracing::info!(
        "Products loaded: {} ({} malformed records skipped) from {source}",
        stats.loaded,
        stats.skipped
    );

    let mut scan_log = ScanLog::new();
    if config.scan_log_json {
        scan_log = scan_log.with_jsonl(config.scan_log_path());
    }

    let station = LabelStation::new(
        SharedCatalog::new(catalog),
        source,
        LabelRenderer::new(fonts),
        config.label.clone(),
    )
    .with_scan_log(scan_log);

    match &config.printer_name {
        Some(name) => tracing::info!("Printing to CUPS queue '{name}'"),
        None => tracing::info!("PRINTER_NAME unset, dry run: pages are written as PNG files"),
    }
    Ok((station, config))
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}
