use std::path::PathBuf;

use image::{Rgb, RgbImage};
use label_engine::{LabelRenderer, LabelSpec, TextFace, TextStyle};
use label_station::{
    CatalogSource, Command, Frontend, LabelStation, NOT_FOUND_NAME, ScanOutcome, StationConfig,
    StationError,
};
use print_layout::RasterSurface;
use product_catalog::{ProductCatalog, SharedCatalog};

/// Solid blocks instead of glyphs: 6px per character.
struct BlockFace;

impl TextFace for BlockFace {
    fn measure(&self, text: &str, _style: TextStyle) -> u32 {
        text.chars().count() as u32 * 6
    }

    fn ascent(&self, style: TextStyle) -> f32 {
        style.size * 0.8
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, baseline: i32, style: TextStyle) {
        let top = baseline - self.ascent(style) as i32;
        let right = x + self.measure(text, style) as i32;
        for py in top.max(0)..baseline.min(canvas.height() as i32) {
            for px in x.max(0)..right.min(canvas.width() as i32) {
                canvas.put_pixel(px as u32, py as u32, Rgb([0, 0, 0]));
            }
        }
    }
}

const CATALOG: &str = "code,name,price\nABC-1001,USB Cable 1m,650.00\nABC-1002,Wireless Mouse,2450.00\n";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("label-station-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn station_with(source: CatalogSource) -> LabelStation<BlockFace> {
    let catalog = source.load().unwrap();
    LabelStation::new(
        SharedCatalog::new(catalog),
        source,
        LabelRenderer::new(BlockFace),
        LabelSpec::default(),
    )
}

fn station() -> LabelStation<BlockFace> {
    let station = station_with(CatalogSource::Bundled);
    station.catalog().publish(ProductCatalog::parse(CATALOG));
    station
}

#[test]
fn empty_scan_is_ignored() {
    let mut station = station();
    assert_eq!(station.on_scan("   \t").unwrap(), ScanOutcome::Ignored);
    assert!(station.scan_log().is_empty());
    assert!(station.last_label().is_none());
    assert!(station.current().is_none());
}

#[test]
fn found_scan_renders_catalog_fields() {
    let mut station = station();
    let ScanOutcome::Scanned(content) = station.on_scan(" ABC-1001 \n").unwrap() else {
        panic!("scan was ignored");
    };
    assert!(content.found);
    assert_eq!(content.code, "ABC-1001");
    assert_eq!(content.name, "USB Cable 1m");
    assert_eq!(content.price, "650.00");

    let label = station.last_label().unwrap();
    assert_eq!((label.width(), label.height()), (464, 320));
    assert_eq!(station.scan_log().len(), 1);
    assert!(station.scan_log().render().contains("| ABC-1001 | USB Cable 1m | 650.00"));
}

#[test]
fn unknown_code_gets_placeholder_and_no_price() {
    let mut station = station();
    station.on_scan("ABC-1001").unwrap();
    let ScanOutcome::Scanned(content) = station.on_scan("ZZZ-404").unwrap() else {
        panic!("scan was ignored");
    };
    assert!(!content.found);
    assert_eq!(content.name, NOT_FOUND_NAME);
    assert_eq!(content.price, "");
    assert!(station.scan_log().render().ends_with("| ZZZ-404 | NOT_FOUND\n"));
}

#[test]
fn failed_render_keeps_previous_label() {
    let mut station = station();
    station.on_scan("ABC-1001").unwrap();
    let before = station.last_label().cloned().unwrap();

    let err = station.on_scan("código").unwrap_err();
    assert!(matches!(err, StationError::Render(_)));
    assert_eq!(station.last_label(), Some(&before));
    // The scan itself is still logged.
    assert_eq!(station.scan_log().len(), 2);
}

#[test]
fn manual_price_is_drawn_for_unknown_code() {
    let mut station = station();
    station.on_scan("ZZZ-404").unwrap();
    let without_price = station.last_label().cloned().unwrap();

    let with_price = station.set_manual_price(" 99.00 ").unwrap().clone();
    assert_ne!(with_price, without_price);
    assert_eq!(station.current().unwrap().price, "99.00");
}

#[test]
fn manual_price_needs_a_scan() {
    let mut station = station();
    assert!(matches!(
        station.set_manual_price("10"),
        Err(StationError::NothingScanned)
    ));
}

#[test]
fn print_sends_exactly_one_page() {
    let mut station = station();
    let mut surface = RasterSurface::new(203);
    assert!(matches!(
        station.print(&mut surface),
        Err(StationError::NothingToPrint)
    ));

    station.on_scan("ABC-1002").unwrap();
    station.print(&mut surface).unwrap();
    assert_eq!(surface.pages().len(), 1);
    assert_eq!(surface.pages()[0].dimensions(), (464, 320));
}

#[test]
fn reload_replaces_the_whole_catalog() {
    let dir = scratch_dir("reload");
    let path = dir.join("products.csv");
    std::fs::write(&path, CATALOG).unwrap();

    let mut station = station_with(CatalogSource::Configured(path.clone()));
    let ScanOutcome::Scanned(before) = station.on_scan("ABC-1001").unwrap() else {
        panic!("scan was ignored");
    };
    assert!(before.found);

    std::fs::write(&path, "code,name,price\nNEW-1,Fresh Stock,10.00\n").unwrap();
    assert_eq!(station.reload_catalog().unwrap(), 1);

    let ScanOutcome::Scanned(gone) = station.on_scan("ABC-1001").unwrap() else {
        panic!("scan was ignored");
    };
    assert!(!gone.found);
    let ScanOutcome::Scanned(fresh) = station.on_scan("NEW-1").unwrap() else {
        panic!("scan was ignored");
    };
    assert_eq!(fresh.name, "Fresh Stock");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn frontend_runs_a_scan_session() {
    let dir = scratch_dir("frontend");
    let data_dir = dir.to_string_lossy().into_owned();
    let config = StationConfig::from_lookup(|key| match key {
        "STATION_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
    .unwrap();

    let mut frontend = Frontend::new(station(), config);
    let input = "ABC-1001\n\n:print\n:log\n:quit\nABC-1002\n";
    let mut out = Vec::new();
    frontend.run(input.as_bytes(), &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Found: USB Cable 1m 650.00"));
    assert!(out.contains("Empty scan ignored."));
    assert!(out.contains("Dry run: wrote"));
    assert!(out.contains("| ABC-1001 | USB Cable 1m | 650.00"));
    // Input after :quit is not processed.
    assert_eq!(frontend.station().scan_log().len(), 1);

    let preview = image::open(dir.join("preview.png")).unwrap();
    assert_eq!((preview.width(), preview.height()), (480, 330));
    let pages = std::fs::read_dir(dir.join("pages")).unwrap().count();
    assert_eq!(pages, 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn colon_prefixed_code_is_looked_up() {
    assert!(label_engine::encode(":A1", 100, 10).is_ok());

    let dir = scratch_dir("colon");
    let data_dir = dir.to_string_lossy().into_owned();
    let config = StationConfig::from_lookup(|key| {
        (key == "STATION_DATA_DIR").then(|| data_dir.clone())
    })
    .unwrap();
    let station = station();
    station
        .catalog()
        .publish(ProductCatalog::parse("code,name,price\n:A1,Colon Coded Item,5.00\n"));
    let mut frontend = Frontend::new(station, config);

    let mut out = Vec::new();
    frontend.handle(Command::parse(":A1"), &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Found: Colon Coded Item 5.00"));
    assert_eq!(frontend.station().scan_log().len(), 1);
    assert_eq!(frontend.station().current().unwrap().code, ":A1");
    let _ = std::fs::remove_dir_all(&dir);
}
