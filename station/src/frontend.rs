//! Line-oriented front end: wedge scanners type a code followed by Enter.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use label_engine::TextFace;
use print_layout::{LprSurface, RasterSurface};
use tracing::{error, info};

use crate::config::StationConfig;
use crate::session::{LabelStation, ScanOutcome};

/// Viewport the auto-preview is fitted into.
pub const PREVIEW_WIDTH: u32 = 480;
pub const PREVIEW_HEIGHT: u32 = 330;

pub const HELP: &str = "\
Scan or type a product code and press Enter.
  :print          print the last label
  :price <value>  set the price of the current label
  :reload         reload the product catalog
  :log            show the scan log
  :clear          clear the scan log
  :quit           exit
A code that itself reads like a command can be scanned as ::<code>.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    Print,
    Price(String),
    Reload,
    Log,
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Exact command words (`:print`, `:price <value>`, ...) are commands.
    /// Every other line is scanner input, including codes that start with `:`.
    /// A leading `::` scans the rest with one colon, e.g. `::print` scans `:print`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some(escaped) = line.strip_prefix("::") {
            return Self::Scan(format!(":{escaped}"));
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Self::Scan(line.to_string());
        };
        let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let arg = arg.trim();
        match (name, arg.is_empty()) {
            ("price", _) => Self::Price(arg.to_string()),
            ("print", true) => Self::Print,
            ("reload", true) => Self::Reload,
            ("log", true) => Self::Log,
            ("clear", true) => Self::Clear,
            ("help", true) => Self::Help,
            ("quit", true) => Self::Quit,
            _ => Self::Scan(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Frontend<F> {
    station: LabelStation<F>,
    config: StationConfig,
}

impl<F: TextFace> Frontend<F> {
    pub fn new(station: LabelStation<F>, config: StationConfig) -> Self {
        Self { station, config }
    }

    pub fn station(&self) -> &LabelStation<F> {
        &self.station
    }

    /// Process lines until EOF or `:quit`.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(
            out,
            "Products loaded: {}. Ready to scan.",
            self.station.catalog().snapshot().len()
        )?;
        for line in input.lines() {
            let line = line?;
            if self.handle(Command::parse(&line), &mut out)? == Flow::Quit {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Execute one command, writing status text to `out`.
    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Scan(code) => self.scan(&code, out)?,
            Command::Print => {
                let message = self.print_label().unwrap_or_else(|failure| failure);
                writeln!(out, "{message}")?;
            }
            Command::Price(price) => match self.station.set_manual_price(&price).map(|_| ()) {
                Ok(()) => {
                    self.write_preview();
                    writeln!(out, "Price set: {price}")?;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Reload => match self.station.reload_catalog() {
                Ok(count) => writeln!(out, "Products loaded: {count}.")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Log => out.write_all(self.station.scan_log().render().as_bytes())?,
            Command::Clear => {
                self.station.scan_log_mut().clear();
                writeln!(out, "Scan log cleared.")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn scan(&mut self, code: &str, out: &mut impl Write) -> io::Result<()> {
        match self.station.on_scan(code) {
            Ok(ScanOutcome::Ignored) => writeln!(out, "Empty scan ignored."),
            Ok(ScanOutcome::Scanned(content)) => {
                self.write_preview();
                if content.found {
                    writeln!(out, "Found: {} {}", content.name, content.price)
                } else {
                    writeln!(out, "Product not found for code: {}", content.code)
                }
            }
            Err(e) => writeln!(out, "{e}"),
        }
    }

    fn write_preview(&self) {
        let Some(preview) = self.station.preview(PREVIEW_WIDTH, PREVIEW_HEIGHT) else {
            return;
        };
        let path = self.config.preview_path();
        if let Err(e) = preview.save(&path) {
            error!(path = %path.display(), error = %e, "Failed to write preview");
        }
    }

    /// Print through lpr, or write the page as PNG when no printer is configured.
    fn print_label(&self) -> Result<String, String> {
        match &self.config.printer_name {
            Some(printer) => {
                let mut surface = LprSurface::new(printer.clone(), self.config.print_dpi)
                    .with_spool_dir(self.config.data_dir.join("spool"));
                self.station.print(&mut surface).map_err(|e| e.to_string())?;
                Ok(format!("Sent to printer {printer}."))
            }
            None => {
                let mut surface = RasterSurface::new(self.config.print_dpi);
                self.station.print(&mut surface).map_err(|e| e.to_string())?;
                let stem = format!("label-{}", Local::now().format("%Y%m%d-%H%M%S%3f"));
                let paths: Vec<PathBuf> = surface
                    .save_pages(&self.config.pages_dir(), &stem)
                    .map_err(|e| format!("Failed to write page: {e}"))?;
                info!(pages = paths.len(), "Dry run pages written");
                Ok(paths
                    .iter()
                    .map(|p| format!("Dry run: wrote {}", p.display()))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}
