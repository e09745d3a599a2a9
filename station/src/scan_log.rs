//! Session log of scans, shown on demand and optionally mirrored to JSON lines.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use product_catalog::Product;
use serde::{Deserialize, Serialize};
use tracing::warn;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scan event. `name`/`price` are `None` when the code was not in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub timestamp: DateTime<Local>,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl ScanRecord {
    pub fn new(code: &str, product: Option<&Product>, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            code: code.to_string(),
            name: product.map(|p| p.name.clone()),
            price: product.map(|p| p.price.clone()),
        }
    }

    pub fn now(code: &str, product: Option<&Product>) -> Self {
        Self::new(code, product, Local::now())
    }

    pub fn found(&self) -> bool {
        self.name.is_some()
    }
}

impl fmt::Display for ScanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = self.timestamp.format(TIMESTAMP_FORMAT);
        match &self.name {
            Some(name) => write!(
                f,
                "{ts} | {} | {name} | {}",
                self.code,
                self.price.as_deref().unwrap_or_default()
            ),
            None => write!(f, "{ts} | {} | NOT_FOUND", self.code),
        }
    }
}

/// In-memory scan log for the running session.
#[derive(Debug, Default)]
pub struct ScanLog {
    records: Vec<ScanRecord>,
    jsonl: Option<PathBuf>,
}

impl ScanLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append every record as one JSON object per line to `path`.
    pub fn with_jsonl(mut self, path: impl Into<PathBuf>) -> Self {
        self.jsonl = Some(path.into());
        self
    }

    /// Record a scan. Mirror write failures are logged, never fatal.
    pub fn append(&mut self, record: ScanRecord) {
        if let Some(path) = &self.jsonl {
            if let Err(e) = append_json_line(path, &record) {
                warn!(path = %path.display(), error = %e, "Failed to mirror scan log entry");
            }
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear the on-screen log. The JSON mirror is append-only and left alone.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// The log as display text, one line per scan.
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{r}\n"))
            .collect()
    }
}

fn append_json_line(path: &Path, record: &ScanRecord) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at_noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 7).unwrap()
    }

    fn cable() -> Product {
        Product {
            code: "ABC-1001".into(),
            name: "USB Cable 1m".into(),
            price: "650.00".into(),
        }
    }

    #[test]
    fn found_record_lists_name_and_price() {
        let record = ScanRecord::new("ABC-1001", Some(&cable()), at_noon());
        assert_eq!(
            record.to_string(),
            "2024-03-09 12:05:07 | ABC-1001 | USB Cable 1m | 650.00"
        );
        assert!(record.found());
    }

    #[test]
    fn missing_record_is_marked_not_found() {
        let record = ScanRecord::new("ZZZ", None, at_noon());
        assert_eq!(record.to_string(), "2024-03-09 12:05:07 | ZZZ | NOT_FOUND");
        assert!(!record.found());
    }

    #[test]
    fn render_and_clear() {
        let mut log = ScanLog::new();
        log.append(ScanRecord::new("ZZZ", None, at_noon()));
        log.append(ScanRecord::new("ABC-1001", Some(&cable()), at_noon()));
        assert_eq!(log.render().lines().count(), 2);
        assert!(log.render().ends_with('\n'));

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.render(), "");
    }

    #[test]
    fn jsonl_mirror_appends_one_object_per_scan() {
        let dir = std::env::temp_dir().join(format!("label-station-scanlog-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("scan-log.jsonl");

        let mut log = ScanLog::new().with_jsonl(&path);
        log.append(ScanRecord::new("ABC-1001", Some(&cable()), at_noon()));
        log.append(ScanRecord::new("ZZZ", None, at_noon()));
        log.clear();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<ScanRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name.as_deref(), Some("USB Cable 1m"));
        assert_eq!(lines[1].name, None);
        assert!(!text.lines().nth(1).unwrap().contains("\"name\""));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
