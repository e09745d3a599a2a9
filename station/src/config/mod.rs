//! Configuration management: defaults, validation, loading from the environment.

pub mod defaults;
pub mod validation;

use std::path::PathBuf;

use label_engine::{InvalidSpecError, LabelSpec, Orientation};

use defaults::get_default;
use validation::validate_setting;

/// Per-run station configuration. Fixed once loaded.
#[derive(Debug, Clone)]
pub struct StationConfig {
    pub label: LabelSpec,
    pub products_csv: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub bold_font_path: Option<PathBuf>,
    /// `None` means dry run: pages are written as PNG files instead.
    pub printer_name: Option<String>,
    pub print_dpi: u32,
    pub data_dir: PathBuf,
    pub scan_log_json: bool,
}

impl StationConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let g = |key: &'static str| -> Result<String, ConfigError> {
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| get_default(key).unwrap_or_default().to_string());
            if !value.is_empty() {
                validate_setting(key, &value).map_err(|reason| ConfigError::Invalid {
                    key,
                    value: value.clone(),
                    reason,
                })?;
            }
            Ok(value)
        };
        let optional = |key: &'static str| -> Result<Option<String>, ConfigError> {
            g(key).map(|v| Some(v).filter(|v| !v.is_empty()))
        };

        let orientation_raw = g("LABEL_ORIENTATION")?;
        let orientation: Orientation =
            orientation_raw
                .parse()
                .map_err(|reason| ConfigError::Invalid {
                    key: "LABEL_ORIENTATION",
                    value: orientation_raw.clone(),
                    reason,
                })?;
        let label = LabelSpec::new(
            parse_number(&g("LABEL_WIDTH_MM")?, 58.0),
            parse_number(&g("LABEL_HEIGHT_MM")?, 40.0),
            parse_number(&g("LABEL_DPI")?, label_engine::DEFAULT_DPI),
        )?
        .with_orientation(orientation)
        .with_currency_marker(g("CURRENCY_MARKER")?);

        Ok(Self {
            label,
            products_csv: optional("PRODUCTS_CSV")?.map(PathBuf::from),
            font_path: optional("LABEL_FONT_PATH")?.map(PathBuf::from),
            bold_font_path: optional("LABEL_BOLD_FONT_PATH")?.map(PathBuf::from),
            printer_name: optional("PRINTER_NAME")?,
            print_dpi: parse_number(&g("PRINT_DPI")?, label_engine::DEFAULT_DPI),
            data_dir: optional("STATION_DATA_DIR")?
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            scan_log_json: g("SCAN_LOG_JSON")? == "true",
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.printer_name.is_none()
    }

    pub fn preview_path(&self) -> PathBuf {
        self.data_dir.join("preview.png")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.data_dir.join("pages")
    }

    pub fn scan_log_path(&self) -> PathBuf {
        self.data_dir.join("scan-log.jsonl")
    }
}

/// Data directory used when STATION_DATA_DIR is unset.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".label-station")
}

fn parse_number<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Spec(#[from] InvalidSpecError),
}
