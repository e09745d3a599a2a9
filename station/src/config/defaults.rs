//! Setting definitions with their default values.

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    /// Empty means "unset".
    pub default: &'static str,
    pub description: &'static str,
}

pub const SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: "LABEL_WIDTH_MM",
        default: "58",
        description: "Label width in millimeters",
    },
    SettingDef {
        key: "LABEL_HEIGHT_MM",
        default: "40",
        description: "Label height in millimeters",
    },
    SettingDef {
        key: "LABEL_DPI",
        default: "203",
        description: "Label rasterization density",
    },
    SettingDef {
        key: "LABEL_ORIENTATION",
        default: "portrait",
        description: "Page orientation (portrait or landscape)",
    },
    SettingDef {
        key: "CURRENCY_MARKER",
        default: "Rs",
        description: "Prefix drawn before prices",
    },
    SettingDef {
        key: "PRODUCTS_CSV",
        default: "",
        description: "Product catalog path (overrides ./products.csv)",
    },
    SettingDef {
        key: "LABEL_FONT_PATH",
        default: "",
        description: "Regular TTF/OTF font for label text",
    },
    SettingDef {
        key: "LABEL_BOLD_FONT_PATH",
        default: "",
        description: "Bold TTF/OTF font for name and price",
    },
    SettingDef {
        key: "PRINTER_NAME",
        default: "",
        description: "CUPS queue for lpr; unset prints to PNG files",
    },
    SettingDef {
        key: "PRINT_DPI",
        default: "203",
        description: "Raster density of spooled and virtual pages",
    },
    SettingDef {
        key: "STATION_DATA_DIR",
        default: "",
        description: "Directory for previews, pages and the scan log",
    },
    SettingDef {
        key: "SCAN_LOG_JSON",
        default: "false",
        description: "Also append scans to scan-log.jsonl",
    },
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    SETTINGS.iter().find(|d| d.key == key).map(|d| d.default)
}
