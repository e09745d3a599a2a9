//! Code 128 module matrices sized to a pixel box.
//!
//! Symbol bit-packing is delegated to `barcoders`; this module picks the code
//! set, validates the payload, and scales the modules to whole pixels.

use barcoders::sym::code128::Code128;
use tracing::debug;

/// Quiet-zone width on each side, in modules.
pub const QUIET_ZONE_MODULES: u32 = 10;

/// Code 128 start characters understood by `barcoders`.
const START_SET_B: char = 'Ɓ';
const START_SET_C: char = 'Ć';

/// Supported linear symbologies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Symbology {
    #[default]
    Code128,
}

impl Symbology {
    pub fn name(self) -> &'static str {
        match self {
            Self::Code128 => "Code 128",
        }
    }

    /// Whether `ch` can be carried by the symbology (Code 128 set B: printable ASCII).
    pub fn supports(self, ch: char) -> bool {
        match self {
            Self::Code128 => (' '..='~').contains(&ch),
        }
    }

    /// Encode `text` into a module matrix fitted into `target_width` × `target_height`.
    ///
    /// The matrix is `max(target_width, symbol + quiet zones)` wide, each module
    /// an integer number of pixels, with the symbol centered.
    pub fn encode(
        self,
        text: &str,
        target_width: u32,
        target_height: u32,
    ) -> Result<BarcodeMatrix, EncodeError> {
        if text.is_empty() {
            return Err(EncodeError::Empty);
        }
        if let Some((position, ch)) = text.chars().enumerate().find(|&(_, c)| !self.supports(c)) {
            return Err(EncodeError::UnsupportedCharacter {
                ch,
                position,
                symbology: self.name(),
            });
        }

        let modules = match self {
            Self::Code128 => Code128::new(with_start_set(text))
                .map_err(|e| EncodeError::Symbology(format!("{e:?}")))?
                .encode(),
        };

        Ok(scale_modules(&modules, target_width, target_height))
    }
}

/// A rendered linear barcode: one row of dark/light pixels repeated `height` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeMatrix {
    row: Vec<bool>,
    height: u32,
    module_px: u32,
}

impl BarcodeMatrix {
    pub fn width(&self) -> u32 {
        self.row.len() as u32
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel width of one module.
    pub fn module_px(&self) -> u32 {
        self.module_px
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        y < self.height && self.row.get(x as usize).copied().unwrap_or(false)
    }

    /// Horizontal `(start, len)` runs of dark pixels.
    pub fn dark_runs(&self) -> Vec<(u32, u32)> {
        let mut runs = Vec::new();
        let mut start: Option<u32> = None;
        for (x, &dark) in self.row.iter().enumerate() {
            match (dark, start) {
                (true, None) => start = Some(x as u32),
                (false, Some(s)) => {
                    runs.push((s, x as u32 - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.width() - s));
        }
        runs
    }
}

/// Encode `text` as Code 128, fitted into `target_width` × `target_height` pixels.
pub fn encode(
    text: &str,
    target_width: u32,
    target_height: u32,
) -> Result<BarcodeMatrix, EncodeError> {
    Symbology::Code128.encode(text, target_width, target_height)
}

/// Prefix the densest single code set that covers the payload.
fn with_start_set(text: &str) -> String {
    let all_digits = text.bytes().all(|b| b.is_ascii_digit());
    let start = if all_digits && text.len() >= 4 && text.len() % 2 == 0 {
        START_SET_C
    } else {
        START_SET_B
    };
    let mut data = String::with_capacity(text.len() + 2);
    data.push(start);
    data.push_str(text);
    data
}

fn scale_modules(modules: &[u8], target_width: u32, target_height: u32) -> BarcodeMatrix {
    let symbol = modules.len() as u32;
    let full = symbol + 2 * QUIET_ZONE_MODULES;
    let width = target_width.max(full);
    let height = target_height.max(1);
    let module_px = width / full;
    let left = (width - symbol * module_px) / 2;

    let mut row = vec![false; width as usize];
    for (i, &bit) in modules.iter().enumerate() {
        if bit == 1 {
            let start = (left + i as u32 * module_px) as usize;
            row[start..start + module_px as usize].fill(true);
        }
    }

    debug!(symbol, width, height, module_px, "Barcode modules scaled");
    BarcodeMatrix {
        row,
        height,
        module_px,
    }
}

/// Payloads that cannot be represented in the chosen symbology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("Barcode payload is empty")]
    Empty,

    #[error("Character {ch:?} at position {position} is not encodable in {symbology}")]
    UnsupportedCharacter {
        ch: char,
        position: usize,
        symbology: &'static str,
    },

    #[error("Symbology encoder rejected payload: {0}")]
    Symbology(String),
}
