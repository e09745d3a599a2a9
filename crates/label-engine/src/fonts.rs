//! Font loading for label text.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use crate::text::Weight;

/// Regular face plus an optional bold face.
///
/// Without a bold face, bold text is synthesized by double-striking.
pub struct LabelFonts {
    regular: FontVec,
    bold: Option<FontVec>,
}

impl std::fmt::Debug for LabelFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFonts")
            .field("bold", &self.bold.is_some())
            .finish_non_exhaustive()
    }
}

impl LabelFonts {
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Result<Self, FontError> {
        let regular = FontVec::try_from_vec(regular).map_err(|_| FontError::InvalidFormat(None))?;
        let bold = bold
            .map(|data| FontVec::try_from_vec(data).map_err(|_| FontError::InvalidFormat(None)))
            .transpose()?;
        Ok(Self { regular, bold })
    }

    /// Load fonts from explicit paths, falling back to well-known system fonts.
    ///
    /// A configured path that cannot be read is an error; a missing bold
    /// system font is not.
    pub fn load(regular: Option<&Path>, bold: Option<&Path>) -> Result<Self, FontError> {
        let regular = match regular {
            Some(path) => read_font(path)?,
            None => first_readable(system_font_candidates(Weight::Regular))
                .ok_or(FontError::NoSystemFont)?,
        };
        let bold = match bold {
            Some(path) => Some(read_font(path)?),
            None => first_readable(system_font_candidates(Weight::Bold)),
        };
        Ok(Self { regular, bold })
    }

    pub fn has_bold_face(&self) -> bool {
        self.bold.is_some()
    }

    /// The face to use for `weight`, and whether bold must be synthesized.
    pub(crate) fn face_for(&self, weight: Weight) -> (&FontVec, bool) {
        match (weight, &self.bold) {
            (Weight::Bold, Some(bold)) => (bold, false),
            (Weight::Bold, None) => (&self.regular, true),
            (Weight::Regular, _) => (&self.regular, false),
        }
    }
}

fn read_font(path: &Path) -> Result<FontVec, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(data).map_err(|_| FontError::InvalidFormat(Some(path.to_path_buf())))
}

fn first_readable(candidates: &[&str]) -> Option<FontVec> {
    candidates.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        let font = FontVec::try_from_vec(data).ok()?;
        tracing::info!(path = %path, "Using system font for label text");
        Some(font)
    })
}

fn system_font_candidates(weight: Weight) -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        match weight {
            Weight::Regular => &[
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
                "/Library/Fonts/Arial.ttf",
            ],
            Weight::Bold => &[
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
                "/Library/Fonts/Arial Bold.ttf",
            ],
        }
    }
    #[cfg(target_os = "windows")]
    {
        match weight {
            Weight::Regular => &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"],
            Weight::Bold => &["C:\\Windows\\Fonts\\arialbd.ttf", "C:\\Windows\\Fonts\\segoeuib.ttf"],
        }
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match weight {
            Weight::Regular => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            ],
            Weight::Bold => &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            ],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Failed to read font {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font data (only TTF/OTF supported){}", .0.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    InvalidFormat(Option<PathBuf>),

    #[error("No usable system font found (set LABEL_FONT_PATH)")]
    NoSystemFont,
}
