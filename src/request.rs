use std::path::PathBuf;

use image::Rgb;

use crate::error::{Error, Result};
use crate::meta::MetaFormat;
use crate::naming::validate_sheet_name;

/// Empty space around each glyph, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    /// Pixels left of the glyph
    pub left: u32,
    /// Pixels above the glyph
    pub top: u32,
    /// Pixels right of the glyph
    pub right: u32,
    /// Pixels below the glyph
    pub bottom: u32,
}

impl Padding {
    /// Same padding on all four sides.
    #[must_use]
    pub const fn uniform(pixels: u32) -> Self {
        Self { left: pixels, top: pixels, right: pixels, bottom: pixels }
    }

    /// Sum of left and right padding, `None` if it does not fit in a `u32`.
    #[must_use]
    pub const fn horizontal(&self) -> Option<u32> {
        self.left.checked_add(self.right)
    }

    /// Sum of top and bottom padding, `None` if it does not fit in a `u32`.
    #[must_use]
    pub const fn vertical(&self) -> Option<u32> {
        self.top.checked_add(self.bottom)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl From<[u32; 4]> for Padding {
    /// Takes `[left, top, right, bottom]`.
    fn from([left, top, right, bottom]: [u32; 4]) -> Self {
        Self { left, top, right, bottom }
    }
}

/// What the pixels not covered by a glyph look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    /// Fully transparent; canvases carry an alpha channel
    Transparent,
    /// Opaque, filled with the given color
    Filled(Rgb<u8>),
}

/// How rendered glyphs are written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportMode {
    /// One `<char>.png` per character
    Separate,
    /// A single sheet with the given file name
    Sheet(String),
}

impl ExportMode {
    /// Sheet export, with the file name corrected to carry a `.png` extension.
    #[must_use]
    pub fn sheet(name: &str) -> Self {
        ExportMode::Sheet(validate_sheet_name(name))
    }
}

/// Everything that determines the output of one render run.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    /// Font file to load
    pub font_path: PathBuf,
    /// Directory receiving the images; created if absent
    pub output_dir: PathBuf,
    /// Characters to render, in order; duplicates are rendered again
    pub characters: String,
    /// Em size in pixels
    pub font_size: u32,
    /// Space around each glyph
    pub padding: Padding,
    /// Background fill
    pub background: Background,
    /// Glyph color
    pub text_color: Rgb<u8>,
    /// Output layout
    pub export: ExportMode,
    /// Where to write sheet metadata, if anywhere
    pub meta_path: Option<PathBuf>,
}

impl RenderRequest {
    /// A request with the default size, padding and colors.
    pub fn new(font_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, characters: impl Into<String>) -> Self {
        Self {
            font_path: font_path.into(),
            output_dir: output_dir.into(),
            characters: characters.into(),
            font_size: 64,
            padding: Padding::default(),
            background: Background::Transparent,
            text_color: Rgb([0, 0, 0]),
            export: ExportMode::Separate,
            meta_path: None,
        }
    }

    /// Rejects requests that cannot render anything sensible.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a zero font size or an unsupported metadata extension.
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(Error::Config("font size must be positive".into()));
        }

        if let Some(meta_path) = &self.meta_path {
            match self.export {
                ExportMode::Sheet(_) => {
                    MetaFormat::from_path(meta_path)?;
                }
                ExportMode::Separate => {
                    log::warn!("Ignoring metadata path {} in separate export mode", meta_path.display());
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_sums() {
        let padding = Padding::from([1, 2, 3, 4]);
        assert_eq!(padding.horizontal(), Some(4));
        assert_eq!(padding.vertical(), Some(6));
        assert_eq!(Padding::from([u32::MAX, 0, 1, 0]).horizontal(), None);
        assert_eq!(Padding::from([0, u32::MAX, 0, u32::MAX]).vertical(), None);
        assert_eq!(Padding::default(), Padding::uniform(10));
    }

    #[test]
    fn sheet_mode_corrects_name() {
        assert_eq!(ExportMode::sheet("out"), ExportMode::Sheet("out.png".into()));
        assert_eq!(ExportMode::sheet("out.PNG"), ExportMode::Sheet("out.PNG".into()));
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let mut request = RenderRequest::new("font.ttf", "out", "A");
        assert!(request.validate().is_ok());
        request.font_size = 0;
        assert!(matches!(request.validate(), Err(Error::Config(_))));
    }

    #[cfg(feature = "meta")]
    #[test]
    fn metadata_extension_checked_in_sheet_mode_only() {
        let mut request = RenderRequest::new("font.ttf", "out", "A");
        request.meta_path = Some("meta.txt".into());
        assert!(request.validate().is_ok());

        request.export = ExportMode::sheet("sheet");
        assert!(matches!(request.validate(), Err(Error::Config(_))));

        request.meta_path = Some("meta.ron".into());
        assert!(request.validate().is_ok());
    }
}
