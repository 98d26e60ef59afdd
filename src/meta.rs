use std::path::Path;

use crate::error::{Error, Result};
use crate::request::Padding;

/// Location of one glyph inside a sprite sheet, padding included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub struct SourceRect {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// A character and where it was placed in the sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub struct SheetGlyph {
    /// The rendered character
    pub character: char,
    /// Its cell in the sheet
    pub source: SourceRect,
}

/// Description of a composed sprite sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
pub struct SheetMetadata {
    /// Em size the glyphs were rendered at
    pub font_size: u32,
    /// Padding around each glyph as `[left, top, right, bottom]`
    pub padding: [u32; 4],
    /// Sheet width in pixels
    pub width: u32,
    /// Sheet height in pixels
    pub height: u32,
    /// Glyphs in left-to-right order
    pub glyphs: Vec<SheetGlyph>,
}

impl SheetMetadata {
    pub(crate) fn new(font_size: u32, padding: Padding) -> Self {
        Self {
            font_size,
            padding: [padding.left, padding.top, padding.right, padding.bottom],
            width: 0,
            height: 0,
            glyphs: Vec::new(),
        }
    }
}

/// Serialization format of sheet metadata, deduced from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaFormat {
    /// Pretty-printed RON
    Ron,
    /// JSON
    Json,
}

impl MetaFormat {
    /// Deduces the format from `path`'s extension.
    ///
    /// # Errors
    /// [`Error::Config`] for anything other than `.ron` or `.json`, or when
    /// the crate was built without the `meta` feature.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !cfg!(feature = "meta") {
            return Err(Error::Config("writing sheet metadata requires the `meta` feature".into()));
        }

        let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ron") => Ok(MetaFormat::Ron),
            Some("json") => Ok(MetaFormat::Json),
            _ => Err(Error::Config(format!(
                "Failed to deduce metadata format from path {}; supported formats are ron and json",
                path.display()
            ))),
        }
    }
}

/// Serializes `metadata` to `path` in the format its extension names.
///
/// # Errors
/// [`Error::Config`] for an unsupported extension, [`Error::MetadataRon`] or
/// [`Error::MetadataJson`] if serialization fails, [`Error::MetadataWrite`] if
/// the file cannot be written.
#[cfg(feature = "meta")]
pub fn write_metadata(metadata: &SheetMetadata, path: &Path) -> Result<()> {
    let serialized = match MetaFormat::from_path(path)? {
        MetaFormat::Ron => ron::ser::to_string_pretty(metadata, ron::ser::PrettyConfig::default()).map_err(Error::MetadataRon)?,
        MetaFormat::Json => serde_json::to_string_pretty(metadata).map_err(Error::MetadataJson)?,
    };

    std::fs::write(path, serialized).map_err(|source| Error::MetadataWrite { path: path.to_path_buf(), source })?;
    log::info!("Wrote sheet metadata to {}", path.display());
    Ok(())
}
