use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::glyphs::GlyphSource;
use crate::naming::{glyph_file_name, validate_sheet_name};
use crate::request::{ExportMode, RenderRequest};
use crate::sheet;

/// A rendered character and the canvas holding it.
#[derive(Clone, Debug)]
pub struct GlyphImage {
    /// The rendered character
    pub character: char,
    /// Glyph plus padding
    pub canvas: Canvas,
}

impl GlyphImage {
    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }
}

/// Glyph images retained for sheet composition, with running totals.
#[derive(Debug, Default)]
pub struct SheetAccumulator {
    images: Vec<GlyphImage>,
    total_width: u32,
    max_height: u32,
}

impl SheetAccumulator {
    /// Empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `image` to the right end of the row.
    ///
    /// # Errors
    /// [`Error::Config`] if the row would be wider than `u32::MAX` pixels;
    /// the image is not retained in that case.
    pub fn push(&mut self, image: GlyphImage) -> Result<()> {
        self.total_width = self
            .total_width
            .checked_add(image.width())
            .ok_or_else(|| Error::Config(format!("sheet would be wider than {} pixels at {:?}", u32::MAX, image.character)))?;
        self.max_height = self.max_height.max(image.canvas.height());
        self.images.push(image);
        Ok(())
    }

    /// Sum of all retained canvas widths.
    #[must_use]
    pub fn total_width(&self) -> u32 {
        self.total_width
    }

    /// Tallest retained canvas.
    #[must_use]
    pub fn max_height(&self) -> u32 {
        self.max_height
    }

    /// Whether nothing was retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Retained images in insertion order.
    #[must_use]
    pub fn images(&self) -> &[GlyphImage] {
        &self.images
    }
}

/// What a render run left on disk.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    /// Per-character images, in the order written; duplicates appear once per write
    pub written: Vec<PathBuf>,
    /// Characters whose canvas would have had a zero dimension
    pub skipped: Vec<char>,
    /// The composed sheet, if one was written
    pub sheet: Option<PathBuf>,
}

/// Measures `glyph`, allocates a padded canvas and draws it.
///
/// Returns `Ok(None)` when the padded canvas would be zero pixels wide or
/// high, which happens for whitespace rendered without padding.
///
/// # Errors
/// [`Error::Config`] if glyph plus padding does not fit in a `u32`.
pub fn render_glyph<S: GlyphSource + ?Sized>(source: &S, glyph: char, request: &RenderRequest) -> Result<Option<GlyphImage>> {
    let (glyph_width, glyph_height) = source.measure(glyph, request.font_size);
    let padding = request.padding;
    let too_large = || Error::Config(format!("canvas for {glyph:?} is larger than {} pixels with padding {padding:?}", u32::MAX));
    let width = padding.horizontal().and_then(|p| glyph_width.checked_add(p)).ok_or_else(too_large)?;
    let height = padding.vertical().and_then(|p| glyph_height.checked_add(p)).ok_or_else(too_large)?;

    if width == 0 || height == 0 {
        log::warn!("Skipping {glyph:?}: its canvas would be {width}x{height} pixels");
        return Ok(None);
    }

    let mut canvas = Canvas::new(width, height, request.background);
    source.draw(&mut canvas, glyph, request.font_size, (padding.left, padding.top), request.text_color);
    log::debug!("Rendered {glyph:?} onto a {width}x{height} canvas");

    Ok(Some(GlyphImage { character: glyph, canvas }))
}

/// Renders every requested character and writes the images the export mode asks for.
///
/// Characters are processed in order. In separate mode each image is written
/// as soon as it is drawn, so a failing run may leave earlier files behind.
///
/// # Errors
/// Configuration errors from [`RenderRequest::validate`], failure to create the
/// output directory, unusable file names, and image or metadata write failures.
pub fn render<S: GlyphSource + ?Sized>(source: &S, request: &RenderRequest) -> Result<RenderOutcome> {
    request.validate()?;
    create_output_dir(&request.output_dir)?;

    let mut outcome = RenderOutcome::default();
    let mut retained = SheetAccumulator::new();

    for glyph in request.characters.chars() {
        let Some(image) = render_glyph(source, glyph, request)? else {
            outcome.skipped.push(glyph);
            continue;
        };

        match request.export {
            ExportMode::Separate => {
                let path = request.output_dir.join(glyph_file_name(glyph)?);
                image.canvas.save(&path)?;
                log::info!("Wrote {}", path.display());
                outcome.written.push(path);
            }
            ExportMode::Sheet(_) => retained.push(image)?,
        }
    }

    if let ExportMode::Sheet(sheet_name) = &request.export {
        outcome.sheet = write_sheet(&retained, request, sheet_name)?;
    }

    Ok(outcome)
}

/// Loads the font at `request.font_path` and renders with it.
///
/// # Errors
/// Font read or parse failures, plus everything [`render`] reports.
#[cfg(feature = "rusttype")]
pub fn render_font(request: &RenderRequest) -> Result<RenderOutcome> {
    let font = crate::glyphs::RusttypeFont::load(&request.font_path)?;
    render(&font, request)
}

fn create_output_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::OutputDir { path: path.to_path_buf(), source })
}

fn write_sheet(retained: &SheetAccumulator, request: &RenderRequest, sheet_name: &str) -> Result<Option<PathBuf>> {
    let Some((canvas, metadata)) = sheet::compose(retained, request) else {
        log::warn!("No glyphs to compose; not writing {sheet_name}");
        return Ok(None);
    };

    let path = request.output_dir.join(validate_sheet_name(sheet_name));
    canvas.save(&path)?;
    log::info!("Wrote {}x{} sheet with {} glyphs to {}", canvas.width(), canvas.height(), metadata.glyphs.len(), path.display());

    if let Some(meta_path) = &request.meta_path {
        write_sheet_metadata(&metadata, meta_path)?;
    }

    Ok(Some(path))
}

#[cfg(feature = "meta")]
fn write_sheet_metadata(metadata: &crate::meta::SheetMetadata, path: &Path) -> Result<()> {
    crate::meta::write_metadata(metadata, path)
}

#[cfg(not(feature = "meta"))]
fn write_sheet_metadata(_metadata: &crate::meta::SheetMetadata, _path: &Path) -> Result<()> {
    Err(Error::Config("writing sheet metadata requires the `meta` feature".into()))
}

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba};

    use super::*;
    use crate::request::{Background, Padding};

    // Every glyph is a solid block as wide as its code point's last digit plus one.
    struct Blocks;

    impl GlyphSource for Blocks {
        fn measure(&self, glyph: char, _size: u32) -> (u32, u32) {
            if glyph == ' ' {
                (0, 0)
            } else {
                (glyph as u32 % 10 + 1, 3)
            }
        }

        fn draw(&self, canvas: &mut Canvas, glyph: char, size: u32, (x, y): (u32, u32), color: Rgb<u8>) {
            let (w, h) = self.measure(glyph, size);
            for dy in 0..h {
                for dx in 0..w {
                    canvas.blend(i64::from(x + dx), i64::from(y + dy), 1.0, color);
                }
            }
        }
    }

    #[test]
    fn glyph_canvas_is_bbox_plus_padding() {
        let mut request = RenderRequest::new("font.ttf", "out", "A");
        request.padding = Padding::from([1, 2, 3, 4]);

        // 'A' is 65, so 6 wide and 3 high
        let image = render_glyph(&Blocks, 'A', &request).unwrap().unwrap();
        assert_eq!((image.canvas.width(), image.canvas.height()), (10, 9));
        assert_eq!(image.canvas.pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(image.canvas.pixel(1, 2), Rgba([0, 0, 0, 0xFF]));
        assert_eq!(image.canvas.pixel(7, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn zero_dimension_glyph_is_skipped() {
        let mut request = RenderRequest::new("font.ttf", "out", " ");
        request.padding = Padding::uniform(0);
        assert!(render_glyph(&Blocks, ' ', &request).unwrap().is_none());

        request.padding = Padding::uniform(1);
        assert!(render_glyph(&Blocks, ' ', &request).unwrap().is_some());
    }

    #[test]
    fn filled_background_keeps_exact_color() {
        let mut request = RenderRequest::new("font.ttf", "out", "B");
        request.background = Background::Filled(Rgb([12, 34, 56]));
        request.text_color = Rgb([200, 0, 0]);

        let image = render_glyph(&Blocks, 'B', &request).unwrap().unwrap();
        assert!(!image.canvas.has_alpha());
        assert_eq!(image.canvas.pixel(0, 0), Rgba([12, 34, 56, 0xFF]));
        assert_eq!(image.canvas.pixel(10, 10), Rgba([200, 0, 0, 0xFF]));
    }

    #[test]
    fn accumulator_tracks_totals() {
        let request = RenderRequest::new("font.ttf", "out", "AB");
        let mut retained = SheetAccumulator::new();
        assert!(retained.is_empty());

        retained.push(render_glyph(&Blocks, 'A', &request).unwrap().unwrap()).unwrap();
        retained.push(render_glyph(&Blocks, 'B', &request).unwrap().unwrap()).unwrap();
        assert_eq!(retained.total_width(), 26 + 27);
        assert_eq!(retained.max_height(), 23);
        assert_eq!(retained.images().iter().map(|i| i.character).collect::<String>(), "AB");
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let mut request = RenderRequest::new("font.ttf", "out", "A");
        request.padding = Padding::from([u32::MAX, 0, 1, 0]);
        assert!(matches!(render_glyph(&Blocks, 'A', &request), Err(Error::Config(_))));

        // the padding alone fits, glyph plus padding does not
        request.padding = Padding::from([0, u32::MAX - 2, 0, 0]);
        assert!(matches!(render_glyph(&Blocks, 'A', &request), Err(Error::Config(_))));

        request.padding = Padding::from([0, 0, u32::MAX - 5, 0]);
        assert!(matches!(render_glyph(&Blocks, 'A', &request), Err(Error::Config(_))));
    }

    #[test]
    fn accumulator_rejects_row_wider_than_u32() {
        let request = RenderRequest::new("font.ttf", "out", "AA");
        let mut retained = SheetAccumulator::new();
        retained.total_width = u32::MAX - 10;

        let image = render_glyph(&Blocks, 'A', &request).unwrap().unwrap();
        assert!(matches!(retained.push(image), Err(Error::Config(_))));
        assert!(retained.is_empty());
        assert_eq!(retained.total_width(), u32::MAX - 10);
    }

    #[test]
    fn unchecked_sheet_name_still_gets_extension() {
        let dir = tempdir::TempDir::new("glyph-sprites-render").unwrap();
        let mut request = RenderRequest::new("font.ttf", dir.path(), "AB");
        request.export = ExportMode::Sheet("out".into());

        let outcome = render(&Blocks, &request).unwrap();
        assert_eq!(outcome.sheet, Some(dir.path().join("out.png")));
        assert!(dir.path().join("out.png").is_file());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn unusable_output_dir_is_fatal() {
        let dir = tempdir::TempDir::new("glyph-sprites-render").unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let request = RenderRequest::new("font.ttf", blocker.join("out"), "A");
        assert!(matches!(render(&Blocks, &request), Err(Error::OutputDir { .. })));
    }
}
