use image::Rgb;

use crate::canvas::Canvas;

/// The font capabilities the renderer needs: measuring and drawing single glyphs.
///
/// Coordinates are relative to the top-left corner of the line box, so a glyph
/// measured as `(w, h)` and drawn at `(x, y)` covers at most the rectangle
/// `x..x + w, y..y + h`.
pub trait GlyphSource {
    /// Width and height in pixels of `glyph` at the given em size.
    fn measure(&self, glyph: char, size: u32) -> (u32, u32);

    /// Draws `glyph` onto `canvas` with its line box origin at `origin`.
    fn draw(&self, canvas: &mut Canvas, glyph: char, size: u32, origin: (u32, u32), color: Rgb<u8>);
}

#[cfg(feature = "rusttype")]
pub use self::backend::RusttypeFont;

#[cfg(feature = "rusttype")]
mod backend {
    use std::path::Path;

    use image::Rgb;
    use rusttype::{point, Font, PositionedGlyph, Rect, Scale};

    use super::GlyphSource;
    use crate::canvas::Canvas;
    use crate::error::{Error, Result};

    /// [`GlyphSource`] backed by a TrueType/OpenType font parsed with `rusttype`.
    pub struct RusttypeFont {
        font: Font<'static>,
    }

    impl RusttypeFont {
        /// Reads and parses the font at `path`.
        ///
        /// # Errors
        /// [`Error::FontRead`] if the file cannot be read,
        /// [`Error::FontParse`] if it is not a font.
        pub fn load(path: &Path) -> Result<Self> {
            let font_data = std::fs::read(path).map_err(|source| Error::FontRead { path: path.to_path_buf(), source })?;
            let font = Font::try_from_vec(font_data).ok_or_else(|| Error::FontParse(path.to_path_buf()))?;

            Ok(Self { font })
        }

        // rusttype scales by ascent-to-descent height; font sizes are em sizes.
        fn scale(&self, size: u32) -> Scale {
            let size = size as f32;
            let units_per_em = f32::from(self.font.units_per_em());
            if units_per_em <= 0.0 {
                return Scale::uniform(size);
            }

            let rusttype::VMetrics { ascent, descent, .. } = self.font.v_metrics_unscaled();
            Scale::uniform(size * (ascent - descent) / units_per_em)
        }

        fn positioned(&self, glyph: char, size: u32) -> PositionedGlyph<'_> {
            let scale = self.scale(size);
            let ascent = self.font.v_metrics(scale).ascent;

            self.font.glyph(glyph).scaled(scale).positioned(point(0.0, ascent))
        }
    }

    // Ink left of or above the line box origin is clipped, so only the far edges count.
    fn extent(bounding_box: Rect<i32>) -> (u32, u32) {
        (bounding_box.max.x.max(0) as u32, bounding_box.max.y.max(0) as u32)
    }

    impl GlyphSource for RusttypeFont {
        fn measure(&self, glyph: char, size: u32) -> (u32, u32) {
            let positioned = self.positioned(glyph, size);
            match positioned.pixel_bounding_box() {
                Some(bounding_box) => extent(bounding_box),
                None => {
                    let advance_width = positioned.unpositioned().h_metrics().advance_width;
                    (advance_width.round().max(0.0) as u32, 0)
                }
            }
        }

        fn draw(&self, canvas: &mut Canvas, glyph: char, size: u32, origin: (u32, u32), color: Rgb<u8>) {
            let positioned = self.positioned(glyph, size);
            let Some(bounding_box) = positioned.pixel_bounding_box() else {
                return;
            };

            let left = i64::from(origin.0) + i64::from(bounding_box.min.x);
            let top = i64::from(origin.1) + i64::from(bounding_box.min.y);
            positioned.draw(|x, y, v| canvas.blend(left + i64::from(x), top + i64::from(y), v, color));
        }
    }

}
