use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::request::Background;

/// Pixel buffer a glyph or a sheet is drawn onto.
#[derive(Clone, Debug)]
pub enum Canvas {
    /// Buffer with per-pixel transparency
    Rgba(RgbaImage),
    /// Opaque buffer
    Rgb(RgbImage),
}

impl Canvas {
    /// Canvas for a single glyph: transparent backgrounds get an alpha channel,
    /// filled backgrounds an opaque buffer of the background color.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Background) -> Self {
        match background {
            Background::Transparent => Canvas::Rgba(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))),
            Background::Filled(color) => Canvas::Rgb(RgbImage::from_pixel(width, height, color)),
        }
    }

    /// Canvas for a composed sheet, which always carries an alpha channel.
    #[must_use]
    pub fn new_sheet(width: u32, height: u32, background: Background) -> Self {
        let fill = match background {
            Background::Transparent => Rgba([0, 0, 0, 0]),
            Background::Filled(Rgb([r, g, b])) => Rgba([r, g, b, 0xFF]),
        };

        Canvas::Rgba(RgbaImage::from_pixel(width, height, fill))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        match self {
            Canvas::Rgba(img) => img.width(),
            Canvas::Rgb(img) => img.width(),
        }
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Canvas::Rgba(img) => img.height(),
            Canvas::Rgb(img) => img.height(),
        }
    }

    /// Whether pixels carry transparency.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        matches!(self, Canvas::Rgba(_))
    }

    /// Pixel at `(x, y)`; opaque canvases report alpha 255.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        match self {
            Canvas::Rgba(img) => *img.get_pixel(x, y),
            Canvas::Rgb(img) => {
                let Rgb([r, g, b]) = *img.get_pixel(x, y);
                Rgba([r, g, b, 0xFF])
            }
        }
    }

    /// Blends `color` at the given coverage (0 to 1) over the pixel at `(x, y)`.
    ///
    /// Coordinates outside the canvas are ignored, so glyphs overhanging
    /// their padding are clipped.
    pub fn blend(&mut self, x: i64, y: i64, coverage: f32, color: Rgb<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.width() || y >= self.height() {
            return;
        }

        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }

        match self {
            Canvas::Rgba(img) => {
                let dst = img.get_pixel_mut(x, y);
                *dst = over(*dst, color, coverage);
            }
            Canvas::Rgb(img) => {
                let dst = img.get_pixel_mut(x, y);
                for c in 0..3 {
                    dst.0[c] = mix(dst.0[c], color.0[c], coverage);
                }
            }
        }
    }

    /// Pastes `src` with its top-left corner at `(x, y)`, using the source
    /// alpha as the paste mask. Opaque sources overwrite the covered region.
    pub fn paste(&mut self, src: &Canvas, x: u32, y: u32) {
        for sy in 0..src.height() {
            for sx in 0..src.width() {
                let (dx, dy) = (x + sx, y + sy);
                if dx >= self.width() || dy >= self.height() {
                    continue;
                }

                let Rgba(s) = src.pixel(sx, sy);
                let mask = f32::from(s[3]) / 255.0;

                match self {
                    Canvas::Rgba(img) => {
                        let dst = img.get_pixel_mut(dx, dy);
                        for c in 0..4 {
                            dst.0[c] = mix(dst.0[c], s[c], mask);
                        }
                    }
                    Canvas::Rgb(img) => {
                        let dst = img.get_pixel_mut(dx, dy);
                        for c in 0..3 {
                            dst.0[c] = mix(dst.0[c], s[c], mask);
                        }
                    }
                }
            }
        }
    }

    /// Encodes the canvas as PNG at `path`.
    ///
    /// # Errors
    /// Returns [`Error::ImageWrite`] if encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let result = match self {
            Canvas::Rgba(img) => img.save_with_format(path, ImageFormat::Png),
            Canvas::Rgb(img) => img.save_with_format(path, ImageFormat::Png),
        };

        result.map_err(|source| Error::ImageWrite { path: path.to_path_buf(), source })
    }
}

fn mix(from: u8, to: u8, t: f32) -> u8 {
    let from = f32::from(from);
    let to = f32::from(to);
    (from + (to - from) * t).round() as u8
}

// Source-over compositing of a solid color with the given alpha.
fn over(dst: Rgba<u8>, color: Rgb<u8>, src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let src = f32::from(color.0[c]) * src_alpha;
        let below = f32::from(dst.0[c]) * dst_alpha * (1.0 - src_alpha);
        out[c] = ((src + below) / out_alpha).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round() as u8;

    Rgba(out)
}
