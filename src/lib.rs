//! Renders font glyphs into per-character images or a single sprite sheet.
//!
//! Each requested character is measured, drawn onto its own canvas with the
//! requested padding and colors, and then either written as `<char>.png` or
//! kept for a sheet in which all glyphs sit side by side in one row.
//!
//! # Usage
//! Fonts are accessed through [`GlyphSource`]; with the `rusttype` feature,
//! [`RusttypeFont`] loads TrueType and OpenType files:
//! ```no_run
//! # #[cfg(feature = "rusttype")]
//! # fn test() -> glyph_sprites::Result<()> {
//! use glyph_sprites::{render_font, ExportMode, RenderRequest};
//!
//! let mut request = RenderRequest::new("fonts/Roboto-Regular.ttf", "assets/glyphs", "0123456789");
//! request.export = ExportMode::sheet("digits");
//! let outcome = render_font(&request)?;
//! assert!(outcome.sheet.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! Any other font backend only has to measure and draw single glyphs:
//! ```
//! use glyph_sprites::{render_glyph, Canvas, GlyphSource, RenderRequest};
//! use image::Rgb;
//!
//! struct Square;
//!
//! impl GlyphSource for Square {
//!     fn measure(&self, _glyph: char, size: u32) -> (u32, u32) {
//!         (size, size)
//!     }
//!
//!     fn draw(&self, canvas: &mut Canvas, _glyph: char, size: u32, (x, y): (u32, u32), color: Rgb<u8>) {
//!         for dy in 0..size {
//!             for dx in 0..size {
//!                 canvas.blend(i64::from(x + dx), i64::from(y + dy), 1.0, color);
//!             }
//!         }
//!     }
//! }
//!
//! let mut request = RenderRequest::new("unused.ttf", "out", "A");
//! request.font_size = 8;
//! let image = render_glyph(&Square, 'A', &request).unwrap().unwrap();
//! assert_eq!((image.canvas.width(), image.canvas.height()), (28, 28));
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod canvas;
mod error;
mod glyphs;
mod meta;
mod naming;
mod render;
mod request;
mod sheet;

pub use canvas::Canvas;
pub use error::{Error, Result};
pub use glyphs::GlyphSource;
pub use meta::{MetaFormat, SheetGlyph, SheetMetadata, SourceRect};
pub use naming::{validate_sheet_name, IMAGE_EXTENSION};
pub use render::{render, render_glyph, GlyphImage, RenderOutcome, SheetAccumulator};
pub use request::{Background, ExportMode, Padding, RenderRequest};
pub use sheet::compose;

#[cfg(feature = "meta")]
pub use meta::write_metadata;

#[cfg(feature = "rusttype")]
pub use glyphs::RusttypeFont;

#[cfg(feature = "rusttype")]
pub use render::render_font;

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::{font_to_images, Args, BgType, ExportType};
