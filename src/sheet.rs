use crate::canvas::Canvas;
use crate::meta::{SheetGlyph, SheetMetadata, SourceRect};
use crate::render::SheetAccumulator;
use crate::request::RenderRequest;

/// Lays the retained glyphs out left to right in a single row.
///
/// The sheet is as wide as all glyph canvases together and as high as the
/// tallest one; each glyph is pasted at `y = 0` through its own alpha.
/// Returns `None` if there is nothing to compose.
#[must_use]
pub fn compose(retained: &SheetAccumulator, request: &RenderRequest) -> Option<(Canvas, SheetMetadata)> {
    if retained.is_empty() || retained.total_width() == 0 || retained.max_height() == 0 {
        return None;
    }

    let mut sheet = Canvas::new_sheet(retained.total_width(), retained.max_height(), request.background);
    let mut metadata = SheetMetadata::new(request.font_size, request.padding);
    metadata.width = sheet.width();
    metadata.height = sheet.height();

    let mut x_offset = 0;
    for image in retained.images() {
        sheet.paste(&image.canvas, x_offset, 0);
        metadata.glyphs.push(SheetGlyph {
            character: image.character,
            source: SourceRect { x: x_offset, y: 0, width: image.width(), height: image.canvas.height() },
        });
        x_offset += image.width();
    }

    Some((sheet, metadata))
}
