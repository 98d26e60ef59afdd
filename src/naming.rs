use crate::error::{Error, Result};

/// Extension every image written by this crate carries.
pub const IMAGE_EXTENSION: &str = ".png";

/// Ensures a sheet file name ends in `.png`, appending the extension if it does not.
///
/// The comparison ignores case, so `SHEET.PNG` is returned unchanged.
#[must_use]
pub fn validate_sheet_name(name: &str) -> String {
    if name.to_lowercase().ends_with(IMAGE_EXTENSION) {
        return name.to_owned();
    }

    log::warn!("The spritesheet name \"{name}\" does not have a {IMAGE_EXTENSION} extension. Using \"{name}{IMAGE_EXTENSION}\" instead.");
    format!("{name}{IMAGE_EXTENSION}")
}

/// File name used for a single glyph in separate export mode.
pub(crate) fn glyph_file_name(glyph: char) -> Result<String> {
    if matches!(glyph, '/' | '\\' | '\0') {
        return Err(Error::UnsafeFileName(glyph));
    }

    Ok(format!("{glyph}{IMAGE_EXTENSION}"))
}
