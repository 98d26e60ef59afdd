use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use image::Rgb;

use crate::error::{Error, Result};
use crate::render::{render_font, RenderOutcome};
use crate::request::{Background, ExportMode, Padding, RenderRequest};

/// Background of every rendered canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BgType {
    /// Fully transparent
    Transparent,
    /// Filled with `--bg_color`
    Filled,
}

/// Output layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportType {
    /// One `<char>.png` per character
    Separate,
    /// One sheet with all characters in a row
    Spritesheet,
}

/// Command line of `font2sprites`.
#[derive(Parser, Debug)]
#[command(author, version, about = "Renders font glyphs into images or a sprite sheet", long_about = None)]
pub struct Args {
    /// Path to the font file (TTF/OTF)
    #[arg(long = "font_path")]
    pub font_path: PathBuf,
    /// Directory to save images into; created if missing
    #[arg(long = "output_folder")]
    pub output_folder: PathBuf,
    /// Characters to render
    #[arg(long = "characters", allow_hyphen_values = true)]
    pub characters: String,
    /// Font size in pixels per em
    #[arg(long = "font_size", default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    pub font_size: u32,
    /// Padding around each glyph: left top right bottom
    #[arg(long = "padding", num_args = 4, value_names = ["LEFT", "TOP", "RIGHT", "BOTTOM"], default_values_t = [10, 10, 10, 10])]
    pub padding: Vec<u32>,
    /// Background type
    #[arg(long = "bg_type", value_enum, default_value_t = BgType::Transparent)]
    pub bg_type: BgType,
    /// Export format
    #[arg(long = "export_type", value_enum, default_value_t = ExportType::Separate)]
    pub export_type: ExportType,
    /// File name of the sprite sheet; `.png` is appended if missing
    #[arg(long = "spritesheet_name", default_value = "spritesheet.png")]
    pub spritesheet_name: String,
    /// Background color for `--bg_type filled`: R G B
    #[arg(long = "bg_color", num_args = 3, value_names = ["R", "G", "B"], default_values_t = [255, 255, 255])]
    pub bg_color: Vec<u8>,
    /// Text color: R G B
    #[arg(long = "text_color", num_args = 3, value_names = ["R", "G", "B"], default_values_t = [0, 0, 0])]
    pub text_color: Vec<u8>,
    /// Where to write sheet metadata (.ron or .json); sprite sheets only
    #[arg(long = "meta_path")]
    pub meta_path: Option<PathBuf>,
}

impl Args {
    /// Resolves the parsed arguments into a render request.
    ///
    /// # Errors
    /// [`Error::Config`] if a multi-value option has the wrong number of values.
    pub fn to_request(&self) -> Result<RenderRequest> {
        let padding: [u32; 4] = fixed("padding", &self.padding)?;
        let bg_color: [u8; 3] = fixed("bg_color", &self.bg_color)?;
        let text_color: [u8; 3] = fixed("text_color", &self.text_color)?;

        let background = match self.bg_type {
            BgType::Transparent => Background::Transparent,
            BgType::Filled => Background::Filled(Rgb(bg_color)),
        };
        let export = match self.export_type {
            ExportType::Separate => ExportMode::Separate,
            ExportType::Spritesheet => ExportMode::sheet(&self.spritesheet_name),
        };

        Ok(RenderRequest {
            font_path: self.font_path.clone(),
            output_dir: self.output_folder.clone(),
            characters: self.characters.clone(),
            font_size: self.font_size,
            padding: Padding::from(padding),
            background,
            text_color: Rgb(text_color),
            export,
            meta_path: self.meta_path.clone(),
        })
    }
}

fn fixed<T: Copy, const N: usize>(name: &str, values: &[T]) -> Result<[T; N]> {
    values
        .try_into()
        .map_err(|_| Error::Config(format!("--{name} takes exactly {N} values, got {}", values.len())))
}

/// Renders the glyphs the command line asks for.
///
/// # Errors
/// Everything [`render_font`] reports, plus argument resolution errors.
pub fn font_to_images(args: &Args) -> Result<RenderOutcome> {
    let request = args.to_request()?;
    log::debug!("Resolved request: {request:?}");
    render_font(&request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["font2sprites", "--font_path", "f.ttf", "--output_folder", "out", "--characters", "AB"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let request = parse(&[]).to_request().unwrap();
        assert_eq!(request.font_size, 64);
        assert_eq!(request.padding, Padding::uniform(10));
        assert_eq!(request.background, Background::Transparent);
        assert_eq!(request.export, ExportMode::Separate);
        assert_eq!(request.text_color, Rgb([0, 0, 0]));
        assert_eq!(request.characters, "AB");
        assert!(request.meta_path.is_none());
    }

    #[test]
    fn full_command_line() {
        let args = parse(&[
            "--font_size", "32",
            "--padding", "1", "2", "3", "4",
            "--bg_type", "filled",
            "--bg_color", "10", "20", "30",
            "--text_color", "255", "0", "0",
            "--export_type", "spritesheet",
            "--spritesheet_name", "out",
            "--meta_path", "out.ron",
        ]);
        let request = args.to_request().unwrap();
        assert_eq!(request.font_size, 32);
        assert_eq!(request.padding, Padding::from([1, 2, 3, 4]));
        assert_eq!(request.background, Background::Filled(Rgb([10, 20, 30])));
        assert_eq!(request.text_color, Rgb([255, 0, 0]));
        assert_eq!(request.export, ExportMode::Sheet("out.png".into()));
        assert_eq!(request.meta_path, Some(PathBuf::from("out.ron")));
    }

    #[test]
    fn bg_color_ignored_when_transparent() {
        let request = parse(&["--bg_color", "1", "2", "3"]).to_request().unwrap();
        assert_eq!(request.background, Background::Transparent);
    }

    #[test]
    fn rejects_bad_arguments() {
        fn with(extra: &[&str]) -> bool {
            let mut argv = vec!["font2sprites", "--font_path", "f.ttf", "--output_folder", "out", "--characters", "A"];
            argv.extend_from_slice(extra);
            Args::try_parse_from(argv).is_err()
        }

        assert!(with(&["--bg_type", "checkered"]));
        assert!(with(&["--export_type", "atlas"]));
        assert!(with(&["--padding", "1", "2", "3"]));
        assert!(with(&["--bg_color", "256", "0", "0"]));
        assert!(with(&["--font_size", "0"]));
        assert!(Args::try_parse_from(["font2sprites", "--font_path", "f.ttf"]).is_err());
    }

    #[test]
    fn characters_may_start_with_a_hyphen() {
        let args = Args::try_parse_from(["font2sprites", "--font_path", "f.ttf", "--output_folder", "out", "--characters", "-+"]).unwrap();
        assert_eq!(args.characters, "-+");
    }
}
