use clap::Parser;

use glyph_sprites::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match font_to_images(&args) {
        Ok(outcome) => {
            if !outcome.skipped.is_empty() {
                log::warn!("Skipped {} glyph(s) with an empty canvas", outcome.skipped.len());
            }
            println!("Rendering complete!");
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
