//! Error types for the glyph renderer

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a render run
#[derive(Error, Debug)]
pub enum Error {
    /// The font file could not be read from disk
    #[error("Failed to read font data from {path}: {source}")]
    FontRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The font file was read but is not a usable font
    #[error("Failed to parse font data from {0}")]
    FontParse(PathBuf),

    /// The output directory could not be created
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An image could not be encoded or written
    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        /// Destination of the image
        path: PathBuf,
        /// Underlying encoder error
        source: image::ImageError,
    },

    /// A character cannot be used as an output file name
    #[error("Character {0:?} cannot be used as an output file name")]
    UnsafeFileName(char),

    /// The request is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Sheet metadata could not be serialized as RON
    #[cfg(feature = "meta")]
    #[error("Failed to serialize sheet metadata as RON: {0}")]
    MetadataRon(#[source] ron::Error),

    /// Sheet metadata could not be serialized as JSON
    #[cfg(feature = "meta")]
    #[error("Failed to serialize sheet metadata as JSON: {0}")]
    MetadataJson(#[source] serde_json::Error),

    /// Serialized sheet metadata could not be written
    #[error("Failed to write sheet metadata to {path}: {source}")]
    MetadataWrite {
        /// Destination of the metadata
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
