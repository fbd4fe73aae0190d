//! Error types shared by every library operation.

use std::path::PathBuf;

/// Errors raised by the library.
///
/// Each variant wraps the primitive that failed; nothing is retried or
/// translated beyond adding the offending input to the message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mask pattern is not a valid regular expression
    #[error("Invalid regex pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading or writing a file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding a raster image failed
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),

    /// The raster canvas would not fit in memory
    #[error("Raster image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u32, height: u32 },

    /// The output path has an extension no exporter handles
    #[error("Unsupported image format for {0:?} (expected svg, png, jpg, jpeg or bmp)")]
    UnsupportedFormat(PathBuf),

    /// The requested language does not fit in memory-addressable counts
    #[error("Language over {alphabet} symbols up to length {max_size} is too large to enumerate")]
    TooLarge { alphabet: usize, max_size: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
