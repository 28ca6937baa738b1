//! Error types shared by all GIF Kit operations.

use std::path::PathBuf;

/// Errors that can occur while loading, transforming, or writing GIFs.
#[derive(Debug, thiserror::Error)]
pub enum GifError {
    /// Failed to read an input file.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an output file or create its directory.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input could not be decoded as an image.
    #[error("Failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Encoding the output image failed.
    #[error("Failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The GIF decoded successfully but contained no frames.
    #[error("No frames were found in '{0}'")]
    NoFrames(PathBuf),

    /// None of the given input files produced a usable frame.
    #[error("No usable input images were found")]
    NoInputs,

    /// A clip passed to a transform had no frames.
    #[error("Clip has no frames")]
    EmptyClip,

    /// The crop rectangle does not describe a valid area of the frame.
    #[error("Invalid crop rectangle: {0}")]
    InvalidCrop(String),

    /// A frame rate outside the accepted range was requested.
    #[error("Frame rate must be greater than zero")]
    InvalidFps,
}

/// Result type for GIF Kit operations.
pub type GifResult<T> = Result<T, GifError>;

impl GifError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Create an encode error.
    pub fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }
}
