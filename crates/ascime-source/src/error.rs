use std::path::PathBuf;

use ascime_core::CoreError;
use thiserror::Error;

/// Errors originating from the source module.
#[derive(Error, Debug)]
pub enum SourceError {
    /// File could not be opened, read, or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Bytes are not a supported or well-formed image.
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        /// Path of the offending file.
        path: PathBuf,
        /// Decoder error.
        source: image::ImageError,
    },

    /// A split frame could not be encoded.
    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        /// Destination path.
        path: PathBuf,
        /// Encoder error.
        source: image::ImageError,
    },

    /// Resampling failed.
    #[error("resize failed: {0}")]
    Resize(String),

    /// Degenerate dimensions.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SourceError {
    /// True for errors raised by the decoder.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
