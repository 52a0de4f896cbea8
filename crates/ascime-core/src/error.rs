use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unknown palette name where a strict lookup was requested.
    #[error("unknown palette: {name}")]
    UnknownPalette {
        /// Name that did not match any built-in palette.
        name: String,
    },

    /// Invalid width/height dimensions.
    #[error("invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
