/// Image sources for ascime: decoding, aspect-corrected resampling and
/// animated GIF frame splitting.

pub mod error;
pub mod gif;
pub mod image;
pub mod resize;

pub use error::SourceError;
