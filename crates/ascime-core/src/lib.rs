/// Configuration, palettes, and shared frame types for ascime.
///
/// This crate holds every type that crosses crate boundaries: the immutable
/// `RenderConfig`, the built-in glyph palettes, the RGBA `FrameBuffer` fed to
/// the mapper, and the `AsciiFrame` it produces.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::{Palette, PaletteKind};
pub use config::{ColorMode, ErrorPolicy, RenderConfig};
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiFrame, FrameBuffer};
