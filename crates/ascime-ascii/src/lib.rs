/// ASCII conversion engine for ascime.
///
/// Converts RGBA frames to glyph grids: BT.601 luminance, palette
/// quantization, optional truecolor annotation.
pub mod luminance;
pub mod mapper;

pub use luminance::{luma, to_gray};
pub use mapper::{GlyphMapper, map_frame};
