use ascime_core::charset::{LuminanceLut, Palette, bucket_index};
use ascime_core::config::{ColorMode, RenderConfig};
use ascime_core::frame::{AsciiCell, AsciiFrame, FrameBuffer};
use rayon::prelude::*;

use crate::luminance::luma;

/// Pixel → glyph mapper for one [`RenderConfig`].
///
/// Built once per run; the brightness table is precomputed from the palette.
///
/// # Example
/// ```
/// use ascime_core::config::{ColorMode, RenderConfig};
/// use ascime_core::charset::PaletteKind;
/// use ascime_ascii::mapper::GlyphMapper;
///
/// let config = RenderConfig { palette: PaletteKind::Simple, ..RenderConfig::default() };
/// let mapper = GlyphMapper::new(&config);
/// assert_eq!(mapper.map_pixel(255, 255, 255).ch, '.');
/// assert_eq!(mapper.map_pixel(0, 0, 0).ch, '@');
/// ```
#[derive(Clone)]
pub struct GlyphMapper {
    palette: Palette,
    lut: LuminanceLut,
    mode: ColorMode,
}

impl GlyphMapper {
    /// Prepare the lookup table for `config`'s palette and color mode.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        let palette = Palette::new(config.palette);
        let lut = LuminanceLut::new(&palette);
        Self {
            palette,
            lut,
            mode: config.color_mode,
        }
    }

    /// Palette index selected for brightness `y`.
    ///
    /// Always 0 in `ColorOnly` mode.
    #[inline(always)]
    #[must_use]
    pub fn index(&self, y: u8) -> usize {
        match self.mode {
            ColorMode::ColorOnly => 0,
            _ => bucket_index(y, self.palette.len()),
        }
    }

    /// Map one pixel to exactly one rendered cell.
    ///
    /// # Example
    /// ```
    /// use ascime_core::config::{ColorMode, RenderConfig};
    /// use ascime_core::charset::PaletteKind;
    /// use ascime_ascii::mapper::GlyphMapper;
    ///
    /// let config = RenderConfig {
    ///     palette: PaletteKind::Simple,
    ///     color_mode: ColorMode::Full,
    ///     ..RenderConfig::default()
    /// };
    /// let mut unit = String::new();
    /// GlyphMapper::new(&config).map_pixel(0, 0, 0).write_to(&mut unit);
    /// assert_eq!(unit, "\x1b[38;2;0;0;0m@\x1b[0m");
    /// ```
    #[inline]
    #[must_use]
    pub fn map_pixel(&self, r: u8, g: u8, b: u8) -> AsciiCell {
        let ch = match self.mode {
            ColorMode::ColorOnly => self.palette.glyph(0),
            _ => self.lut.map(luma(r, g, b)),
        };
        let fg = self.mode.is_colored().then_some((r, g, b));
        AsciiCell { ch, fg }
    }
}

/// Map every pixel of `frame`, row-major, into an [`AsciiFrame`] of the
/// same dimensions.
///
/// Rows are mapped in parallel and collected in order, so the result does
/// not depend on scheduling.
///
/// # Example
/// ```
/// use ascime_core::frame::FrameBuffer;
/// use ascime_core::config::RenderConfig;
/// use ascime_core::charset::PaletteKind;
/// use ascime_ascii::mapper::{GlyphMapper, map_frame};
///
/// let config = RenderConfig { palette: PaletteKind::Simple, ..RenderConfig::default() };
/// let frame = FrameBuffer::filled(2, 1, (255, 255, 255));
/// let grid = map_frame(&frame, &GlyphMapper::new(&config));
/// assert_eq!(grid.to_string(), "..\n");
/// ```
#[must_use]
pub fn map_frame(frame: &FrameBuffer, mapper: &GlyphMapper) -> AsciiFrame {
    log::trace!("Mapping {}×{} in {:?}", frame.width, frame.height, mapper.mode);
    let rows: Vec<Vec<AsciiCell>> = (0..frame.height)
        .into_par_iter()
        .map(|y| {
            frame
                .row(y)
                .chunks_exact(4)
                .map(|px| mapper.map_pixel(px[0], px[1], px[2]))
                .collect()
        })
        .collect();
    AsciiFrame::from_rows(frame.width, rows)
}

#[cfg(test)]
mod tests {
    use ascime_core::charset::PaletteKind;
    use ascime_core::color::ESC;

    use super::*;

    fn config(palette: PaletteKind, color_mode: ColorMode) -> RenderConfig {
        RenderConfig {
            palette,
            color_mode,
            ..RenderConfig::default()
        }
    }

    fn gradient(width: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, 1);
        for x in 0..width {
            let v = (x * 255 / (width - 1)) as u8;
            fb.set_pixel(x, 0, (v, v, v, 255));
        }
        fb
    }

    #[test]
    fn index_extremes_and_monotonicity() {
        for mode in [ColorMode::Plain, ColorMode::GrayPreserveColor, ColorMode::Full] {
            for kind in PaletteKind::ALL {
                let mapper = GlyphMapper::new(&config(kind, mode));
                let len = Palette::new(kind).len();
                assert_eq!(mapper.index(0), 0);
                assert_eq!(mapper.index(255), len - 1);
                let mut prev = 0;
                for y in 0..=255u8 {
                    let idx = mapper.index(y);
                    assert!(idx >= prev, "{kind}: index décroissant à {y}");
                    prev = idx;
                }
            }
        }
    }

    #[test]
    fn color_only_always_uses_first_glyph() {
        let mapper = GlyphMapper::new(&config(PaletteKind::Simple, ColorMode::ColorOnly));
        for y in 0..=255u8 {
            assert_eq!(mapper.index(y), 0);
            let cell = mapper.map_pixel(y, 255 - y, y / 2);
            assert_eq!(cell.ch, '@');
            assert_eq!(cell.fg, Some((y, 255 - y, y / 2)));
        }
    }

    #[test]
    fn gray_preserve_color_uses_plain_density() {
        let plain = GlyphMapper::new(&config(PaletteKind::Extended, ColorMode::Plain));
        let gray = GlyphMapper::new(&config(PaletteKind::Extended, ColorMode::GrayPreserveColor));
        for (r, g, b) in [(10, 200, 30), (255, 0, 0), (90, 90, 250)] {
            assert_eq!(plain.map_pixel(r, g, b).ch, gray.map_pixel(r, g, b).ch);
            assert_eq!(gray.map_pixel(r, g, b).fg, Some((r, g, b)));
            assert_eq!(plain.map_pixel(r, g, b).fg, None);
        }
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let mapper = GlyphMapper::new(&config(PaletteKind::Unicode, ColorMode::Plain));
        let out = map_frame(&gradient(64), &mapper).render();
        assert!(!out.contains(ESC));
    }

    #[test]
    fn one_cell_per_pixel() {
        let mapper = GlyphMapper::new(&config(PaletteKind::Default, ColorMode::Full));
        let frame = FrameBuffer::filled(7, 3, (12, 34, 56));
        let grid = map_frame(&frame, &mapper);
        assert_eq!(grid.cells.len(), 21);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 7));
    }

    #[test]
    fn gradient_walks_the_palette() {
        let mapper = GlyphMapper::new(&config(PaletteKind::Simple, ColorMode::Plain));
        let out = map_frame(&gradient(256), &mapper).render();
        assert!(out.starts_with('@'));
        assert!(out.ends_with(".\n"));
    }
}
