use std::fmt;

use crate::color::push_colored_glyph;
use crate::error::CoreError;

/// Taille maximale d'un buffer alloué pour une grille de sortie (1 Gio).
pub const MAX_FRAME_BYTES: usize = 1 << 30;

/// Buffer de pixels RGBA décodé, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use ascime_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ascime_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Like [`FrameBuffer::new`], but refuses sizes whose byte count
    /// overflows or exceeds [`MAX_FRAME_BYTES`].
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for such sizes.
    ///
    /// # Example
    /// ```
    /// use ascime_core::frame::FrameBuffer;
    /// assert!(FrameBuffer::try_new(80, 24).is_ok());
    /// assert!(FrameBuffer::try_new(u32::MAX, u32::MAX).is_err());
    /// ```
    pub fn try_new(width: u32, height: u32) -> Result<Self, CoreError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .filter(|&n| n <= MAX_FRAME_BYTES)
            .ok_or(CoreError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
        })
    }

    /// Buffer rempli d'une seule couleur opaque.
    ///
    /// # Example
    /// ```
    /// use ascime_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (255, 255, 255));
    /// assert_eq!(fb.pixel(1, 1), (255, 255, 255, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, (r, g, b): (u8, u8, u8)) -> Self {
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use ascime_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// let (r, g, b, a) = fb.pixel(0, 0);
    /// assert_eq!((r, g, b, a), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if let Some(px) = self.data.get_mut(idx..idx + 4) {
            px.copy_from_slice(&[rgba.0, rgba.1, rgba.2, rgba.3]);
        }
    }

    /// Pixels of row `y`, 4 bytes each.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

/// Single rendered unit of an [`AsciiFrame`].
///
/// `fg: Some(rgb)` means the glyph is wrapped in a truecolor escape when
/// serialized; `None` means a bare glyph.
///
/// # Example
/// ```
/// use ascime_core::frame::AsciiCell;
/// let mut s = String::new();
/// AsciiCell { ch: '@', fg: None }.write_to(&mut s);
/// assert_eq!(s, "@");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB), absent en mode Plain.
    pub fg: Option<(u8, u8, u8)>,
}

impl Default for AsciiCell {
    fn default() -> Self {
        Self { ch: ' ', fg: None }
    }
}

impl AsciiCell {
    /// Append the serialized unit to `out`.
    #[inline]
    pub fn write_to(&self, out: &mut String) {
        match self.fg {
            Some(rgb) => push_colored_glyph(out, self.ch, rgb),
            None => out.push(self.ch),
        }
    }
}

/// Grille de sortie ASCII, une par image.
///
/// # Example
/// ```
/// use ascime_core::frame::{AsciiCell, AsciiFrame};
/// let row = vec![AsciiCell { ch: '@', fg: None }, AsciiCell { ch: '.', fg: None }];
/// let frame = AsciiFrame::from_rows(2, vec![row]);
/// assert_eq!(frame.to_string(), "@.\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiFrame {
    /// Flat array of cells, row-major.
    pub cells: Vec<AsciiCell>,
    /// Width in glyphs.
    pub width: u32,
    /// Height in rows.
    pub height: u32,
}

impl AsciiFrame {
    /// Build a frame from rows already in top-to-bottom order.
    ///
    /// Rows shorter or longer than `width` are not padded; callers guarantee
    /// exactly `width` cells per row.
    #[must_use]
    pub fn from_rows(width: u32, rows: Vec<Vec<AsciiCell>>) -> Self {
        let height = rows.len() as u32;
        Self {
            cells: rows.into_iter().flatten().collect(),
            width,
            height,
        }
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> impl Iterator<Item = &[AsciiCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Serialize: every row, each followed by one `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        let colored = self.cells.iter().any(|c| c.fg.is_some());
        let per_cell = if colored { 24 } else { 1 };
        let mut out =
            String::with_capacity(self.cells.len() * per_cell + self.height as usize);
        for row in self.rows() {
            for cell in row {
                cell.write_to(&mut out);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for AsciiFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_newline_terminated() {
        let blank = vec![AsciiCell::default(); 3];
        let frame = AsciiFrame::from_rows(3, vec![blank.clone(), blank]);
        assert_eq!(frame.render(), "   \n   \n");
    }

    #[test]
    fn colored_cell_is_wrapped_and_reset() {
        let frame = AsciiFrame::from_rows(
            1,
            vec![vec![AsciiCell {
                ch: '@',
                fg: Some((0, 0, 0)),
            }]],
        );
        assert_eq!(frame.render(), "\x1b[38;2;0;0;0m@\x1b[0m\n");
    }

    #[test]
    fn try_new_rejects_overflowing_sizes() {
        assert!(matches!(
            FrameBuffer::try_new(u32::MAX, u32::MAX),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(FrameBuffer::try_new(1 << 15, 1 << 14).is_err());
        assert_eq!(FrameBuffer::try_new(3, 2).unwrap(), FrameBuffer::new(3, 2));
    }

    #[test]
    fn set_pixel_roundtrips_through_pixel() {
        let mut fb = FrameBuffer::new(3, 3);
        fb.set_pixel(2, 1, (1, 2, 3, 4));
        assert_eq!(fb.pixel(2, 1), (1, 2, 3, 4));
        assert_eq!(&fb.row(1)[8..12], &[1, 2, 3, 4]);
    }
}
