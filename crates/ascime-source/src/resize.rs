use ascime_core::frame::FrameBuffer;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

use crate::error::SourceError;

/// Dimensions de la grille de sortie pour une largeur cible.
///
/// `height = max(1, round(src_h * target_width / src_w / char_aspect))`.
///
/// # Example
/// ```
/// use ascime_source::resize::target_dimensions;
/// assert_eq!(target_dimensions(200, 100, 100, 1.65), (100, 30));
/// assert_eq!(target_dimensions(1000, 1, 10, 1.65), (10, 1));
/// ```
#[must_use]
pub fn target_dimensions(src_w: u32, src_h: u32, target_width: u32, char_aspect: f32) -> (u32, u32) {
    let width = target_width.max(1);
    if src_w == 0 || src_h == 0 {
        return (width, 1);
    }
    let height = f64::from(src_h) * f64::from(width) / f64::from(src_w) / f64::from(char_aspect);
    let height = height.round();
    let height = if height < 1.0 { 1 } else { height as u32 };
    (width, height)
}

/// Resizer réutilisable wrappant fast_image_resize, filtre Catmull-Rom.
///
/// The whole source rectangle is stretched onto the whole destination, with
/// no crop and no letterbox. Alpha is carried as a plain channel and never
/// premultiplied into RGB.
///
/// # Example
/// ```
/// use ascime_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new Catmull-Rom resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new()
                .resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom))
                .use_alpha(false),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns [`SourceError::Resize`] if either buffer does not match its
    /// declared dimensions or the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use ascime_source::resize::Resizer;
    /// use ascime_core::frame::FrameBuffer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), SourceError> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // fast_image_resize veut un &mut sur la source
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| SourceError::Resize(format!("source {}×{}: {e}", src.width, src.height)))?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .map_err(|e| SourceError::Resize(format!("destination {}×{}: {e}", dst.width, dst.height)))?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| SourceError::Resize(e.to_string()))?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Returns [`SourceError::Core`] if the destination is too large to
/// allocate, or an error if the resize operation fails.
///
/// # Example
/// ```
/// use ascime_source::resize::resize_frame;
/// use ascime_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 50).unwrap();
/// assert_eq!(dst.width, 50);
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer, SourceError> {
    let mut dst = FrameBuffer::try_new(width, height)?;
    let mut resizer = Resizer::new();
    resizer.resize_into(src, &mut dst)?;
    Ok(dst)
}

/// Resize `src` to `target_width` glyphs wide, height corrected for
/// `char_aspect`.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use ascime_source::resize::resize_for_grid;
/// use ascime_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(330, 100);
/// let dst = resize_for_grid(&src, 33, 1.65).unwrap();
/// assert_eq!((dst.width, dst.height), (33, 6));
/// ```
pub fn resize_for_grid(src: &FrameBuffer, target_width: u32, char_aspect: f32) -> Result<FrameBuffer, SourceError> {
    let (width, height) = target_dimensions(src.width, src.height, target_width, char_aspect);
    let dst = resize_frame(src, width, height)?;
    log::debug!(
        "Resized {}×{} → {}×{}",
        src.width,
        src.height,
        dst.width,
        dst.height
    );
    Ok(dst)
}
