use ascime_core::frame::FrameBuffer;

/// Luminance perceptuelle BT.601 : `(299 R + 587 G + 114 B) / 1000`.
///
/// Computed in `u32`, so no intermediate can overflow. Alpha is ignored.
///
/// # Example
/// ```
/// use ascime_ascii::luminance::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

/// Convert a frame to an opaque grayscale frame of the same size.
///
/// Every output pixel is `(Y, Y, Y, 255)`, so reading it back through
/// [`luma`] yields `Y` again.
///
/// # Example
/// ```
/// use ascime_core::frame::FrameBuffer;
/// use ascime_ascii::luminance::to_gray;
/// let src = FrameBuffer::filled(3, 2, (255, 0, 0));
/// let gray = to_gray(&src);
/// assert_eq!((gray.width, gray.height), (3, 2));
/// assert_eq!(gray.pixel(2, 1), (76, 76, 76, 255));
/// ```
#[must_use]
pub fn to_gray(src: &FrameBuffer) -> FrameBuffer {
    let mut data = Vec::with_capacity(src.data.len());
    for px in src.data.chunks_exact(4) {
        let y = luma(px[0], px[1], px[2]);
        data.extend_from_slice(&[y, y, y, 255]);
    }
    FrameBuffer {
        data,
        width: src.width,
        height: src.height,
    }
}
