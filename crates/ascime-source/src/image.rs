use std::path::Path;

use ascime_core::CoreError;
use ascime_core::frame::FrameBuffer;

use crate::error::SourceError;

/// Decode in-memory bytes (PNG, JPEG, BMP, GIF first frame) into RGBA.
///
/// The format is guessed from the content, not from a file name.
///
/// # Errors
/// Returns the decoder error if the bytes are not a supported image.
///
/// # Example
/// ```
/// use ascime_source::image::decode_bytes;
/// assert!(decode_bytes(b"not an image").is_err());
/// ```
pub fn decode_bytes(bytes: &[u8]) -> Result<FrameBuffer, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Charge une image depuis le disque.
///
/// # Errors
/// [`SourceError::Io`] if the file cannot be read, [`SourceError::Decode`]
/// if its bytes are not a supported image, [`SourceError::Core`] if it
/// decodes to zero pixels.
///
/// # Example
/// ```no_run
/// use ascime_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let frame = decode_bytes(&bytes).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        }
        .into());
    }
    log::debug!(
        "Decoded {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}
