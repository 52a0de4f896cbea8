use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ::image::codecs::gif::GifDecoder;
use ::image::{AnimationDecoder, Frame, ImageError, ImageFormat, RgbaImage, imageops};

use crate::error::SourceError;

/// Dossier scratch par défaut pour les frames extraites.
pub const DEFAULT_SCRATCH_DIR: &str = "tmp";

/// Split an animated GIF into one PNG per frame.
///
/// Each frame is alpha-composited over the running canvas (painter's
/// algorithm), so transparent areas of a frame keep what earlier frames
/// painted. The composite after frame `i` is written to
/// `<scratch_dir>/<i>.png`, overwriting any existing file. Returns the paths
/// in frame order.
///
/// # Errors
/// [`SourceError::Io`] if the GIF cannot be opened or the scratch directory
/// cannot be created, [`SourceError::Decode`] if the file is not a valid
/// GIF, [`SourceError::Encode`] / [`SourceError::Io`] if a frame cannot be
/// written.
///
/// # Example
/// ```no_run
/// use ascime_source::gif::split_animated_gif;
/// use std::path::Path;
/// let frames = split_animated_gif(Path::new("anim.gif"), Path::new("tmp")).unwrap();
/// for path in frames {
///     println!("{}", path.display());
/// }
/// ```
pub fn split_animated_gif(path: &Path, scratch_dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let frames = decode_frames(path)?;
    let Some(first) = frames.first() else {
        return Ok(Vec::new());
    };

    let (width, height) = canvas_size(&frames);
    let mut canvas = RgbaImage::new(width, height);
    imageops::replace(
        &mut canvas,
        first.buffer(),
        i64::from(first.left()),
        i64::from(first.top()),
    );

    fs::create_dir_all(scratch_dir).map_err(|source| SourceError::Io {
        path: scratch_dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        imageops::overlay(
            &mut canvas,
            frame.buffer(),
            i64::from(frame.left()),
            i64::from(frame.top()),
        );

        let out = scratch_dir.join(format!("{i}.png"));
        canvas
            .save_with_format(&out, ImageFormat::Png)
            .map_err(|source| match source {
                ImageError::IoError(source) => SourceError::Io {
                    path: out.clone(),
                    source,
                },
                source => SourceError::Encode {
                    path: out.clone(),
                    source,
                },
            })?;
        paths.push(out);
    }

    log::info!(
        "Split {} into {} frame(s) ({width}×{height}) under {}",
        path.display(),
        paths.len(),
        scratch_dir.display()
    );
    Ok(paths)
}

/// Decode every frame of the GIF at `path`.
fn decode_frames(path: &Path) -> Result<Vec<Frame>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source: ImageError| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(decode_err)?;
    decoder.into_frames().collect_frames().map_err(decode_err)
}

/// Bounding extent of all frames.
fn canvas_size(frames: &[Frame]) -> (u32, u32) {
    frames.iter().fold((1, 1), |(w, h), frame| {
        let (fw, fh) = frame.buffer().dimensions();
        (w.max(frame.left() + fw), h.max(frame.top() + fh))
    })
}

#[cfg(test)]
mod tests {
    use ::image::codecs::gif::GifEncoder;
    use ::image::{Delay, Rgba};

    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn write_gif(path: &Path, frames: Vec<RgbaImage>) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        for buf in frames {
            encoder
                .encode_frame(Frame::from_parts(buf, 0, 0, Delay::from_numer_denom_ms(100, 1)))
                .unwrap();
        }
    }

    fn is_red(px: Rgba<u8>) -> bool {
        px[0] > 200 && px[2] < 50
    }

    fn is_blue(px: Rgba<u8>) -> bool {
        px[2] > 200 && px[0] < 50
    }

    #[test]
    fn later_frames_overpaint_the_composite() {
        let dir = tempfile::tempdir().unwrap();
        let gif = dir.path().join("anim.gif");

        let base = RgbaImage::from_pixel(4, 4, RED);
        let mut patch = RgbaImage::from_pixel(4, 4, CLEAR);
        for y in 0..4 {
            for x in 2..4 {
                patch.put_pixel(x, y, BLUE);
            }
        }
        write_gif(&gif, vec![base, patch]);

        let scratch = dir.path().join("frames");
        let paths = split_animated_gif(&gif, &scratch).unwrap();
        assert_eq!(paths, vec![scratch.join("0.png"), scratch.join("1.png")]);

        let first = ::image::open(&paths[0]).unwrap().to_rgba8();
        assert!(is_red(*first.get_pixel(3, 0)));

        let second = ::image::open(&paths[1]).unwrap().to_rgba8();
        assert_eq!(second.dimensions(), (4, 4));
        assert!(is_red(*second.get_pixel(0, 0)), "frame 0 must show through");
        assert!(is_blue(*second.get_pixel(3, 3)));
    }

    #[test]
    fn non_gif_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.gif");
        fs::write(&path, b"GIF? no").unwrap();
        let err = split_animated_gif(&path, &dir.path().join("out")).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn missing_gif_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = split_animated_gif(&dir.path().join("none.gif"), dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn canvas_covers_offset_frames() {
        let frames = vec![
            Frame::from_parts(RgbaImage::new(4, 2), 0, 0, Delay::from_numer_denom_ms(0, 1)),
            Frame::from_parts(RgbaImage::new(3, 3), 2, 1, Delay::from_numer_denom_ms(0, 1)),
        ];
        assert_eq!(canvas_size(&frames), (5, 4));
    }
}
