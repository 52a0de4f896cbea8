use std::path::Path;

use ascime_ascii::luminance::to_gray;
use ascime_ascii::mapper::{GlyphMapper, map_frame};
use ascime_core::config::{ColorMode, RenderConfig};
use ascime_core::frame::{AsciiFrame, FrameBuffer};
use ascime_source::SourceError;
use ascime_source::image::load_image;
use ascime_source::resize::resize_for_grid;

/// Pipeline de rendu d'une image : decode → resize → (gris | couleur) → map.
///
/// Holds the run's immutable config and the mapper built from it; shared
/// read-only across every image of the batch.
pub struct Renderer {
    config: RenderConfig,
    mapper: GlyphMapper,
}

impl Renderer {
    /// Build the mapper once for `config`.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let mapper = GlyphMapper::new(&config);
        Self { config, mapper }
    }

    /// Config the renderer was built with.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Resize a decoded frame and map it to glyphs.
    ///
    /// In `Plain` mode the resized frame is converted to grayscale first;
    /// other modes keep the color pixels so the escape carries true RGB.
    ///
    /// # Errors
    /// Returns [`SourceError::Resize`] if resampling fails.
    pub fn render_frame(&self, frame: &FrameBuffer) -> Result<AsciiFrame, SourceError> {
        let resized = resize_for_grid(frame, self.config.width, self.config.char_aspect)?;
        let source = match self.config.color_mode {
            ColorMode::Plain => to_gray(&resized),
            _ => resized,
        };
        Ok(map_frame(&source, &self.mapper))
    }

    /// Decode, render and serialize the image at `path`.
    ///
    /// # Errors
    /// Returns [`SourceError::Io`] / [`SourceError::Decode`] if the file
    /// cannot be loaded, or a resize error.
    pub fn render_path(&self, path: &Path) -> Result<String, SourceError> {
        let frame = load_image(path)?;
        let ascii = self.render_frame(&frame)?;
        log::debug!(
            "Rendered {} as {}×{} glyphs",
            path.display(),
            ascii.width,
            ascii.height
        );
        Ok(ascii.render())
    }
}
