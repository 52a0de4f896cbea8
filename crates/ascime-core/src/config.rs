use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::PaletteKind;
use crate::error::CoreError;

/// Facteur d'aspect des cellules terminal (hauteur / largeur).
pub const CHAR_ASPECT: f32 = 1.65;

/// Largeur de sortie par défaut, en glyphes.
pub const DEFAULT_WIDTH: u32 = 100;

/// Largeur maximale acceptée, en glyphes.
pub const MAX_WIDTH: u32 = 4096;

/// Configuration complète du rendu.
///
/// Construite une seule fois au démarrage, puis passée par référence à
/// chaque appel du pipeline. Jamais modifiée pendant le rendu.
///
/// # Example
/// ```
/// use ascime_core::config::{ColorMode, RenderConfig};
/// let config = RenderConfig::default();
/// assert_eq!(config.width, 100);
/// assert_eq!(config.color_mode, ColorMode::Plain);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Largeur cible en glyphes (≥ 1).
    pub width: u32,
    /// Palette active.
    pub palette: PaletteKind,
    /// Mode couleur.
    pub color_mode: ColorMode,
    /// Correction aspect ratio appliquée à la hauteur.
    pub char_aspect: f32,
    /// Politique en cas d'échec d'une image du lot.
    pub on_error: ErrorPolicy,
}

/// How glyphs are colored.
///
/// # Example
/// ```
/// use ascime_core::config::ColorMode;
/// assert!(!ColorMode::Plain.is_colored());
/// assert!(ColorMode::ColorOnly.is_colored());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ColorMode {
    /// Glyph density only, no escapes.
    #[default]
    Plain,
    /// Glyph from brightness, wrapped in the pixel's color.
    Full,
    /// Same glyph rule as `Plain`, wrapped in the pixel's color.
    GrayPreserveColor,
    /// Always `palette[0]`, wrapped in the pixel's color.
    ColorOnly,
}

impl ColorMode {
    /// True when glyphs carry a truecolor escape.
    #[must_use]
    pub fn is_colored(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// Batch behavior when one image fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ErrorPolicy {
    /// Stop at the first failing image.
    #[default]
    Abort,
    /// Report the failure and keep rendering the remaining images.
    Continue,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            palette: PaletteKind::Default,
            color_mode: ColorMode::Plain,
            char_aspect: CHAR_ASPECT,
            on_error: ErrorPolicy::Abort,
        }
    }
}

impl RenderConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, MAX_WIDTH);
        self.char_aspect = self.char_aspect.clamp(0.5, 4.0);
    }

    /// Reject values that cannot be clamped into meaning.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `char_aspect` is not finite, or
    /// [`CoreError::InvalidDimensions`] for a width of zero or above
    /// [`MAX_WIDTH`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.char_aspect.is_finite() {
            return Err(CoreError::Config(format!(
                "char_aspect must be finite, got {}",
                self.char_aspect
            )));
        }
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(CoreError::InvalidDimensions {
                width: self.width,
                height: 0,
            });
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    width: Option<u32>,
    palette: Option<PaletteKind>,
    color_mode: Option<ColorMode>,
    char_aspect: Option<f32>,
    on_error: Option<ErrorPolicy>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for the config schema.
///
/// # Example
/// ```
/// use ascime_core::config::{parse_config, ColorMode};
/// let config = parse_config("[render]\nwidth = 40\ncolor_mode = \"Full\"\n").unwrap();
/// assert_eq!(config.width, 40);
/// assert_eq!(config.color_mode, ColorMode::Full);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.width {
            config.width = v;
        }
        if let Some(v) = r.palette {
            config.palette = v;
        }
        if let Some(v) = r.color_mode {
            config.color_mode = v;
        }
        if let Some(v) = r.char_aspect {
            config.char_aspect = v;
        }
        if let Some(v) = r.on_error {
            config.on_error = v;
        }
    }

    config.validate()?;
    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ascime_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("ascime.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config("[render]\npalette = \"u\"\n").unwrap();
        assert_eq!(config.palette, PaletteKind::Unicode);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config("[render]\nchar_aspect = 40.0\n").unwrap();
        assert!((config.char_aspect - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(parse_config("[render]\nwidth = 0\n").is_err());
    }

    #[test]
    fn width_above_limit_is_rejected() {
        assert!(parse_config("[render]\nwidth = 4096\n").is_ok());
        assert!(parse_config("[render]\nwidth = 4097\n").is_err());
    }

    #[test]
    fn unknown_color_mode_is_a_parse_error() {
        assert!(parse_config("[render]\ncolor_mode = \"Sepia\"\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nwidth = 64\non_error = \"Continue\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/ascime.toml")).is_err());
    }
}
