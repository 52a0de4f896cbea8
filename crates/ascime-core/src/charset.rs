use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 11 caractères — dense→clair, le jeu historique.
pub const CHARSET_SIMPLE: &str = "@#S%?*+;:,.";

/// 10 caractères — compact, bon contraste.
pub const CHARSET_DEFAULT: &str = "@%#*+=-:. ";

/// 70 caractères — Paul Bourke, résolution maximale (dense→clair).
pub const CHARSET_EXTENDED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Blocs Unicode — pseudo-pixels.
pub const CHARSET_UNICODE: &str = "█▓▒░ ";

/// Built-in palette selector.
///
/// # Example
/// ```
/// use ascime_core::charset::PaletteKind;
/// assert_eq!(PaletteKind::from_name("e"), Some(PaletteKind::Extended));
/// assert_eq!(PaletteKind::from_name("nope"), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// `@#S%?*+;:,.`
    #[serde(alias = "s")]
    Simple,
    /// `@%#*+=-:. `
    #[default]
    #[serde(alias = "d")]
    Default,
    /// Paul Bourke's 70-glyph ramp.
    #[serde(alias = "e")]
    Extended,
    /// Shade blocks.
    #[serde(alias = "u")]
    Unicode,
}

impl PaletteKind {
    /// Every built-in palette, in registry order.
    pub const ALL: [Self; 4] = [Self::Simple, Self::Default, Self::Extended, Self::Unicode];

    /// Strict lookup by name or single-letter alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "s" | "simple" => Some(Self::Simple),
            "d" | "default" => Some(Self::Default),
            "e" | "extended" => Some(Self::Extended),
            "u" | "unicode" => Some(Self::Unicode),
            _ => None,
        }
    }

    /// Lookup with fallback: unknown names resolve to [`PaletteKind::Simple`].
    ///
    /// # Example
    /// ```
    /// use ascime_core::charset::PaletteKind;
    /// assert_eq!(PaletteKind::resolve("unicode"), PaletteKind::Unicode);
    /// assert_eq!(PaletteKind::resolve("braille"), PaletteKind::Simple);
    /// ```
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown palette '{name}', falling back to 'simple'.");
            Self::Simple
        })
    }

    /// Glyph string, index 0 first.
    #[must_use]
    pub fn glyphs(self) -> &'static str {
        match self {
            Self::Simple => CHARSET_SIMPLE,
            Self::Default => CHARSET_DEFAULT,
            Self::Extended => CHARSET_EXTENDED,
            Self::Unicode => CHARSET_UNICODE,
        }
    }

    /// Canonical long name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Default => "default",
            Self::Extended => "extended",
            Self::Unicode => "unicode",
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CoreError::UnknownPalette { name: s.to_string() })
    }
}

/// Ordered glyph sequence of a built-in palette.
///
/// # Example
/// ```
/// use ascime_core::charset::{Palette, PaletteKind};
/// let p = Palette::new(PaletteKind::Simple);
/// assert_eq!(p.len(), 11);
/// assert_eq!(p.glyph(0), '@');
/// assert_eq!(p.glyph(10), '.');
/// ```
#[derive(Clone, Debug)]
pub struct Palette {
    glyphs: Vec<char>,
}

impl Palette {
    /// Collect the glyphs of `kind`.
    #[must_use]
    pub fn new(kind: PaletteKind) -> Self {
        Self {
            glyphs: kind.glyphs().chars().collect(),
        }
    }

    /// Number of glyphs (always ≥ 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept alongside `len` for clippy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }
}

/// Lookup table mapping luminance [0..255] → glyph.
///
/// Pre-computed once per palette for O(1) per-pixel cost, using
/// `index = luminance * (len - 1) / 255`.
///
/// # Example
/// ```
/// use ascime_core::charset::{LuminanceLut, Palette, PaletteKind};
/// let lut = LuminanceLut::new(&Palette::new(PaletteKind::Simple));
/// assert_eq!(lut.map(0), '@');
/// assert_eq!(lut.map(255), '.');
/// ```
#[derive(Clone)]
pub struct LuminanceLut {
    lut: [char; 256],
}

impl LuminanceLut {
    /// Build a LUT from a palette.
    #[must_use]
    pub fn new(palette: &Palette) -> Self {
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = palette.glyph(bucket_index(i as u8, palette.len()));
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }
}

/// Linear floor quantization of a luminance into `[0, len - 1]`.
///
/// # Example
/// ```
/// use ascime_core::charset::bucket_index;
/// assert_eq!(bucket_index(0, 11), 0);
/// assert_eq!(bucket_index(128, 11), 5);
/// assert_eq!(bucket_index(255, 11), 10);
/// ```
#[inline(always)]
#[must_use]
pub fn bucket_index(luminance: u8, len: usize) -> usize {
    usize::from(luminance) * len.saturating_sub(1) / 255
}
