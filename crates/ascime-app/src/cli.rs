use std::convert::Infallible;
use std::path::PathBuf;

use anyhow::Result;
use ascime_core::charset::PaletteKind;
use ascime_core::color::paint;
use ascime_core::config::{ColorMode, ErrorPolicy, MAX_WIDTH, RenderConfig, load_config};
use ascime_source::gif::DEFAULT_SCRATCH_DIR;
use clap::{Parser, ValueEnum};

const BANNER: &str = r"
		░█▀▀▄░█▀▀░█▀▄░░▀░░█▀▄▀█░█▀▀
		▒█▄▄█░▀▀▄░█░░░░█▀░█░▀░█░█▀▀
		▒█░▒█░▀▀▀░▀▀▀░▀▀▀░▀░░▒▀░▀▀▀
";

/// ascime — render images as ASCII or truecolor ANSI text.
#[derive(Parser, Debug)]
#[command(name = "ascime", version, about, long_about = None)]
pub struct Cli {
    /// Images à rendre (PNG, JPEG, BMP, GIF), dans l'ordre.
    pub paths: Vec<PathBuf>,

    /// Couleur truecolor : `-c` seul = pleine couleur, `gray` ou `only`.
    #[arg(short = 'c', value_enum, num_args = 0..=1, default_missing_value = "full")]
    pub color: Option<ColorArg>,

    /// Largeur de sortie en glyphes (1 à 4096).
    #[arg(short = 'w', value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WIDTH)))]
    pub width: Option<u32>,

    /// Palette : s|simple, d|default, e|extended, u|unicode.
    #[arg(short = 'a', value_parser = parse_palette)]
    pub palette: Option<PaletteKind>,

    /// Fichier de configuration TOML (section [render]).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Continuer après une image illisible au lieu d'arrêter le lot.
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// Découper un GIF animé en PNG composités dans --scratch-dir.
    #[arg(long, value_name = "GIF")]
    pub split_gif: Option<PathBuf>,

    /// Dossier de sortie des frames de --split-gif.
    #[arg(long, default_value = DEFAULT_SCRATCH_DIR)]
    pub scratch_dir: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Value of `-c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// Pleine couleur (valeur de `-c` sans argument).
    #[value(hide = true)]
    Full,
    /// Densité en niveaux de gris, glyphes colorés.
    Gray,
    /// Glyphe fixe, seule la couleur varie.
    Only,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Full => Self::Full,
            ColorArg::Gray => Self::GrayPreserveColor,
            ColorArg::Only => Self::ColorOnly,
        }
    }
}

/// `-a` never fails: unknown names fall back to `simple`.
fn parse_palette(name: &str) -> Result<PaletteKind, Infallible> {
    Ok(PaletteKind::resolve(name))
}

impl Cli {
    /// Apply the command-line overrides on top of `base`.
    #[must_use]
    pub fn apply_to(&self, mut base: RenderConfig) -> RenderConfig {
        if let Some(color) = self.color {
            base.color_mode = color.into();
        }
        if let Some(width) = self.width {
            base.width = width;
        }
        if let Some(palette) = self.palette {
            base.palette = palette;
        }
        if self.keep_going {
            base.on_error = ErrorPolicy::Continue;
        }
        base
    }

    /// Build the run's immutable config: file (if any), then flags.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn resolve_config(&self) -> Result<RenderConfig> {
        let base = match self.config.as_deref() {
            Some(path) if path.exists() => load_config(path)?,
            Some(path) => {
                log::warn!(
                    "Config introuvable : {}. Utilisation des défauts.",
                    path.display()
                );
                RenderConfig::default()
            }
            None => RenderConfig::default(),
        };
        Ok(self.apply_to(base))
    }
}

/// Banner and one-line usage, printed when ascime runs without arguments.
#[must_use]
pub fn banner() -> String {
    format!(
        "{}\nusage: ascime [image_path1, image_path2] [args...]\n",
        paint(BANNER, (0, 200, 255))
    )
}
