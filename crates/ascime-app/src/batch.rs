use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ascime_core::config::ErrorPolicy;

use crate::pipeline::Renderer;

/// Outcome of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images rendered and written.
    pub rendered: usize,
    /// Images skipped under [`ErrorPolicy::Continue`].
    pub failed: Vec<PathBuf>,
}

/// Render `paths` one after the other into `out`, in input order.
///
/// Each image is fully decoded, rendered and written before the next one is
/// opened. Every block is followed by an empty line.
///
/// # Errors
/// Under [`ErrorPolicy::Abort`], the first image that fails to load stops
/// the batch; blocks already written stay written. Write failures on `out`
/// always stop the batch.
pub fn run_batch<W: Write>(paths: &[PathBuf], renderer: &Renderer, out: &mut W) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let policy = renderer.config().on_error;

    for path in paths {
        match renderer.render_path(path) {
            Ok(text) => {
                write_block(out, &text)?;
                summary.rendered += 1;
            }
            Err(e) => match policy {
                ErrorPolicy::Abort => {
                    return Err(e).with_context(|| format!("Échec du rendu de {}", path.display()));
                }
                ErrorPolicy::Continue => {
                    log::error!("{e}");
                    summary.failed.push(path.clone());
                }
            },
        }
    }

    log::info!(
        "{} image(s) rendered, {} failed",
        summary.rendered,
        summary.failed.len()
    );
    Ok(summary)
}

fn write_block<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.write_all(b"\n"))
        .and_then(|()| out.flush())
        .context("Écriture sur la sortie impossible")
}

/// Print the composited frame paths of `gif`, one per line.
///
/// # Errors
/// Returns an error if the GIF cannot be split or `out` cannot be written.
pub fn run_split<W: Write>(gif: &Path, scratch_dir: &Path, out: &mut W) -> Result<usize> {
    let frames = ascime_source::gif::split_animated_gif(gif, scratch_dir)
        .with_context(|| format!("Découpage de {} impossible", gif.display()))?;
    for frame in &frames {
        writeln!(out, "{}", frame.display()).context("Écriture sur la sortie impossible")?;
    }
    Ok(frames.len())
}
