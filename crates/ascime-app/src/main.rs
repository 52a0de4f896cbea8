use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

pub mod batch;
pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 0. Sans argument : bannière + usage
    if std::env::args_os().len() < 2 {
        print!("{}", cli::banner());
        io::stdout().flush()?;
        return Ok(());
    }

    // 1. Parser CLI (erreurs d'usage : clap affiche et sort en code 2)
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config immuable pour tout le lot
    let config = cli.resolve_config()?;
    log::debug!("{config:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // 4. Découpage GIF, indépendant du rendu
    if let Some(ref gif) = cli.split_gif {
        let count = batch::run_split(gif, &cli.scratch_dir, &mut out)?;
        log::info!("{count} frame(s) written to {}", cli.scratch_dir.display());
    }

    if cli.paths.is_empty() {
        if cli.split_gif.is_none() {
            log::warn!("Aucune image à rendre.");
        }
        return Ok(());
    }

    // 5. Rendu séquentiel
    let renderer = pipeline::Renderer::new(config);
    let summary = batch::run_batch(&cli.paths, &renderer, &mut out)?;

    if !summary.failed.is_empty() {
        anyhow::bail!(
            "{} image(s) sur {} n'ont pas pu être rendues",
            summary.failed.len(),
            cli.paths.len()
        );
    }
    Ok(())
}
