//! One-shot renderer: composes the caption pair and writes `out.png` into
//! the working directory. No network, no cache, no runtime.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use excuse_gen::render::Renderer;

#[derive(Parser)]
#[command(name = "excuse")]
#[command(version)]
#[command(about = "Render a captioned excuse image to out.png")]
struct Cli {
    /// The complete excuse, drawn inside quotes
    #[arg(long, default_value = "compiling my code")]
    long: String,

    /// The one-word excuse
    #[arg(long, default_value = "compiling")]
    short: String,

    /// Template image path
    #[arg(long, default_value = "./resources/xkcd-excuse-template.png")]
    template: PathBuf,

    /// Font path
    #[arg(long, default_value = "./resources/xkcd.ttf")]
    font: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let renderer = Renderer::new(cli.template, cli.font);
    let bitmap = renderer.compose(&cli.short, &cli.long)?;
    bitmap.save("out.png").context("failed to write out.png")?;

    Ok(())
}
