//! Chart-only workflow (`spiredeck chart ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use spiredeck::{ChartOptions, DeckVerdict, read_deck_file, render_histogram};

/// Arguments for `spiredeck chart`.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Deck file to audit.
    pub deck: PathBuf,
    /// Output PNG path.
    #[arg(short = 'o', long = "output", default_value = "histogram.png")]
    pub output: PathBuf,
    /// Edge length of the square chart in pixels.
    #[arg(long, default_value_t = 600)]
    pub size: u32,
}

/// Render just the histogram PNG for a deck.
pub fn handle(args: ChartArgs) -> Result<()> {
    let stats = read_deck_file(&args.deck)?;
    let chart = render_histogram(&stats.histogram, &ChartOptions { size: args.size })?;
    chart
        .save(&args.output)
        .with_context(|| format!("failed to write chart {}", args.output.display()))?;
    println!("Chart written to {}", args.output.display());
    if stats.verdict() == DeckVerdict::Void {
        println!("note: this deck classifies as VOID; a report run would skip the chart");
    }
    Ok(())
}
