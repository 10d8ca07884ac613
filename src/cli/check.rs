//! Summary-only workflow (`spiredeck check ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use spiredeck::{DeckStats, DeckVerdict, read_deck_file};

/// Arguments for `spiredeck check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Deck file to audit.
    pub deck: PathBuf,
    /// Emit the summary as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    verdict: DeckVerdict,
    #[serde(flatten)]
    stats: &'a DeckStats,
}

/// Aggregate and print, skipping the renderer entirely.
pub fn handle(args: CheckArgs) -> Result<()> {
    let stats = read_deck_file(&args.deck)?;
    let verdict = stats.verdict();

    if args.json {
        let summary = Summary {
            verdict,
            stats: &stats,
        };
        let out = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{out}");
        return Ok(());
    }

    println!("Valid cards:       {}", stats.valid_count);
    println!("Total energy cost: {} energy", stats.total_cost);
    for (bucket, count) in stats.histogram.iter().enumerate() {
        println!("  {bucket} energy: {count}");
    }
    if !stats.invalid_records.is_empty() {
        println!("Invalid cards ({}):", stats.invalid_records.len());
        for record in &stats.invalid_records {
            println!("  {record}");
        }
    }
    println!(
        "Verdict:           {}",
        match verdict {
            DeckVerdict::Valid => "valid",
            DeckVerdict::Void => "VOID",
        }
    );
    Ok(())
}
