//! Full report workflow (`spiredeck report ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use spiredeck::{DeckId, DeckVerdict, read_deck_file, write_deck_report, write_void_report};

/// Arguments for `spiredeck report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Deck file to audit (one name:cost entry per line).
    pub deck: PathBuf,
    /// Directory the PDF is written into.
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub out_dir: PathBuf,
    /// Explicit 9-digit deck ID (derived from the input when omitted).
    #[arg(long = "deck-id")]
    pub deck_id: Option<DeckId>,
}

/// Run the whole pipeline: aggregate, classify, render.
pub fn handle(args: ReportArgs) -> Result<()> {
    let stats = read_deck_file(&args.deck)?;
    let id = args.deck_id.unwrap_or_else(|| DeckId::generate(&args.deck));
    match stats.verdict() {
        DeckVerdict::Void => {
            let path = write_void_report(&args.out_dir, id)?;
            println!("VOID report generated: {}", path.display());
        }
        DeckVerdict::Valid => {
            let path = write_deck_report(&args.out_dir, id, &stats)?;
            println!("Report generated: {}", path.display());
        }
    }
    Ok(())
}
