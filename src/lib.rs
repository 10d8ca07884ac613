//! Core library for deck validation, aggregation and PDF report rendering.

mod chart;
mod deck;
mod ident;
mod parse;
mod report;

pub use chart::{ChartOptions, render_histogram};
pub use deck::{
    CARD_CAP, COST_BUCKETS, DeckStats, DeckVerdict, INVALID_CAP, aggregate_lines, read_deck,
    read_deck_file,
};
pub use ident::{DeckId, DeckIdError};
pub use parse::{CardEntry, MAX_COST, ParsedCandidate, classify_line, parse_line};
pub use report::{
    build_deck_document, build_void_document, report_file_name, write_deck_report,
    write_void_report,
};

use anyhow::Result;
use std::path::Path;

/// Aggregate a deck file and classify it in one pass.
pub fn audit_deck_file(path: &Path) -> Result<(DeckStats, DeckVerdict)> {
    let stats = read_deck_file(path)?;
    let verdict = stats.verdict();
    Ok((stats, verdict))
}
