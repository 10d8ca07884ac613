use crate::parse::{MAX_COST, classify_line};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Number of histogram buckets, one per cost value `0..=6`.
pub const COST_BUCKETS: usize = MAX_COST as usize + 1;

/// Decks with more valid cards than this are void. The card that brings the
/// count to 1001 is still counted before reading stops.
pub const CARD_CAP: u32 = 1000;

/// Decks with more invalid records than this are void.
pub const INVALID_CAP: usize = 10;

/// Accumulated result of one pass over a deck file.
///
/// Built empty, folded over the input lines, then read-only. The invariant
/// `histogram.iter().sum() == valid_count` holds at every step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckStats {
    pub total_cost: u64,
    pub valid_count: u32,
    pub histogram: [u32; COST_BUCKETS],
    /// Rejected lines, verbatim and in input order.
    pub invalid_records: Vec<String>,
}

/// Overall disposition of a deck, derived from [`DeckStats`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckVerdict {
    Valid,
    Void,
}

impl DeckStats {
    /// Fold a single raw line into the accumulator.
    ///
    /// A line that parses and validates bumps the matching histogram bucket,
    /// the running total and the valid count; anything else is kept verbatim
    /// as an invalid record. Per-line anomalies are data, never errors.
    pub fn record_line(&mut self, line: &str) {
        match classify_line(line) {
            Some(entry) => {
                self.total_cost += u64::from(entry.cost);
                self.histogram[entry.cost as usize] += 1;
                self.valid_count += 1;
            }
            None => self.invalid_records.push(line.to_string()),
        }
    }

    /// True once the valid-card count has gone strictly above [`CARD_CAP`];
    /// no further input should be consumed.
    pub fn capped(&self) -> bool {
        self.valid_count > CARD_CAP
    }

    /// Classify the finished deck. Pure; the same stats always yield the
    /// same verdict.
    pub fn verdict(&self) -> DeckVerdict {
        if self.valid_count > CARD_CAP || self.invalid_records.len() > INVALID_CAP {
            DeckVerdict::Void
        } else {
            DeckVerdict::Valid
        }
    }
}

/// Aggregate an in-memory sequence of lines, honoring the early-termination
/// cap: once the valid count passes [`CARD_CAP`] the remaining lines are
/// left unread.
pub fn aggregate_lines<I, S>(lines: I) -> DeckStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = DeckStats::default();
    for line in lines {
        stats.record_line(line.as_ref());
        if stats.capped() {
            break;
        }
    }
    stats
}

/// Aggregate lines from any buffered reader.
///
/// I/O failures mid-stream abort the run; the partial stats are discarded by
/// the caller, matching the rule that only source access problems are fatal.
pub fn read_deck<R: BufRead>(reader: R) -> Result<DeckStats> {
    let mut stats = DeckStats::default();
    for line in reader.lines() {
        let line = line.context("failed to read line from deck source")?;
        stats.record_line(&line);
        if stats.capped() {
            break;
        }
    }
    Ok(stats)
}

/// Open and aggregate a deck file. The handle is scoped to this call and
/// released on every exit path.
pub fn read_deck_file(path: &Path) -> Result<DeckStats> {
    let file = File::open(path)
        .with_context(|| format!("failed to open deck file {}", path.display()))?;
    read_deck(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn valid_line_updates_all_counters() {
        let mut stats = DeckStats::default();
        stats.record_line("Fireball:3");
        assert_eq!(stats.valid_count, 1);
        assert_eq!(stats.total_cost, 3);
        assert_eq!(stats.histogram, [0, 0, 0, 1, 0, 0, 0]);
        assert!(stats.invalid_records.is_empty());
    }

    #[test]
    fn invalid_lines_are_kept_verbatim_without_mutation() {
        let mut stats = DeckStats::default();
        stats.record_line("Fireball:7");
        stats.record_line("NoColonHere");
        stats.record_line(":5");
        assert_eq!(stats.valid_count, 0);
        assert_eq!(stats.total_cost, 0);
        assert_eq!(stats.histogram, [0; COST_BUCKETS]);
        assert_eq!(
            stats.invalid_records,
            vec![
                "Fireball:7".to_string(),
                "NoColonHere".to_string(),
                ":5".to_string(),
            ]
        );
    }

    #[test]
    fn histogram_sum_matches_valid_count() {
        let lines = [
            "Strike:1",
            "Defend:1",
            "Fireball:3",
            "Whirlwind:6",
            "broken line",
            "Apotheosis:2",
        ];
        let stats = aggregate_lines(lines);
        let bucket_sum: u32 = stats.histogram.iter().sum();
        assert_eq!(bucket_sum, stats.valid_count);
        assert_eq!(
            stats.valid_count as usize + stats.invalid_records.len(),
            lines.len()
        );
        assert_eq!(stats.total_cost, 1 + 1 + 3 + 6 + 2);
    }

    #[test]
    fn cap_counts_the_1001st_card_then_stops_reading() {
        let mut consumed = 0usize;
        let lines = (0..2000).map(|i| {
            consumed += 1;
            format!("Card{i}:1")
        });
        let stats = aggregate_lines(lines);
        assert_eq!(stats.valid_count, 1001);
        assert_eq!(stats.total_cost, 1001);
        // The line that tipped the count over was the last one read.
        assert_eq!(consumed, 1001);
        assert_eq!(stats.verdict(), DeckVerdict::Void);
    }

    #[test]
    fn exactly_one_thousand_valid_cards_is_not_capped() {
        let lines = (0..1000).map(|i| format!("Card{i}:0"));
        let stats = aggregate_lines(lines);
        assert_eq!(stats.valid_count, 1000);
        assert!(!stats.capped());
        assert_eq!(stats.verdict(), DeckVerdict::Valid);
    }

    #[test]
    fn eleven_invalid_records_void_the_deck() {
        let mut lines: Vec<String> = (0..5).map(|i| format!("Card{i}:2")).collect();
        lines.extend((0..11).map(|i| format!("junk line {i}")));
        let stats = aggregate_lines(&lines);
        assert_eq!(stats.invalid_records.len(), 11);
        assert_eq!(stats.verdict(), DeckVerdict::Void);
    }

    #[test]
    fn ten_invalid_records_keep_the_deck_valid() {
        let lines: Vec<String> = (0..10).map(|i| format!("junk line {i}")).collect();
        let stats = aggregate_lines(&lines);
        assert_eq!(stats.invalid_records.len(), 10);
        assert_eq!(stats.verdict(), DeckVerdict::Valid);
    }

    #[test]
    fn verdict_is_idempotent() {
        let stats = aggregate_lines(["Strike:1", "bad"]);
        assert_eq!(stats.verdict(), stats.verdict());
    }

    #[test]
    fn reader_path_matches_in_memory_aggregation() {
        let text = "Strike:1\nFireball:3\nnot a card\n";
        let from_reader = read_deck(text.as_bytes()).unwrap();
        let from_lines = aggregate_lines(text.lines());
        assert_eq!(from_reader, from_lines);
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        let err = read_deck_file(Path::new("/no/such/deck.txt")).unwrap_err();
        assert!(err.to_string().contains("deck file"));
    }
}
