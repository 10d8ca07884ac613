//! Line grammar for deck files: `<name>:<cost>`, one colon, trimmed fields.

pub const MAX_COST: u8 = 6;

/// Raw line split into its two colon-delimited halves, before any
/// numeric or rule checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub name: String,
    pub cost_text: String,
}

/// Fully validated card entry. `name` is non-empty and `cost` lies in `0..=6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub name: String,
    pub cost: u8,
}

/// Split a raw line on its colon separator.
///
/// Returns `None` when the line does not consist of exactly two
/// colon-delimited fields. Surrounding whitespace is trimmed from both
/// halves; no numeric parsing happens here.
pub fn parse_line(line: &str) -> Option<ParsedCandidate> {
    let (name, cost_text) = line.split_once(':')?;
    if cost_text.contains(':') {
        return None;
    }
    Some(ParsedCandidate {
        name: name.trim().to_string(),
        cost_text: cost_text.trim().to_string(),
    })
}

impl ParsedCandidate {
    /// Apply the card validity rules to the candidate.
    ///
    /// The cost must lex as a base-10 integer (empty, non-numeric and
    /// overflowing text all fail the lex) and fall in `0..=6`, and the name
    /// must be non-empty. Any failure yields `None`; the caller records the
    /// original line, not the reason.
    pub fn validate(&self) -> Option<CardEntry> {
        let cost: i64 = self.cost_text.parse().ok()?;
        if self.name.is_empty() || cost < 0 || cost > i64::from(MAX_COST) {
            return None;
        }
        Some(CardEntry {
            name: self.name.clone(),
            cost: cost as u8,
        })
    }
}

/// Parse and validate a raw line in one step.
pub fn classify_line(line: &str) -> Option<CardEntry> {
    parse_line(line)?.validate()
}
