//! Opaque 9-digit deck identifiers.
//!
//! The pipeline never generates IDs itself; the CLI derives one here (or
//! accepts an explicit override) and hands it to the report writer.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const ID_FLOOR: u32 = 100_000_000;
const ID_SPAN: u32 = 900_000_000;

/// Nine-digit deck identifier, always in `100000000..=999999999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckId(u32);

#[derive(Debug, Error)]
pub enum DeckIdError {
    #[error("deck id must be a number: '{0}'")]
    NotANumber(String),
    #[error("deck id must have exactly 9 digits (got {0})")]
    OutOfRange(u32),
}

impl DeckId {
    /// Derive an identifier from the source path and the current time.
    ///
    /// Hashing keeps the value well spread without pulling in an RNG; two
    /// runs over the same file still get distinct IDs via the timestamp.
    pub fn generate(source: &Path) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.display().to_string().as_bytes());
        hasher.update(Utc::now().timestamp_nanos_opt().unwrap_or(0).to_be_bytes());
        let digest = hasher.finalize();
        let seed = u64::from_be_bytes(digest[..8].try_into().expect("digest is 32 bytes"));
        DeckId(ID_FLOOR + (seed % u64::from(ID_SPAN)) as u32)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeckId {
    type Err = DeckIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| DeckIdError::NotANumber(s.to_string()))?;
        if value < ID_FLOOR || value >= ID_FLOOR + ID_SPAN {
            return Err(DeckIdError::OutOfRange(value));
        }
        Ok(DeckId(value))
    }
}
