use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw table row as delivered by the extraction step: the cell texts in
/// source order. Positions are fixed by the source table layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub const RANK: usize = 0;
    pub const COUNTRY: usize = 1;
    pub const GOLD: usize = 2;
    pub const SILVER: usize = 3;
    pub const BRONZE: usize = 4;
    pub const TOTAL: usize = 5;
    /// Expected cell count of a complete row.
    pub const WIDTH: usize = 6;

    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Trimmed text of the cell at `idx`, or `""` when the cell is absent.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|c| c.trim()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<const N: usize> From<[&str; N]> for RawRow {
    fn from(cells: [&str; N]) -> Self {
        Self::new(cells.iter().map(|c| c.to_string()).collect())
    }
}

/// Medal counts without identity, used for the carry-forward accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MedalTally {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// One normalized per-country row of the medal table. `rank` keeps the raw
/// cell text and stays empty on continuation rows; the counts on such rows
/// are the carried-forward values of the last ranked row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedalRecord {
    pub rank: String,
    pub country: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalRecord {
    pub fn tally(&self) -> MedalTally {
        MedalTally {
            gold: self.gold,
            silver: self.silver,
            bronze: self.bronze,
            total: self.total,
        }
    }
}

/// Per-medal point weights used by the score aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedalWeights {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl Default for MedalWeights {
    fn default() -> Self {
        Self {
            gold: 3,
            silver: 2,
            bronze: 1,
        }
    }
}

impl MedalWeights {
    pub fn score(&self, tally: MedalTally) -> u32 {
        self.gold * tally.gold + self.silver * tally.silver + self.bronze * tally.bronze
    }
}

/// One participant and the countries they drafted. The draft is static
/// configuration; entry order defines tie-break stability in the ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftEntry {
    pub participant: String,
    pub countries: Vec<String>,
}

/// Aggregated medal counts and weighted score over one participant's drafted
/// countries. Unmatched countries contribute zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParticipantScore {
    pub participant: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
    pub score: u32,
}

/// A participant score with its dense-with-ties rank (1-based; equal scores
/// share a rank, the next distinct score takes its 1-based position).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedParticipant {
    pub rank: u32,
    #[serde(flatten)]
    pub score: ParticipantScore,
}

/// Output of the transform phase, consumed by load and by the CLI renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardResult {
    /// Participants in rank order.
    pub scoreboard: Vec<RankedParticipant>,
    /// Normalized records filtered to drafted countries, in table order.
    pub standings: Vec<MedalRecord>,
    /// Total normalized record count before filtering.
    pub record_count: usize,
    pub fetched_at: DateTime<Utc>,
}
