//! Row parsing and table normalization.
//!
//! The source table merges multi-row country entries: a row whose rank cell
//! is blank continues the previous ranked row and must reuse that row's
//! medal counts, whatever its own numeric cells say. Numeric cells that fail
//! to parse count as zero; that is deliberate leniency, not an error.

use crate::domain::model::{MedalRecord, MedalTally, RawRow};

/// Outcome of parsing one raw row against the current carry-forward tally.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// The normalized record, absent when the country cell is blank
    /// (header and separator rows).
    pub record: Option<MedalRecord>,
    /// New carry-forward values; present only on rows with a non-empty rank.
    pub carry_update: Option<MedalTally>,
}

/// Parse one raw row. `carry` holds the medal counts of the last row that
/// had a non-empty rank.
pub fn parse_row(row: &RawRow, carry: MedalTally) -> ParsedRow {
    let rank = row.cell(RawRow::RANK);
    let country = row.cell(RawRow::COUNTRY);

    let parsed = MedalTally {
        gold: parse_count(row.cell(RawRow::GOLD)),
        silver: parse_count(row.cell(RawRow::SILVER)),
        bronze: parse_count(row.cell(RawRow::BRONZE)),
        total: parse_count(row.cell(RawRow::TOTAL)),
    };

    let continuation = rank.is_empty();
    let counts = if continuation { carry } else { parsed };

    let record = (!country.is_empty()).then(|| MedalRecord {
        rank: rank.to_string(),
        country: country.to_string(),
        gold: counts.gold,
        silver: counts.silver,
        bronze: counts.bronze,
        total: counts.total,
    });

    ParsedRow {
        record,
        carry_update: (!continuation).then_some(parsed),
    }
}

fn parse_count(cell: &str) -> u32 {
    cell.parse().unwrap_or(0)
}

/// Normalize a full row sequence into per-country records, in input order.
/// The carry-forward accumulator starts at zero and advances only on rows
/// whose rank cell is non-empty.
pub fn normalize_table(rows: &[RawRow]) -> Vec<MedalRecord> {
    let mut carry = MedalTally::default();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let parsed = parse_row(row, carry);
        if let Some(record) = parsed.record {
            records.push(record);
        }
        if let Some(update) = parsed.carry_update {
            carry = update;
        }
    }

    records
}
