//! Dense-with-ties ranking of participant scores.

use crate::domain::model::{ParticipantScore, RankedParticipant};

/// Sort by descending score (stable among ties, preserving enumeration
/// order) and assign ranks: equal consecutive scores share a rank; a score
/// drop takes the 1-based position, leaving gaps after tie groups
/// (10, 10, 8 → 1, 1, 3).
pub fn rank_participants(mut scores: Vec<ParticipantScore>) -> Vec<RankedParticipant> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    let mut ranked = Vec::with_capacity(scores.len());
    let mut prev_score = None;
    let mut prev_rank = 0u32;

    for (index, score) in scores.into_iter().enumerate() {
        let rank = match prev_score {
            Some(prev) if prev == score.score => prev_rank,
            _ => index as u32 + 1,
        };
        prev_score = Some(score.score);
        prev_rank = rank;
        ranked.push(RankedParticipant { rank, score });
    }

    ranked
}
