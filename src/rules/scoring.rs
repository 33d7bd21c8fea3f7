//! Scoring and win determination.

use crate::core::{Hand, Outcome, WIN_THRESHOLD};

/// Round total of a hand: the plain sum of its faces.
#[must_use]
pub fn round_total(hand: &Hand) -> u32 {
    hand.total()
}

/// Whether a cumulative score has reached the win threshold.
#[must_use]
pub const fn reached_threshold(score: u32) -> bool {
    score >= WIN_THRESHOLD
}

/// Decide the outcome once both sides have committed a round.
///
/// The game ends as soon as either side reaches the threshold. The player
/// wins only from at or above the threshold and strictly ahead; every other
/// ending, including an equal score, goes to the AI.
#[must_use]
pub const fn evaluate_outcome(player_score: u32, ai_score: u32) -> Outcome {
    if !reached_threshold(player_score) && !reached_threshold(ai_score) {
        Outcome::InProgress
    } else if reached_threshold(player_score) && player_score > ai_score {
        Outcome::PlayerWon
    } else {
        Outcome::AiWon
    }
}
