//! Rules engine trait.
//!
//! A game implements `RulesEngine` to define:
//! - Which intents are legal in a state
//! - How an intent transforms a state
//! - When the game is over and who won
//!
//! Transitions are pure from the caller's point of view: the input state is
//! borrowed, never modified, and a rejected intent leaves nothing changed.

use serde::{Deserialize, Serialize};

use super::error::RuleError;
use crate::core::{GameState, Intent, Side};

/// Result of a completed game, as surfaced to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Winning side.
    pub winner: Side,
    /// Player's final cumulative score.
    pub player_score: u32,
    /// AI's final cumulative score.
    pub ai_score: u32,
}

impl GameResult {
    /// Result of `state`, or `None` while the game is running.
    #[must_use]
    pub fn from_state(state: &GameState) -> Option<Self> {
        state.outcome.winner().map(|winner| Self {
            winner,
            player_score: state.player.cumulative_score,
            ai_score: state.ai.cumulative_score,
        })
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner == side
    }

    /// The game-end notification payload.
    #[must_use]
    pub fn player_won(&self) -> bool {
        self.is_winner(Side::Player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_intents`: empty once the game is over; a roll is listed once and
///   stands for a roll with any hold mask
/// - `apply_intent`: every intent from `legal_intents` must succeed; anything
///   else must be rejected
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Intents that would currently be accepted.
    fn legal_intents(&self, state: &GameState) -> Vec<Intent>;

    /// Apply an intent, producing the next state.
    fn apply_intent(&mut self, state: &GameState, intent: Intent) -> Result<GameState, RuleError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        GameResult::from_state(state)
    }

    /// Whether `intent` is currently legal.
    fn is_legal(&self, state: &GameState, intent: Intent) -> bool {
        self.legal_intents(state).iter().any(|listed| listed.covers(&intent))
    }
}
