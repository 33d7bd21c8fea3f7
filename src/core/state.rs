//! Game state snapshot.
//!
//! A `GameState` is an immutable value: every engine operation takes one by
//! reference and returns a new one. The presentation layer re-renders from
//! the latest snapshot rather than mutating shared variables.

use serde::{Deserialize, Serialize};

use super::player::{AiState, PlayerState, Side};

/// Whether the game is still running, and who won if not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    PlayerWon,
    AiWon,
}

impl Outcome {
    /// Whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning side, if the game has ended.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::InProgress => None,
            Outcome::PlayerWon => Some(Side::Player),
            Outcome::AiWon => Some(Side::Ai),
        }
    }
}

/// Complete state of one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// The human side.
    pub player: PlayerState,
    /// Summary of the AI side.
    pub ai: AiState,
    /// Side whose turn it is.
    pub active_side: Side,
    /// Running or finished.
    pub outcome: Outcome,
    /// Round number, starting at 1. A round is a player turn followed by the
    /// AI's matching turn.
    pub round: u32,
}

impl GameState {
    /// Create the opening state with the player to move.
    #[must_use]
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            ai: AiState::default(),
            active_side: Side::Player,
            outcome: Outcome::InProgress,
            round: 1,
        }
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Whether `side` may act right now.
    #[must_use]
    pub fn is_turn_of(&self, side: Side) -> bool {
        !self.is_over() && self.active_side == side
    }

    /// Cumulative score of `side`.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player.cumulative_score,
            Side::Ai => self.ai.cumulative_score,
        }
    }
}
