//! Rejections of a single intent.
//!
//! None of these are fatal: the caller still holds the unchanged state it
//! passed in and may try another intent.

use thiserror::Error;

use crate::core::DICE_COUNT;

/// Why an intent is not allowed in the current turn state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum TurnViolation {
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("it is not the AI's turn")]
    NotAisTurn,
    #[error("the game is over")]
    GameOver,
    #[error("no rolls left this turn")]
    NoRollsLeft,
    #[error("no roll taken yet this turn")]
    NoRollTaken,
}

/// Errors returned by engine operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RuleError {
    #[error("invalid turn state: {0}")]
    InvalidTurnState(#[from] TurnViolation),
    #[error("die index {index} out of range 0..{}", DICE_COUNT)]
    IndexOutOfRange { index: usize },
}
