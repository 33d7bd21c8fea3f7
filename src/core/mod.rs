//! Core types: dice, sides, state snapshots, intents, randomness, constants.
//!
//! Nothing in here enforces turn order. That is the job of `rules`.

pub mod dice;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use dice::{DiePositions, DieValue, Hand, HoldMask, InvalidDieValue, InvalidHoldMask, DICE_COUNT};
pub use player::{AiState, InvalidRollCount, PlayerState, Side, TurnState};
pub use rng::{GameRng, RandomSource, ScriptedDice};
pub use config::{AI_REROLL_PASSES, FACES, MAX_ROLLS, WIN_THRESHOLD};
pub use action::Intent;
pub use state::{GameState, Outcome};
