//! Computer opponent.
//!
//! A single fixed, non-strategic policy. The engine applies its result; the
//! policy itself never sees or mutates a `GameState`.

pub mod policy;

pub use policy::{choose_reroll_positions, play_ai_turn, AiTurn};
