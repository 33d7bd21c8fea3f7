//! Rules: the engine seam, scoring, and rejection kinds.
//!
//! Games implement `RulesEngine` to define:
//! - Legal intents for each game state
//! - How intents modify state
//! - Win/loss conditions
//!
//! Scoring lives here rather than in a game so that the win rule has exactly
//! one definition.

pub mod engine;
pub mod error;
pub mod scoring;

pub use engine::{GameResult, RulesEngine};
pub use error::{RuleError, TurnViolation};
pub use scoring::{evaluate_outcome, reached_threshold, round_total};
