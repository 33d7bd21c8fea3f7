//! # dice-duel
//!
//! Turn and scoring engine for a five-dice race to 101 against a simple AI.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not shared variables**: every operation takes a
//!    `GameState` and returns a new one, or an error with nothing changed.
//!
//! 2. **Injected randomness**: all dice come from a `RandomSource`, so games
//!    replay exactly from a seed and tests script the faces they need.
//!
//! 3. **Presentation stays outside**: the engine knows nothing about
//!    windows, terminals or timers. The `session` layer adds the AI delay
//!    and menu navigation on top, driven by caller-supplied time.
//!
//! ## Modules
//!
//! - `core`: dice, hands, hold masks, sides, state, intents, RNG, constants
//! - `rules`: RulesEngine trait, scoring and win evaluation, rule errors
//! - `ai`: the computer opponent's reroll policy
//! - `games`: the duel implementation of `RulesEngine`
//! - `session`: intent serialization, AI scheduling, events, configuration
//!
//! ```
//! use dice_duel::{DuelGame, RulesEngine};
//!
//! let mut game = DuelGame::seeded(7);
//! let state = game.start_new_game();
//! let state = game.roll_with_held_dice(&state).unwrap();
//! let state = game.keep_player_score(&state).unwrap();
//! let state = game.run_ai_turn(&state).unwrap();
//! assert!(game.is_terminal(&state).is_none());
//! ```

pub mod core;
pub mod rules;
pub mod ai;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    DieValue, Hand, HoldMask, DICE_COUNT,
    Side, TurnState, PlayerState, AiState,
    GameState, Outcome, Intent,
    GameRng, RandomSource, ScriptedDice,
    MAX_ROLLS, WIN_THRESHOLD,
};

pub use crate::rules::{RulesEngine, GameResult, RuleError, TurnViolation, round_total, evaluate_outcome};

pub use crate::ai::{AiTurn, play_ai_turn, choose_reroll_positions};

pub use crate::games::duel::DuelGame;

pub use crate::session::{Session, SessionConfig, SessionError, SessionEvent};
