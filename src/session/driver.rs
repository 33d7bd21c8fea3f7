//! The session driver.
//!
//! Owns the latest snapshot and the pending AI turn. All intents go through
//! `&mut self`, so they are applied one at a time. The caller supplies the
//! clock: the AI turn is scheduled at `now + ai_delay` and resolved by the
//! first `tick` at or after that instant.

use std::collections::VecDeque;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::SessionConfig;
use super::event::SessionEvent;
use crate::core::{GameRng, GameState, Intent, RandomSource, Side, TurnState};
use crate::games::duel::DuelGame;
use crate::rules::{GameResult, RuleError, RulesEngine};

/// Errors from session operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("no game in progress")]
    NoActiveGame,
}

/// Presentation-facing game driver.
#[derive(Debug)]
pub struct Session<R = GameRng> {
    config: SessionConfig,
    game: DuelGame<R>,
    state: Option<GameState>,
    ai_due_at: Option<Instant>,
    events: VecDeque<SessionEvent>,
}

impl Session<GameRng> {
    /// Session at the outer menu, with dice seeded from `config.seed` or
    /// from entropy.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_source(config, rng)
    }
}

impl<R: RandomSource> Session<R> {
    /// Session at the outer menu drawing dice from `source`.
    pub fn with_source(config: SessionConfig, source: R) -> Self {
        Self {
            config,
            game: DuelGame::new(source),
            state: None,
            ai_due_at: None,
            events: VecDeque::new(),
        }
    }

    /// Session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The latest snapshot, or `None` at the menu.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// When the pending AI turn resolves, if one is pending.
    pub fn ai_due_at(&self) -> Option<Instant> {
        self.ai_due_at
    }

    /// Result of the finished game, if the current game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.state.as_ref().and_then(GameResult::from_state)
    }

    /// Intents the engine would accept now. Empty at the menu.
    pub fn legal_intents(&self) -> Vec<Intent> {
        self.state
            .as_ref()
            .map(|state| self.game.legal_intents(state))
            .unwrap_or_default()
    }

    /// Start a new game, discarding any current one ("New Game" and
    /// "Play Again").
    pub fn start_new_game(&mut self) -> &GameState {
        if self.ai_due_at.take().is_some() {
            debug!("pending AI turn discarded by new game");
        }
        let state = self.game.start_new_game();
        self.events.push_back(SessionEvent::GameStarted);
        self.state.insert(state)
    }

    /// Roll the player's dice, keeping the currently held ones.
    ///
    /// With `auto_keep_on_last_roll`, the third roll also commits the score.
    pub fn roll(&mut self, now: Instant) -> Result<&GameState, SessionError> {
        let state = self.current()?;
        let mut next = self.game.roll_with_held_dice(&state).map_err(rejected)?;
        if self.config.auto_keep_on_last_roll && next.player.turn == TurnState::TurnComplete {
            next = self.game.keep_player_score(&next).map_err(rejected)?;
        }
        Ok(self.commit(next, now))
    }

    /// Flip whether die `index` is held.
    pub fn toggle_hold(&mut self, index: usize) -> Result<&GameState, SessionError> {
        let state = self.current()?;
        let next = self.game.toggle_hold(&state, index).map_err(rejected)?;
        Ok(self.state.insert(next))
    }

    /// Commit the player's round total.
    pub fn keep_score(&mut self, now: Instant) -> Result<&GameState, SessionError> {
        let state = self.current()?;
        let next = self.game.keep_player_score(&state).map_err(rejected)?;
        Ok(self.commit(next, now))
    }

    /// Resolve the AI turn if it is due. Returns whether it ran.
    pub fn tick(&mut self, now: Instant) -> Result<bool, SessionError> {
        match self.ai_due_at {
            Some(due) if now >= due => {}
            _ => return Ok(false),
        }

        let state = self.current()?;
        let (next, turn) = self.game.run_ai_turn_detailed(&state).map_err(rejected)?;
        self.ai_due_at = None;
        self.events.push_back(SessionEvent::AiTurnResolved { turn });
        self.commit(next, now);
        Ok(true)
    }

    /// Leave for the outer menu. The game and any pending AI turn are
    /// discarded without being applied.
    pub fn exit_to_menu(&mut self) {
        if self.ai_due_at.take().is_some() {
            info!("pending AI turn cancelled");
        }
        self.state = None;
        self.events.push_back(SessionEvent::ReturnToMenu);
    }

    /// Take all events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    fn current(&self) -> Result<GameState, SessionError> {
        self.state.ok_or(SessionError::NoActiveGame)
    }

    /// Store `next`, scheduling the AI or announcing the end as needed.
    fn commit(&mut self, next: GameState, now: Instant) -> &GameState {
        if let Some(result) = GameResult::from_state(&next) {
            self.events.push_back(SessionEvent::GameEnded {
                player_won: result.player_won(),
                result,
            });
        } else if next.active_side == Side::Ai && self.ai_due_at.is_none() {
            let delay = self.config.ai_delay();
            self.ai_due_at = Some(now + delay);
            self.events.push_back(SessionEvent::AiTurnScheduled {
                delay_ms: self.config.ai_delay_ms,
            });
            debug!(delay_ms = self.config.ai_delay_ms, "AI turn scheduled");
        }
        self.state.insert(next)
    }
}

fn rejected(err: RuleError) -> SessionError {
    warn!(%err, "intent rejected");
    SessionError::Rule(err)
}
