//! Duel game implementation.

use tracing::{debug, info};

use crate::ai::{play_ai_turn, AiTurn};
use crate::core::{GameRng, GameState, Hand, HoldMask, Intent, PlayerState, RandomSource, Side, DICE_COUNT};
use crate::rules::{evaluate_outcome, round_total, RuleError, RulesEngine, TurnViolation};

/// The duel engine: rule enforcement over an injected random source.
///
/// Every operation borrows the current snapshot and returns a new one, or an
/// error with nothing changed. The engine keeps no game state of its own;
/// only the random source advances.
#[derive(Clone, Debug)]
pub struct DuelGame<R = GameRng> {
    source: R,
}

impl DuelGame<GameRng> {
    /// Engine backed by a seeded [`GameRng`].
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl<R: RandomSource> DuelGame<R> {
    /// Engine drawing dice from `source`.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Start a fresh game: both scores at zero, the player to move with a
    /// freshly dealt hand on display.
    pub fn start_new_game(&mut self) -> GameState {
        let hand = Hand::roll(&mut self.source);
        info!(%hand, "new game");
        GameState::new(PlayerState::new(hand))
    }

    /// Roll the player's dice.
    ///
    /// The first roll of a turn replaces all five dice and ignores `holds`.
    /// Later rolls replace only the dice not in `holds`. Holds are cleared
    /// afterwards either way.
    pub fn roll_player_dice(&mut self, state: &GameState, holds: HoldMask) -> Result<GameState, RuleError> {
        require_turn(state, Side::Player)?;
        let turn = state.player.turn;
        let next_turn = turn.after_roll().ok_or(TurnViolation::NoRollsLeft)?;

        let mut next = *state;
        next.player.hand = if turn.rolls_used() == 0 {
            Hand::roll(&mut self.source)
        } else {
            state.player.hand.reroll_unheld(holds, &mut self.source)
        };
        next.player.turn = next_turn;
        next.player.holds = HoldMask::empty();

        debug!(
            rolls_used = next_turn.rolls_used(),
            held = ?holds.indices().as_slice(),
            hand = %next.player.hand,
            "player rolled"
        );
        Ok(next)
    }

    /// Roll the player's dice keeping the holds recorded in `state`.
    pub fn roll_with_held_dice(&mut self, state: &GameState) -> Result<GameState, RuleError> {
        self.roll_player_dice(state, state.player.holds)
    }

    /// Flip whether die `index` is held for the next roll.
    ///
    /// Only allowed between rolls: after the first and before the last.
    pub fn toggle_hold(&self, state: &GameState, index: usize) -> Result<GameState, RuleError> {
        let holds = state
            .player
            .holds
            .toggled(index)
            .ok_or(RuleError::IndexOutOfRange { index })?;
        require_turn(state, Side::Player)?;
        match state.player.rolls_used() {
            0 => return Err(TurnViolation::NoRollTaken.into()),
            _ if !state.player.turn.can_hold() => return Err(TurnViolation::NoRollsLeft.into()),
            _ => {}
        }

        let mut next = *state;
        next.player.holds = holds;

        debug!(index, held = next.player.holds.contains(index), "hold toggled");
        Ok(next)
    }

    /// Commit the player's round total and pass the turn to the AI.
    ///
    /// The game is not decided here even if the player reaches the
    /// threshold: the AI always gets its matching turn first.
    pub fn keep_player_score(&self, state: &GameState) -> Result<GameState, RuleError> {
        require_turn(state, Side::Player)?;
        if state.player.rolls_used() == 0 {
            return Err(TurnViolation::NoRollTaken.into());
        }

        let total = round_total(&state.player.hand);
        let mut next = *state;
        next.player.cumulative_score = state.player.cumulative_score.saturating_add(total);
        next.player.begin_turn();
        next.active_side = state.active_side.opponent();

        info!(
            round_total = total,
            score = next.player.cumulative_score,
            rolls_used = state.player.rolls_used(),
            "player kept score"
        );
        Ok(next)
    }

    /// Play the AI's turn and decide whether the game is over.
    pub fn run_ai_turn(&mut self, state: &GameState) -> Result<GameState, RuleError> {
        self.run_ai_turn_detailed(state).map(|(next, _)| next)
    }

    /// Like [`run_ai_turn`](Self::run_ai_turn), also returning every roll
    /// the AI made so a presentation layer can replay them.
    pub fn run_ai_turn_detailed(&mut self, state: &GameState) -> Result<(GameState, AiTurn), RuleError> {
        require_turn(state, Side::Ai)?;

        let turn = play_ai_turn(&mut self.source);
        let total = turn.round_total();

        let mut next = *state;
        next.ai.last_hand = Some(turn.final_hand());
        next.ai.last_round_total = total;
        next.ai.cumulative_score = state.ai.cumulative_score.saturating_add(total);
        next.outcome = evaluate_outcome(next.player.cumulative_score, next.ai.cumulative_score);
        next.active_side = state.active_side.opponent();
        next.player.begin_turn();
        if !next.is_over() {
            next.round += 1;
        }

        info!(
            hand = %turn.final_hand(),
            round_total = total,
            score = next.ai.cumulative_score,
            "AI played"
        );
        if let Some(winner) = next.outcome.winner() {
            info!(
                %winner,
                player_score = next.player.cumulative_score,
                ai_score = next.ai.cumulative_score,
                round = next.round,
                "game over"
            );
        }
        Ok((next, turn))
    }
}

impl<R: RandomSource> RulesEngine for DuelGame<R> {
    fn legal_intents(&self, state: &GameState) -> Vec<Intent> {
        if state.is_over() {
            return vec![];
        }
        if state.active_side == Side::Ai {
            return vec![Intent::RunAi];
        }

        let turn = state.player.turn;
        let mut intents = Vec::new();

        if turn.rolls_left() > 0 {
            intents.push(Intent::Roll {
                holds: state.player.holds,
            });
        }
        if turn.can_hold() {
            intents.extend((0..DICE_COUNT).map(|index| Intent::ToggleHold { index }));
        }
        if turn.rolls_used() > 0 {
            intents.push(Intent::KeepScore);
        }

        intents
    }

    fn apply_intent(&mut self, state: &GameState, intent: Intent) -> Result<GameState, RuleError> {
        match intent {
            Intent::Roll { holds } => self.roll_player_dice(state, holds),
            Intent::ToggleHold { index } => self.toggle_hold(state, index),
            Intent::KeepScore => self.keep_player_score(state),
            Intent::RunAi => self.run_ai_turn(state),
        }
    }
}

/// Reject unless `side` may act in `state`.
fn require_turn(state: &GameState, side: Side) -> Result<(), TurnViolation> {
    if state.is_over() {
        return Err(TurnViolation::GameOver);
    }
    match (side, state.active_side) {
        (Side::Player, Side::Ai) => Err(TurnViolation::NotPlayersTurn),
        (Side::Ai, Side::Player) => Err(TurnViolation::NotAisTurn),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Outcome, ScriptedDice, TurnState};

    fn scripted(faces: &[u8]) -> DuelGame<ScriptedDice> {
        DuelGame::new(ScriptedDice::from_values(faces))
    }

    #[test]
    fn test_new_game() {
        let mut game = scripted(&[2, 3, 4, 5, 6]);
        let state = game.start_new_game();

        assert_eq!(state.player.hand.values(), [2, 3, 4, 5, 6]);
        assert_eq!(state.player.turn, TurnState::AwaitingFirstRoll);
        assert_eq!(state.player.cumulative_score, 0);
        assert_eq!(state.ai.cumulative_score, 0);
        assert_eq!(state.active_side, Side::Player);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_first_roll_ignores_holds() {
        let mut game = scripted(&[1, 1, 1, 1, 1, 6, 6, 6, 6, 6]);
        let state = game.start_new_game();

        let holds = HoldMask::of(&[0, 1, 2, 3, 4]).unwrap();
        let state = game.roll_player_dice(&state, holds).unwrap();

        assert_eq!(state.player.hand.values(), [6, 6, 6, 6, 6]);
        assert_eq!(state.player.rolls_used(), 1);
        assert!(state.player.holds.is_empty());
    }

    #[test]
    fn test_reroll_keeps_held() {
        let mut game = scripted(&[1, 1, 1, 1, 1, 2, 3, 4, 5, 6, 6, 6, 6, 6]);
        let state = game.start_new_game();
        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        assert_eq!(state.player.hand.values(), [2, 3, 4, 5, 6]);

        let state = game.toggle_hold(&state, 2).unwrap();
        let state = game.roll_with_held_dice(&state).unwrap();

        assert_eq!(state.player.hand.values(), [6, 6, 4, 6, 6]);
        assert_eq!(state.player.turn, TurnState::AwaitingReroll { rolls_used: 2 });
        assert!(state.player.holds.is_empty());
    }

    #[test]
    fn test_fourth_roll_rejected() {
        let mut game = DuelGame::seeded(1);
        let mut state = game.start_new_game();
        for _ in 0..3 {
            state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        }
        assert_eq!(state.player.turn, TurnState::TurnComplete);

        let err = game.roll_player_dice(&state, HoldMask::empty()).unwrap_err();
        assert_eq!(err, RuleError::InvalidTurnState(TurnViolation::NoRollsLeft));
    }

    #[test]
    fn test_toggle_hold_rules() {
        let mut game = DuelGame::seeded(2);
        let state = game.start_new_game();

        assert_eq!(
            game.toggle_hold(&state, 7),
            Err(RuleError::IndexOutOfRange { index: 7 })
        );
        assert_eq!(
            game.toggle_hold(&state, 0),
            Err(RuleError::InvalidTurnState(TurnViolation::NoRollTaken))
        );

        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let held = game.toggle_hold(&state, 0).unwrap();
        assert!(held.player.holds.contains(0));
        let released = game.toggle_hold(&held, 0).unwrap();
        assert!(released.player.holds.is_empty());
    }

    #[test]
    fn test_keep_requires_roll() {
        let mut game = DuelGame::seeded(3);
        let state = game.start_new_game();
        assert_eq!(
            game.keep_player_score(&state),
            Err(RuleError::InvalidTurnState(TurnViolation::NoRollTaken))
        );
    }

    #[test]
    fn test_keep_passes_turn() {
        let mut game = scripted(&[1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
        let state = game.start_new_game();
        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let state = game.keep_player_score(&state).unwrap();

        assert_eq!(state.player.cumulative_score, 10);
        assert_eq!(state.active_side, Side::Ai);
        assert_eq!(state.player.turn, TurnState::AwaitingFirstRoll);
        assert_eq!(
            game.roll_player_dice(&state, HoldMask::empty()),
            Err(RuleError::InvalidTurnState(TurnViolation::NotPlayersTurn))
        );
        assert_eq!(
            game.keep_player_score(&state),
            Err(RuleError::InvalidTurnState(TurnViolation::NotPlayersTurn))
        );
    }

    #[test]
    fn test_ai_turn_requires_ai_side() {
        let mut game = DuelGame::seeded(4);
        let state = game.start_new_game();
        assert_eq!(
            game.run_ai_turn(&state),
            Err(RuleError::InvalidTurnState(TurnViolation::NotAisTurn))
        );
    }

    #[test]
    fn test_ai_turn_returns_control() {
        // Every face is 3 and every pick is 0: the AI never rerolls.
        let mut game = scripted(&[3]);
        let state = game.start_new_game();
        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let state = game.keep_player_score(&state).unwrap();

        let (state, turn) = game.run_ai_turn_detailed(&state).unwrap();

        assert_eq!(turn.final_hand().values(), [3, 3, 3, 3, 3]);
        assert_eq!(state.ai.last_hand, Some(turn.final_hand()));
        assert_eq!(state.ai.last_round_total, 15);
        assert_eq!(state.ai.cumulative_score, 15);
        assert_eq!(state.active_side, Side::Player);
        assert_eq!(state.player.turn, TurnState::AwaitingFirstRoll);
        assert_eq!(state.round, 2);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_player_threshold_waits_for_ai() {
        let mut game = scripted(&[6]);
        let mut state = game.start_new_game();
        state.player.cumulative_score = 90;

        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let state = game.keep_player_score(&state).unwrap();

        assert_eq!(state.player.cumulative_score, 120);
        assert_eq!(state.outcome, Outcome::InProgress);
        assert_eq!(state.active_side, Side::Ai);
    }

    #[test]
    fn test_terminal_freezes_everything() {
        let mut game = scripted(&[4]);
        let mut state = game.start_new_game();
        state.player.cumulative_score = 100;
        state.ai.cumulative_score = 100;
        state.active_side = Side::Ai;

        let state = game.run_ai_turn(&state).unwrap();
        assert_eq!(state.outcome, Outcome::AiWon);
        assert_eq!(state.round, 1);

        let over = Err(RuleError::InvalidTurnState(TurnViolation::GameOver));
        assert_eq!(game.roll_player_dice(&state, HoldMask::empty()), over);
        assert_eq!(game.keep_player_score(&state), over);
        assert_eq!(game.toggle_hold(&state, 1), over);
        assert_eq!(game.run_ai_turn(&state), over);
        assert!(game.legal_intents(&state).is_empty());
        assert!(game.is_terminal(&state).is_some());
    }

    #[test]
    fn test_legal_intents_by_phase() {
        let mut game = DuelGame::seeded(9);
        let state = game.start_new_game();
        assert_eq!(game.legal_intents(&state), vec![Intent::roll()]);

        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let intents = game.legal_intents(&state);
        assert!(intents.contains(&Intent::roll()));
        assert!(intents.contains(&Intent::KeepScore));
        assert_eq!(
            intents.iter().filter(|i| matches!(i, Intent::ToggleHold { .. })).count(),
            DICE_COUNT
        );

        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();
        assert_eq!(game.legal_intents(&state), vec![Intent::KeepScore]);

        let state = game.keep_player_score(&state).unwrap();
        assert_eq!(game.legal_intents(&state), vec![Intent::RunAi]);
    }

    #[test]
    fn test_roll_with_any_mask_is_legal() {
        let mut game = DuelGame::seeded(12);
        let state = game.start_new_game();
        let state = game.roll_player_dice(&state, HoldMask::empty()).unwrap();

        let held = Intent::Roll {
            holds: HoldMask::of(&[0, 1]).unwrap(),
        };
        assert!(!game.legal_intents(&state).contains(&held));
        assert!(game.is_legal(&state, held));
        assert!(game.apply_intent(&state, held).is_ok());

        // every intent either is legal and applies, or is not and is rejected
        let mut candidates = vec![Intent::roll(), held, Intent::KeepScore, Intent::RunAi];
        candidates.extend((0..=DICE_COUNT).map(|index| Intent::ToggleHold { index }));
        for intent in candidates {
            let legal = game.is_legal(&state, intent);
            let applied = game.apply_intent(&state, intent).is_ok();
            assert_eq!(legal, applied, "{intent}");
        }
    }

    #[test]
    fn test_apply_intent_dispatch() {
        let mut game = DuelGame::seeded(10);
        let state = game.start_new_game();
        let state = game.apply_intent(&state, Intent::roll()).unwrap();
        let state = game.apply_intent(&state, Intent::ToggleHold { index: 4 }).unwrap();
        assert!(state.player.holds.contains(4));
        let state = game.apply_intent(&state, Intent::KeepScore).unwrap();
        let state = game.apply_intent(&state, Intent::RunAi).unwrap();
        assert_eq!(state.active_side, Side::Player);
        assert!(state.ai.last_hand.is_some());
    }
}
