//! Sides and per-side state.
//!
//! ## Side
//!
//! The two participants: the human `Player` and the `Ai`.
//!
//! ## TurnState
//!
//! Where the active side is within its three rolls.
//!
//! ## PlayerState / AiState
//!
//! The human keeps a full hand, turn state and holds. The AI decides its whole
//! turn at once, so only a summary of its last turn is kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::MAX_ROLLS;
use super::dice::{Hand, HoldMask};

/// One of the two participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player.
    Player,
    /// The computer opponent.
    Ai,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Roll count outside `0..=MAX_ROLLS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("rolls used {0} outside 0..={max}", max = MAX_ROLLS)]
pub struct InvalidRollCount(pub u8);

/// Progress through one turn's rolls.
///
/// Serialized as the number of rolls used, validated on the way back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TurnState {
    /// No roll taken yet this turn.
    #[default]
    AwaitingFirstRoll,
    /// One or two rolls taken; more are allowed.
    AwaitingReroll {
        /// Rolls consumed so far (1 or 2).
        rolls_used: u8,
    },
    /// All rolls consumed; only a commit remains.
    TurnComplete,
}

impl TurnState {
    /// Rolls consumed this turn (0..=3).
    #[must_use]
    pub const fn rolls_used(self) -> u8 {
        match self {
            TurnState::AwaitingFirstRoll => 0,
            TurnState::AwaitingReroll { rolls_used } => rolls_used,
            TurnState::TurnComplete => MAX_ROLLS,
        }
    }

    /// Rolls still available this turn.
    #[must_use]
    pub const fn rolls_left(self) -> u8 {
        MAX_ROLLS.saturating_sub(self.rolls_used())
    }

    /// State after one more roll, or `None` if no rolls remain.
    #[must_use]
    pub const fn after_roll(self) -> Option<Self> {
        Self::from_rolls_used(self.rolls_used().saturating_add(1))
    }

    /// State for a given number of rolls used, or `None` above `MAX_ROLLS`.
    #[must_use]
    pub const fn from_rolls_used(rolls_used: u8) -> Option<Self> {
        match rolls_used {
            0 => Some(TurnState::AwaitingFirstRoll),
            n if n < MAX_ROLLS => Some(TurnState::AwaitingReroll { rolls_used: n }),
            n if n == MAX_ROLLS => Some(TurnState::TurnComplete),
            _ => None,
        }
    }

    /// Whether holds may be changed (at least one roll taken, one remaining).
    #[must_use]
    pub const fn can_hold(self) -> bool {
        matches!(self, TurnState::AwaitingReroll { rolls_used } if rolls_used > 0 && rolls_used < MAX_ROLLS)
    }
}

impl TryFrom<u8> for TurnState {
    type Error = InvalidRollCount;

    fn try_from(rolls_used: u8) -> Result<Self, Self::Error> {
        Self::from_rolls_used(rolls_used).ok_or(InvalidRollCount(rolls_used))
    }
}

impl From<TurnState> for u8 {
    fn from(turn: TurnState) -> Self {
        turn.rolls_used()
    }
}

/// The human side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current dice.
    pub hand: Hand,
    /// Score committed so far this game.
    pub cumulative_score: u32,
    /// Progress through the current turn.
    pub turn: TurnState,
    /// Dice to keep on the next roll.
    pub holds: HoldMask,
}

impl PlayerState {
    /// Fresh player with the given starting hand and no score.
    #[must_use]
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            cumulative_score: 0,
            turn: TurnState::AwaitingFirstRoll,
            holds: HoldMask::empty(),
        }
    }

    /// Sum of the current hand.
    #[must_use]
    pub fn round_total(&self) -> u32 {
        self.hand.total()
    }

    /// Rolls consumed this turn.
    #[must_use]
    pub fn rolls_used(&self) -> u8 {
        self.turn.rolls_used()
    }

    /// Reset for the start of a new turn. The hand stays on display.
    pub fn begin_turn(&mut self) {
        self.turn = TurnState::AwaitingFirstRoll;
        self.holds = HoldMask::empty();
    }
}

/// Summary of the AI side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AiState {
    /// Final hand of the AI's most recent turn; `None` before its first turn.
    pub last_hand: Option<Hand>,
    /// Round total of the AI's most recent turn (0 before its first turn).
    pub last_round_total: u32,
    /// Score committed so far this game.
    pub cumulative_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Ai);
        assert_eq!(Side::Ai.opponent(), Side::Player);
        assert_eq!(Side::Ai.to_string(), "AI");
    }

    #[test]
    fn test_turn_state_progression() {
        let mut turn = TurnState::default();
        let mut seen = vec![turn];
        while let Some(next) = turn.after_roll() {
            turn = next;
            seen.push(turn);
        }

        assert_eq!(
            seen,
            vec![
                TurnState::AwaitingFirstRoll,
                TurnState::AwaitingReroll { rolls_used: 1 },
                TurnState::AwaitingReroll { rolls_used: 2 },
                TurnState::TurnComplete,
            ]
        );
        assert_eq!(turn.rolls_used(), 3);
        assert_eq!(turn.rolls_left(), 0);
    }

    #[test]
    fn test_turn_state_from_rolls_used() {
        for n in 0..=MAX_ROLLS {
            assert_eq!(TurnState::from_rolls_used(n).map(TurnState::rolls_used), Some(n));
        }
        assert_eq!(TurnState::from_rolls_used(4), None);
    }

    #[test]
    fn test_turn_state_serde_validates() {
        let turn = TurnState::AwaitingReroll { rolls_used: 2 };
        assert_eq!(serde_json::to_string(&turn).unwrap(), "2");
        for n in 0..=MAX_ROLLS {
            let parsed: TurnState = serde_json::from_str(&n.to_string()).unwrap();
            assert_eq!(parsed.rolls_used(), n);
        }
        assert!(serde_json::from_str::<TurnState>("4").is_err());
        assert!(serde_json::from_str::<TurnState>("9").is_err());
        assert!(serde_json::from_str::<TurnState>(r#"{"AwaitingReroll":{"rolls_used":9}}"#).is_err());
        assert_eq!(TurnState::try_from(9), Err(InvalidRollCount(9)));
    }

    #[test]
    fn test_malformed_turn_state_does_not_panic() {
        let turn = TurnState::AwaitingReroll { rolls_used: 9 };
        assert_eq!(turn.rolls_left(), 0);
        assert_eq!(turn.after_roll(), None);
        assert!(!turn.can_hold());
        assert_eq!(TurnState::AwaitingReroll { rolls_used: u8::MAX }.after_roll(), None);
        assert!(!TurnState::AwaitingReroll { rolls_used: 0 }.can_hold());
    }

    #[test]
    fn test_can_hold_only_mid_turn() {
        assert!(!TurnState::AwaitingFirstRoll.can_hold());
        assert!(TurnState::AwaitingReroll { rolls_used: 1 }.can_hold());
        assert!(TurnState::AwaitingReroll { rolls_used: 2 }.can_hold());
        assert!(!TurnState::TurnComplete.can_hold());
    }
}
