//! Intents: what a side asks the engine to do.
//!
//! The presentation layer forwards user input as intents; the AI's only
//! intent is to play its whole turn. The engine decides whether an intent is
//! legal in the current state.

use serde::{Deserialize, Serialize};

use super::dice::HoldMask;

/// A request to change the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Roll the player's dice, keeping `holds` (ignored on the first roll).
    Roll { holds: HoldMask },
    /// Flip whether die `index` is held for the next roll.
    ToggleHold { index: usize },
    /// Commit the player's round total and pass the turn.
    KeepScore,
    /// Play the AI's full turn.
    RunAi,
}

impl Intent {
    /// Roll without holding anything.
    #[must_use]
    pub const fn roll() -> Self {
        Intent::Roll {
            holds: HoldMask::empty(),
        }
    }

    /// Whether `other` is the same move as this one.
    ///
    /// A roll may carry any hold mask, so every `Roll` covers every other
    /// `Roll`. All other intents must be equal.
    #[must_use]
    pub const fn covers(&self, other: &Intent) -> bool {
        match (self, other) {
            (Intent::Roll { .. }, Intent::Roll { .. }) => true,
            (Intent::ToggleHold { index: a }, Intent::ToggleHold { index: b }) => *a == *b,
            (Intent::KeepScore, Intent::KeepScore) | (Intent::RunAi, Intent::RunAi) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Roll { holds } if holds.is_empty() => write!(f, "roll"),
            Intent::Roll { holds } => write!(f, "roll holding {:?}", holds.indices().as_slice()),
            Intent::ToggleHold { index } => write!(f, "toggle hold {index}"),
            Intent::KeepScore => write!(f, "keep score"),
            Intent::RunAi => write!(f, "AI turn"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_covers() {
        let held = Intent::Roll {
            holds: HoldMask::of(&[0, 1]).unwrap(),
        };
        assert!(Intent::roll().covers(&held));
        assert!(held.covers(&Intent::roll()));
        assert!(Intent::ToggleHold { index: 2 }.covers(&Intent::ToggleHold { index: 2 }));
        assert!(!Intent::ToggleHold { index: 2 }.covers(&Intent::ToggleHold { index: 3 }));
        assert!(Intent::KeepScore.covers(&Intent::KeepScore));
        assert!(!Intent::KeepScore.covers(&Intent::RunAi));
        assert!(!Intent::roll().covers(&Intent::KeepScore));
    }

    #[test]
    fn test_intent_display() {
        assert_eq!(Intent::roll().to_string(), "roll");
        let holds = HoldMask::of(&[0, 2]).unwrap();
        assert_eq!(Intent::Roll { holds }.to_string(), "roll holding [0, 2]");
        assert_eq!(Intent::ToggleHold { index: 3 }.to_string(), "toggle hold 3");
    }

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::Roll {
            holds: HoldMask::of(&[4]).unwrap(),
        };
        let json = serde_json::to_string(&intent).unwrap();
        let deserialized: Intent = serde_json::from_str(&json).unwrap();

        assert_eq!(intent, deserialized);
    }
}
