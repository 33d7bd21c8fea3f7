//! Notifications a session raises for its presentation layer.

use serde::{Deserialize, Serialize};

use crate::ai::AiTurn;
use crate::rules::GameResult;

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new game began (from the menu or via "play again").
    GameStarted,
    /// Control passed to the AI; its turn resolves after the delay.
    AiTurnScheduled { delay_ms: u64 },
    /// The AI played; `turn` holds every roll for display.
    AiTurnResolved { turn: AiTurn },
    /// The game ended.
    GameEnded { player_won: bool, result: GameResult },
    /// The player left for the outer menu; the game was discarded.
    ReturnToMenu,
}
