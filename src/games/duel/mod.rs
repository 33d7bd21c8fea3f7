//! Five-dice race to 101 against a simple AI.
//!
//! - The player rolls up to three times per turn, holding dice between rolls
//! - Keeping the score adds the hand's sum and passes the turn
//! - The AI always uses all three rolls, rerolling random dice
//! - After the AI's turn, anyone at 101 or more ends the game; the player
//!   wins only from the threshold and strictly ahead

mod game;

pub use game::DuelGame;
