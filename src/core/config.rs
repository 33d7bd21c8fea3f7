//! Fixed rule constants.
//!
//! The ruleset is not configurable: five dice, three rolls per turn, first to
//! 101. These constants are the single source for those numbers.

pub use super::dice::DICE_COUNT;

/// Faces per die.
pub const FACES: u8 = super::dice::DieValue::FACES;

/// Rolls a side may take in one turn (one initial roll plus two rerolls).
pub const MAX_ROLLS: u8 = 3;

/// Cumulative score that ends the game.
pub const WIN_THRESHOLD: u32 = 101;

/// Reroll passes the AI makes after its initial roll.
pub const AI_REROLL_PASSES: usize = (MAX_ROLLS - 1) as usize;
