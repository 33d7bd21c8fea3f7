//! The AI's turn.
//!
//! The opponent is deliberately unsophisticated: it rolls all five dice, then
//! makes exactly two reroll passes. Each pass picks a subset size uniformly
//! from `0..=5`, then that many distinct positions, and rerolls them. It
//! never looks at whether a reroll helps.

use serde::{Deserialize, Serialize};

use crate::core::{DiePositions, Hand, RandomSource, AI_REROLL_PASSES, DICE_COUNT, MAX_ROLLS};

/// Everything the AI did in one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTurn {
    /// Hand after each roll: the initial roll, then one per reroll pass.
    pub hands: [Hand; MAX_ROLLS as usize],
    /// Positions rerolled in each pass, in the order they were drawn.
    pub rerolled: [DiePositions; AI_REROLL_PASSES],
}

impl AiTurn {
    /// The hand the AI ends its turn with.
    #[must_use]
    pub fn final_hand(&self) -> Hand {
        self.hands[MAX_ROLLS as usize - 1]
    }

    /// Round total of the final hand.
    #[must_use]
    pub fn round_total(&self) -> u32 {
        self.final_hand().total()
    }
}

/// Pick the positions for one reroll pass.
///
/// The subset size is drawn first, uniformly from `0..=DICE_COUNT`; the
/// positions are then drawn without replacement by a partial Fisher-Yates
/// shuffle.
pub fn choose_reroll_positions<R: RandomSource + ?Sized>(source: &mut R) -> DiePositions {
    let count = source.below(DICE_COUNT + 1);

    let mut positions: [usize; DICE_COUNT] = std::array::from_fn(|i| i);
    for i in 0..count {
        let j = i + source.below(DICE_COUNT - i);
        positions.swap(i, j);
    }

    positions[..count].iter().copied().collect()
}

/// Play a complete AI turn.
pub fn play_ai_turn<R: RandomSource + ?Sized>(source: &mut R) -> AiTurn {
    let mut hand = Hand::roll(source);
    let mut hands = [hand; MAX_ROLLS as usize];
    let mut rerolled: [DiePositions; AI_REROLL_PASSES] = Default::default();

    for pass in 0..AI_REROLL_PASSES {
        let positions = choose_reroll_positions(source);
        hand = hand.reroll_positions(&positions, source);
        hands[pass + 1] = hand;
        rerolled[pass] = positions;
    }

    AiTurn { hands, rerolled }
}
