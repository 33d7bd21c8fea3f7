//! Dice, hands and hold masks.
//!
//! ## DieValue
//!
//! A face in 1..=6. The only ways to build one are range-checked, including
//! deserialization, so a [`Hand`] can never hold an impossible face.
//!
//! ## Hand
//!
//! Exactly [`DICE_COUNT`] dice in a fixed order. Positions matter: holds
//! refer to them.
//!
//! ## HoldMask
//!
//! Bit set over die positions `0..DICE_COUNT`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Index;
use thiserror::Error;

use super::rng::RandomSource;

/// Dice per hand.
pub const DICE_COUNT: usize = 5;

/// Positions of dice within a hand, without heap allocation.
pub type DiePositions = SmallVec<[usize; DICE_COUNT]>;

/// Raw value outside 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("die value {0} outside 1..=6")]
pub struct InvalidDieValue(pub u8);

/// Raw hold mask with bits outside the five die positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("hold mask {0:#07b} has bits outside the die positions")]
pub struct InvalidHoldMask(pub u8);

/// One die face, always in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    /// Faces per die.
    pub const FACES: u8 = 6;

    /// Lowest face.
    pub const MIN: DieValue = DieValue(1);

    /// Highest face.
    pub const MAX: DieValue = DieValue(Self::FACES);

    /// Create a die value, or `None` outside 1..=6.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::FACES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Face from a 0-based index, clamped into range.
    pub(crate) fn from_index(index: usize) -> Self {
        Self((index.min(Self::FACES as usize - 1) + 1) as u8)
    }

    /// The face value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based index of the face (value - 1).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for DieValue {
    type Error = InvalidDieValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidDieValue(value))
    }
}

impl From<DieValue> for u8 {
    fn from(value: DieValue) -> Self {
        value.0
    }
}

impl fmt::Display for DieValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five dice belonging to one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand([DieValue; DICE_COUNT]);

impl Hand {
    /// Create a hand from five dice.
    #[must_use]
    pub const fn new(dice: [DieValue; DICE_COUNT]) -> Self {
        Self(dice)
    }

    /// Create a hand from raw values.
    pub fn from_values(values: [u8; DICE_COUNT]) -> Result<Self, InvalidDieValue> {
        let mut dice = [DieValue::MIN; DICE_COUNT];
        for (die, value) in dice.iter_mut().zip(values) {
            *die = DieValue::try_from(value)?;
        }
        Ok(Self(dice))
    }

    /// Roll a completely fresh hand.
    pub fn roll<R: RandomSource + ?Sized>(source: &mut R) -> Self {
        let mut dice = [DieValue::MIN; DICE_COUNT];
        for die in &mut dice {
            *die = source.roll_face();
        }
        Self(dice)
    }

    /// Reroll every die not in `holds`, keeping held dice as they are.
    ///
    /// Dice are drawn in position order.
    #[must_use]
    pub fn reroll_unheld<R: RandomSource + ?Sized>(&self, holds: HoldMask, source: &mut R) -> Self {
        let mut next = *self;
        for (i, die) in next.0.iter_mut().enumerate() {
            if !holds.contains(i) {
                *die = source.roll_face();
            }
        }
        next
    }

    /// Reroll exactly the given positions, in the order given.
    ///
    /// Positions outside the hand are ignored.
    #[must_use]
    pub fn reroll_positions<R: RandomSource + ?Sized>(&self, positions: &[usize], source: &mut R) -> Self {
        let mut next = *self;
        for &pos in positions {
            if let Some(die) = next.0.get_mut(pos) {
                *die = source.roll_face();
            }
        }
        next
    }

    /// Sum of the five faces (5..=30).
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|d| u32::from(d.get())).sum()
    }

    /// The dice in position order.
    #[must_use]
    pub fn dice(&self) -> &[DieValue; DICE_COUNT] {
        &self.0
    }

    /// Raw face values in position order.
    #[must_use]
    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.0.map(DieValue::get)
    }

    /// Iterate over the dice in position order.
    pub fn iter(&self) -> impl Iterator<Item = DieValue> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for Hand {
    type Output = DieValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, die) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{die}")?;
        }
        write!(f, "]")
    }
}

/// Set of die positions to keep on the next roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HoldMask(u8);

impl HoldMask {
    const ALL_BITS: u8 = (1 << DICE_COUNT) - 1;

    /// No dice held.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Hold the given positions, or `None` if any is outside `0..DICE_COUNT`.
    #[must_use]
    pub fn of(indices: &[usize]) -> Option<Self> {
        let mut mask = Self::empty();
        for &i in indices {
            if i >= DICE_COUNT {
                return None;
            }
            mask.0 |= 1 << i;
        }
        Some(mask)
    }

    /// Whether position `index` is held.
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        index < DICE_COUNT && self.0 & (1 << index) != 0
    }

    /// Flip membership of `index`, or `None` if outside `0..DICE_COUNT`.
    #[must_use]
    pub const fn toggled(self, index: usize) -> Option<Self> {
        if index < DICE_COUNT {
            Some(Self(self.0 ^ (1 << index)))
        } else {
            None
        }
    }

    /// Whether nothing is held.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of held dice.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Held positions in ascending order.
    #[must_use]
    pub fn indices(self) -> DiePositions {
        (0..DICE_COUNT).filter(|&i| self.contains(i)).collect()
    }
}

impl TryFrom<u8> for HoldMask {
    type Error = InvalidHoldMask;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !Self::ALL_BITS == 0 {
            Ok(Self(bits))
        } else {
            Err(InvalidHoldMask(bits))
        }
    }
}

impl From<HoldMask> for u8 {
    fn from(mask: HoldMask) -> Self {
        mask.0
    }
}
