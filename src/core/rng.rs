//! Random sources for dice.
//!
//! The engine never reaches for a global generator. Every roll goes through a
//! [`RandomSource`], so callers choose between:
//!
//! - [`GameRng`]: seeded ChaCha8, deterministic per seed
//! - [`ScriptedDice`]: replays fixed sequences, for tests and demos
//!
//! ```
//! use dice_duel::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll_face(), b.roll_face());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::dice::DieValue;

/// Capability that produces the randomness a game consumes.
pub trait RandomSource {
    /// Roll one fair six-sided die.
    fn roll_face(&mut self) -> DieValue;

    /// Uniform integer in `0..upper`. `upper` must be non-zero.
    fn below(&mut self, upper: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll_face(&mut self) -> DieValue {
        (**self).roll_face()
    }

    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }
}

/// Deterministic RNG backed by ChaCha8.
///
/// Same seed produces the same dice, so a whole session replays from one
/// seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn roll_face(&mut self) -> DieValue {
        DieValue::from_index(self.inner.gen_range(0..DieValue::FACES as usize))
    }

    fn below(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}

/// Replays fixed face and pick sequences, cycling when exhausted.
///
/// Faces feed [`RandomSource::roll_face`]; picks feed
/// [`RandomSource::below`] and are reduced modulo `upper`. With no picks
/// scripted, `below` always answers 0.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<DieValue>,
    picks: Vec<usize>,
    next_face: usize,
    next_pick: usize,
}

impl ScriptedDice {
    /// Script the faces to roll, in order.
    ///
    /// # Panics
    /// Panics if `faces` is empty.
    pub fn new(faces: impl IntoIterator<Item = DieValue>) -> Self {
        let faces: Vec<_> = faces.into_iter().collect();
        assert!(!faces.is_empty(), "ScriptedDice needs at least one face");
        Self {
            faces,
            picks: Vec::new(),
            next_face: 0,
            next_pick: 0,
        }
    }

    /// Script faces from raw values.
    ///
    /// # Panics
    /// Panics if `faces` is empty or any value is outside 1..=6.
    pub fn from_values(faces: &[u8]) -> Self {
        Self::new(faces.iter().map(|&v| {
            DieValue::new(v).unwrap_or_else(|| panic!("scripted face {v} outside 1..=6"))
        }))
    }

    /// Script the answers for `below`, in order.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }

    /// Number of faces consumed so far.
    #[must_use]
    pub fn faces_rolled(&self) -> usize {
        self.next_face
    }
}

impl RandomSource for ScriptedDice {
    fn roll_face(&mut self) -> DieValue {
        let face = self.faces[self.next_face % self.faces.len()];
        self.next_face += 1;
        face
    }

    fn below(&mut self, upper: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next_pick % self.picks.len()];
        self.next_pick += 1;
        pick % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_face(), rng2.roll_face());
            assert_eq!(rng1.below(6), rng2.below(6));
        }
        assert_eq!(rng1.seed(), 42);
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_face()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_face()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_faces_cover_all_values() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[rng.roll_face().index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = GameRng::new(3);
        for upper in 1..10 {
            for _ in 0..50 {
                assert!(rng.below(upper) < upper);
            }
        }
    }

    #[test]
    fn test_scripted_cycles() {
        let mut dice = ScriptedDice::from_values(&[1, 2, 3]);
        let rolled: Vec<u8> = (0..5).map(|_| dice.roll_face().get()).collect();
        assert_eq!(rolled, vec![1, 2, 3, 1, 2]);
        assert_eq!(dice.faces_rolled(), 5);
    }

    #[test]
    fn test_scripted_picks() {
        let mut dice = ScriptedDice::from_values(&[6]).with_picks([4, 9]);
        assert_eq!(dice.below(6), 4);
        assert_eq!(dice.below(6), 3);
        assert_eq!(dice.below(6), 4);

        let mut unscripted = ScriptedDice::from_values(&[6]);
        assert_eq!(unscripted.below(5), 0);
    }

    #[test]
    #[should_panic(expected = "at least one face")]
    fn test_scripted_requires_faces() {
        let _ = ScriptedDice::new(Vec::new());
    }

    #[test]
    #[should_panic(expected = "outside 1..=6")]
    fn test_scripted_rejects_bad_face() {
        let _ = ScriptedDice::from_values(&[7]);
    }
}
