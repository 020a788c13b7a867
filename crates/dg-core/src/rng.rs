//! Random number generation
//!
//! Uses a seeded ChaCha RNG so a map seed reproduces the same world.
//! Everything that rolls dice takes a [`RandomSource`], which lets tests
//! script the exact rolls with [`FixedRolls`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stream of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`. Returns `lo` when `hi <= lo`.
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32;

    /// Roll in `1..=100`
    fn d100(&mut self) -> i32 {
        self.range_inclusive(1, 100)
    }

    /// Percentage check: succeeds when a d100 roll is `<= chance`.
    ///
    /// A chance of 100 always succeeds, 0 never does.
    fn roll_under(&mut self, chance: i32) -> bool {
        self.d100() <= chance
    }

    /// Uniform index into a collection of `len` elements (0 when empty)
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range_inclusive(0, len as i32 - 1) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        (**self).range_inclusive(lo, hi)
    }
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed in the playable seed range
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen_range(0..=crate::MAX_SEED);
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a fresh seed from this stream (used when a new level needs a new world)
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen_range(0..=crate::MAX_SEED)
    }
}

impl RandomSource for GameRng {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Scripted rolls, consumed in order.
///
/// Each value is clamped into the range being asked for, so a test can say
/// "roll 100" for a percentage check or "roll 12" for a damage roll without
/// caring how the caller phrases the range. Once the script runs dry every
/// request yields its lower bound.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    rolls: VecDeque<i32>,
}

impl FixedRolls {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Queue more rolls behind the existing ones
    pub fn push(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    /// Rolls not consumed yet
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for FixedRolls {
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        let hi = hi.max(lo);
        match self.rolls.pop_front() {
            Some(roll) => roll.clamp(lo, hi),
            None => lo,
        }
    }
}
