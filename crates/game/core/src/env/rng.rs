//! Seeded random source for a single battle.
//!
//! Every random decision in a battle (shuffle-on-empty, random card
//! destruction, Gifted card grants, weighted enemy intent draws) pulls from one
//! [`BattleRng`] in call order. Given the same seed and the same sequence of
//! player inputs, a battle replays identically.

use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Deterministic random stream owned by the battle state.
#[derive(Clone, Debug)]
pub struct BattleRng {
    seed: u64,
    inner: StdRng,
}

impl BattleRng {
    /// Creates a stream from a battle seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`. Returns `None` for an empty range.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.gen_range(0..len))
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Draws an index with probability proportional to its weight.
    ///
    /// Zero weights are never drawn. Returns `None` when no weight is positive.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        if !weights.iter().any(|w| *w > 0) {
            return None;
        }
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.inner))
    }
}
