//! Injectable randomness for recipe synthesis.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the random draws a generator makes.
///
/// Tests inject a seeded or scripted source to get reproducible recipes.
pub trait RandomSource: Send + std::fmt::Debug {
    /// Uniform integer in `range` (end exclusive). `range` must be non-empty.
    fn next_in_range(&mut self, range: Range<u32>) -> u32;

    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// ChaCha-backed [`RandomSource`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Deterministic stream for a given seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, range: Range<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededRandom::from_seed(42);
        let mut b = SeededRandom::from_seed(42);

        let left: Vec<u32> = (0..16).map(|_| a.next_in_range(100..400)).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_in_range(100..400)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut random = SeededRandom::from_seed(7);
        for _ in 0..1_000 {
            let n = random.next_in_range(8..23);
            assert!((8..23).contains(&n));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut random = SeededRandom::from_seed(1);
        assert!((0..100).all(|_| random.chance(1.0)));
        assert!((0..100).all(|_| !random.chance(0.0)));
    }
}
