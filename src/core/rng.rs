//! Deterministic random number generation.
//!
//! The only randomness in a game is the bag generated at new-game time.
//! A caller-supplied seed makes that fully reproducible; without one the
//! generator is seeded from system entropy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used for bag generation.
///
/// ChaCha8 keeps the sequence identical across platforms for the same
/// seed, which the deterministic-setup tests rely on.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create an RNG from an optional seed, falling back to entropy.
    #[must_use]
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
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
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_seed_option_is_deterministic() {
        let mut rng1 = GameRng::from_seed_or_entropy(Some(7));
        let mut rng2 = GameRng::new(7);

        for _ in 0..10 {
            assert_eq!(rng1.gen_range(0..100), rng2.gen_range(0..100));
        }
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = GameRng::new(0);
        for _ in 0..1000 {
            let n = rng.gen_range(0..5);
            assert!(n < 5);
        }
    }
}
