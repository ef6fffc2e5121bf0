//! Injected randomness
//!
//! Every stochastic operation takes a `RandomSource` so that a single seed
//! reproduces a whole run: template choice, affix counts, affix draws and
//! recruit stats all come from the same stream.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random number source
pub trait RandomSource {
    /// Uniform float in `[min, max)`. Returns `min` when the interval is empty.
    fn uniform(&mut self, min: f64, max: f64) -> f64;

    /// Uniform integer in `[min_inclusive, max_exclusive)`.
    /// Returns `min_inclusive` when the range is empty.
    fn range(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64;

    /// Uniform index into a collection of `len` elements
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range(0, len as i64) as usize)
    }
}

/// Deterministic random source backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    fn range(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64 {
        if max_exclusive <= min_inclusive {
            return min_inclusive;
        }
        self.rng.gen_range(min_inclusive..max_exclusive)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        (**self).uniform(min, max)
    }

    fn range(&mut self, min_inclusive: i64, max_exclusive: i64) -> i64 {
        (**self).range(min_inclusive, max_exclusive)
    }
}
