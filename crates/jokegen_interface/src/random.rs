//! Injectable randomness.
//!
//! The modifier coin flip and the vocabulary index draws are the only
//! nondeterminism in the pipeline. Everything that draws takes a
//! [`RandomSource`] so tests can pin the outcome.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws made while composing a prompt.
pub trait RandomSource: Send + Sync {
    /// Returns true with the given probability, clamped to `[0, 1]`.
    fn chance(&self, probability: f64) -> bool;

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn index(&self, len: usize) -> usize;
}

/// Process-wide randomness backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn chance(&self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible randomness from a fixed seed.
///
/// # Examples
///
/// ```
/// use jokegen_interface::{RandomSource, SeededRandom};
///
/// let a = SeededRandom::new(7);
/// let b = SeededRandom::new(7);
/// assert_eq!(a.index(100), b.index(100));
/// assert_eq!(a.chance(0.5), b.chance(0.5));
/// ```
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn chance(&self, probability: f64) -> bool {
        self.rng.lock().gen_bool(probability.clamp(0.0, 1.0))
    }

    fn index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.lock().gen_range(0..len)
    }
}
