//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests and replays,
//! a seeded or recorded implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Generate a random `f64` uniformly in `[min, max)`.
    fn next_f64_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl Default for SystemRng {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicRng for SystemRng {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// RNG with a fixed seed; the same seed always yields the same sequence.
#[derive(Debug)]
pub struct SeededRng(StdRng);

impl SeededRng {
    /// Creates an RNG from a `u64` seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}
