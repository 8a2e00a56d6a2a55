//! Deterministic `DeterministicRng` implementations for tests.

use virtueverse_core::rng::DeterministicRng;

/// A no-op RNG that always returns `0.0` from `next_f64`. Suitable for tests
/// that do not depend on specific random values; every wave sample lands on
/// the lower bound.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence, cycling back to
/// the start when exhausted. Used in tests that assert exact wave samples.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given unit-interval values.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceRng needs at least one value");
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index % self.values.len()];
        self.index += 1;
        val
    }
}
