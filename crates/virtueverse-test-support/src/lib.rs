//! Shared test mocks and fixtures for the VirtueVerse turn engine.

mod fixtures;
mod rng;
mod store;

pub use fixtures::{sample_turn, sample_turn_with};
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingStateStore, InMemoryStateStore, UnwritableStateStore};
