//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;
use virtueverse_core::rng::DeterministicRng;
use virtueverse_core::store::StateStore;
use virtueverse_turn::application::command_handlers::TurnLock;
use virtueverse_turn::domain::engine::TransitionPolicy;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session document store.
    pub state_store: Arc<dyn StateStore>,
    /// Turn lock and wave RNG.
    pub turn_lock: Arc<TurnLock>,
    /// Transition engine policy.
    pub policy: TransitionPolicy,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        state_store: Arc<dyn StateStore>,
        rng: Box<dyn DeterministicRng + Send>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            state_store,
            turn_lock: Arc::new(Mutex::new(rng)),
            policy,
        }
    }
}
