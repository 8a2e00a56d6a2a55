//! Query handlers for the turn processing context.
//!
//! This module contains query handlers that load the session document and
//! return read-only view DTOs.

use serde::Serialize;
use sha2::{Digest, Sha256};
use virtueverse_core::error::DomainError;
use virtueverse_core::store::StateStore;

use crate::application::command_handlers::{self, TurnLock};
use crate::domain::state::SessionState;

/// Read-only view of the persisted session.
#[derive(Debug, Serialize)]
pub struct SessionStateView {
    /// SHA-256 of the canonical JSON encoding of `state`, hex encoded.
    pub digest: String,
    /// The session document.
    pub state: SessionState,
}

/// Hex SHA-256 over the compact JSON encoding of the session.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the session cannot be serialized.
pub fn digest_of(state: &SessionState) -> Result<String, DomainError> {
    let bytes = serde_json::to_vec(state)
        .map_err(|e| DomainError::Storage(format!("session serialization failed: {e}")))?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Retrieves the current session, creating the default one if needed.
///
/// Takes the turn lock so a first-run default write cannot overwrite a turn
/// in flight.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the store fails or the document is
/// corrupt.
pub async fn get_current_state(
    lock: &TurnLock,
    store: &dyn StateStore,
) -> Result<SessionStateView, DomainError> {
    let _guard = lock.lock().await;
    let state = command_handlers::load_state(store).await?;
    Ok(SessionStateView {
        digest: digest_of(&state)?,
        state,
    })
}

#[cfg(test)]
mod tests {
    use tokio::sync::Mutex;
    use virtueverse_core::error::DomainError;

    use crate::application::command_handlers::TurnLock;
    use crate::application::query_handlers::{digest_of, get_current_state};
    use crate::domain::state::SessionState;
    use virtueverse_test_support::{FailingStateStore, InMemoryStateStore, MockRng};

    fn lock() -> TurnLock {
        Mutex::new(Box::new(MockRng))
    }

    #[tokio::test]
    async fn test_get_current_state_returns_defaults_for_empty_store() {
        // Arrange
        let store = InMemoryStateStore::new();

        // Act
        let view = get_current_state(&lock(), &store).await.unwrap();

        // Assert
        assert_eq!(view.state, SessionState::default());
        assert_eq!(view.digest.len(), 64);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_digest_changes_with_state() {
        let mut state = SessionState::default();
        let before = digest_of(&state).unwrap();

        state.scene.beat_idx += 1;

        assert_ne!(before, digest_of(&state).unwrap());
    }

    #[tokio::test]
    async fn test_get_current_state_propagates_storage_failure() {
        let result = get_current_state(&lock(), &FailingStateStore).await;

        match result.unwrap_err() {
            DomainError::Storage(msg) => assert!(msg.contains("permission denied")),
            other => panic!("expected Storage, got {other:?}"),
        }
    }
}
