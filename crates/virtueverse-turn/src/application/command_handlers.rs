//! Command handlers for the turn processing context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the session, validate, advance, persist.

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};
use virtueverse_core::error::DomainError;
use virtueverse_core::rng::DeterministicRng;
use virtueverse_core::store::StateStore;

use crate::domain::codec::{decode_turn, encode_turn};
use crate::domain::commands::ProcessTurn;
use crate::domain::engine::{FlashpointChange, TransitionPolicy, advance};
use crate::domain::state::SessionState;
use crate::domain::turn::EngineTurn;
use crate::domain::validation;

/// Serializes turn processing and owns the wave RNG. Holding the guard is
/// what makes load-advance-save a critical section.
pub type TurnLock = Mutex<Box<dyn DeterministicRng + Send>>;

/// Loads the session document, creating and persisting the default session
/// if none exists.
///
/// # Errors
///
/// Returns `DomainError::Storage` if the store fails or the persisted
/// document does not match the session schema.
pub async fn load_state(store: &dyn StateStore) -> Result<SessionState, DomainError> {
    if let Some(document) = store.load_document().await? {
        return serde_json::from_value(document)
            .map_err(|e| DomainError::Storage(format!("session document is corrupt: {e}")));
    }

    info!("no session document found, writing defaults");
    let state = SessionState::default();
    save_state(store, &state).await?;
    Ok(state)
}

/// Persists the whole session document.
///
/// # Errors
///
/// Returns `DomainError::Storage` if serialization or the store fails.
pub async fn save_state(store: &dyn StateStore, state: &SessionState) -> Result<(), DomainError> {
    let document = serde_json::to_value(state)
        .map_err(|e| DomainError::Storage(format!("session serialization failed: {e}")))?;
    store.save_document(&document).await
}

/// Handles the `ProcessTurn` command: decodes and validates the inbound turn,
/// advances the freshly loaded session, persists it, and renders the next
/// engine turn.
///
/// Nothing is persisted unless every step succeeds.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` for an unreadable payload,
/// `DomainError::Rejected` when a validation rule fails, and
/// `DomainError::Storage` when the session cannot be loaded or saved.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_process_turn(
    command: &ProcessTurn,
    policy: &TransitionPolicy,
    lock: &TurnLock,
    store: &dyn StateStore,
) -> Result<EngineTurn, DomainError> {
    let input =
        decode_turn(&command.payload).inspect_err(|e| warn!(error = %e, "malformed turn"))?;

    // Held until the new session is persisted.
    let mut rng = lock.lock().await;

    let mut state = load_state(store)
        .await
        .inspect_err(|e| error!(error = %e, "failed to load session"))?;

    validation::validate(
        &input.narration,
        &input.dialogue,
        input.tier_suggestion,
        state.punsys.tier,
    )
    .inspect_err(|reason| warn!(%reason, "turn rejected"))?;

    let outcome = advance(&mut state, input.first_move(), policy, &mut **rng);

    save_state(store, &state)
        .await
        .inspect_err(|e| error!(error = %e, "failed to persist session"))?;

    if outcome.flashpoint == FlashpointChange::Fired {
        info!(kind = %state.flashpoint.kind, "flashpoint fired");
    }
    info!(
        beat_idx = outcome.beat_idx,
        avg_pressure = ?outcome.avg_pressure,
        cooldown_left = state.flashpoint.cooldown_left,
        "turn processed"
    );

    Ok(encode_turn(&state))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tokio::sync::Mutex;
    use uuid::Uuid;
    use virtueverse_core::error::{DomainError, Rejection};
    use virtueverse_core::rng::DeterministicRng;

    use crate::application::command_handlers::{
        TurnLock, handle_process_turn, load_state, save_state,
    };
    use crate::domain::commands::ProcessTurn;
    use crate::domain::engine::TransitionPolicy;
    use crate::domain::state::SessionState;
    use virtueverse_test_support::{
        FailingStateStore, InMemoryStateStore, MockRng, SequenceRng, UnwritableStateStore,
        sample_turn, sample_turn_with,
    };

    fn lock_with(rng: impl DeterministicRng + Send + 'static) -> TurnLock {
        Mutex::new(Box::new(rng))
    }

    fn command(turn: &Value) -> ProcessTurn {
        ProcessTurn {
            correlation_id: Uuid::new_v4(),
            payload: serde_json::to_vec(turn).unwrap(),
        }
    }

    fn default_document() -> Value {
        serde_json::to_value(SessionState::default()).unwrap()
    }

    #[tokio::test]
    async fn test_load_state_writes_defaults_when_store_is_empty() {
        // Arrange
        let store = InMemoryStateStore::new();

        // Act
        let state = load_state(&store).await.unwrap();

        // Assert
        assert_eq!(state, SessionState::default());
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.document(), Some(default_document()));
    }

    #[tokio::test]
    async fn test_load_state_reports_corrupt_document_as_storage_error() {
        let store = InMemoryStateStore::with_document(serde_json::json!({ "scene": 1 }));

        let result = load_state(&store).await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn test_save_state_round_trips_through_store() {
        let store = InMemoryStateStore::new();
        let mut state = SessionState::default();
        state.scene.beat_idx = 7;

        save_state(&store, &state).await.unwrap();

        assert_eq!(load_state(&store).await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_handle_process_turn_advances_default_session() {
        // Arrange
        let store = InMemoryStateStore::new();
        let lock = lock_with(SequenceRng::new(vec![0.0, 0.5, 0.3, 0.9999]));

        // Act
        let turn = handle_process_turn(
            &command(&sample_turn()),
            &TransitionPolicy::default(),
            &lock,
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(turn.scene.beat_idx, 1);
        assert_eq!(turn.flashpoint.cooldown_left, 1);
        assert!(turn.flashpoint.armed);
        assert_eq!(turn.pc.last_move, "lean on the railing");
        assert_eq!(turn.punsys.wave, [0.2, 0.45, 0.35, 0.7]);

        let persisted: SessionState = serde_json::from_value(store.document().unwrap()).unwrap();
        assert_eq!(persisted.scene.beat_idx, 1);
        assert_eq!(persisted.punsys.wave, turn.punsys.wave);
    }

    #[tokio::test]
    async fn test_handle_process_turn_increments_beat_each_time() {
        let store = InMemoryStateStore::new();
        let lock = lock_with(MockRng);

        for expected in 1..=5_u64 {
            let turn = handle_process_turn(
                &command(&sample_turn()),
                &TransitionPolicy::default(),
                &lock,
                &store,
            )
            .await
            .unwrap();
            assert_eq!(turn.scene.beat_idx, expected);
        }
    }

    #[tokio::test]
    async fn test_latin_dialogue_is_rejected_without_touching_store() {
        // Arrange
        let store = InMemoryStateStore::with_document(default_document());
        let lock = lock_with(MockRng);
        let turn = sample_turn_with("Quiet morning.", &["Calm down."], 1);

        // Act
        let result =
            handle_process_turn(&command(&turn), &TransitionPolicy::default(), &lock, &store)
                .await;

        // Assert
        match result {
            Err(DomainError::Rejected(reason)) => {
                assert_eq!(reason, Rejection::DialogueScriptLeak);
                assert_eq!(reason.to_string(), "script leakage in dialogue");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.document(), Some(default_document()));
    }

    #[tokio::test]
    async fn test_japanese_narration_is_rejected() {
        let store = InMemoryStateStore::with_document(default_document());
        let lock = lock_with(MockRng);
        let turn = sample_turn_with("静かな朝。", &["落ち着いて。"], 1);

        let result =
            handle_process_turn(&command(&turn), &TransitionPolicy::default(), &lock, &store)
                .await;

        assert!(matches!(
            result,
            Err(DomainError::Rejected(Rejection::NarrationScriptLeak))
        ));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_tier_above_ceiling_is_rejected() {
        let store = InMemoryStateStore::with_document(default_document());
        let lock = lock_with(MockRng);
        let turn = sample_turn_with("Quiet morning.", &["落ち着いて。"], 5);

        let result =
            handle_process_turn(&command(&turn), &TransitionPolicy::default(), &lock, &store)
                .await;

        match result {
            Err(DomainError::Rejected(reason)) => assert_eq!(reason.to_string(), "tier exceeded"),
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert_eq!(store.document(), Some(default_document()));
    }

    #[tokio::test]
    async fn test_malformed_turn_is_distinct_from_rejection() {
        let store = InMemoryStateStore::with_document(default_document());
        let lock = lock_with(MockRng);
        let mut turn = sample_turn();
        turn.as_object_mut().unwrap().remove("narration_en");

        let result =
            handle_process_turn(&command(&turn), &TransitionPolicy::default(), &lock, &store)
                .await;

        assert!(matches!(result, Err(DomainError::MalformedInput(_))));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_store_surfaces_storage_error() {
        let lock = lock_with(MockRng);

        let result = handle_process_turn(
            &command(&sample_turn()),
            &TransitionPolicy::default(),
            &lock,
            &FailingStateStore,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[tokio::test]
    async fn test_unwritable_store_returns_no_snapshot() {
        let lock = lock_with(MockRng);
        let store = UnwritableStateStore::new(Some(default_document()));

        let result = handle_process_turn(
            &command(&sample_turn()),
            &TransitionPolicy::default(),
            &lock,
            &store,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_turns_do_not_lose_updates() {
        // Arrange
        let store = std::sync::Arc::new(InMemoryStateStore::new());
        let lock = std::sync::Arc::new(lock_with(MockRng));

        // Act
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                let lock = lock.clone();
                tokio::spawn(async move {
                    handle_process_turn(
                        &command(&sample_turn()),
                        &TransitionPolicy::default(),
                        &lock,
                        store.as_ref(),
                    )
                    .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // Assert
        let state = load_state(store.as_ref()).await.unwrap();
        assert_eq!(state.scene.beat_idx, 16);
    }
}
