//! Turn codec: inbound document to engine input, session state to engine turn.

use virtueverse_core::error::DomainError;

use super::state::SessionState;
use super::turn::{Asks, Constraints, EngineTurn, NarrativeTurn};

/// Engine version tag.
pub const ENGINE_VERSION: &str = "v6";
/// Seed reported in every engine turn.
pub const ENGINE_SEED: u64 = 1337;
/// Language mode descriptor.
pub const LANG_MODE: &str = "EN_narration_JP_dialogue";
/// Output length cap for the narrator.
pub const MAX_TOKENS: u32 = 250;
/// Number of player moves the narrator should suggest.
pub const SUGGESTED_MOVES: u32 = 3;
/// Marker categories the narrator should report.
pub const OBSERVED_MARKERS: [&str; 3] = ["trait", "quirk", "tone"];

/// The fields of an inbound turn the engine acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnInput {
    /// Scene the narrator was writing for.
    pub scene_id: String,
    /// Beat the narrator was writing for.
    pub beat_idx: i64,
    /// English narration.
    pub narration: String,
    /// Dialogue lines, speaker dropped.
    pub dialogue: Vec<String>,
    /// Proposed tier.
    pub tier_suggestion: i64,
    /// Move suggestion labels, in order.
    pub move_labels: Vec<String>,
}

impl TurnInput {
    /// Label of the first suggested move.
    #[must_use]
    pub fn first_move(&self) -> Option<&str> {
        self.move_labels.first().map(String::as_str)
    }
}

impl From<NarrativeTurn> for TurnInput {
    fn from(turn: NarrativeTurn) -> Self {
        Self {
            scene_id: turn.scene_id,
            beat_idx: turn.beat_idx,
            narration: turn.narration_en,
            dialogue: turn.dialogue_jp.into_iter().map(|d| d.line).collect(),
            tier_suggestion: turn.punsys_feedback.tier_suggestion,
            move_labels: turn
                .pc_move_suggestions
                .into_iter()
                .map(|m| m.label)
                .collect(),
        }
    }
}

/// Parses a raw inbound turn document.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` if the payload is not JSON or a
/// required field is missing or mistyped.
pub fn decode_turn(payload: &[u8]) -> Result<TurnInput, DomainError> {
    let turn: NarrativeTurn = serde_json::from_slice(payload)
        .map_err(|e| DomainError::MalformedInput(e.to_string()))?;
    Ok(turn.into())
}

/// Renders the session as the next engine turn with the fixed constraints
/// and asks.
#[must_use]
pub fn encode_turn(state: &SessionState) -> EngineTurn {
    EngineTurn {
        version: ENGINE_VERSION,
        seed: ENGINE_SEED,
        lang_mode: LANG_MODE,
        scene: state.scene.clone(),
        pc: state.pc.clone(),
        npcs: state.npcs.clone(),
        punsys: state.punsys.clone(),
        flashpoint: state.flashpoint.clone(),
        constraints: Constraints {
            max_tokens: MAX_TOKENS,
            no_meta: true,
            jp_dialogue_only: true,
            furigana_in_breakdown_only: true,
        },
        asks: Asks {
            render_narration: true,
            suggest_pc_moves: SUGGESTED_MOVES,
            return_observed_markers: OBSERVED_MARKERS.to_vec(),
        },
    }
}
