//! Inbound narrative turns and outbound engine turns.

use serde::{Deserialize, Serialize};

use super::state::{Flashpoint, NonPlayerCharacter, PlayerCharacter, Scene, TensionSystem};

/// One line of dialogue.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueLine {
    /// Who speaks.
    pub speaker: String,
    /// The spoken line.
    pub line: String,
}

/// A behaviour marker observed in the scene.
#[derive(Debug, Clone, Deserialize)]
pub struct Marker {
    /// Who exhibited it.
    pub speaker: String,
    /// Trait tag.
    #[serde(rename = "trait")]
    pub trait_tag: String,
    /// Quirk tag.
    pub quirk: String,
    /// Tone tag.
    pub tone: String,
}

/// A suggested player move.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveSuggestion {
    /// Suggestion identifier.
    pub id: String,
    /// Human-readable move label.
    pub label: String,
}

/// Tension feedback attached to a turn.
#[derive(Debug, Clone, Deserialize)]
pub struct TensionFeedback {
    /// Pressure hint.
    pub pressure_hint: f64,
    /// Proposed tier; must not exceed the stored tier.
    pub tier_suggestion: i64,
}

/// Flashpoint hint attached to a turn.
#[derive(Debug, Clone, Deserialize)]
pub struct FlashpointHint {
    /// How primed the flashpoint feels.
    pub prime_level: f64,
    /// Whether the narrator believes it is ready to trigger.
    pub ready_to_trigger: bool,
}

/// One line of the post-scene translation breakdown.
#[derive(Debug, Clone, Deserialize)]
pub struct Translation {
    /// Japanese source text.
    pub jp: String,
    /// Kana reading.
    pub kana: String,
    /// English rendering.
    pub en: String,
}

/// The post-scene breakdown.
#[derive(Debug, Clone, Deserialize)]
pub struct Breakdown {
    /// Line-by-line translations.
    pub translations: Vec<Translation>,
    /// Vocabulary list.
    pub vocab: Vec<String>,
}

/// The inbound turn document. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeTurn {
    /// Scene the turn was written for.
    pub scene_id: String,
    /// Beat the turn was written for.
    pub beat_idx: i64,
    /// English narration.
    pub narration_en: String,
    /// Japanese dialogue lines.
    pub dialogue_jp: Vec<DialogueLine>,
    /// Observed markers.
    pub markers: Vec<Marker>,
    /// Suggested player moves; may be empty.
    pub pc_move_suggestions: Vec<MoveSuggestion>,
    /// Tension feedback.
    pub punsys_feedback: TensionFeedback,
    /// Flashpoint hint.
    pub flashpoint_hint: FlashpointHint,
    /// Post-scene breakdown.
    pub post_scene_breakdown: Breakdown,
}

/// Output constraints for the next narrative turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraints {
    /// Output length cap.
    pub max_tokens: u32,
    /// No out-of-world commentary.
    pub no_meta: bool,
    /// Dialogue only in Japanese.
    pub jp_dialogue_only: bool,
    /// Furigana only inside the breakdown.
    pub furigana_in_breakdown_only: bool,
}

/// What the engine asks of the next narrative turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asks {
    /// Render narration.
    pub render_narration: bool,
    /// How many player moves to suggest.
    pub suggest_pc_moves: u32,
    /// Marker categories to report.
    pub return_observed_markers: Vec<&'static str>,
}

/// The outbound turn document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineTurn {
    /// Engine version tag.
    pub version: &'static str,
    /// Fixed seed reported to the narrator.
    pub seed: u64,
    /// Language mode descriptor.
    pub lang_mode: &'static str,
    /// Scene after the transition.
    pub scene: Scene,
    /// Player character after the transition.
    pub pc: PlayerCharacter,
    /// Full NPC roster after the transition.
    pub npcs: Vec<NonPlayerCharacter>,
    /// Tension subsystem after the transition.
    pub punsys: TensionSystem,
    /// Flashpoint after the transition.
    pub flashpoint: Flashpoint,
    /// Fixed output constraints.
    pub constraints: Constraints,
    /// Fixed asks.
    pub asks: Asks,
}
