//! Inbound turn documents for tests.

use serde_json::{Value, json};

/// A well-formed turn against the default session: English narration,
/// Japanese dialogue, tier suggestion 1 and a single move suggestion.
#[must_use]
pub fn sample_turn() -> Value {
    sample_turn_with("Quiet morning.", &["落ち着いて。"], 1)
}

/// A well-formed turn with the given narration, dialogue lines and tier
/// suggestion. Every other field carries a plausible fixed value.
#[must_use]
pub fn sample_turn_with(narration: &str, dialogue: &[&str], tier_suggestion: i64) -> Value {
    let dialogue_jp: Vec<Value> = dialogue
        .iter()
        .map(|line| json!({ "speaker": "Aiko", "line": line }))
        .collect();

    json!({
        "scene_id": "S-001",
        "beat_idx": 0,
        "narration_en": narration,
        "dialogue_jp": dialogue_jp,
        "markers": [
            { "speaker": "Aiko", "trait": "witty", "quirk": "tease", "tone": "light" }
        ],
        "pc_move_suggestions": [
            { "id": "M1", "label": "lean on the railing" },
            { "id": "M2", "label": "change the subject" }
        ],
        "punsys_feedback": { "pressure_hint": 0.4, "tier_suggestion": tier_suggestion },
        "flashpoint_hint": { "prime_level": 0.3, "ready_to_trigger": false },
        "post_scene_breakdown": {
            "translations": [
                { "jp": "落ち着いて。", "kana": "おちついて。", "en": "Calm down." }
            ],
            "vocab": ["落ち着く"]
        }
    })
}
