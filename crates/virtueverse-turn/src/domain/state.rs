//! The persisted session document.

use serde::{Deserialize, Serialize};

/// Number of samples held by the tension wave.
pub const WAVE_LEN: usize = 4;

/// The scene currently being played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier.
    pub id: String,
    /// Tone tag.
    pub tone: String,
    /// Location tag.
    pub location: String,
    /// Beat counter; grows by one per processed turn.
    pub beat_idx: u64,
    /// Scene pressure index.
    #[serde(alias = "scene_pressure_index")]
    pub spi: i64,
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCharacter {
    /// Display name.
    pub name: String,
    /// Stance tag.
    pub stance: String,
    /// Label of the last recorded move, or empty.
    pub last_move: String,
}

/// A non-player character on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonPlayerCharacter {
    /// Character identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Trait tags.
    pub traits: Vec<String>,
    /// Quirk tags.
    pub quirks: Vec<String>,
    /// Relationship value in `[0, 1]`.
    #[serde(alias = "relationship_value")]
    pub rv: f64,
    /// Pressure value in `[0, 1]`.
    #[serde(alias = "pressure_value")]
    pub pv: f64,
    /// Voice style descriptor.
    pub voice_style: String,
}

impl NonPlayerCharacter {
    /// Mean of the relationship and pressure values.
    #[must_use]
    pub fn avg_pressure(&self) -> f64 {
        (self.rv + self.pv) / 2.0
    }
}

/// The tension ("punsys") subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionSystem {
    /// Escalation ceiling for inbound tier suggestions.
    pub tier: u32,
    /// Sampled amplitude history, each value in `[0, 1]`.
    pub wave: [f64; WAVE_LEN],
    /// Gate state tag.
    pub gate: String,
}

/// The flashpoint event trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashpoint {
    /// Whether the trigger can still fire.
    pub armed: bool,
    /// Trigger type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Average pressure at which the trigger fires.
    pub threshold: f64,
    /// Turns left before the threshold is checked again.
    pub cooldown_left: u32,
}

/// The whole session document, persisted as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current scene.
    pub scene: Scene,
    /// Player character.
    #[serde(alias = "player_character")]
    pub pc: PlayerCharacter,
    /// Ordered NPC roster.
    #[serde(alias = "non_player_characters")]
    pub npcs: Vec<NonPlayerCharacter>,
    /// Tension subsystem.
    #[serde(alias = "tension_subsystem")]
    pub punsys: TensionSystem,
    /// Flashpoint subsystem.
    #[serde(alias = "flashpoint_subsystem")]
    pub flashpoint: Flashpoint,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            scene: Scene {
                id: "S-001".to_owned(),
                tone: "slow_burn".to_owned(),
                location: "rooftop".to_owned(),
                beat_idx: 0,
                spi: 3,
            },
            pc: PlayerCharacter {
                name: "Bullet".to_owned(),
                stance: "active".to_owned(),
                last_move: String::new(),
            },
            npcs: vec![NonPlayerCharacter {
                id: "CNPC-1".to_owned(),
                name: "Aiko".to_owned(),
                traits: vec!["witty".to_owned(), "protective".to_owned()],
                quirks: vec!["tease".to_owned(), "soft_dom".to_owned()],
                rv: 0.6,
                pv: 0.4,
                voice_style: "light, clipped".to_owned(),
            }],
            punsys: TensionSystem {
                tier: 2,
                wave: [0.2, 0.4, 0.55, 0.35],
                gate: "open".to_owned(),
            },
            flashpoint: Flashpoint {
                armed: true,
                kind: "jealousy".to_owned(),
                threshold: 0.7,
                cooldown_left: 2,
            },
        }
    }
}
