//! State transition engine.
//!
//! Advances a validated session by exactly one beat. Everything here is
//! deterministic except the tension wave, which draws from the injected RNG.

use virtueverse_core::rng::DeterministicRng;

use super::state::{NonPlayerCharacter, SessionState, WAVE_LEN};

/// Relationship gain per turn.
pub const RELATIONSHIP_STEP: f64 = 0.02;
/// Pressure gain per turn.
pub const PRESSURE_STEP: f64 = 0.03;
/// Cooldown set when the flashpoint fires.
pub const FLASHPOINT_COOLDOWN: u32 = 5;
/// Lower bound of a wave sample.
pub const WAVE_MIN: f64 = 0.2;
/// Upper bound of a wave sample.
pub const WAVE_MAX: f64 = 0.7;

/// Which NPCs gain relationship and pressure each turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NpcUpdatePolicy {
    /// Only the NPC at index 0.
    #[default]
    FirstOnly,
    /// Every NPC on the roster.
    All,
}

/// Where the flashpoint reads its average pressure from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PressureSource {
    /// The NPC at index 0.
    #[default]
    FirstNpc,
    /// Mean over the whole roster.
    RosterMean,
}

/// Knobs for the transition engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionPolicy {
    /// NPC update scope.
    pub npc_update: NpcUpdatePolicy,
    /// Average pressure source.
    pub pressure_source: PressureSource,
}

/// What happened to the flashpoint during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashpointChange {
    /// The cooldown ticked down; no threshold check ran.
    CoolingDown {
        /// Cooldown left after the tick.
        remaining: u32,
    },
    /// The threshold was met and the flashpoint disarmed.
    Fired,
    /// Checked but nothing changed.
    Unchanged,
}

/// Summary of one transition, for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionOutcome {
    /// Beat index after the transition.
    pub beat_idx: u64,
    /// Average pressure used for the flashpoint check, if any NPC exists.
    pub avg_pressure: Option<f64>,
    /// Flashpoint change.
    pub flashpoint: FlashpointChange,
}

/// Advances `state` by one beat.
///
/// `first_move` is the label of the first suggested player move, if any.
/// Callers validate first; this function does not reject.
pub fn advance(
    state: &mut SessionState,
    first_move: Option<&str>,
    policy: &TransitionPolicy,
    rng: &mut dyn DeterministicRng,
) -> TransitionOutcome {
    state.scene.beat_idx = state.scene.beat_idx.saturating_add(1);
    state.pc.last_move = first_move.unwrap_or_default().to_owned();

    match policy.npc_update {
        NpcUpdatePolicy::FirstOnly => {
            if let Some(npc) = state.npcs.first_mut() {
                bump(npc);
            }
        }
        NpcUpdatePolicy::All => state.npcs.iter_mut().for_each(bump),
    }

    let avg_pressure = average_pressure(&state.npcs, policy.pressure_source);

    let fp = &mut state.flashpoint;
    let flashpoint = if fp.cooldown_left > 0 {
        fp.cooldown_left -= 1;
        FlashpointChange::CoolingDown {
            remaining: fp.cooldown_left,
        }
    } else if fp.armed && avg_pressure.is_some_and(|avg| avg >= fp.threshold) {
        fp.armed = false;
        fp.cooldown_left = FLASHPOINT_COOLDOWN;
        FlashpointChange::Fired
    } else {
        FlashpointChange::Unchanged
    };

    state.punsys.wave = sample_wave(rng);

    TransitionOutcome {
        beat_idx: state.scene.beat_idx,
        avg_pressure,
        flashpoint,
    }
}

fn bump(npc: &mut NonPlayerCharacter) {
    npc.rv = (npc.rv + RELATIONSHIP_STEP).min(1.0);
    npc.pv = (npc.pv + PRESSURE_STEP).min(1.0);
}

#[allow(clippy::cast_precision_loss)]
fn average_pressure(npcs: &[NonPlayerCharacter], source: PressureSource) -> Option<f64> {
    match source {
        PressureSource::FirstNpc => npcs.first().map(NonPlayerCharacter::avg_pressure),
        PressureSource::RosterMean => {
            if npcs.is_empty() {
                return None;
            }
            let total: f64 = npcs.iter().map(NonPlayerCharacter::avg_pressure).sum();
            Some(total / npcs.len() as f64)
        }
    }
}

/// Draws a fresh tension wave: uniform in `[WAVE_MIN, WAVE_MAX]`, two decimals.
pub fn sample_wave(rng: &mut dyn DeterministicRng) -> [f64; WAVE_LEN] {
    std::array::from_fn(|_| round2(rng.next_f64_range(WAVE_MIN, WAVE_MAX)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
