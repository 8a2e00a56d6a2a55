//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use virtueverse_turn::domain::engine::{NpcUpdatePolicy, PressureSource, TransitionPolicy};

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Address to bind.
    pub addr: SocketAddr,
    /// Session document path.
    pub state_path: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Transition engine policy.
    pub policy: TransitionPolicy,
}

impl ApiConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any variable has an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any variable has an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let state_path = lookup("VV_STATE_PATH").map_or_else(|| "state.json".into(), PathBuf::from);

        let rng_seed = lookup("VV_RNG_SEED")
            .map(|s| s.parse::<u64>())
            .transpose()
            .map_err(|e| AppError::Config(format!("VV_RNG_SEED must be a valid u64: {e}")))?;

        let npc_update = match lookup("VV_NPC_POLICY").as_deref() {
            None | Some("first") => NpcUpdatePolicy::FirstOnly,
            Some("all") => NpcUpdatePolicy::All,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "VV_NPC_POLICY must be `first` or `all`, got `{other}`"
                )));
            }
        };
        let pressure_source = match lookup("VV_PRESSURE_SOURCE").as_deref() {
            None | Some("first") => PressureSource::FirstNpc,
            Some("mean") => PressureSource::RosterMean,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "VV_PRESSURE_SOURCE must be `first` or `mean`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            addr,
            state_path,
            rng_seed,
            policy: TransitionPolicy {
                npc_update,
                pressure_source,
            },
        })
    }
}
