//! Domain model and pure rules for turn processing.

pub mod codec;
pub mod commands;
pub mod engine;
pub mod state;
pub mod turn;
pub mod validation;
