//! Turn processing bounded context.
//!
//! Owns the session document (scene, player character, NPC roster, tension
//! wave and flashpoint), validates inbound narrative turns against language
//! and tier rules, advances the session by one beat and renders the next
//! engine turn.

pub mod application;
pub mod domain;
