//! VirtueVerse Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the turn engine,
//! the storage adapters and the API layer depend on. It contains no
//! infrastructure code.

pub mod error;
pub mod rng;
pub mod store;
