//! Session document storage adapters for the VirtueVerse turn engine.

pub mod file_store;
